//! Small DOM helpers. Every lookup tolerates a missing element.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, UrlSearchParams, Window};

use crate::evasion::Rect;

pub(crate) fn set_hidden(doc: &Document, id: &str, hidden: bool) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.class_list().toggle_with_force("hidden", hidden).ok();
    }
}

pub(crate) fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub(crate) fn set_style_property(doc: &Document, id: &str, prop: &str, value: &str) {
    if let Some(el) = doc.get_element_by_id(id).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
        el.style().set_property(prop, value).ok();
    }
}

pub(crate) fn set_attribute(doc: &Document, id: &str, name: &str, value: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_attribute(name, value).ok();
    }
}

/// Bounding box of an element in viewport coordinates, `None` if it is not in the document.
pub(crate) fn measure(doc: &Document, id: &str) -> Option<Rect> {
    let r = doc.get_element_by_id(id)?.get_bounding_client_rect();
    Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
}

pub(crate) fn viewport(win: &Window) -> (f64, f64) {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

pub(crate) fn query_param(win: &Window, key: &str) -> Option<String> {
    let search = win.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get(key)
}

/// Fill every `[data-card-name]` element with the given name.
pub(crate) fn apply_name(doc: &Document, name: &str) {
    let Ok(nodes) = doc.query_selector_all("[data-card-name]") else {
        return;
    };
    for i in 0..nodes.length() {
        if let Some(node) = nodes.get(i) {
            node.set_text_content(Some(name));
        }
    }
}

/// Vibrate with an on/off pattern when the device supports it. Returns
/// whether a vibration was issued.
pub(crate) fn vibrate(win: &Window, pattern: &[u32]) -> bool {
    let nav = win.navigator();
    if !js_sys::Reflect::has(&nav, &JsValue::from_str("vibrate")).unwrap_or(false) {
        return false;
    }
    let arr: js_sys::Array = pattern.iter().map(|&ms| JsValue::from(ms)).collect();
    nav.vibrate_with_pattern(&arr)
}
