//! Browser side of the card: owns the canvases, timers, frame loops and
//! listeners, and feeds pointer input into the engines.
//!
//! All runtime state lives in one `CardState` behind a thread-local. Every
//! pending callback is an owned gloo handle stored in `Handles`, so taking the
//! state out (`stop_card`) cancels frames, timers and listeners in one drop.

mod dom;
mod surface;

use std::cell::RefCell;

use gloo::console;
use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, MouseEvent, TouchEvent, Window, window};

use crate::ambient::AmbientField;
use crate::config::CardConfig;
use crate::evasion::{EvasionController, EvasionOutcome};
use crate::loading::LoadingSequence;
use crate::particles::{EngineState, ParticleEngine};
use crate::random::EntropySource;
use crate::screen::{CardFlow, PointerRoute, Screen};

use surface::Surface;

#[derive(Default)]
struct Handles {
    loading: Option<Interval>,
    transition: Option<Timeout>,
    ambient_frame: Option<AnimationFrame>,
    success_frame: Option<AnimationFrame>,
    evasion_reset: Option<Timeout>,
    listeners: Vec<EventListener>,
}

struct CardState {
    win: Window,
    doc: Document,
    cfg: CardConfig,
    rng: EntropySource,
    flow: CardFlow,
    loading: LoadingSequence,
    background: Option<Surface>,
    success: Option<Surface>,
    ambient: Option<AmbientField>,
    evasion: EvasionController,
    particles: ParticleEngine,
    handles: Handles,
}

thread_local! {
    static CARD_STATE: RefCell<Option<CardState>> = const { RefCell::new(None) };
}

fn with_state<R>(f: impl FnOnce(&mut CardState) -> R) -> Option<R> {
    CARD_STATE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

// --- Exported entry points ---------------------------------------------------

#[wasm_bindgen]
pub fn start_card() -> Result<(), JsValue> {
    start_with(CardConfig::default())
}

/// Same as `start_card` with a partial JSON override of the defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_card_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = CardConfig::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("invalid card config: {e}")))?;
    start_with(cfg)
}

#[wasm_bindgen]
pub fn go_to_ask() -> bool {
    with_state(|s| {
        if !s.flow.go_to_ask() {
            return false;
        }
        show_screen(s);
        true
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn celebrate() -> bool {
    with_state(|s| {
        if !s.flow.celebrate() {
            return false;
        }
        show_screen(s);
        // the decline control is gone; a pending flag reset has nothing left to do
        s.handles.evasion_reset = None;
        if let Some(field) = s.ambient.as_mut() {
            field.celebrate(s.cfg.ambient.celebrate_speed_factor);
        }
        if dom::vibrate(&s.win, &s.cfg.haptic_pattern) {
            console::debug!("haptic pattern issued");
        }
        start_success(s);
        true
    })
    .unwrap_or(false)
}

/// Tear everything down: cancels the loading timer, both frame loops, the
/// evasion reset timer and all listeners.
#[wasm_bindgen]
pub fn stop_card() {
    let state = CARD_STATE.with(|cell| cell.borrow_mut().take());
    if state.is_some() {
        console::log!("card stopped");
    }
    drop(state);
}

#[wasm_bindgen]
pub fn loading_progress() -> f64 {
    with_state(|s| s.loading.progress()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn accept_scale() -> f64 {
    with_state(|s| s.evasion.accept_scale()).unwrap_or(1.0)
}

#[wasm_bindgen]
pub fn particle_count() -> usize {
    with_state(|s| s.particles.len()).unwrap_or(0)
}

// --- Startup & loading -------------------------------------------------------

fn start_with(cfg: CardConfig) -> Result<(), JsValue> {
    // never two animators on the same canvas
    stop_card();

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let name = cfg.display_name(dom::query_param(&win, &cfg.name_param).as_deref());
    dom::apply_name(&doc, &name);
    dom::set_text(&doc, &cfg.elements.loading_status, &cfg.loading.initial_status);
    dom::set_hidden(&doc, &cfg.elements.loader, false);
    dom::set_hidden(&doc, &cfg.elements.card, true);

    let mut state = CardState {
        win: win.clone(),
        doc,
        rng: EntropySource::new(),
        flow: CardFlow::default(),
        loading: LoadingSequence::new(cfg.loading.clone()),
        background: None,
        success: None,
        ambient: None,
        evasion: EvasionController::new(cfg.evasion.clone()),
        particles: ParticleEngine::new(cfg.particles.clone()),
        handles: Handles::default(),
        cfg,
    };
    show_screen(&state);
    state.handles.listeners = install_listeners(&win);
    state.handles.loading = Some(Interval::new(state.cfg.loading.tick_ms, loading_tick));

    CARD_STATE.with(|cell| cell.replace(Some(state)));
    console::log!("card started for", name);
    Ok(())
}

fn loading_tick() {
    with_state(|s| {
        let tick = s.loading.tick(&mut s.rng);
        dom::set_text(&s.doc, &s.cfg.elements.loading_status, &tick.status);
        let width = format!("{:.0}%", tick.progress);
        dom::set_style_property(&s.doc, &s.cfg.elements.loading_bar, "width", &width);
        if tick.finished {
            s.handles.loading = None;
            let delay = s.cfg.loading.hide_loader_delay_ms;
            s.handles.transition = Some(Timeout::new(delay, hide_loader));
        }
    });
}

fn hide_loader() {
    with_state(|s| {
        dom::set_hidden(&s.doc, &s.cfg.elements.loader, true);
        let delay = s.cfg.loading.reveal_card_delay_ms;
        s.handles.transition = Some(Timeout::new(delay, reveal_card));
    });
}

fn reveal_card() {
    with_state(|s| {
        s.handles.transition = None;
        s.flow.reveal();
        dom::set_hidden(&s.doc, &s.cfg.elements.card, false);
        show_screen(s);
        start_ambient(s);
    });
}

/// Show the container of the current screen and hide the other two.
fn show_screen(s: &CardState) {
    let current = s.flow.screen();
    for screen in [Screen::Proposal, Screen::Ask, Screen::Success] {
        dom::set_hidden(&s.doc, s.cfg.elements.screen(screen), screen != current);
    }
}

// --- Ambient loop ------------------------------------------------------------

fn start_ambient(s: &mut CardState) {
    let Some(surface) = Surface::acquire(&s.doc, &s.cfg.elements.background_canvas) else {
        console::warn!("background canvas unavailable, ambient hearts disabled");
        return;
    };
    let (w, h) = dom::viewport(&s.win);
    surface.fit(w, h);
    s.ambient = Some(AmbientField::seed(w, h, &s.cfg.ambient, &mut s.rng));
    s.background = Some(surface);
    s.handles.ambient_frame = Some(request_animation_frame(ambient_frame));
}

fn ambient_frame(_ts: f64) {
    with_state(|s| {
        let (Some(surface), Some(field)) = (s.background.as_ref(), s.ambient.as_mut()) else {
            s.handles.ambient_frame = None;
            return;
        };
        surface.clear();
        field.update();
        surface.draw_glyphs(field, &s.cfg.ambient);
        s.handles.ambient_frame = Some(request_animation_frame(ambient_frame));
    });
}

// --- Celebration loop --------------------------------------------------------

fn start_success(s: &mut CardState) {
    let Some(surface) = Surface::acquire(&s.doc, &s.cfg.elements.success_canvas) else {
        console::warn!("success canvas unavailable, particles disabled");
        return;
    };
    let (w, h) = dom::viewport(&s.win);
    surface.fit(w, h);
    s.success = Some(surface);
    s.particles.clear();
    let burst = s.cfg.particles.celebration_burst;
    if s.particles.spawn(w / 2.0, h / 3.0, burst, &mut s.rng) {
        s.handles.success_frame = Some(request_animation_frame(success_frame));
    }
}

fn success_frame(_ts: f64) {
    with_state(|s| {
        let Some(surface) = s.success.as_ref() else {
            s.handles.success_frame = None;
            return;
        };
        surface.clear();
        let state = s.particles.step();
        surface.draw_particles(&s.particles);
        s.handles.success_frame = match state {
            EngineState::Running => Some(request_animation_frame(success_frame)),
            EngineState::Stopped => None,
        };
    });
}

// --- Input -------------------------------------------------------------------

fn install_listeners(win: &Window) -> Vec<EventListener> {
    vec![
        EventListener::new(win, "mousemove", |event: &Event| {
            if let Some(e) = event.dyn_ref::<MouseEvent>() {
                on_pointer(e.client_x() as f64, e.client_y() as f64);
            }
        }),
        EventListener::new(win, "touchmove", |event: &Event| {
            let touch = event.dyn_ref::<TouchEvent>().and_then(|e| e.touches().get(0));
            if let Some(t) = touch {
                on_pointer(t.client_x() as f64, t.client_y() as f64);
            }
        }),
        EventListener::new(win, "resize", |_event: &Event| on_resize()),
    ]
}

fn on_pointer(x: f64, y: f64) {
    with_state(|s| match s.flow.route_pointer() {
        PointerRoute::Ignore => {}
        PointerRoute::Evade => evade(s, x, y),
        PointerRoute::Trail => {
            if s.success.is_none() {
                return;
            }
            let count = s.cfg.particles.trail_burst;
            if s.particles.spawn(x, y, count, &mut s.rng) {
                s.handles.success_frame = Some(request_animation_frame(success_frame));
            }
        }
    });
}

fn evade(s: &mut CardState, x: f64, y: f64) {
    let ids = &s.cfg.elements;
    let decline = dom::measure(&s.doc, &ids.decline_wrapper);
    let accept_width = dom::measure(&s.doc, &ids.accept_button).map(|r| r.width);
    let viewport = dom::viewport(&s.win);
    match s.evasion.on_pointer_move((x, y), decline, accept_width, viewport, &mut s.rng) {
        EvasionOutcome::Relocated { placement, accept_scale } => {
            dom::set_attribute(&s.doc, &ids.decline_wrapper, "style", &placement.to_css());
            dom::set_attribute(&s.doc, &ids.decline_wrapper, "data-running", "true");
            let scale = format!("scale({accept_scale:.2})");
            dom::set_style_property(&s.doc, &ids.accept_button, "transform", &scale);
        }
        EvasionOutcome::ResetScheduled { token, delay_ms } => {
            let reset = Timeout::new(delay_ms, move || finish_evasion_reset(token));
            s.handles.evasion_reset = Some(reset);
        }
        EvasionOutcome::Idle | EvasionOutcome::Skipped => {}
    }
}

fn finish_evasion_reset(token: u64) {
    with_state(|s| {
        s.handles.evasion_reset = None;
        if s.evasion.complete_reset(token) {
            dom::set_attribute(&s.doc, &s.cfg.elements.decline_wrapper, "data-running", "false");
        }
    });
}

fn on_resize() {
    with_state(|s| {
        let (w, h) = dom::viewport(&s.win);
        if let Some(surface) = s.background.as_ref() {
            surface.fit(w, h);
        }
        if let Some(field) = s.ambient.as_mut() {
            field.resize(w, h);
        }
        if let Some(surface) = s.success.as_ref() {
            surface.fit(w, h);
        }
    });
}
