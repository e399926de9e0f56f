//! Canvas surfaces the animators draw on.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::ambient::AmbientField;
use crate::config::AmbientConfig;
use crate::particles::ParticleEngine;

pub(crate) struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface {
    /// Look up a canvas by id and get its 2d context. `None` when either is
    /// unavailable; the animator that needed it simply does not start.
    pub(crate) fn acquire(doc: &Document, id: &str) -> Option<Self> {
        let canvas: HtmlCanvasElement = doc.get_element_by_id(id)?.dyn_into().ok()?;
        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        Some(Self { canvas, ctx })
    }

    pub(crate) fn fit(&self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    pub(crate) fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    pub(crate) fn clear(&self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    pub(crate) fn draw_glyphs(&self, field: &AmbientField, cfg: &AmbientConfig) {
        self.ctx.set_fill_style_str(&cfg.color);
        for g in field.glyphs() {
            self.ctx.set_global_alpha(g.opacity);
            self.ctx.set_font(&format!("{}px Arial", g.size));
            self.ctx.fill_text(&cfg.glyph, g.x, g.y).ok();
        }
        self.ctx.set_global_alpha(1.0);
    }

    pub(crate) fn draw_particles(&self, engine: &ParticleEngine) {
        for p in engine.particles() {
            self.ctx.begin_path();
            self.ctx.set_fill_style_str(engine.color_of(p));
            self.ctx.set_global_alpha(p.alpha());
            self.ctx.arc(p.x, p.y, p.size, 0.0, TAU).ok();
            self.ctx.fill();
            self.ctx.close_path();
        }
        self.ctx.set_global_alpha(1.0);
    }
}
