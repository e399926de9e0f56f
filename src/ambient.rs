//! Background hearts: a fixed pool of glyphs drifting upward and wrapping
//! back to the bottom once they leave the top of the surface.

use crate::config::AmbientConfig;
use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientGlyph {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    pub opacity: f64,
}

/// Move every glyph up by its speed. A glyph that passes `-margin` restarts
/// at exactly `surface_height + margin`.
pub fn update_glyphs(glyphs: &mut [AmbientGlyph], surface_height: f64, margin: f64) {
    for g in glyphs.iter_mut() {
        g.y -= g.speed;
        if g.y < -margin {
            g.y = surface_height + margin;
        }
    }
}

/// Pool of glyphs plus the surface they live on.
#[derive(Clone, Debug)]
pub struct AmbientField {
    glyphs: Vec<AmbientGlyph>,
    width: f64,
    height: f64,
    margin: f64,
    celebrating: bool,
}

impl AmbientField {
    pub fn seed(width: f64, height: f64, cfg: &AmbientConfig, rng: &mut impl RandomSource) -> Self {
        let glyphs = (0..cfg.glyph_count)
            .map(|_| AmbientGlyph {
                x: rng.range(0.0, width),
                y: height + cfg.margin,
                size: rng.range(cfg.min_size, cfg.max_size),
                speed: rng.range(cfg.min_speed, cfg.max_speed),
                opacity: rng.range(cfg.min_opacity, cfg.max_opacity),
            })
            .collect();
        Self { glyphs, width, height, margin: cfg.margin, celebrating: false }
    }

    pub fn update(&mut self) {
        update_glyphs(&mut self.glyphs, self.height, self.margin);
    }

    /// One-time burst for the success screen. Later calls are ignored so the
    /// speed-up never compounds.
    pub fn celebrate(&mut self, speed_factor: f64) {
        if self.celebrating {
            return;
        }
        self.celebrating = true;
        for g in &mut self.glyphs {
            g.speed *= speed_factor;
            g.opacity = 1.0;
        }
    }

    /// Only the surface changes; glyphs outside the new bounds catch up on
    /// their next wrap.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn glyphs(&self) -> &[AmbientGlyph] {
        &self.glyphs
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }
}
