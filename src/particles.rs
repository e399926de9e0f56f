//! Celebration confetti: bursts of particles under gravity that fade out over
//! a fixed number of frames. The engine tells its caller when the frame loop
//! should run so the loop can stop itself once everything has faded.

use crate::config::ParticleConfig;
use crate::random::RandomSource;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    /// Index into the engine's palette.
    pub color: usize,
    pub life: i32,
    pub max_life: i32,
}

impl Particle {
    /// Opacity in [0, 1], proportional to the remaining life.
    pub fn alpha(&self) -> f64 {
        if self.max_life <= 0 {
            return 0.0;
        }
        (self.life as f64 / self.max_life as f64).clamp(0.0, 1.0)
    }
}

/// Advance every particle one frame and drop the ones whose life ran out.
pub fn step_particles(particles: &mut Vec<Particle>, gravity: f64) {
    particles.retain_mut(|p| {
        p.speed_y += gravity;
        p.x += p.speed_x;
        p.y += p.speed_y;
        p.life -= 1;
        p.life > 0
    });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct ParticleEngine {
    cfg: ParticleConfig,
    particles: Vec<Particle>,
    state: EngineState,
}

impl ParticleEngine {
    pub fn new(cfg: ParticleConfig) -> Self {
        Self { cfg, particles: Vec::new(), state: EngineState::Stopped }
    }

    /// Append `count` particles at (x, y). Returns `true` when the engine was
    /// stopped and now has work, i.e. the caller must schedule a frame.
    pub fn spawn(&mut self, x: f64, y: f64, count: usize, rng: &mut impl RandomSource) -> bool {
        let palette_len = self.cfg.palette.len().max(1);
        let max_speed = self.cfg.max_speed;
        self.particles.extend((0..count).map(|_| Particle {
            x,
            y,
            size: rng.range(self.cfg.min_size, self.cfg.max_size),
            speed_x: rng.range(-max_speed, max_speed),
            speed_y: rng.range(-max_speed, max_speed),
            color: rng.index(palette_len),
            life: self.cfg.life,
            max_life: self.cfg.life,
        }));
        if self.state == EngineState::Stopped && !self.particles.is_empty() {
            self.state = EngineState::Running;
            return true;
        }
        false
    }

    /// One animation frame. Reports `Stopped` once the set is empty; no frame
    /// should be requested after that until `spawn` says otherwise.
    pub fn step(&mut self) -> EngineState {
        step_particles(&mut self.particles, self.cfg.gravity);
        if self.particles.is_empty() {
            self.state = EngineState::Stopped;
        }
        self.state
    }

    /// Drop everything, e.g. when the screen is torn down.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.state = EngineState::Stopped;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn color_of(&self, p: &Particle) -> &str {
        self.cfg.palette.get(p.color).map(String::as_str).unwrap_or("#ffffff")
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
