//! The decline button that runs away from the pointer, and the accept button
//! that grows every time it does.

use crate::config::EvasionConfig;
use crate::random::RandomSource;

/// Axis-aligned box in viewport (CSS pixel) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Centred rectangle covering `fraction` of the viewport on both axes.
pub fn safe_zone(viewport_width: f64, viewport_height: f64, fraction: f64) -> Rect {
    let w = viewport_width * fraction;
    let h = viewport_height * fraction;
    Rect::new((viewport_width - w) / 2.0, (viewport_height - h) / 2.0, w, h)
}

/// Fixed position applied to the decline control after it jumps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub rotation_deg: f64,
}

impl Placement {
    /// Inline style for the wrapper element.
    pub fn to_css(&self) -> String {
        format!(
            "position:fixed; left:{:.2}px; top:{:.2}px; transform:rotate({:.2}deg);",
            self.left, self.top, self.rotation_deg
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EvasionOutcome {
    /// Measurements were missing; nothing changed.
    Skipped,
    Relocated { placement: Placement, accept_scale: f64 },
    /// Pointer is outside the radius and a reset of the running flag was armed.
    /// The caller fires `complete_reset(token)` after `delay_ms`.
    ResetScheduled { token: u64, delay_ms: u32 },
    /// Pointer is outside the radius; an earlier reset is still pending or the
    /// control is already at rest.
    Idle,
}

#[derive(Clone, Debug)]
pub struct EvasionController {
    cfg: EvasionConfig,
    running: bool,
    accept_scale: f64,
    placement: Option<Placement>,
    pending_reset: Option<u64>,
    next_token: u64,
}

impl EvasionController {
    pub fn new(cfg: EvasionConfig) -> Self {
        Self {
            cfg,
            running: false,
            accept_scale: 1.0,
            placement: None,
            pending_reset: None,
            next_token: 0,
        }
    }

    /// React to a pointer or touch position.
    ///
    /// `decline` is the decline control's current bounding box and
    /// `accept_width` the accept control's rendered width; either being `None`
    /// (not rendered yet) skips the event.
    pub fn on_pointer_move(
        &mut self,
        pointer: (f64, f64),
        decline: Option<Rect>,
        accept_width: Option<f64>,
        viewport: (f64, f64),
        rng: &mut impl RandomSource,
    ) -> EvasionOutcome {
        let (Some(rect), Some(accept_width)) = (decline, accept_width) else {
            return EvasionOutcome::Skipped;
        };
        let (cx, cy) = rect.center();
        let dist = (pointer.0 - cx).hypot(pointer.1 - cy);

        if dist >= self.cfg.radius {
            if !self.running || self.pending_reset.is_some() {
                return EvasionOutcome::Idle;
            }
            self.next_token += 1;
            self.pending_reset = Some(self.next_token);
            return EvasionOutcome::ResetScheduled {
                token: self.next_token,
                delay_ms: self.cfg.reset_delay_ms,
            };
        }

        self.running = true;
        self.pending_reset = None;

        let (vw, vh) = viewport;
        let zone = safe_zone(vw, vh, self.cfg.safe_zone_fraction);
        let max_x = (zone.width - rect.width).max(0.0);
        let max_y = (zone.height - rect.height).max(0.0);
        let placement = Placement {
            left: zone.left + rng.next_unit() * max_x,
            top: zone.top + rng.next_unit() * max_y,
            rotation_deg: rng.range(-self.cfg.max_rotation_deg, self.cfg.max_rotation_deg),
        };
        self.placement = Some(placement);

        if accept_width < vw * self.cfg.accept_max_width_fraction {
            self.accept_scale += self.cfg.accept_growth;
        }

        EvasionOutcome::Relocated { placement, accept_scale: self.accept_scale }
    }

    /// Called when the timer armed by `ResetScheduled` fires. Stale tokens
    /// (superseded by a later relocation) are ignored. Returns whether the
    /// running flag was cleared.
    pub fn complete_reset(&mut self, token: u64) -> bool {
        if self.pending_reset != Some(token) {
            return false;
        }
        self.pending_reset = None;
        self.running = false;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn accept_scale(&self) -> f64 {
        self.accept_scale
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Sequence;

    const VIEW: (f64, f64) = (800.0, 600.0);

    fn controller() -> EvasionController {
        EvasionController::new(EvasionConfig::default())
    }

    // Move with a 100px wide accept control in an 800x600 viewport.
    fn move_to(
        c: &mut EvasionController,
        pointer: (f64, f64),
        rect: Rect,
        rng: &mut Sequence,
    ) -> EvasionOutcome {
        c.on_pointer_move(pointer, Some(rect), Some(100.0), VIEW, rng)
    }

    #[test]
    fn safe_zone_is_centred() {
        let z = safe_zone(800.0, 400.0, 0.75);
        assert_eq!(z, Rect::new(100.0, 50.0, 600.0, 300.0));
    }

    #[test]
    fn pointer_on_centre_relocates_inside_zone_at_extremes() {
        let rect = Rect::new(300.0, 300.0, 120.0, 48.0);
        let view = (1024.0, 768.0);
        for v in [0.0, 0.5, 0.999_999] {
            let mut c = controller();
            let mut rng = Sequence::constant(v);
            let out = c.on_pointer_move(rect.center(), Some(rect), Some(100.0), view, &mut rng);
            let EvasionOutcome::Relocated { placement, .. } = out else {
                panic!("expected relocation, got {out:?}");
            };
            let moved = Rect::new(placement.left, placement.top, rect.width, rect.height);
            assert!(safe_zone(1024.0, 768.0, 0.75).contains(&moved));
            assert!((-20.0..20.0).contains(&placement.rotation_deg));
            assert!(c.is_running());
        }
    }

    #[test]
    fn far_pointer_does_not_relocate() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let mut c = controller();
        let out = move_to(&mut c, (50.0 + 130.0, 20.0), rect, &mut Sequence::constant(0.5));
        assert_eq!(out, EvasionOutcome::Idle);
        assert!(c.placement().is_none());
        assert_eq!(c.accept_scale(), 1.0);
    }

    #[test]
    fn running_clears_only_when_reset_fires() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let mut c = controller();
        let mut rng = Sequence::constant(0.5);
        move_to(&mut c, (50.0, 20.0), rect, &mut rng);
        let out = move_to(&mut c, (700.0, 500.0), rect, &mut rng);
        let EvasionOutcome::ResetScheduled { token, delay_ms } = out else {
            panic!("expected scheduled reset, got {out:?}");
        };
        assert_eq!(delay_ms, 300);
        assert!(c.is_running());
        // a second far move does not stack another timer
        let again = move_to(&mut c, (700.0, 500.0), rect, &mut rng);
        assert_eq!(again, EvasionOutcome::Idle);
        assert!(c.complete_reset(token));
        assert!(!c.is_running());
    }

    #[test]
    fn relocation_supersedes_pending_reset() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let mut c = controller();
        let mut rng = Sequence::constant(0.5);
        move_to(&mut c, (50.0, 20.0), rect, &mut rng);
        let EvasionOutcome::ResetScheduled { token, .. } =
            move_to(&mut c, (700.0, 500.0), rect, &mut rng)
        else {
            panic!("expected scheduled reset");
        };
        move_to(&mut c, (50.0, 20.0), rect, &mut rng);
        assert!(!c.complete_reset(token));
        assert!(c.is_running());
    }

    #[test]
    fn accept_grows_until_width_guard() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let mut c = controller();
        let mut rng = Sequence::constant(0.5);
        let view = (1000.0, 800.0);
        c.on_pointer_move((50.0, 20.0), Some(rect), Some(200.0), view, &mut rng);
        c.on_pointer_move((50.0, 20.0), Some(rect), Some(799.0), view, &mut rng);
        assert!((c.accept_scale() - 1.30).abs() < 1e-9);
        c.on_pointer_move((50.0, 20.0), Some(rect), Some(800.0), view, &mut rng);
        assert!((c.accept_scale() - 1.30).abs() < 1e-9);
    }

    #[test]
    fn missing_measurements_skip_event() {
        let mut c = controller();
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let mut rng = Sequence::constant(0.5);
        let out = c.on_pointer_move((50.0, 20.0), None, Some(10.0), VIEW, &mut rng);
        assert_eq!(out, EvasionOutcome::Skipped);
        let out = c.on_pointer_move((50.0, 20.0), Some(rect), None, VIEW, &mut rng);
        assert_eq!(out, EvasionOutcome::Skipped);
        assert!(!c.is_running());
    }

    #[test]
    fn placement_css() {
        let p = Placement { left: 10.0, top: 20.5, rotation_deg: -3.25 };
        assert_eq!(
            p.to_css(),
            "position:fixed; left:10.00px; top:20.50px; transform:rotate(-3.25deg);"
        );
    }
}
