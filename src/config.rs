//! Tunables for the card. `Default` carries the values the card ships with;
//! with the `serde_json` feature a host page may override any subset of them
//! from a JSON string (missing fields fall back to the defaults).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::screen::Screen;

/// Background hearts drifting upward.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AmbientConfig {
    pub glyph_count: usize,
    /// Distance above the top / below the bottom edge where glyphs wrap.
    pub margin: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Speed multiplier applied once when the success screen is entered.
    pub celebrate_speed_factor: f64,
    pub glyph: String,
    pub color: String,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            glyph_count: 30,
            margin: 50.0,
            min_size: 10.0,
            max_size: 20.0,
            min_speed: 1.0,
            max_speed: 3.0,
            min_opacity: 0.2,
            max_opacity: 0.7,
            celebrate_speed_factor: 3.0,
            glyph: "\u{2764}\u{fe0f}".to_string(),
            color: "#ff4d6d".to_string(),
        }
    }
}

/// The runaway "no" button and the growing "yes" button.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EvasionConfig {
    pub radius: f64,
    /// Fraction of the viewport (both axes) covered by the centred safe zone.
    pub safe_zone_fraction: f64,
    /// Rotation is drawn from [-max_rotation_deg, +max_rotation_deg).
    pub max_rotation_deg: f64,
    pub accept_growth: f64,
    /// Growth stops once the accept control is this wide relative to the viewport.
    pub accept_max_width_fraction: f64,
    pub reset_delay_ms: u32,
}

impl Default for EvasionConfig {
    fn default() -> Self {
        Self {
            radius: 130.0,
            safe_zone_fraction: 0.75,
            max_rotation_deg: 20.0,
            accept_growth: 0.15,
            accept_max_width_fraction: 0.8,
            reset_delay_ms: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ParticleConfig {
    pub life: i32,
    pub gravity: f64,
    pub min_size: f64,
    pub max_size: f64,
    /// Both velocity components are drawn from [-max_speed, max_speed).
    pub max_speed: f64,
    pub palette: Vec<String>,
    pub celebration_burst: usize,
    pub trail_burst: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            life: 80,
            gravity: 0.15,
            min_size: 2.0,
            max_size: 6.0,
            max_speed: 5.0,
            palette: ["#ff4d6d", "#ff85a1", "#ffdce0", "#ffffff"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            celebration_burst: 150,
            trail_burst: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LoadingConfig {
    pub tick_ms: u32,
    /// Upper bound of the random progress increment per tick.
    pub max_step: f64,
    pub hide_loader_delay_ms: u32,
    pub reveal_card_delay_ms: u32,
    pub initial_status: String,
    pub status_messages: Vec<String>,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            max_step: 15.0,
            hide_loader_delay_ms: 800,
            reveal_card_delay_ms: 500,
            initial_status: "Initializing...".to_string(),
            status_messages: [
                "Initializing Romance...",
                "Checking Vibe Levels...",
                "Analyzing Heart Rate...",
                "Syncing Cupid's Arrows...",
                "Optimizing Cuteness...",
                "Ready!",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
        }
    }
}

/// DOM ids the web layer looks up. Elements that are missing simply disable
/// the effect that needs them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ElementIds {
    pub background_canvas: String,
    pub success_canvas: String,
    pub decline_wrapper: String,
    pub accept_button: String,
    pub loader: String,
    pub loading_status: String,
    pub loading_bar: String,
    pub card: String,
    pub proposal_screen: String,
    pub ask_screen: String,
    pub success_screen: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            background_canvas: "bg-canvas".to_string(),
            success_canvas: "success-canvas".to_string(),
            decline_wrapper: "no-wrapper".to_string(),
            accept_button: "yes-btn".to_string(),
            loader: "loader".to_string(),
            loading_status: "loading-status".to_string(),
            loading_bar: "loading-bar".to_string(),
            card: "card".to_string(),
            proposal_screen: "screen-proposal".to_string(),
            ask_screen: "screen-ask".to_string(),
            success_screen: "screen-success".to_string(),
        }
    }
}

impl ElementIds {
    /// Id of the container for one screen.
    pub fn screen(&self, screen: Screen) -> &str {
        match screen {
            Screen::Proposal => &self.proposal_screen,
            Screen::Ask => &self.ask_screen,
            Screen::Success => &self.success_screen,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CardConfig {
    pub default_name: String,
    /// Query parameter carrying the personalised name.
    pub name_param: String,
    /// On / off durations in milliseconds, alternating.
    pub haptic_pattern: Vec<u32>,
    pub ambient: AmbientConfig,
    pub evasion: EvasionConfig,
    pub particles: ParticleConfig,
    pub loading: LoadingConfig,
    pub elements: ElementIds,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            default_name: "Cutie".to_string(),
            name_param: "name".to_string(),
            haptic_pattern: vec![100, 50, 100],
            ambient: AmbientConfig::default(),
            evasion: EvasionConfig::default(),
            particles: ParticleConfig::default(),
            loading: LoadingConfig::default(),
            elements: ElementIds::default(),
        }
    }
}

impl CardConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    /// Values that would stall the loading bar are rejected.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        use serde::de::Error as _;

        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate().map_err(serde_json::Error::custom)?;
        Ok(cfg)
    }

    /// Reject settings under which the card could never finish loading.
    pub fn validate(&self) -> Result<(), String> {
        let step = self.loading.max_step;
        if !step.is_finite() || step <= 0.0 {
            return Err(format!("loading.max_step must be a positive number, got {step}"));
        }
        if self.loading.tick_ms == 0 {
            return Err("loading.tick_ms must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Name shown on the card: the query value when present and non-blank,
    /// the configured default otherwise.
    pub fn display_name(&self, from_query: Option<&str>) -> String {
        match from_query.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.default_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_constants() {
        let cfg = CardConfig::default();
        assert_eq!(cfg.ambient.glyph_count, 30);
        assert_eq!(cfg.evasion.radius, 130.0);
        assert_eq!(cfg.evasion.reset_delay_ms, 300);
        assert_eq!(cfg.particles.life, 80);
        assert_eq!(cfg.particles.palette.len(), 4);
        assert_eq!(cfg.haptic_pattern, vec![100, 50, 100]);
        assert_eq!(cfg.loading.status_messages.last().map(String::as_str), Some("Ready!"));
    }

    #[test]
    fn display_name_falls_back_to_default() {
        let cfg = CardConfig::default();
        assert_eq!(cfg.display_name(None), "Cutie");
        assert_eq!(cfg.display_name(Some("   ")), "Cutie");
        assert_eq!(cfg.display_name(Some("Mia")), "Mia");
    }

    #[test]
    fn screen_ids_follow_screens() {
        let ids = ElementIds::default();
        assert_eq!(ids.screen(Screen::Proposal), "screen-proposal");
        assert_eq!(ids.screen(Screen::Ask), "screen-ask");
        assert_eq!(ids.screen(Screen::Success), "screen-success");
    }

    #[test]
    fn validate_rejects_stalled_loading() {
        let mut cfg = CardConfig::default();
        assert!(cfg.validate().is_ok());
        cfg.loading.max_step = 0.0;
        assert!(cfg.validate().is_err());
        cfg.loading.max_step = -3.0;
        assert!(cfg.validate().is_err());
        cfg.loading.max_step = f64::NAN;
        assert!(cfg.validate().is_err());
        cfg.loading.max_step = 15.0;
        cfg.loading.tick_ms = 0;
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_with_non_positive_step_is_rejected() {
        let err = CardConfig::from_json(r#"{"loading":{"max_step":0.0}}"#).unwrap_err();
        assert!(err.to_string().contains("max_step"));
        assert!(CardConfig::from_json(r#"{"loading":{"max_step":-1.0}}"#).is_err());
        assert!(CardConfig::from_json(r#"{"loading":{"max_step":2.5}}"#).is_ok());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = CardConfig::from_json(r#"{"default_name":"Love","evasion":{"radius":90.0}}"#)
            .unwrap();
        assert_eq!(cfg.default_name, "Love");
        assert_eq!(cfg.evasion.radius, 90.0);
        assert_eq!(cfg.evasion.reset_delay_ms, 300);
        assert_eq!(cfg.particles.life, 80);
    }
}
