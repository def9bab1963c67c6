//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so hosts can override them from
//! a JSON document. Missing fields fall back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Screen dimensions for one run (read once at run start)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewportSize")]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Unchecked wire form; deserializing goes through [`Viewport::new`]
#[derive(Deserialize)]
struct ViewportSize {
    width: f32,
    height: f32,
}

impl TryFrom<ViewportSize> for Viewport {
    type Error = Error;

    fn try_from(size: ViewportSize) -> Result<Self> {
        Viewport::new(size.width, size.height)
    }
}

impl Viewport {
    /// Build a viewport, rejecting zero, negative and non-finite sizes
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(Error::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Re-check a viewport that may have been built as a struct literal
    pub fn validate(&self) -> Result<()> {
        Self::new(self.width, self.height).map(|_| ())
    }

    /// Vertical distance between neighbouring platforms
    pub fn spacing(&self, platform_count: usize) -> f32 {
        self.height / platform_count as f32
    }

    /// Screen y above which the camera scrolls
    pub fn scroll_line(&self, threshold: f32) -> f32 {
        self.height * threshold
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Velocity applied on a safe landing (negative = up)
    pub bounce_velocity: f32,
    /// Horizontal speed while moving
    pub move_speed: f32,
    /// Player square size
    pub player_size: f32,
    /// Spawn height above the bottom edge
    pub player_spawn_offset: f32,

    // === Platforms ===
    pub platform_width: f32,
    /// Draw height only; landings use the top edge
    pub platform_thickness: f32,
    /// Active platforms kept alive at all times
    pub platform_count: usize,
    /// Probability a new platform is hazardous
    pub hazard_chance: f64,
    pub drift_min: f32,
    pub drift_max: f32,
    /// Vertical jitter as a fraction of spacing
    pub jitter_fraction: f32,

    // === Camera ===
    /// Fraction of screen height where scrolling kicks in
    pub scroll_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            bounce_velocity: BOUNCE_VELOCITY,
            move_speed: MOVE_SPEED,
            player_size: PLAYER_SIZE,
            player_spawn_offset: PLAYER_SPAWN_OFFSET,

            platform_width: PLATFORM_WIDTH,
            platform_thickness: PLATFORM_THICKNESS,
            platform_count: PLATFORM_COUNT,
            hazard_chance: HAZARD_CHANCE,
            drift_min: DRIFT_MIN,
            drift_max: DRIFT_MAX,
            jitter_fraction: JITTER_FRACTION,

            scroll_threshold: SCROLL_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
            Error::InvalidTuning {
                field,
                reason: reason.into(),
            }
        }

        let positive = [
            ("gravity", self.gravity),
            ("player_size", self.player_size),
            ("platform_width", self.platform_width),
            ("platform_thickness", self.platform_thickness),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("{value} must be positive")));
            }
        }

        if !(self.bounce_velocity.is_finite() && self.bounce_velocity < 0.0) {
            return Err(invalid("bounce_velocity", "must be negative (upward)"));
        }
        if !(self.move_speed.is_finite() && self.move_speed >= 0.0) {
            return Err(invalid("move_speed", "must be zero or positive"));
        }
        if !self.player_spawn_offset.is_finite() {
            return Err(invalid("player_spawn_offset", "must be finite"));
        }
        if self.platform_count == 0 {
            return Err(invalid("platform_count", "at least one platform is required"));
        }
        if !(0.0..=1.0).contains(&self.hazard_chance) {
            return Err(invalid("hazard_chance", "must be within [0, 1]"));
        }
        if !(self.drift_min.is_finite() && self.drift_min >= 0.0) {
            return Err(invalid("drift_min", "must be zero or positive"));
        }
        if !(self.drift_max.is_finite() && self.drift_max >= self.drift_min) {
            return Err(invalid("drift_max", "must be at least drift_min"));
        }
        if !(0.0..0.5).contains(&self.jitter_fraction) {
            return Err(invalid("jitter_fraction", "must be within [0, 0.5)"));
        }
        if !(self.scroll_threshold > 0.0 && self.scroll_threshold < 1.0) {
            return Err(invalid("scroll_threshold", "must be within (0, 1)"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.platform_count, 7);
        assert_eq!(tuning.bounce_velocity, -15.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.8, "platform_count": 9 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.platform_count, 9);
        assert_eq!(tuning.platform_width, PLATFORM_WIDTH);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = Tuning::from_json(r#"{ "hazard_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning { field: "hazard_chance", .. }));

        let err = Tuning::from_json(r#"{ "drift_min": 4.0, "drift_max": 2.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning { field: "drift_max", .. }));

        let err = Tuning::from_json(r#"{ "platform_count": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning { field: "platform_count", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{ gravity"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_viewport_validation() {
        assert!(Viewport::new(400.0, 800.0).is_ok());
        assert!(Viewport::new(0.0, 800.0).is_err());
        assert!(Viewport::new(400.0, -1.0).is_err());
        assert!(Viewport::new(f32::NAN, 800.0).is_err());
        assert!(Viewport::new(400.0, f32::INFINITY).is_err());

        let literal = Viewport {
            width: 400.0,
            height: 0.0,
        };
        assert!(matches!(literal.validate(), Err(Error::InvalidViewport { .. })));
    }

    #[test]
    fn test_viewport_deserialize_is_checked() {
        let json = r#"{ "width": 390, "height": 844 }"#;
        let viewport: Viewport = serde_json::from_str(json).unwrap();
        assert_eq!(viewport, Viewport::new(390.0, 844.0).unwrap());

        assert!(serde_json::from_str::<Viewport>(r#"{ "width": 0, "height": 844 }"#).is_err());
        assert!(serde_json::from_str::<Viewport>(r#"{ "width": 390, "height": -5 }"#).is_err());
    }

    #[test]
    fn test_spacing() {
        let viewport = Viewport::new(400.0, 800.0).unwrap();
        assert!((viewport.spacing(7) - 114.285_71).abs() < 0.001);
        assert_eq!(viewport.scroll_line(0.4), 320.0);
    }
}
