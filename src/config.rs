//! Game tuning and playfield validation
//!
//! All values are in playfield units and per simulation tick. A config is
//! checked once against the playfield before a session may start; nothing is
//! re-validated while ticking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::GAP_MARGIN;

/// Reasons a configuration or playfield is refused
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("target_score must be at least 1")]
    ZeroTarget,
    #[error("obstacle_spacing {spacing} / obstacle_speed {speed} gives a spawn cadence of zero ticks")]
    ZeroCadence { spacing: f32, speed: f32 },
    #[error("playfield height {height} is too short, need more than {required}")]
    PlayfieldTooShort { height: f32, required: f32 },
    #[error("playfield width {width} must be greater than zero")]
    PlayfieldTooNarrow { width: f32 },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Tunable game parameters, immutable for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Obstacles to pass for a victory
    pub target_score: u32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Velocity set by a flap (negative = up)
    pub flap_power: f32,
    /// Edge length of the actor's square bounding box
    pub actor_size: f32,
    /// Fixed horizontal position of the actor's left edge
    pub actor_x: f32,
    pub obstacle_width: f32,
    /// Vertical opening between top and bottom pillars
    pub gap_size: f32,
    /// Leftward obstacle movement per tick
    pub obstacle_speed: f32,
    /// Horizontal distance between consecutive obstacles
    pub obstacle_spacing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: 20,
            gravity: 0.25,
            flap_power: -6.0,

            actor_size: 60.0,
            actor_x: 100.0,

            obstacle_width: 70.0,
            gap_size: 300.0,
            obstacle_speed: 2.0,
            obstacle_spacing: 300.0,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Ticks between obstacle spawns.
    ///
    /// Derived from distance over speed, so changing the speed also changes the
    /// on-screen spacing.
    pub fn spawn_cadence(&self) -> u64 {
        (self.obstacle_spacing / self.obstacle_speed).floor() as u64
    }

    /// Check values that do not depend on the playfield
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("gravity", self.gravity),
            ("flap_power", self.flap_power),
            ("actor_size", self.actor_size),
            ("actor_x", self.actor_x),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_spacing", self.obstacle_spacing),
        ];
        for (field, value) in values {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let positive = [
            ("actor_size", self.actor_size),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_spacing", self.obstacle_spacing),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.target_score == 0 {
            return Err(ConfigError::ZeroTarget);
        }

        let ratio = self.obstacle_spacing / self.obstacle_speed;
        if !ratio.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "obstacle_spacing / obstacle_speed",
                value: ratio,
            });
        }

        if self.spawn_cadence() == 0 {
            return Err(ConfigError::ZeroCadence {
                spacing: self.obstacle_spacing,
                speed: self.obstacle_speed,
            });
        }

        Ok(())
    }

    /// Check this config against a playfield.
    ///
    /// The gap must fit between the top and bottom margins, otherwise spawning
    /// would draw from an empty range.
    pub fn validate_for(&self, playfield: Playfield) -> Result<(), ConfigError> {
        self.validate()?;
        playfield.validate()?;

        let required = (self.gap_size + 2.0 * GAP_MARGIN).max(self.actor_size);
        if playfield.height <= required {
            return Err(ConfigError::PlayfieldTooShort {
                height: playfield.height,
                required,
            });
        }

        Ok(())
    }
}

/// Host-supplied drawing area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.width.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "playfield width",
                value: self.width,
            });
        }
        if !self.height.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "playfield height",
                value: self.height,
            });
        }
        if self.width <= 0.0 {
            return Err(ConfigError::PlayfieldTooNarrow { width: self.width });
        }
        Ok(())
    }
}

impl Default for Playfield {
    fn default() -> Self {
        use crate::consts::{DEFAULT_PLAYFIELD_HEIGHT, DEFAULT_PLAYFIELD_WIDTH};
        Self::new(DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate_for(Playfield::default()).is_ok());
        assert_eq!(config.spawn_cadence(), 150);
    }

    #[test]
    fn test_zero_speed_is_rejected() {
        let config = GameConfig {
            obstacle_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "obstacle_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_speed_faster_than_spacing_is_rejected() {
        let config = GameConfig {
            obstacle_spacing: 3.0,
            obstacle_speed: 4.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCadence { .. })
        ));
    }

    #[test]
    fn test_subnormal_speed_is_rejected() {
        let config = GameConfig {
            obstacle_speed: 1e-40,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "obstacle_spacing / obstacle_speed",
                ..
            })
        ));
        assert!(config.validate_for(Playfield::default()).is_err());
    }

    #[test]
    fn test_non_finite_gravity_is_rejected() {
        let config = GameConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "gravity",
                ..
            })
        ));
    }

    #[test]
    fn test_gap_must_fit_playfield() {
        let config = GameConfig::default();
        // 300 gap + 2 * 50 margin = 400
        let short = Playfield::new(480.0, 400.0);
        assert!(matches!(
            config.validate_for(short),
            Err(ConfigError::PlayfieldTooShort { required, .. }) if required == 400.0
        ));
        assert!(config.validate_for(Playfield::new(480.0, 401.0)).is_ok());
    }

    #[test]
    fn test_zero_width_playfield_is_rejected() {
        let config = GameConfig::default();
        assert!(matches!(
            config.validate_for(Playfield::new(0.0, 640.0)),
            Err(ConfigError::PlayfieldTooNarrow { .. })
        ));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "target_score": 1, "gravity": 0.5 }"#).unwrap();
        assert_eq!(config.target_score, 1);
        assert_eq!(config.gravity, 0.5);
        assert_eq!(config.gap_size, 300.0);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "target_score": 0 }"#),
            Err(ConfigError::ZeroTarget)
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
