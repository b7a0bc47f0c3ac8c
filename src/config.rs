//! Game tuning
//!
//! Every gameplay constant in one serde struct, so a host page can override
//! the defaults with a JSON document.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration rejected by [`GameConfig::validate`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Canvas {width}x{height} cannot fit the player and an enemy")]
    InvalidCanvas { width: f32, height: f32 },

    #[error("Enemy speed range {min}..{max} is empty or non-positive")]
    InvalidSpeedRange { min: f32, max: f32 },

    #[error("Spawn probability {0} is outside 0..=1")]
    InvalidProbability(f64),

    #[error("`{0}` must be positive")]
    NonPositive(&'static str),
}

/// What a combo does to enemies near the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComboMode {
    /// Enemies inside the proximity radius explode
    #[default]
    Destroy,
    /// Enemies inside the proximity radius are shoved outward
    PushBack,
}

impl ComboMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComboMode::Destroy => "destroy",
            ComboMode::PushBack => "push_back",
        }
    }
}

/// How keyboard and pointer directions combine into a velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InputBlend {
    /// Keyboard and pointer unit vectors add (diagonal combos go faster)
    #[default]
    Additive,
    /// Pointer wins when it has a direction, keyboard otherwise
    Exclusive,
}

impl InputBlend {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputBlend::Additive => "additive",
            InputBlend::Exclusive => "exclusive",
        }
    }
}

/// Game tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    /// Half the side of the player square (also its collision radius)
    pub player_half_size: f32,
    /// Pixels per tick along a unit direction
    pub player_speed: f32,
    pub input_blend: InputBlend,

    // === Boost ===
    pub boost_enabled: bool,
    pub boost_multiplier: f32,
    pub boost_duration_ms: f64,
    pub boost_cooldown_ms: f64,

    // === Enemies ===
    pub enemy_radius: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    /// Chance per simulation tick of spawning one enemy
    pub spawn_probability: f64,

    // === Combo ===
    pub combo_enabled: bool,
    pub combo_mode: ComboMode,
    pub combo_speed_threshold: f32,
    /// Radians of heading change between consecutive ticks
    pub combo_angle_threshold: f32,
    pub combo_cooldown_ms: f64,
    pub combo_proximity_radius: f32,
    pub combo_push_distance: f32,

    // === Effects ===
    /// Flash opacity lost per tick
    pub flash_decay: f32,
    pub explosion_particles: usize,
    pub shockwave_growth: f32,
    pub shockwave_fade: f32,
    pub shockwave_max_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_half_size: PLAYER_HALF_SIZE,
            player_speed: PLAYER_SPEED,
            input_blend: InputBlend::Additive,

            boost_enabled: true,
            boost_multiplier: 2.0,
            boost_duration_ms: 300.0,
            boost_cooldown_ms: 2000.0,

            enemy_radius: ENEMY_RADIUS,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            spawn_probability: SPAWN_PROBABILITY,

            combo_enabled: true,
            combo_mode: ComboMode::Destroy,
            combo_speed_threshold: COMBO_SPEED_THRESHOLD,
            combo_angle_threshold: COMBO_ANGLE_THRESHOLD,
            combo_cooldown_ms: COMBO_COOLDOWN_MS,
            combo_proximity_radius: COMBO_PROXIMITY_RADIUS,
            combo_push_distance: COMBO_PUSH_DISTANCE,

            flash_decay: 0.05,
            explosion_particles: 24,
            shockwave_growth: 6.0,
            shockwave_fade: 0.03,
            shockwave_max_radius: COMBO_PROXIMITY_RADIUS * 1.5,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Canvas extents as a vector
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f64); 13] = [
            ("player_half_size", self.player_half_size as f64),
            ("player_speed", self.player_speed as f64),
            ("boost_multiplier", self.boost_multiplier as f64),
            ("enemy_radius", self.enemy_radius as f64),
            ("combo_speed_threshold", self.combo_speed_threshold as f64),
            ("combo_angle_threshold", self.combo_angle_threshold as f64),
            ("combo_proximity_radius", self.combo_proximity_radius as f64),
            ("combo_push_distance", self.combo_push_distance as f64),
            ("explosion_particles", self.explosion_particles as f64),
            ("shockwave_max_radius", self.shockwave_max_radius as f64),
            ("flash_decay", self.flash_decay as f64),
            ("shockwave_growth", self.shockwave_growth as f64),
            ("shockwave_fade", self.shockwave_fade as f64),
        ];
        for (name, value) in positive {
            // `!(x > 0)` also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive(name));
            }
        }
        let non_negative: [(&'static str, f64); 3] = [
            ("boost_duration_ms", self.boost_duration_ms),
            ("boost_cooldown_ms", self.boost_cooldown_ms),
            ("combo_cooldown_ms", self.combo_cooldown_ms),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::NonPositive(name));
            }
        }

        let min_extent = 2.0 * self.player_half_size.max(self.enemy_radius);
        if !(self.canvas_width > min_extent && self.canvas_height > min_extent) {
            return Err(ConfigError::InvalidCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }

        if !(self.enemy_speed_min > 0.0 && self.enemy_speed_min <= self.enemy_speed_max) {
            return Err(ConfigError::InvalidSpeedRange {
                min: self.enemy_speed_min,
                max: self.enemy_speed_max,
            });
        }

        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError::InvalidProbability(self.spawn_probability));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json(r#"{ "combo_mode": "push_back", "player_speed": 6.0 }"#)
                .unwrap();
        assert_eq!(config.combo_mode, ComboMode::PushBack);
        assert_eq!(config.player_speed, 6.0);
        assert_eq!(config.enemy_radius, ENEMY_RADIUS);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err = GameConfig::from_json(r#"{ "enemy_speed_min": 4.0, "enemy_speed_max": 2.0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeedRange { .. }));
    }

    #[test]
    fn test_rejects_tiny_canvas() {
        let config = GameConfig {
            canvas_width: 15.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn test_rejects_probability_out_of_range() {
        let config = GameConfig {
            spawn_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability(_))
        ));
    }

    #[test]
    fn test_rejects_nan_speed() {
        let config = GameConfig {
            player_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive("player_speed"))
        ));
    }

    #[test]
    fn test_rejects_nan_timings() {
        for config in [
            GameConfig {
                boost_duration_ms: f64::NAN,
                ..Default::default()
            },
            GameConfig {
                boost_cooldown_ms: f64::NAN,
                ..Default::default()
            },
            GameConfig {
                combo_cooldown_ms: f64::NAN,
                ..Default::default()
            },
        ] {
            assert!(matches!(config.validate(), Err(ConfigError::NonPositive(_))));
        }

        let zero_cooldown = GameConfig {
            combo_cooldown_ms: 0.0,
            ..Default::default()
        };
        assert!(zero_cooldown.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_combo_effects() {
        let config = GameConfig {
            combo_push_distance: -50.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive("combo_push_distance"))
        ));

        let config = GameConfig {
            shockwave_max_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive("shockwave_max_radius"))
        ));

        let config = GameConfig {
            explosion_particles: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive("explosion_particles"))
        ));
    }

    #[test]
    fn test_mode_names() {
        // Log names match the JSON spelling
        for mode in [ComboMode::Destroy, ComboMode::PushBack] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
        for blend in [InputBlend::Additive, InputBlend::Exclusive] {
            let json = serde_json::to_string(&blend).unwrap();
            assert_eq!(json, format!("\"{}\"", blend.as_str()));
        }
    }
}
