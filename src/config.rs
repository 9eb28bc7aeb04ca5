//! Game balance and variant selection
//!
//! Loaded once at startup. On the web the page may embed a JSON override in
//! `<script id="game-config" type="application/json">`; natively the file named
//! by `ASTRO_DODGE_CONFIG` is read. Missing or invalid overrides fall back to
//! the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::spawn::{AxisRange, SpawnRanges};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Spawn range for {axis} is empty: [{min}, {max})")]
    EmptyRange { axis: &'static str, min: f32, max: f32 },

    #[error("Spawn range for {axis} is too wide: [{min}, {max})")]
    RangeTooWide { axis: &'static str, min: f32, max: f32 },

    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidSpeed { field: &'static str, value: f32 },

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("Pickup spawn chance must be within [0, 1] (got {0})")]
    InvalidChance(f64),
}

/// Preset matching one of the shipped game revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Key-down nudges, game ends after four hits, lasers fly up
    #[default]
    Classic,
    /// Smooth held-key motion, hits cost health, lasers fly down-range
    Arcade,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Arcade => "Arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "arcade" => Some(Variant::Arcade),
            _ => None,
        }
    }
}

/// How directional input moves the craft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementStyle {
    /// Each key-down moves the craft by `step`
    Discrete { step: f32 },
    /// Each held key moves the craft by `speed * dt` every tick
    Continuous { speed: f32 },
}

/// What an obstacle does to the craft on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamagePolicy {
    /// Each hit scores a point; reaching `threshold` zeroes health
    ScoreThreshold { threshold: u32 },
    /// Each hit subtracts `amount` health
    DirectDamage { amount: u32 },
}

/// Travel axis of fired lasers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileAxis {
    /// Moves along +y; removed once y exceeds `exit_bound`
    LocalUp { exit_bound: f32 },
    /// Moves along -z; removed once z drops below `exit_bound`
    Depth { exit_bound: f32 },
}

/// How the energy cell pool is populated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickupSpawn {
    /// `count` cells created at start and recycled forever
    FixedPool { count: usize },
    /// Pool starts empty; each tick spawns a cell with `chance_per_frame`
    /// while fewer than `cap` are alive
    Probabilistic { chance_per_frame: f64, cap: usize },
}

/// Complete simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub obstacle_count: usize,
    pub obstacle_speed: f32,
    pub pickup_speed: f32,
    pub laser_speed: f32,
    pub collision_distance: f32,
    /// Obstacles and pickups past this depth are recycled
    pub forward_bound: f32,
    pub spawn: SpawnRanges,
    pub pickup_heal: u32,

    pub movement: MovementStyle,
    pub damage: DamagePolicy,
    pub projectile_axis: ProjectileAxis,
    pub pickups: PickupSpawn,

    /// Frame gaps longer than this are shortened (seconds)
    pub max_frame_delta: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_variant(Variant::Classic)
    }
}

impl GameConfig {
    /// Build the tuning for a preset
    pub fn from_variant(variant: Variant) -> Self {
        let base = Self {
            obstacle_count: OBSTACLE_COUNT,
            obstacle_speed: OBSTACLE_SPEED,
            pickup_speed: PICKUP_SPEED,
            laser_speed: LASER_SPEED,
            collision_distance: COLLISION_DISTANCE,
            forward_bound: FORWARD_BOUND,
            spawn: SpawnRanges {
                x: AxisRange::new(SPAWN_X.0, SPAWN_X.1),
                y: AxisRange::new(SPAWN_Y.0, SPAWN_Y.1),
                z: AxisRange::new(SPAWN_Z.0, SPAWN_Z.1),
            },
            pickup_heal: PICKUP_HEAL,
            movement: MovementStyle::Discrete { step: CRAFT_STEP },
            damage: DamagePolicy::ScoreThreshold {
                threshold: SCORE_THRESHOLD,
            },
            projectile_axis: ProjectileAxis::LocalUp {
                exit_bound: LASER_EXIT_UP,
            },
            pickups: PickupSpawn::FixedPool {
                count: PICKUP_COUNT,
            },
            max_frame_delta: MAX_FRAME_DELTA,
        };

        match variant {
            Variant::Classic => base,
            Variant::Arcade => Self {
                movement: MovementStyle::Continuous { speed: CRAFT_SPEED },
                damage: DamagePolicy::DirectDamage {
                    amount: OBSTACLE_DAMAGE,
                },
                projectile_axis: ProjectileAxis::Depth {
                    exit_bound: LASER_EXIT_DEPTH,
                },
                pickups: PickupSpawn::Probabilistic {
                    chance_per_frame: PICKUP_SPAWN_CHANCE,
                    cap: PICKUP_COUNT,
                },
                ..base
            },
        }
    }

    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, range) in [
            ("x", self.spawn.x),
            ("y", self.spawn.y),
            ("z", self.spawn.z),
        ] {
            if !(range.min.is_finite() && range.max.is_finite() && range.min < range.max) {
                return Err(ConfigError::EmptyRange {
                    axis,
                    min: range.min,
                    max: range.max,
                });
            }
            if !(range.max - range.min).is_finite() {
                return Err(ConfigError::RangeTooWide {
                    axis,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        if !self.forward_bound.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "forward_bound",
                value: self.forward_bound,
            });
        }

        let mut speeds = vec![
            ("obstacle_speed", self.obstacle_speed),
            ("pickup_speed", self.pickup_speed),
            ("laser_speed", self.laser_speed),
        ];
        if let MovementStyle::Continuous { speed } = self.movement {
            speeds.push(("movement.speed", speed));
        }
        for (field, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSpeed { field, value });
            }
        }

        let mut positives = vec![
            ("collision_distance", self.collision_distance),
            ("max_frame_delta", self.max_frame_delta),
        ];
        if let MovementStyle::Discrete { step } = self.movement {
            positives.push(("movement.step", step));
        }
        match self.damage {
            DamagePolicy::ScoreThreshold { threshold } => {
                positives.push(("damage.threshold", threshold as f32))
            }
            DamagePolicy::DirectDamage { amount } => {
                positives.push(("damage.amount", amount as f32))
            }
        }
        for (field, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if let PickupSpawn::Probabilistic { chance_per_frame, .. } = self.pickups {
            if !(0.0..=1.0).contains(&chance_per_frame) {
                return Err(ConfigError::InvalidChance(chance_per_frame));
            }
        }

        Ok(())
    }

    /// DOM element holding an optional JSON override
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "game-config";

    /// Environment variable naming a JSON override file
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_VAR: &'static str = "ASTRO_DODGE_CONFIG";

    /// Load the page's config override (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = text else {
            log::info!("Using default config");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config from page");
                config
            }
            Err(e) => {
                log::warn!("Ignoring page config: {}", e);
                Self::default()
            }
        }
    }

    /// Load the config file named by `ASTRO_DODGE_CONFIG`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default config");
            return Self::default();
        };

        match Self::load_from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_classic_and_valid() {
        let config = GameConfig::default();
        assert_eq!(config, GameConfig::from_variant(Variant::Classic));
        assert!(config.validate().is_ok());
        assert!(GameConfig::from_variant(Variant::Arcade).validate().is_ok());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("ARCADE"), Some(Variant::Arcade));
        assert_eq!(Variant::from_str("classic"), Some(Variant::Classic));
        assert_eq!(Variant::from_str("hard"), None);
        assert_eq!(Variant::Arcade.as_str(), "Arcade");
    }

    #[test]
    fn test_arcade_preset_policies() {
        let config = GameConfig::from_variant(Variant::Arcade);
        assert_eq!(
            config.damage,
            DamagePolicy::DirectDamage {
                amount: OBSTACLE_DAMAGE
            }
        );
        assert!(matches!(config.movement, MovementStyle::Continuous { .. }));
        assert!(matches!(
            config.pickups,
            PickupSpawn::Probabilistic { cap: PICKUP_COUNT, .. }
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "obstacle_count": 3 }"#).unwrap();
        assert_eq!(config.obstacle_count, 3);
        assert_eq!(config.obstacle_speed, OBSTACLE_SPEED);
    }

    #[test]
    fn test_json_policy_override() {
        let json = r#"{ "damage": { "DirectDamage": { "amount": 50 } } }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.damage, DamagePolicy::DirectDamage { amount: 50 });
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));

        let json = r#"{ "spawn": { "x": { "min": 1.0, "max": 1.0 },
                                   "y": { "min": -5.0, "max": 5.0 },
                                   "z": { "min": -20.0, "max": 0.0 } } }"#;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(ConfigError::EmptyRange { axis: "x", .. })
        ));

        let json = r#"{ "spawn": { "x": { "min": -3e38, "max": 3e38 },
                                   "y": { "min": -5.0, "max": 5.0 },
                                   "z": { "min": -20.0, "max": 0.0 } } }"#;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(ConfigError::RangeTooWide { axis: "x", .. })
        ));

        let mut config = GameConfig::default();
        config.forward_bound = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "forward_bound", .. })
        ));

        let mut config = GameConfig::default();
        config.laser_speed = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeed { field: "laser_speed", .. })
        ));

        let mut config = GameConfig::default();
        config.collision_distance = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { .. })
        ));

        let mut config = GameConfig::default();
        config.pickups = PickupSpawn::Probabilistic {
            chance_per_frame: 1.5,
            cap: 3,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChance(_))
        ));
    }
}
