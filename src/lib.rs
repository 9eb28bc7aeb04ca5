//! Astro Dodge - a rocket arcade game in a field of asteroids
//!
//! Core modules:
//! - `sim`: Simulation (entity pools, movement, collisions, counters)
//! - `config`: Data-driven game balance and variant presets
//! - `presentation`: Scene/overlay boundary to the host renderer
//! - `game`: Lifecycle driver (start, restart, frame timing)

pub mod config;
pub mod game;
pub mod presentation;
pub mod sim;

pub use config::{ConfigError, GameConfig, Variant};
pub use game::{FrameClock, FrameStatus, Game};

/// Game configuration constants
pub mod consts {
    /// Obstacles drift toward the camera at this speed (units/s)
    pub const OBSTACLE_SPEED: f32 = 2.0;
    /// Energy cells drift at half the obstacle speed
    pub const PICKUP_SPEED: f32 = 1.0;
    /// Laser travel speed (units/s)
    pub const LASER_SPEED: f32 = 5.0;
    /// Continuous movement speed while a key is held (units/s)
    pub const CRAFT_SPEED: f32 = 2.0;
    /// Fixed offset per key-down in discrete movement mode
    pub const CRAFT_STEP: f32 = 0.1;

    /// Entities closer than this collide (strict comparison)
    pub const COLLISION_DISTANCE: f32 = 0.5;
    /// Depth past which obstacles and pickups are recycled
    pub const FORWARD_BOUND: f32 = 5.0;

    /// Spawn volume
    pub const SPAWN_X: (f32, f32) = (-5.0, 5.0);
    pub const SPAWN_Y: (f32, f32) = (-5.0, 5.0);
    pub const SPAWN_Z: (f32, f32) = (-20.0, 0.0);

    /// Pool sizes
    pub const OBSTACLE_COUNT: usize = 10;
    pub const PICKUP_COUNT: usize = 5;

    /// Health ceiling (and starting health)
    pub const MAX_HEALTH: u32 = 100;
    /// Health lost per obstacle hit in the direct-damage policy
    pub const OBSTACLE_DAMAGE: u32 = 20;
    /// Health restored per energy cell
    pub const PICKUP_HEAL: u32 = 20;
    /// Craft hits that end the run in the score-threshold policy
    pub const SCORE_THRESHOLD: u32 = 4;

    /// Lasers fired "up" are removed past this height
    pub const LASER_EXIT_UP: f32 = 5.0;
    /// Lasers fired down the depth axis are removed past this depth
    pub const LASER_EXIT_DEPTH: f32 = -20.0;

    /// Chance per frame of a new energy cell (probabilistic spawning)
    pub const PICKUP_SPAWN_CHANCE: f64 = 0.01;

    /// Longest frame gap fed to the simulation (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;
}

/// Clamp a health value shifted by `delta` into `[0, MAX_HEALTH]`
#[inline]
pub fn apply_health_delta(health: u32, delta: i64) -> u32 {
    (health as i64 + delta).clamp(0, consts::MAX_HEALTH as i64) as u32
}
