//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Elapsed time is passed in, never read from a clock
//! - Seeded RNG only
//! - No rendering or platform dependencies; the scene learns about
//!   changes through drained `GameEvent`s

pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{first_projectile_hit, hits};
pub use input::{Direction, InputState, Intent, TickInput, intent_for_key};
pub use spawn::{AxisRange, SpawnRanges, random_position, recycle};
pub use state::{
    Craft, EntityKind, GameEvent, GamePhase, GameState, Obstacle, Pickup, Projectile,
};
pub use tick::tick;
