//! Game state and core simulation types
//!
//! Everything the loop mutates lives in `GameState`; nothing is global.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::random_position;
use crate::config::{GameConfig, PickupSpawn};
use crate::consts::MAX_HEALTH;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Health ran out; only a restart leaves this phase
    GameOver,
}

/// Entity categories known to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Craft,
    Obstacle,
    Pickup,
    Projectile,
}

/// Something the presentation layer needs to hear about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New entity to add to the scene
    Spawned { id: u32, kind: EntityKind, pos: Vec3 },
    /// Entity to remove from the scene
    Despawned { id: u32, kind: EntityKind },
    /// Obstacle struck the craft
    CraftHit { obstacle_id: u32 },
    /// Energy cell collected
    PickupCollected { pickup_id: u32 },
    /// Laser destroyed an obstacle
    ObstacleDestroyed { obstacle_id: u32, projectile_id: u32 },
    /// Run ended with this score
    GameOver { score: u32 },
}

/// The player's rocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub id: u32,
    pub pos: Vec3,
}

/// An asteroid drifting toward the camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
}

/// An energy cell that restores health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec3,
}

/// A laser bolt fired by the craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tuning this run was created with
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Health, 0..=100
    pub health: u32,
    /// Score
    pub score: u32,
    /// Energy cells collected
    pub energy: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Player craft
    pub craft: Craft,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    pub projectiles: Vec<Projectile>,
    /// Random source for spawning and recycling
    pub(crate) rng: Pcg32,
    /// Pending events for the presentation layer
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a running game with freshly populated pools
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            config,
            seed,
            phase: GamePhase::Running,
            health: MAX_HEALTH,
            score: 0,
            energy: 0,
            time_ticks: 0,
            craft: Craft {
                id: 0,
                pos: Vec3::ZERO,
            },
            obstacles: Vec::new(),
            pickups: Vec::new(),
            projectiles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        };
        state.populate();
        state
    }

    /// Restart in place: clear the scene, reset counters, refill the pools
    pub fn reset(&mut self) {
        self.despawn_all();
        self.phase = GamePhase::Running;
        self.health = MAX_HEALTH;
        self.score = 0;
        self.energy = 0;
        self.time_ticks = 0;
        self.populate();
        log::info!("Game reset (seed {})", self.seed);
    }

    fn populate(&mut self) {
        let id = self.next_entity_id();
        self.craft = Craft { id, pos: Vec3::ZERO };
        self.emit_spawn(id, EntityKind::Craft, Vec3::ZERO);

        for _ in 0..self.config.obstacle_count {
            self.spawn_obstacle();
        }

        if let PickupSpawn::FixedPool { count } = self.config.pickups {
            for _ in 0..count {
                self.spawn_pickup();
            }
        }
    }

    fn despawn_all(&mut self) {
        let mut gone = vec![(self.craft.id, EntityKind::Craft)];
        gone.extend(self.obstacles.drain(..).map(|o| (o.id, EntityKind::Obstacle)));
        gone.extend(self.pickups.drain(..).map(|p| (p.id, EntityKind::Pickup)));
        gone.extend(
            self.projectiles
                .drain(..)
                .map(|p| (p.id, EntityKind::Projectile)),
        );
        for (id, kind) in gone {
            self.events.push(GameEvent::Despawned { id, kind });
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an obstacle at a random spawn position
    pub fn spawn_obstacle(&mut self) -> u32 {
        let pos = random_position(&mut self.rng, &self.config.spawn);
        self.spawn_obstacle_at(pos)
    }

    /// Add an obstacle at a fixed position
    pub fn spawn_obstacle_at(&mut self, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle { id, pos });
        self.emit_spawn(id, EntityKind::Obstacle, pos);
        id
    }

    /// Add an energy cell at a random spawn position
    pub fn spawn_pickup(&mut self) -> u32 {
        let pos = random_position(&mut self.rng, &self.config.spawn);
        self.spawn_pickup_at(pos)
    }

    /// Add an energy cell at a fixed position
    pub fn spawn_pickup_at(&mut self, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.pickups.push(Pickup { id, pos });
        self.emit_spawn(id, EntityKind::Pickup, pos);
        id
    }

    /// Fire a laser from the craft's current position
    pub fn spawn_projectile(&mut self) -> u32 {
        let pos = self.craft.pos;
        self.spawn_projectile_at(pos)
    }

    /// Add a laser at a fixed position
    pub fn spawn_projectile_at(&mut self, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile { id, pos });
        self.emit_spawn(id, EntityKind::Projectile, pos);
        id
    }

    fn emit_spawn(&mut self, id: u32, kind: EntityKind, pos: Vec3) {
        self.events.push(GameEvent::Spawned { id, kind, pos });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events without consuming them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
