//! Per-frame simulation tick
//!
//! Core game loop: input, obstacles, pickups, lasers, in that order. The
//! presentation step runs afterwards and only reads the state.

use rand::Rng;

use super::collision::{first_projectile_hit, hits};
use super::input::TickInput;
use super::spawn::recycle;
use super::state::{EntityKind, GameEvent, GamePhase, GameState};
use crate::apply_health_delta;
use crate::config::{DamagePolicy, MovementStyle, PickupSpawn, ProjectileAxis};

/// Advance the game state by `dt` seconds of elapsed time
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Game over is terminal until reset
    if state.is_game_over() {
        return;
    }

    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
    state.time_ticks += 1;

    apply_input(state, input, dt);

    if advance_obstacles(state, dt) {
        return;
    }

    advance_pickups(state, dt);
    spawn_pickups(state);

    advance_projectiles(state, dt);
    resolve_projectile_hits(state);
}

fn apply_input(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.config.movement {
        MovementStyle::Discrete { step } => {
            state.craft.pos += input.pulse_vector() * step;
        }
        MovementStyle::Continuous { speed } => {
            state.craft.pos += input.held_vector() * speed * dt;
        }
    }

    for _ in 0..input.fire {
        state.spawn_projectile();
    }
}

/// Move obstacles forward and resolve craft hits; returns true if the run ended
fn advance_obstacles(state: &mut GameState, dt: f32) -> bool {
    let step = state.config.obstacle_speed * dt;
    let forward = state.config.forward_bound;
    let distance = state.config.collision_distance;

    for i in 0..state.obstacles.len() {
        state.obstacles[i].pos.z += step;
        if state.obstacles[i].pos.z > forward {
            recycle(
                &mut state.obstacles[i].pos,
                &mut state.rng,
                &state.config.spawn,
            );
        }

        if hits(state.craft.pos, state.obstacles[i].pos, distance) {
            let obstacle_id = state.obstacles[i].id;
            log::debug!("Craft hit by obstacle {}", obstacle_id);
            state.push_event(GameEvent::CraftHit { obstacle_id });
            apply_damage(state);

            recycle(
                &mut state.obstacles[i].pos,
                &mut state.rng,
                &state.config.spawn,
            );

            if state.health == 0 {
                end_run(state);
                return true;
            }
        }
    }

    false
}

fn apply_damage(state: &mut GameState) {
    match state.config.damage {
        DamagePolicy::ScoreThreshold { threshold } => {
            state.score += 1;
            if state.score >= threshold {
                state.health = 0;
            }
        }
        DamagePolicy::DirectDamage { amount } => {
            state.health = apply_health_delta(state.health, -(amount as i64));
        }
    }
}

fn end_run(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: score {}, energy {}, {} ticks",
        state.score,
        state.energy,
        state.time_ticks
    );
}

fn advance_pickups(state: &mut GameState, dt: f32) {
    let step = state.config.pickup_speed * dt;
    let forward = state.config.forward_bound;
    let distance = state.config.collision_distance;
    let heal = state.config.pickup_heal;

    for i in 0..state.pickups.len() {
        state.pickups[i].pos.z += step;
        if state.pickups[i].pos.z > forward {
            recycle(
                &mut state.pickups[i].pos,
                &mut state.rng,
                &state.config.spawn,
            );
        }

        if hits(state.craft.pos, state.pickups[i].pos, distance) {
            let pickup_id = state.pickups[i].id;
            state.health = apply_health_delta(state.health, heal as i64);
            state.energy += 1;
            log::debug!("Energy cell {} collected, health {}", pickup_id, state.health);
            state.push_event(GameEvent::PickupCollected { pickup_id });

            recycle(
                &mut state.pickups[i].pos,
                &mut state.rng,
                &state.config.spawn,
            );
        }
    }
}

/// Probabilistic spawning never grows the pool past its cap
fn spawn_pickups(state: &mut GameState) {
    if let PickupSpawn::Probabilistic {
        chance_per_frame,
        cap,
    } = state.config.pickups
    {
        if state.pickups.len() < cap && state.rng.random_bool(chance_per_frame) {
            state.spawn_pickup();
        }
    }
}

fn advance_projectiles(state: &mut GameState, dt: f32) {
    let step = state.config.laser_speed * dt;
    let axis = state.config.projectile_axis;

    let mut expired = Vec::new();
    state.projectiles.retain_mut(|p| {
        let gone = match axis {
            ProjectileAxis::LocalUp { exit_bound } => {
                p.pos.y += step;
                p.pos.y > exit_bound
            }
            ProjectileAxis::Depth { exit_bound } => {
                p.pos.z -= step;
                p.pos.z < exit_bound
            }
        };
        if gone {
            expired.push(p.id);
        }
        !gone
    });

    for id in expired {
        state.push_event(GameEvent::Despawned {
            id,
            kind: EntityKind::Projectile,
        });
    }
}

/// Destroy at most one laser/asteroid pair
fn resolve_projectile_hits(state: &mut GameState) {
    let Some((pi, oi)) = first_projectile_hit(
        &state.projectiles,
        &state.obstacles,
        state.config.collision_distance,
    ) else {
        return;
    };

    let projectile = state.projectiles.remove(pi);
    let obstacle = state.obstacles.remove(oi);
    state.score += 1;
    log::debug!(
        "Laser {} destroyed obstacle {}, score {}",
        projectile.id,
        obstacle.id,
        state.score
    );

    state.push_event(GameEvent::ObstacleDestroyed {
        obstacle_id: obstacle.id,
        projectile_id: projectile.id,
    });
    state.push_event(GameEvent::Despawned {
        id: projectile.id,
        kind: EntityKind::Projectile,
    });
    state.push_event(GameEvent::Despawned {
        id: obstacle.id,
        kind: EntityKind::Obstacle,
    });
}
