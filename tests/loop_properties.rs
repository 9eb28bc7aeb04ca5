use astro_dodge::apply_health_delta;
use astro_dodge::config::{GameConfig, Variant};
use astro_dodge::consts::MAX_HEALTH;
use astro_dodge::sim::{Direction, GamePhase, GameState, TickInput, recycle, tick};
use glam::Vec3;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Up),
        Just(Direction::Down),
    ]
}

fn tick_input() -> impl Strategy<Value = TickInput> {
    (
        prop::collection::vec(direction(), 0..3),
        prop::array::uniform4(any::<bool>()),
        0u32..2,
    )
        .prop_map(|(pulses, held, fire)| TickInput { pulses, held, fire })
}

fn variant() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::Classic), Just(Variant::Arcade)]
}

proptest! {
    #[test]
    fn health_delta_is_clamped(health in 0u32..=MAX_HEALTH, delta in -500i64..500) {
        let h = apply_health_delta(health, delta);
        prop_assert!(h <= MAX_HEALTH);
        let expected = (health as i64 + delta).clamp(0, MAX_HEALTH as i64) as u32;
        prop_assert_eq!(h, expected);
    }

    #[test]
    fn health_stays_in_range(
        seed in any::<u64>(),
        variant in variant(),
        frames in prop::collection::vec((tick_input(), 0.0f32..0.1), 1..200),
    ) {
        let mut state = GameState::new(GameConfig::from_variant(variant), seed);
        for (input, dt) in &frames {
            tick(&mut state, input, *dt);
            prop_assert!(state.health <= MAX_HEALTH);
            if state.health == 0 {
                prop_assert_eq!(state.phase, GamePhase::GameOver);
            }
        }
    }

    #[test]
    fn restart_is_idempotent(seed in any::<u64>(), variant in variant(), ticks in 0usize..100) {
        let mut state = GameState::new(GameConfig::from_variant(variant), seed);
        let input = TickInput { fire: 1, ..Default::default() }.with_held(Direction::Left);
        for _ in 0..ticks {
            tick(&mut state, &input, 1.0 / 60.0);
        }

        state.reset();
        let once = (state.health, state.score, state.energy, state.phase,
                    state.obstacles.len(), state.pickups.len(), state.projectiles.len());
        state.reset();
        let twice = (state.health, state.score, state.energy, state.phase,
                     state.obstacles.len(), state.pickups.len(), state.projectiles.len());

        prop_assert_eq!(once, twice);
        prop_assert_eq!((once.0, once.1, once.2), (MAX_HEALTH, 0, 0));
        prop_assert_eq!(once.3, GamePhase::Running);
        prop_assert_eq!(once.4, state.config.obstacle_count);
    }

    #[test]
    fn recycled_positions_land_in_spawn_box(seed in any::<u64>(), z in 5.0f32..50.0) {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut pos = Vec3::new(0.0, 0.0, z);

        recycle(&mut pos, &mut rng, &config.spawn);

        prop_assert!(config.spawn.contains(pos));
        prop_assert_ne!(pos.z, z);
    }
}
