//! Proximity collision tests
//!
//! Every entity is treated as a point; two entities collide when their
//! centers are strictly closer than the configured distance.

use glam::Vec3;

use super::state::{Obstacle, Projectile};

/// Check whether two points are within hit distance (strict `<`)
#[inline]
pub fn hits(a: Vec3, b: Vec3, distance: f32) -> bool {
    a.distance(b) < distance
}

/// Find the first laser/asteroid pair in contact
///
/// Lasers are scanned in order, each against every obstacle in order; the
/// first pair found wins and the scan stops. At most one obstacle is
/// destroyed per tick.
pub fn first_projectile_hit(
    projectiles: &[Projectile],
    obstacles: &[Obstacle],
    distance: f32,
) -> Option<(usize, usize)> {
    projectiles.iter().enumerate().find_map(|(pi, projectile)| {
        obstacles
            .iter()
            .position(|obstacle| hits(projectile.pos, obstacle.pos, distance))
            .map(|oi| (pi, oi))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laser(id: u32, x: f32) -> Projectile {
        Projectile {
            id,
            pos: Vec3::new(x, 0.0, 0.0),
        }
    }

    fn rock(id: u32, x: f32) -> Obstacle {
        Obstacle {
            id,
            pos: Vec3::new(x, 0.0, 0.0),
        }
    }

    #[test]
    fn test_hit_boundary_is_exclusive() {
        assert!(!hits(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), 0.5));
        assert!(hits(Vec3::ZERO, Vec3::new(0.4999, 0.0, 0.0), 0.5));
        assert!(hits(Vec3::ZERO, Vec3::new(0.0, 0.3, 0.0), 0.5));
    }

    #[test]
    fn test_distance_is_three_dimensional() {
        // 0.3² + 0.3² + 0.3² ≈ 0.27, sqrt ≈ 0.52
        assert!(!hits(Vec3::ZERO, Vec3::splat(0.3), 0.5));
        assert!(hits(Vec3::ZERO, Vec3::splat(0.28), 0.5));
    }

    #[test]
    fn test_first_hit_scans_lasers_then_obstacles() {
        let lasers = [laser(1, 10.0), laser(2, 3.1), laser(3, 0.1)];
        let rocks = [rock(10, 0.0), rock(11, 3.0)];
        // Laser 2 is checked before laser 3 even though laser 3 also hits
        assert_eq!(first_projectile_hit(&lasers, &rocks, 0.5), Some((1, 1)));
    }

    #[test]
    fn test_two_lasers_one_obstacle_single_pair() {
        let lasers = [laser(1, 0.1), laser(2, -0.1)];
        let rocks = [rock(10, 0.0)];
        assert_eq!(first_projectile_hit(&lasers, &rocks, 0.5), Some((0, 0)));
    }

    #[test]
    fn test_no_hit() {
        let lasers = [laser(1, 2.0)];
        let rocks = [rock(10, 0.0)];
        assert_eq!(first_projectile_hit(&lasers, &rocks, 0.5), None);
        assert_eq!(first_projectile_hit(&[], &rocks, 0.5), None);
    }
}
