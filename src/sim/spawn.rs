//! Spawn volume and position recycling
//!
//! Entities are never reused with stale coordinates: recycling draws all
//! three axes fresh from the configured ranges.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-open interval `[min, max)` along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v < self.max
    }

    /// Uniform sample; a degenerate range yields `min`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.min < self.max {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// Box that fresh and recycled entities are placed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRanges {
    pub x: AxisRange,
    pub y: AxisRange,
    /// Depth; far behind the craft so entities drift into view
    pub z: AxisRange,
}

impl SpawnRanges {
    pub fn contains(&self, pos: Vec3) -> bool {
        self.x.contains(pos.x) && self.y.contains(pos.y) && self.z.contains(pos.z)
    }
}

/// Draw a position inside the spawn box
pub fn random_position<R: Rng>(rng: &mut R, ranges: &SpawnRanges) -> Vec3 {
    // Depth is drawn first; seeded runs depend on this order
    let z = ranges.z.sample(rng);
    let x = ranges.x.sample(rng);
    let y = ranges.y.sample(rng);
    Vec3::new(x, y, z)
}

/// Reset an entity position to a fresh point in the spawn box
#[inline]
pub fn recycle<R: Rng>(pos: &mut Vec3, rng: &mut R, ranges: &SpawnRanges) {
    *pos = random_position(rng, ranges);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ranges() -> SpawnRanges {
        SpawnRanges {
            x: AxisRange::new(-5.0, 5.0),
            y: AxisRange::new(-5.0, 5.0),
            z: AxisRange::new(-20.0, 0.0),
        }
    }

    #[test]
    fn test_random_positions_stay_in_box() {
        let mut rng = Pcg32::seed_from_u64(7);
        let ranges = ranges();
        for _ in 0..1000 {
            assert!(ranges.contains(random_position(&mut rng, &ranges)));
        }
    }

    #[test]
    fn test_recycle_moves_entity_back() {
        let mut rng = Pcg32::seed_from_u64(42);
        let ranges = ranges();
        let mut pos = Vec3::new(0.0, 0.0, 5.5);

        for _ in 0..100 {
            let before = pos;
            recycle(&mut pos, &mut rng, &ranges);
            assert!(ranges.z.contains(pos.z));
            assert_ne!(pos.z, before.z);
            assert!(ranges.contains(pos));
        }
    }

    #[test]
    fn test_degenerate_range_samples_min() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(AxisRange::new(2.0, 2.0).sample(&mut rng), 2.0);
    }
}
