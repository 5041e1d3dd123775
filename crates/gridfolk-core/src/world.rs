//! World bounds and cube sampling.
//!
//! The simulation core does not own a world container; it only ever asks
//! "is this cube inside?" and "give me a random cube". Both live here.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WORLD_EDGE;
use crate::math::Cube;

/// Axis-aligned world bounds: cubes (0, 0, 0) up to (but excluding)
/// (nx, ny, nz).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct World {
    pub nx: i32,
    pub ny: i32,
    pub nz: i32,
}

impl World {
    pub fn new(nx: i32, ny: i32, nz: i32) -> Self {
        Self { nx, ny, nz }
    }

    pub fn contains(&self, cube: Cube) -> bool {
        (0..self.nx).contains(&cube.x)
            && (0..self.ny).contains(&cube.y)
            && (0..self.nz).contains(&cube.z)
    }

    /// A uniformly random in-world cube.
    pub fn random_cube(&self, rng: &mut impl Rng) -> Cube {
        Cube::new(
            rng.gen_range(0..self.nx),
            rng.gen_range(0..self.ny),
            rng.gen_range(0..self.nz),
        )
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_EDGE, DEFAULT_WORLD_EDGE, DEFAULT_WORLD_EDGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_default_dimensions() {
        let world = World::default();
        assert_eq!(world.nx, 50);
        assert_eq!(world.ny, 50);
        assert_eq!(world.nz, 50);
    }

    #[test]
    fn test_contains_edges() {
        let world = World::default();
        assert!(world.contains(Cube::new(0, 0, 0)));
        assert!(world.contains(Cube::new(49, 49, 49)));
        assert!(!world.contains(Cube::new(50, 0, 0)));
        assert!(!world.contains(Cube::new(0, -1, 0)));
        assert!(!world.contains(Cube::new(0, 0, 50)));
    }

    #[test]
    fn test_random_cube_in_bounds() {
        let world = World::new(3, 4, 5);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(world.contains(world.random_cube(&mut rng)));
        }
    }
}
