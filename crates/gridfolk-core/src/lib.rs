//! Gridfolk Core - Tick-Driven Unit Simulation
//!
//! A single autonomous unit on a discretized 3-D grid: a mutually exclusive
//! activity state machine (moving, working, resting, attacking, idle)
//! coupled to linear kinematics and an accumulator-based recovery model.
//! Everything advances synchronously through `advance_time`; there is no
//! background execution and no world container — the embedding application
//! owns the units and drives their ticks.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`activity`] | Tagged activity state with per-variant timers |
//! | [`attributes`] | Clamped primary attributes, derived caps and base speed |
//! | [`combat`] | Dodge/block/damage resolution between two units |
//! | [`constants`] | Numeric rules (tick bound, rest forcing, drain rates) |
//! | [`error`] | Precondition violations reported to the caller |
//! | [`kinematics`] | Per-leg speed and linear integration toward a cube center |
//! | [`math`] | Value-type vectors, cube coordinates, angle normalization |
//! | [`regen`] | Rest recovery intervals and point accrual |
//! | [`unit`] | The unit: commands, queries, per-tick update engine |
//! | [`world`] | World bounds and uniform cube sampling |
//!
//! # Example
//!
//! ```rust
//! use gridfolk_core::prelude::*;
//! use rand::SeedableRng;
//!
//! let world = World::default();
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
//! let mut unit = Unit::new("Ada", Cube::new(0, 0, 0), 50, 50, 50, 50, false, &world).unwrap();
//!
//! unit.move_to(Cube::new(3, 0, 0), &world).unwrap();
//! while unit.is_moving() {
//!     unit.advance_time(0.2, &world, &mut rng).unwrap();
//! }
//! assert_eq!(unit.cube(), Cube::new(3, 0, 0));
//! ```

pub mod activity;
pub mod attributes;
pub mod combat;
pub mod constants;
pub mod error;
pub mod kinematics;
pub mod math;
pub mod regen;
pub mod unit;
pub mod world;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::activity::Activity;
    pub use crate::attributes::Attributes;
    pub use crate::combat::AttackOutcome;
    pub use crate::error::UnitError;
    pub use crate::math::{Cube, Vec3};
    pub use crate::unit::Unit;
    pub use crate::world::World;
}
