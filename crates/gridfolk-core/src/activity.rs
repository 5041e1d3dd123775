//! The unit's mutually exclusive activity state.
//!
//! One tagged enum instead of a set of booleans: a unit cannot be working
//! and resting at the same time, and sprint state only exists while moving.
//! Per-activity timers travel in the variant payload and disappear with it.

use serde::{Deserialize, Serialize};

use crate::math::{Cube, Vec3};

/// What the unit is doing right now.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Activity {
    /// Nothing scheduled. Default behavior picks a new activity from here.
    Idle,
    /// Walking toward the center of a neighboring cube.
    Moving(Moving),
    /// Carrying out a work task until the timer runs out.
    Working { remaining: f32 },
    /// Recovering hit points, then stamina.
    Resting {
        /// Seconds left on the minimum-rest lock. While positive, the rest
        /// cannot be given up voluntarily.
        lock_remaining: f32,
        /// Rest time not yet converted into recovered points.
        accumulator: f32,
    },
    /// Winding down an attack. Blocks new activities for the duration.
    Attacking { remaining: f32 },
}

/// Movement payload: the current single-cube leg plus an optional
/// long-range destination that spawns the next leg on arrival.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Moving {
    /// Center of the cube this leg is headed for.
    pub target: Vec3,
    /// Final cube of a multi-leg route, if one is pending.
    pub destination: Option<Cube>,
    /// Speed factor from the leg's climb or descent, fixed at leg start.
    pub vertical_factor: f32,
    pub sprinting: bool,
    /// Sprint time not yet charged against stamina.
    pub sprint_debt: f32,
}

impl Activity {
    pub fn is_idle(&self) -> bool {
        matches!(self, Activity::Idle)
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, Activity::Moving(_))
    }

    pub fn is_sprinting(&self) -> bool {
        matches!(self, Activity::Moving(Moving { sprinting: true, .. }))
    }

    pub fn is_working(&self) -> bool {
        matches!(self, Activity::Working { .. })
    }

    pub fn is_resting(&self) -> bool {
        matches!(self, Activity::Resting { .. })
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self, Activity::Attacking { .. })
    }

    /// Resting with the minimum-rest lock still running.
    pub fn is_rest_locked(&self) -> bool {
        matches!(self, Activity::Resting { lock_remaining, .. } if *lock_remaining > 0.0)
    }
}

impl Default for Activity {
    fn default() -> Self {
        Activity::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_exclusive() {
        let moving = Activity::Moving(Moving {
            target: Vec3::new(1.5, 0.5, 0.5),
            destination: None,
            vertical_factor: 1.0,
            sprinting: true,
            sprint_debt: 0.0,
        });
        assert!(moving.is_moving());
        assert!(moving.is_sprinting());
        assert!(!moving.is_idle());
        assert!(!moving.is_working());
        assert!(!moving.is_resting());
        assert!(!moving.is_attacking());

        assert!(!Activity::Working { remaining: 1.0 }.is_sprinting());
    }

    #[test]
    fn test_rest_lock() {
        let locked = Activity::Resting {
            lock_remaining: 0.4,
            accumulator: 0.0,
        };
        assert!(locked.is_rest_locked());

        let unlocked = Activity::Resting {
            lock_remaining: 0.0,
            accumulator: 2.0,
        };
        assert!(unlocked.is_resting());
        assert!(!unlocked.is_rest_locked());

        assert!(!Activity::Idle.is_rest_locked());
    }
}
