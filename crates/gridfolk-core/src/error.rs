//! Error type for rejected unit commands.

use crate::math::Cube;

/// A command precondition was violated. The unit involved is untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitError {
    /// `advance_time` was called with a step outside (0, MAX_TICK].
    InvalidTimeStep { dt: f32 },
    /// A movement destination lies outside the world.
    OutOfBounds { cube: Cube },
    /// An adjacent-step delta was not -1, 0 or 1.
    InvalidStep { dx: i32, dy: i32, dz: i32 },
    /// Attack attempted on a unit more than one cube away.
    NotAdjacent { attacker: Cube, defender: Cube },
    /// A unit name failed validation.
    InvalidName { name: String },
}

impl std::fmt::Display for UnitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitError::InvalidTimeStep { dt } => {
                write!(f, "Time step {} is outside (0, 0.2] seconds", dt)
            }
            UnitError::OutOfBounds { cube } => {
                write!(
                    f,
                    "Cube ({}, {}, {}) is outside the world",
                    cube.x, cube.y, cube.z
                )
            }
            UnitError::InvalidStep { dx, dy, dz } => {
                write!(
                    f,
                    "Adjacent step ({}, {}, {}) has a delta outside -1..=1",
                    dx, dy, dz
                )
            }
            UnitError::NotAdjacent { attacker, defender } => {
                write!(
                    f,
                    "Attacker at ({}, {}, {}) is not adjacent to defender at ({}, {}, {})",
                    attacker.x, attacker.y, attacker.z, defender.x, defender.y, defender.z
                )
            }
            UnitError::InvalidName { name } => {
                write!(f, "Invalid unit name: {:?}", name)
            }
        }
    }
}

impl std::error::Error for UnitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = UnitError::OutOfBounds {
            cube: Cube::new(50, 0, 0),
        };
        assert!(err.to_string().contains("(50, 0, 0)"));

        let err = UnitError::InvalidName {
            name: "x".to_string(),
        };
        assert!(err.to_string().contains("\"x\""));
    }
}
