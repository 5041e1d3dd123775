//! Straight-line kinematics between cube centers.
//!
//! A moving unit always walks one leg at a time, from its current position
//! to the center of a neighboring cube. Speed depends on the attributes,
//! the vertical direction of the leg and the sprint flag; the integration
//! itself is a plain linear step with an exact snap on arrival.

use crate::attributes::Attributes;
use crate::math::{self, Cube, Vec3};

/// Result of advancing one leg by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepResult {
    /// Still under way; new position and facing.
    Moving { position: Vec3, orientation: f32 },
    /// The remaining distance fit into this tick; snap onto the target.
    Arrived,
}

/// Speed factor from the cube-level change of the current leg.
/// Descending a level is slow, climbing is fast, level ground is neutral.
pub fn vertical_factor(from: Cube, to: Cube) -> f32 {
    match to.z - from.z {
        -1 => 0.5,
        1 => 1.2,
        _ => 1.0,
    }
}

/// Effective speed for one leg, in cubes per second. The vertical factor
/// is decided once, when the leg starts, and holds until arrival.
pub fn leg_speed(attrs: &Attributes, vertical_factor: f32, sprinting: bool) -> f32 {
    let walk = attrs.base_speed() * vertical_factor;
    if sprinting {
        2.0 * walk
    } else {
        walk
    }
}

/// Advance `position` toward `target` by `speed * dt`, facing the
/// direction of travel.
pub fn step(position: Vec3, target: Vec3, speed: f32, dt: f32) -> StepResult {
    let to_target = target - position;
    let distance = to_target.length();
    if distance <= speed * dt {
        return StepResult::Arrived;
    }
    let direction = to_target.normalize();
    StepResult::Moving {
        position: position + direction * (speed * dt),
        orientation: math::normalize_angle(direction.y.atan2(direction.x)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> Attributes {
        Attributes::new(50, 50, 50, 50)
    }

    #[test]
    fn test_vertical_factor() {
        let from = Cube::new(5, 5, 5);
        assert_eq!(vertical_factor(from, Cube::new(5, 6, 5)), 1.0);
        assert_eq!(vertical_factor(from, Cube::new(5, 5, 4)), 0.5);
        assert_eq!(vertical_factor(from, Cube::new(5, 5, 6)), 1.2);
    }

    #[test]
    fn test_leg_speed_sprint_doubles() {
        let walk = leg_speed(&attrs(), 1.0, false);
        let sprint = leg_speed(&attrs(), 1.0, true);
        assert!((walk - 1.5).abs() < 1e-6);
        assert!((sprint - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_leg_speed_applies_vertical_factor() {
        let from = Cube::new(5, 5, 5);
        let up = leg_speed(&attrs(), vertical_factor(from, Cube::new(5, 5, 6)), false);
        let down = leg_speed(&attrs(), vertical_factor(from, Cube::new(5, 5, 4)), false);
        assert!((up - 1.8).abs() < 1e-6);
        assert!((down - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_step_advances_and_faces_travel() {
        let position = Vec3::new(0.5, 0.5, 0.5);
        let target = Vec3::new(0.5, 1.5, 0.5);
        match step(position, target, 1.0, 0.2) {
            StepResult::Moving {
                position: next,
                orientation,
            } => {
                assert!((next.y - 0.7).abs() < 1e-6);
                assert_eq!(next.x, 0.5);
                // moving along +y
                assert!((orientation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
            }
            StepResult::Arrived => panic!("should not arrive after 0.2 of 1.0"),
        }
    }

    #[test]
    fn test_step_snaps_on_arrival() {
        let position = Vec3::new(1.45, 0.5, 0.5);
        let target = Vec3::new(1.5, 0.5, 0.5);
        assert_eq!(step(position, target, 1.0, 0.2), StepResult::Arrived);
        // zero remaining distance is an arrival, not a NaN direction
        assert_eq!(step(target, target, 1.0, 0.2), StepResult::Arrived);
    }
}
