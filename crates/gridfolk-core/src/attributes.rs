//! Primary attributes and the capacities derived from them.
//!
//! Setters clamp instead of failing: an out-of-range value is pulled to the
//! nearest legal one. Derived capacities are recomputed from the current
//! attributes on every read, so a weight change moves the caps immediately
//! without touching the unit's current pools.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ATTRIBUTE_MAX, ATTRIBUTE_MIN, INITIAL_ATTRIBUTE_MAX, INITIAL_ATTRIBUTE_MIN,
};

/// Strength, agility, toughness and weight of a unit.
///
/// Invariants kept by the setters:
/// - every attribute stays in [1, 200]
/// - weight is raised to ceil((strength + agility) / 2) when set below it
///
/// Raising strength or agility afterwards does not retroactively push
/// weight up; the floor is applied when weight itself is written.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attributes {
    strength: u32,
    agility: u32,
    toughness: u32,
    weight: u32,
}

impl Attributes {
    /// Build an initial attribute set. Strength, agility and toughness are
    /// clamped into [25, 100]; weight goes straight to its setter, which
    /// bounds it into [ceil((strength + agility) / 2), 200].
    pub fn new(strength: u32, agility: u32, toughness: u32, weight: u32) -> Self {
        let mut attrs = Self {
            strength: strength.clamp(INITIAL_ATTRIBUTE_MIN, INITIAL_ATTRIBUTE_MAX),
            agility: agility.clamp(INITIAL_ATTRIBUTE_MIN, INITIAL_ATTRIBUTE_MAX),
            toughness: toughness.clamp(INITIAL_ATTRIBUTE_MIN, INITIAL_ATTRIBUTE_MAX),
            weight: 0,
        };
        attrs.set_weight(weight);
        attrs
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn agility(&self) -> u32 {
        self.agility
    }

    pub fn toughness(&self) -> u32 {
        self.toughness
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn set_strength(&mut self, strength: u32) {
        self.strength = strength.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX);
    }

    pub fn set_agility(&mut self, agility: u32) {
        self.agility = agility.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX);
    }

    pub fn set_toughness(&mut self, toughness: u32) {
        self.toughness = toughness.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX);
    }

    /// Set the weight, clamped into [ceil((strength + agility) / 2), 200].
    pub fn set_weight(&mut self, weight: u32) {
        self.weight = weight.clamp(self.min_weight(), ATTRIBUTE_MAX);
    }

    /// Lowest legal weight for the current strength and agility.
    pub fn min_weight(&self) -> u32 {
        (self.strength + self.agility + 1) / 2
    }

    /// Hit point capacity: ceil(2 * weight * toughness / 100).
    pub fn max_hit_points(&self) -> u32 {
        (2 * self.weight * self.toughness + 99) / 100
    }

    /// Stamina capacity. Same formula as hit points; the pools themselves
    /// are independent.
    pub fn max_stamina(&self) -> u32 {
        (2 * self.weight * self.toughness + 99) / 100
    }

    /// Walking speed in cubes per second on level ground.
    pub fn base_speed(&self) -> f32 {
        1.5 * (self.strength + self.agility) as f32 / (200.0 * self.weight as f32 / 100.0)
    }
}
