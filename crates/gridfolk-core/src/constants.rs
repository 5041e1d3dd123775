//! Numeric rules of the simulation, collected in one place.

/// Upper bound on a single time step, in seconds.
pub const MAX_TICK: f32 = 0.2;

/// Seconds a unit may go without resting before rest is forced.
pub const FORCED_REST_AFTER: f32 = 180.0;

/// Sprinting drains one stamina point per this many seconds.
pub const SPRINT_DRAIN_INTERVAL: f32 = 0.1;

/// Seconds an attack blocks the attacker from starting a new activity.
pub const ATTACK_DURATION: f32 = 1.0;

/// Attribute bounds after construction.
pub const ATTRIBUTE_MIN: u32 = 1;
pub const ATTRIBUTE_MAX: u32 = 200;

/// Narrower clamp applied to strength, agility and toughness at
/// construction. Weight is exempt; its setter's range applies.
pub const INITIAL_ATTRIBUTE_MIN: u32 = 25;
pub const INITIAL_ATTRIBUTE_MAX: u32 = 100;

/// Default world edge length, in cubes.
pub const DEFAULT_WORLD_EDGE: i32 = 50;
