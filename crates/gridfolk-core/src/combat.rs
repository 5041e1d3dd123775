//! Two-party attack resolution.
//!
//! Resolution is synchronous: one call, one outcome. The defender first
//! tries to dodge, then to block; only when both fail does damage land.
//! Both chances are independent draws against a uniform [0, 1) source.

use rand::Rng;

use crate::attributes::Attributes;

/// Chance the defender dodges and relocates unharmed.
pub fn dodge_probability(attacker: &Attributes, defender: &Attributes) -> f32 {
    0.20 * defender.agility() as f32 / attacker.agility() as f32
}

/// Chance the defender blocks, checked only after a failed dodge.
pub fn block_probability(attacker: &Attributes, defender: &Attributes) -> f32 {
    0.25 * (defender.strength() + defender.agility()) as f32
        / (attacker.strength() + attacker.agility()) as f32
}

/// Hit points removed by a landed attack.
pub fn damage(attacker: &Attributes) -> f32 {
    attacker.strength() as f32 / 10.0
}

/// Outcome of one resolved attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    /// Defender evaded; it relocates to a random cube, unharmed.
    Dodged,
    /// Defender absorbed the attack; no damage, no displacement.
    Blocked,
    /// The attack landed for the given damage.
    Hit { damage: f32 },
}

/// Roll dodge, then block. A successful dodge skips the block check
/// entirely, so the two draws stay independent.
pub fn resolve(attacker: &Attributes, defender: &Attributes, rng: &mut impl Rng) -> AttackOutcome {
    if rng.gen::<f32>() < dodge_probability(attacker, defender) {
        return AttackOutcome::Dodged;
    }
    if rng.gen::<f32>() < block_probability(attacker, defender) {
        return AttackOutcome::Blocked;
    }
    AttackOutcome::Hit {
        damage: damage(attacker),
    }
}
