//! Rest recovery rates and accrual.
//!
//! Recovery is accumulator-based: resting time accrues, and every time the
//! accumulator covers the current per-point interval one point is granted
//! and the interval subtracted. The fractional remainder carries over, so
//! no rest time is lost to tick boundaries.

/// Seconds of rest to recover one hit point.
pub fn hit_point_interval(toughness: u32) -> f32 {
    0.2 / (toughness as f32 / 200.0)
}

/// Seconds of rest to recover one stamina point. Stamina comes back twice
/// as fast as hit points.
pub fn stamina_interval(toughness: u32) -> f32 {
    0.2 / (toughness as f32 / 100.0)
}

/// Duration of the minimum-rest lock: long enough to recover one hit point.
pub fn min_rest_lock(toughness: u32) -> f32 {
    hit_point_interval(toughness)
}

/// Convert accumulated rest time into recovered points for one pool.
/// Returns the remaining accumulator and the new pool value. Stops at the
/// cap; whatever time is left stays in the accumulator.
pub fn drain(mut accumulator: f32, mut current: f32, max: u32, interval: f32) -> (f32, f32) {
    let max = max as f32;
    while accumulator >= interval && current < max {
        accumulator -= interval;
        current = (current + 1.0).min(max);
    }
    (accumulator, current)
}
