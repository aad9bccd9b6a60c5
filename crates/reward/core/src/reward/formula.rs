//! Pool recombination formulas.
//!
//! Both formulas are pure and use widened integer arithmetic so extreme
//! configured values cannot wrap. Results are clamped back into `i32`.

/// Mana after a grant.
///
/// The pool starts at `current`, or at `percentage` of `capacity` when an
/// override is set. Up to the missing amount is added directly; whatever
/// exceeds capacity is damped by `overflow_factor` percent.
///
/// ```
/// # use reward_core::reward::recombine_mana;
/// // 80/100 mana, +50 with half overflow: 20 fills the pool, 30 overflows into 15
/// assert_eq!(recombine_mana(80, 100, None, 50, 50), 115);
/// ```
pub fn recombine_mana(
    current: i32,
    capacity: i32,
    percentage: Option<u32>,
    delta: i32,
    overflow_factor: i32,
) -> i32 {
    let capacity = i64::from(capacity);
    let pool = match percentage {
        Some(percent) => capacity * i64::from(percent) / 100,
        None => i64::from(current),
    };
    let delta = i64::from(delta);

    let missing = (capacity - pool).max(0);
    let granted = missing.min(delta);
    let overflow = delta - granted;
    let overflow_applied = overflow * i64::from(overflow_factor) / 100;

    clamp_i32(pool + granted + overflow_applied)
}

/// Movement points after a grant. Never negative.
///
/// `capacity` is the hero's capacity for its current medium (land or sea).
pub fn recombine_movement(current: i32, capacity: i32, percentage: Option<u32>, delta: i32) -> i32 {
    let base = match percentage {
        Some(percent) => i64::from(capacity) * i64::from(percent) / 100,
        None => i64::from(current),
    };
    clamp_i32((base + i64::from(delta)).max(0))
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
