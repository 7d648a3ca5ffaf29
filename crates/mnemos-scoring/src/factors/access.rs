/// Additive access boost: `accessCount · accessBoost`. Unbounded; the
/// caller clamps the final score.
pub fn calculate(access_count: u64, access_boost: f64) -> f64 {
    access_count as f64 * access_boost
}
