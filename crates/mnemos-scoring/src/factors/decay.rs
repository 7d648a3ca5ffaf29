/// Daily forgetting: `decayFactor ^ ageDays`.
///
/// Range: (0, 1] for `decay_factor` in (0, 1). Strictly decreasing in age.
pub fn calculate(decay_factor: f64, age_days: f64) -> f64 {
    decay_factor.powf(age_days.max(0.0))
}
