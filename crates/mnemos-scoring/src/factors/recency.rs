/// Linear recency: `max(0, 1 - ageDays / window)`.
///
/// A fresh record scores 1.0, a record at or beyond the window scores 0.0.
pub fn calculate(age_days: f64, window_days: f64) -> f64 {
    if window_days <= 0.0 {
        return 0.0;
    }
    (1.0 - age_days.max(0.0) / window_days).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_within_window() {
        assert_eq!(calculate(0.0, 30.0), 1.0);
        assert!((calculate(15.0, 30.0) - 0.5).abs() < 1e-12);
        assert_eq!(calculate(30.0, 30.0), 0.0);
        assert_eq!(calculate(400.0, 30.0), 0.0);
    }
}
