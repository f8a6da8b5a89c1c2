//! Pure timing math for counting animations.
//!
//! Kept free of any scheduler so runs can be tested with simulated
//! timestamps.

/// Default counting duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 2000;

/// Fraction of `duration_ms` covered by `elapsed_ms`, clamped to `[0, 1]`.
///
/// Linear easing. A zero duration is complete immediately, and a NaN
/// elapsed time counts as no progress.
#[must_use]
pub fn linear_progress(elapsed_ms: f64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 1.0;
    }
    if elapsed_ms.is_nan() {
        return 0.0;
    }
    (elapsed_ms / duration_ms as f64).clamp(0.0, 1.0)
}

/// Value displayed at `progress`: `floor(progress * target)`, never above `target`.
#[must_use]
pub fn counted_value(progress: f64, target: u64) -> u64 {
    if progress.is_nan() {
        return 0;
    }
    let value = (progress.clamp(0.0, 1.0) * target as f64).floor() as u64;
    value.min(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // =========================================================================
    // linear_progress
    // =========================================================================

    #[test]
    fn test_progress_midpoint() {
        assert_eq!(linear_progress(1000.0, 2000), 0.5);
    }

    #[test]
    fn test_progress_clamps_negative_elapsed() {
        assert_eq!(linear_progress(-50.0, 2000), 0.0);
    }

    #[test]
    fn test_progress_clamps_overshoot() {
        assert_eq!(linear_progress(5000.0, 2000), 1.0);
    }

    #[test]
    fn test_progress_zero_duration_is_complete() {
        assert_eq!(linear_progress(0.0, 0), 1.0);
        assert_eq!(linear_progress(-1.0, 0), 1.0);
    }

    #[test]
    fn test_progress_nan_elapsed() {
        assert_eq!(linear_progress(f64::NAN, 2000), 0.0);
    }

    // =========================================================================
    // counted_value
    // =========================================================================

    #[test]
    fn test_counted_value_floors() {
        assert_eq!(counted_value(0.5, 10), 5);
        assert_eq!(counted_value(0.49, 10), 4);
        assert_eq!(counted_value(0.99, 2), 1);
    }

    #[test]
    fn test_counted_value_bounds() {
        assert_eq!(counted_value(0.0, 10), 0);
        assert_eq!(counted_value(1.0, 10), 10);
        assert_eq!(counted_value(1.0, 0), 0);
        assert_eq!(counted_value(f64::NAN, 10), 0);
    }

    proptest! {
        #[test]
        fn prop_progress_in_unit_range(elapsed in -1.0e6f64..1.0e6, duration in 0u64..100_000) {
            let p = linear_progress(elapsed, duration);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn prop_progress_non_decreasing(a in 0.0f64..10_000.0, b in 0.0f64..10_000.0, duration in 1u64..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(linear_progress(lo, duration) <= linear_progress(hi, duration));
        }

        #[test]
        fn prop_counted_value_never_exceeds_target(p in -1.0f64..2.0, target in 0u64..1_000_000) {
            prop_assert!(counted_value(p, target) <= target);
        }
    }
}
