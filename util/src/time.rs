//! General time utility functions

use chrono;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Tolerance used when comparing elapsed times built from summed cycle periods.
pub const TIME_EPSILON_S: f64 = 1e-9;

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Returns `true` if at least `duration_s` has passed between `start_s` and
/// `now_s`.
///
/// Times that are accumulated from a fixed cycle period pick up rounding
/// error (`15 * 0.02` is not exactly `0.3`), so the comparison allows
/// `TIME_EPSILON_S` of slack.
pub fn elapsed_at_least(start_s: f64, now_s: f64, duration_s: f64) -> bool {
    now_s - start_s >= duration_s - TIME_EPSILON_S
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_at_least() {
        // 15 cycles of 20 ms is a 0.3 s wait even with rounding
        let now_s = (0..15).fold(0.0, |t, _| t + 0.02);
        assert!(elapsed_at_least(0.0, now_s, 0.3));

        assert!(!elapsed_at_least(0.0, 0.28, 0.3));
        assert!(elapsed_at_least(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_duration_to_seconds() {
        let d = chrono::Duration::milliseconds(1500);
        assert_eq!(duration_to_seconds(d), Some(1.5));
    }
}
