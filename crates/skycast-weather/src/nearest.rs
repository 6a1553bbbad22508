//! Nearest-hour lookup.
//!
//! Hourly series and the instantaneous "current" reading are not aligned, so
//! values are taken from the sample closest in time to the current reading.

use chrono::NaiveDateTime;

/// Index of the timestamp closest to `target`.
///
/// Linear scan; only a strictly smaller difference replaces the best match, so
/// on a tie the earliest index wins. An empty sequence or an absent target
/// yields `0`, and callers must not index an empty series with it.
pub fn nearest_index(timestamps: &[NaiveDateTime], target: Option<NaiveDateTime>) -> usize {
    let Some(target) = target else {
        return 0;
    };

    let mut best = 0;
    let mut best_diff: Option<i64> = None;

    for (i, ts) in timestamps.iter().enumerate() {
        let diff = (*ts - target).num_seconds().abs();
        if best_diff.map_or(true, |d| diff < d) {
            best = i;
            best_diff = Some(diff);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 16)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn minutes(m: i64) -> NaiveDateTime {
        base() + Duration::minutes(m)
    }

    #[test]
    fn test_exact_match() {
        let times = [minutes(0), minutes(60), minutes(120)];
        assert_eq!(nearest_index(&times, Some(minutes(60))), 1);
    }

    #[test]
    fn test_closest_after_and_before() {
        let times = [minutes(0), minutes(60), minutes(120)];
        assert_eq!(nearest_index(&times, Some(minutes(100))), 2);
        assert_eq!(nearest_index(&times, Some(minutes(20))), 0);
        assert_eq!(nearest_index(&times, Some(minutes(-500))), 0);
        assert_eq!(nearest_index(&times, Some(minutes(9000))), 2);
    }

    #[test]
    fn test_tie_keeps_earliest_index() {
        // 90 is 30 after the second sample and 30 before the third
        let times = [minutes(0), minutes(60), minutes(120)];
        assert_eq!(nearest_index(&times, Some(minutes(90))), 1);
    }

    #[test]
    fn test_tie_with_duplicate_timestamps() {
        let times = [minutes(0), minutes(60), minutes(60)];
        assert_eq!(nearest_index(&times, Some(minutes(60))), 1);
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(nearest_index(&[], Some(minutes(30))), 0);
    }

    #[test]
    fn test_absent_target() {
        let times = [minutes(0), minutes(60)];
        assert_eq!(nearest_index(&times, None), 0);
    }

    #[test]
    fn test_unordered_input() {
        let times = [minutes(180), minutes(0), minutes(65), minutes(55)];
        assert_eq!(nearest_index(&times, Some(minutes(60))), 2);
    }
}
