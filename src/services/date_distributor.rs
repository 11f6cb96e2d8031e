//! Even distribution of exam dates across a window.
//!
//! Pure and synchronous; the orchestrator assigns `dates[i]` to the
//! i-th target in the deterministic candidate order, so for identical
//! inputs the mapping is reproducible across preview and schedule.

use chrono::{DateTime, Duration, Utc};

/// Map `n` targets onto `[start, end]` as evenly spaced instants.
///
/// For `n == 0` returns `[]`; for `n == 1` returns `[start]`. For
/// `n >= 2` the sequence is inclusive of both endpoints: the first
/// instant is `start` and the last is `end`. Not randomized and not
/// conflict-aware.
///
/// `end < start` is rejected by input validation upstream; the range is
/// still clamped to zero here so a misuse degrades to `n` copies of
/// `start` instead of walking backwards.
pub fn distribute(n: usize, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    if n == 0 {
        return vec![];
    }
    if n == 1 {
        return vec![start];
    }

    let range_ms = (end - start).num_milliseconds().max(0);
    let last = (n - 1) as i64;

    (0..n as i64)
        .map(|i| start + Duration::milliseconds(range_ms * i / last))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn zero_targets_yield_empty() {
        assert!(distribute(0, at(2025, 1, 1), at(2025, 1, 10)).is_empty());
    }

    #[test]
    fn one_target_lands_on_start() {
        let dates = distribute(1, at(2025, 1, 1), at(2025, 1, 10));
        assert_eq!(dates, vec![at(2025, 1, 1)]);
    }

    #[test]
    fn two_targets_touch_both_endpoints() {
        let dates = distribute(2, at(2025, 1, 1), at(2025, 1, 10));
        assert_eq!(dates, vec![at(2025, 1, 1), at(2025, 1, 10)]);
    }

    #[test]
    fn interior_dates_are_evenly_spaced() {
        let dates = distribute(4, at(2025, 1, 1), at(2025, 1, 4));
        assert_eq!(
            dates,
            vec![at(2025, 1, 1), at(2025, 1, 2), at(2025, 1, 3), at(2025, 1, 4)]
        );
    }

    #[test]
    fn inverted_window_clamps_to_start() {
        let dates = distribute(3, at(2025, 1, 10), at(2025, 1, 1));
        assert_eq!(dates, vec![at(2025, 1, 10); 3]);
    }

    #[test]
    fn zero_width_window_repeats_start() {
        let dates = distribute(3, at(2025, 1, 5), at(2025, 1, 5));
        assert_eq!(dates, vec![at(2025, 1, 5); 3]);
    }

    proptest! {
        #[test]
        fn length_endpoints_and_monotonicity(
            n in 0usize..200,
            start_ms in 0i64..4_000_000_000_000,
            width_ms in 0i64..400_000_000_000,
        ) {
            let start = Utc.timestamp_millis_opt(start_ms).unwrap();
            let end = Utc.timestamp_millis_opt(start_ms + width_ms).unwrap();
            let dates = distribute(n, start, end);

            prop_assert_eq!(dates.len(), n);
            if n >= 1 {
                prop_assert_eq!(dates[0], start);
            }
            if n >= 2 {
                prop_assert_eq!(dates[n - 1], end);
            }
            for pair in dates.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
            // Same inputs, same output.
            prop_assert_eq!(&dates, &distribute(n, start, end));
        }
    }
}
