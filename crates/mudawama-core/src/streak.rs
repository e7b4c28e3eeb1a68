//! Consecutive-day completion streaks.

use std::collections::HashSet;

use chrono::Datelike;
use serde::Serialize;

use crate::timewindow::{day_key, day_number};

/// Current and best consecutive-day completion streaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streaks {
    pub current: u64,
    pub best: u64,
}

/// Compute streaks from a set of completion day-keys.
///
/// `best` is the longest run of consecutive calendar days anywhere in the
/// set — a single linear scan over the sorted, deduplicated day numbers.
/// `current` walks backward from the day containing `now` and is 0 when
/// that day has no completion yet. Keys that do not parse as `YYYY-MM-DD`
/// are skipped with a warning, never fatal.
pub fn streaks<T: Datelike>(day_keys: &HashSet<String>, now: &T) -> Streaks {
    let mut days: Vec<i64> = day_keys
        .iter()
        .filter_map(|key| {
            let n = day_number(key);
            if n.is_none() {
                tracing::warn!(key = %key, "skipping unparsable day-key");
            }
            n
        })
        .collect();
    days.sort_unstable();
    days.dedup();

    if days.is_empty() {
        return Streaks::default();
    }

    let mut best = 1u64;
    let mut run = 1u64;
    for pair in days.windows(2) {
        if pair[1] - pair[0] == 1 {
            run += 1;
        } else {
            run = 1;
        }
        best = best.max(run);
    }

    let present: HashSet<i64> = days.iter().copied().collect();
    let Some(today) = day_number(&day_key(now)) else {
        return Streaks { current: 0, best };
    };

    let mut current = 0u64;
    let mut day = today;
    while present.contains(&day) {
        current += 1;
        day -= 1;
    }

    Streaks { current, best }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn keys(days: &[&str]) -> HashSet<String> {
        days.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_empty_set() {
        let now = Utc::now();
        assert_eq!(streaks(&HashSet::new(), &now), Streaks::default());
    }

    #[test]
    fn test_gap_resets_current_but_not_best() {
        // Jan 1–2 is the best run; Jan 3 is missing, so the current streak
        // on Jan 4 is just Jan 4 itself.
        let now = Utc.with_ymd_and_hms(2025, 1, 4, 10, 0, 0).unwrap();
        let s = streaks(&keys(&["2025-01-01", "2025-01-02", "2025-01-04"]), &now);
        assert_eq!(s.best, 2);
        assert_eq!(s.current, 1);
    }

    #[test]
    fn test_no_completion_today_means_zero_current() {
        let now = Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
        let s = streaks(&keys(&["2025-01-03", "2025-01-04"]), &now);
        assert_eq!(s.current, 0);
        assert_eq!(s.best, 2);
    }

    #[test]
    fn test_unbroken_streak_through_today() {
        let now = Utc.with_ymd_and_hms(2025, 1, 4, 22, 0, 0).unwrap();
        let s = streaks(
            &keys(&["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-04"]),
            &now,
        );
        assert_eq!(s.current, 4);
        assert_eq!(s.best, 4);
    }

    #[test]
    fn test_single_isolated_day() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let s = streaks(&keys(&["2025-05-20"]), &now);
        assert_eq!(s.best, 1);
        assert_eq!(s.current, 0);
    }

    #[test]
    fn test_run_spanning_month_boundary() {
        let now = Utc.with_ymd_and_hms(2025, 2, 2, 8, 0, 0).unwrap();
        let s = streaks(
            &keys(&["2025-01-30", "2025-01-31", "2025-02-01", "2025-02-02"]),
            &now,
        );
        assert_eq!(s.current, 4);
        assert_eq!(s.best, 4);
    }

    #[test]
    fn test_filling_a_gap_never_decreases_best() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap();
        let without = streaks(&keys(&["2025-01-05", "2025-01-07"]), &now);

        let with = streaks(&keys(&["2025-01-05", "2025-01-06", "2025-01-07"]), &now);
        assert!(with.best >= without.best);
        assert_eq!(with.best, 3);
    }

    #[test]
    fn test_adding_today_extends_current_by_one() {
        let now = Utc.with_ymd_and_hms(2025, 1, 5, 10, 0, 0).unwrap();
        let ending_yesterday = keys(&["2025-01-03", "2025-01-04"]);
        let before = streaks(&ending_yesterday, &now);
        assert_eq!(before.current, 0);

        let mut with_today = ending_yesterday;
        with_today.insert("2025-01-05".to_string());
        let after = streaks(&with_today, &now);
        assert_eq!(after.current, 3);
    }

    #[test]
    fn test_unparsable_keys_are_skipped() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap();
        let s = streaks(&keys(&["2025-01-01", "2025-01-02", "garbage"]), &now);
        assert_eq!(s.current, 2);
        assert_eq!(s.best, 2);
    }
}
