//! Local calendar-day classification.
//!
//! All comparisons use calendar fields (year, month, day-of-month), never
//! elapsed-millisecond arithmetic, so a DST shift near midnight cannot move
//! an instant into the wrong day. Callers pass already-localized values;
//! there is no hidden timezone.

use chrono::{Datelike, NaiveDate};

/// Canonical `YYYY-MM-DD` key for an instant's local calendar date.
pub fn day_key<T: Datelike>(t: &T) -> String {
    format!("{:04}-{:02}-{:02}", t.year(), t.month(), t.day())
}

/// Two instants fall on the same local calendar day iff year, month, and
/// day-of-month all match.
pub fn is_same_local_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Day-key to consecutive integer day number (days since the common era).
/// Parsed as a calendar date, so adjacent dates always differ by exactly 1,
/// including across DST transitions. Returns `None` for keys that are not
/// `YYYY-MM-DD`.
pub fn day_number(key: &str) -> Option<i64> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .ok()
        .map(|d| i64::from(d.num_days_from_ce()))
}
