//! Due-date classification: urgency tier plus a human-readable label.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

/// Urgency tier for a deadline, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueTier {
    Error,
    Warning,
    Default,
}

impl std::fmt::Display for DueTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueStatus {
    pub label: String,
    pub tier: DueTier,
}

/// Truncating human-readable duration:
/// - at least 2 days: `"{d}d"`
/// - exactly 1 day: `"1d {h}h"`
/// - at least 1 hour: `"{h}h {m}m"`
/// - otherwise: `"{m}m"`
///
/// Always floors, never rounds. Negative input clamps to `"0m"`.
pub fn humanize_duration(ms: i64) -> String {
    let ms = ms.max(0);
    let days = ms / DAY_MS;
    let hours = ms / HOUR_MS;
    let minutes = ms / MINUTE_MS;

    if days >= 2 {
        format!("{days}d")
    } else if days == 1 {
        format!("1d {}h", hours - 24)
    } else if hours >= 1 {
        format!("{hours}h {}m", minutes - hours * 60)
    } else {
        format!("{minutes}m")
    }
}

/// Classify a deadline relative to `now`.
///
/// `None` means "no due date" — an explicit signal, distinct from every
/// urgency tier. Overdue deadlines are [`DueTier::Error`]; anything due
/// within 24 hours (boundary inclusive) is [`DueTier::Warning`]; the rest
/// are [`DueTier::Default`].
pub fn classify_due<Tz: TimeZone>(
    due_at: Option<&DateTime<Tz>>,
    now: &DateTime<Tz>,
) -> Option<DueStatus> {
    let due_at = due_at?;
    let delta_ms = (due_at.clone() - now.clone()).num_milliseconds();

    Some(if delta_ms < 0 {
        DueStatus {
            label: format!("Overdue {}", humanize_duration(-delta_ms)),
            tier: DueTier::Error,
        }
    } else {
        let tier = if delta_ms <= DAY_MS {
            DueTier::Warning
        } else {
            DueTier::Default
        };
        DueStatus {
            label: format!("Due in {}", humanize_duration(delta_ms)),
            tier,
        }
    })
}
