//! Milestone evaluation for lifetime completion counts.

use serde::Serialize;

/// Suggested badge thresholds. Callers may pass any list — nothing in
/// [`milestones`] hardcodes these.
pub const DEFAULT_THRESHOLDS: [u64; 6] = [10, 50, 100, 250, 500, 1000];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MilestoneStatus {
    pub achieved: Vec<u64>,
    pub next: Option<u64>,
    pub progress_pct: u64,
}

/// Evaluate which thresholds a lifetime completion count has passed.
///
/// `achieved` is every threshold at or below `lifetime_completed`, in
/// ascending order. `next` is the smallest threshold still ahead, if any.
/// `progress_pct` is `round(100 * lifetime_completed / next)`, or 100 once
/// every threshold is behind. The input list is sorted and deduplicated
/// internally, so callers can pass it in any order.
pub fn milestones(lifetime_completed: u64, thresholds: &[u64]) -> MilestoneStatus {
    let mut sorted = thresholds.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let split = sorted.partition_point(|&t| t <= lifetime_completed);
    let next = sorted.get(split).copied();
    let achieved = sorted[..split].to_vec();

    // Half-up rounding in integer arithmetic.
    let progress_pct = match next {
        Some(next) => (100 * lifetime_completed + next / 2) / next,
        None => 100,
    };

    MilestoneStatus {
        achieved,
        next,
        progress_pct,
    }
}
