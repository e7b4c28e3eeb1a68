//! Combined dashboard overview.
//!
//! The dashboard, performance, and plan-viewer panels all need the same
//! figures; this derives them once, in one pass over one snapshot.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::aggregate::{aggregate, ProjectProgress};
use crate::due::{classify_due, DueStatus};
use crate::milestone::{milestones, MilestoneStatus};
use crate::model::{Priority, Snapshot};
use crate::rollup::{rollup, Rollup};
use crate::streak::{streaks, Streaks};
use crate::timewindow::day_key;

/// One project's progress with its presentation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectOverview {
    #[serde(flatten)]
    pub progress: ProjectProgress,
    pub priority: Priority,
    pub due: Option<DueStatus>,
}

/// Everything the panels need for one render: today's rollup, per-project
/// progress and due status, streaks, and milestone standing.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub generated_at: DateTime<Utc>,
    pub day_key: String,
    pub rollup: Rollup,
    pub projects: Vec<ProjectOverview>,
    pub streaks: Streaks,
    pub milestones: MilestoneStatus,
}

/// Compute the full overview for the local day containing `now`.
///
/// Pure and idempotent — safe to recompute on every completion event or
/// clock tick. Completion day-keys and the lifetime count are derived from
/// the snapshot's activities; nothing is cached.
pub fn overview<Tz: TimeZone>(
    snapshot: &Snapshot,
    thresholds: &[u64],
    now: &DateTime<Tz>,
) -> Overview {
    let per_project = aggregate(&snapshot.projects, &snapshot.activities, now);
    let today_rollup = rollup(&per_project);

    let day_keys = snapshot.completion_day_keys(now);
    let lifetime_completed = snapshot.lifetime_completed();

    // aggregate() preserves project order, so zipping keeps each progress
    // entry aligned with its project.
    let projects = per_project
        .into_iter()
        .zip(&snapshot.projects)
        .map(|(progress, project)| ProjectOverview {
            progress,
            priority: project.priority,
            due: classify_due(
                project
                    .due_at
                    .map(|d| d.with_timezone(&now.timezone()))
                    .as_ref(),
                now,
            ),
        })
        .collect();

    Overview {
        generated_at: now.with_timezone(&Utc),
        day_key: day_key(now),
        rollup: today_rollup,
        projects,
        streaks: streaks(&day_keys, now),
        milestones: milestones(lifetime_completed, thresholds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::due::DueTier;
    use crate::milestone::DEFAULT_THRESHOLDS;
    use crate::model::{Activity, ActivityKind, Project};
    use chrono::{Duration, TimeZone};

    fn snapshot() -> (Snapshot, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2025, 1, 4, 18, 0, 0).unwrap();
        let yesterday = now - Duration::days(1);

        let snapshot = Snapshot {
            projects: vec![
                Project::new("anatomy", "Anatomy")
                    .with_target(8)
                    .with_pay_per_task(50)
                    .with_avg_minutes(3)
                    .with_due(now + Duration::hours(6)),
                Project::new("physio", "Physiology").with_target(2),
            ],
            activities: vec![
                Activity::new("anatomy", ActivityKind::Labeling).complete_at(now),
                Activity::new("anatomy", ActivityKind::Labeling).complete_at(now),
                Activity::new("anatomy", ActivityKind::Labeling).complete_at(now),
                Activity::new("anatomy", ActivityKind::Labeling).complete_at(yesterday),
                Activity::new("physio", ActivityKind::Reading),
            ],
        };
        (snapshot, now)
    }

    #[test]
    fn test_overview_composes_all_sections() {
        let (snapshot, now) = snapshot();
        let o = overview(&snapshot, &DEFAULT_THRESHOLDS, &now);

        assert_eq!(o.day_key, "2025-01-04");
        assert_eq!(o.projects.len(), 2);

        // Rollup: anatomy remaining 5 (15 min, 250c planned, 150c earned)
        // plus physio remaining 2.
        assert_eq!(o.rollup.remaining_tasks, 7);
        assert_eq!(o.rollup.planned_minutes, 15);
        assert_eq!(o.rollup.planned_cents, 250);
        assert_eq!(o.rollup.earned_cents_today, 150);

        // Completions yesterday and today form the streak.
        assert_eq!(o.streaks.current, 2);
        assert_eq!(o.streaks.best, 2);

        // 4 lifetime completions, first badge at 10.
        assert_eq!(o.milestones.next, Some(10));
        assert_eq!(o.milestones.progress_pct, 40);
    }

    #[test]
    fn test_overview_per_project_due_status() {
        let (snapshot, now) = snapshot();
        let o = overview(&snapshot, &DEFAULT_THRESHOLDS, &now);

        let anatomy = &o.projects[0];
        let due = anatomy.due.as_ref().unwrap();
        assert_eq!(due.tier, DueTier::Warning);
        assert_eq!(due.label, "Due in 6h 0m");

        assert!(o.projects[1].due.is_none());
    }

    #[test]
    fn test_overview_is_idempotent() {
        let (snapshot, now) = snapshot();
        let a = overview(&snapshot, &DEFAULT_THRESHOLDS, &now);
        let b = overview(&snapshot, &DEFAULT_THRESHOLDS, &now);

        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_overview_empty_snapshot() {
        let now = Utc::now();
        let o = overview(&Snapshot::default(), &DEFAULT_THRESHOLDS, &now);

        assert_eq!(o.rollup, Rollup::default());
        assert!(o.projects.is_empty());
        assert_eq!(o.streaks, Streaks::default());
        assert!(o.milestones.achieved.is_empty());
    }
}
