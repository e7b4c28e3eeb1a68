//! Per-project progress aggregation for one local day.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::model::{Activity, Project};
use crate::timewindow::is_same_local_day;

/// Counts and planned/earned figures for one project on one local day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProgress {
    pub project_id: String,
    pub name: String,
    /// Activities belonging to the project, any status.
    pub total: u64,
    /// Lifetime completions.
    pub done_total: u64,
    /// Completions on the local day containing `now`.
    pub done_today: u64,
    /// `max(today_target_count - done_today, 0)`. The target is advisory,
    /// so overshooting it yields 0 remaining, never a negative.
    pub remaining_today: u64,
    pub planned_minutes: u64,
    pub planned_cents: u64,
    pub earned_cents_today: u64,
}

/// Walk every project and compute its progress for the local day
/// containing `now`. Completions are classified into "today" in the
/// timezone of `now`.
///
/// Output order is the input order of `projects` — sorting is a
/// presentation concern. Missing payout/pacing metadata is 0 by
/// construction (see the model defaults), so there is no division and no
/// null propagation anywhere in here.
pub fn aggregate<Tz: TimeZone>(
    projects: &[Project],
    activities: &[Activity],
    now: &DateTime<Tz>,
) -> Vec<ProjectProgress> {
    let mut by_project: HashMap<&str, Vec<&Activity>> = HashMap::new();
    for activity in activities {
        by_project
            .entry(activity.project_id.as_str())
            .or_default()
            .push(activity);
    }

    let progress: Vec<ProjectProgress> = projects
        .iter()
        .map(|project| {
            let acts = by_project
                .get(project.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let total = acts.len() as u64;
            let done_total = acts.iter().filter(|a| a.is_done()).count() as u64;
            let done_today = acts
                .iter()
                .filter(|a| a.is_done())
                .filter_map(|a| a.completed_at.as_ref())
                .filter(|at| is_same_local_day(&at.with_timezone(&now.timezone()), now))
                .count() as u64;

            let remaining_today = project.today_target_count.saturating_sub(done_today);

            ProjectProgress {
                project_id: project.id.clone(),
                name: project.name.clone(),
                total,
                done_total,
                done_today,
                remaining_today,
                planned_minutes: remaining_today * project.avg_minutes_per_task,
                planned_cents: remaining_today * project.pay_per_task_cents,
                earned_cents_today: done_today * project.pay_per_task_cents,
            }
        })
        .collect();

    tracing::debug!(
        projects = projects.len(),
        activities = activities.len(),
        "aggregated per-project progress"
    );
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Activity, ActivityKind, Project};
    use chrono::{Duration, TimeZone, Utc};

    fn done_today(project_id: &str, now: chrono::DateTime<Utc>) -> Activity {
        Activity::new(project_id, ActivityKind::Labeling).complete_at(now - Duration::hours(2))
    }

    #[test]
    fn test_single_project_scenario() {
        // 8 targeted, 50c/task, 3 min/task, 3 done today.
        let now = Utc.with_ymd_and_hms(2025, 1, 4, 18, 0, 0).unwrap();
        let project = Project::new("p1", "Labeling batch")
            .with_target(8)
            .with_pay_per_task(50)
            .with_avg_minutes(3);
        let activities = vec![
            done_today("p1", now),
            done_today("p1", now),
            done_today("p1", now),
        ];

        let progress = aggregate(&[project], &activities, &now);
        assert_eq!(progress.len(), 1);
        let p = &progress[0];
        assert_eq!(p.done_today, 3);
        assert_eq!(p.remaining_today, 5);
        assert_eq!(p.planned_minutes, 15);
        assert_eq!(p.planned_cents, 250);
        assert_eq!(p.earned_cents_today, 150);
    }

    #[test]
    fn test_yesterdays_completions_not_counted_today() {
        let now = Utc.with_ymd_and_hms(2025, 1, 4, 10, 0, 0).unwrap();
        let yesterday = now - Duration::days(1);
        let project = Project::new("p1", "A").with_target(2).with_pay_per_task(100);
        let activities = vec![
            Activity::new("p1", ActivityKind::Quiz).complete_at(yesterday),
            Activity::new("p1", ActivityKind::Quiz).complete_at(now),
        ];

        let progress = aggregate(&[project], &activities, &now);
        let p = &progress[0];
        assert_eq!(p.total, 2);
        assert_eq!(p.done_total, 2);
        assert_eq!(p.done_today, 1);
        assert_eq!(p.remaining_today, 1);
        assert_eq!(p.earned_cents_today, 100);
    }

    #[test]
    fn test_overshooting_target_clamps_remaining_to_zero() {
        let now = Utc.with_ymd_and_hms(2025, 1, 4, 20, 0, 0).unwrap();
        let project = Project::new("p1", "A").with_target(2).with_avg_minutes(10);
        let activities = vec![
            done_today("p1", now),
            done_today("p1", now),
            done_today("p1", now),
        ];

        let p = &aggregate(&[project], &activities, &now)[0];
        assert_eq!(p.done_today, 3);
        assert_eq!(p.remaining_today, 0);
        assert_eq!(p.planned_minutes, 0);
    }

    #[test]
    fn test_missing_metadata_defaults_to_zero() {
        let now = Utc::now();
        let project = Project::new("p1", "A").with_target(4);

        let p = &aggregate(&[project], &[], &now)[0];
        assert_eq!(p.remaining_today, 4);
        assert_eq!(p.planned_minutes, 0);
        assert_eq!(p.planned_cents, 0);
        assert_eq!(p.earned_cents_today, 0);
    }

    #[test]
    fn test_output_preserves_project_order() {
        let now = Utc::now();
        let projects = vec![
            Project::new("zeta", "Z"),
            Project::new("alpha", "A"),
            Project::new("mid", "M"),
        ];

        let progress = aggregate(&projects, &[], &now);
        let ids: Vec<&str> = progress.iter().map(|p| p.project_id.as_str()).collect();
        assert_eq!(ids, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_skipped_and_pending_are_not_done() {
        let now = Utc::now();
        let project = Project::new("p1", "A");
        let activities = vec![
            Activity::new("p1", ActivityKind::Reading),
            Activity::new("p1", ActivityKind::Reading).skipped(),
            Activity::new("p1", ActivityKind::Reading).complete_at(now),
        ];

        let p = &aggregate(&[project], &activities, &now)[0];
        assert_eq!(p.total, 3);
        assert_eq!(p.done_total, 1);
        assert_eq!(p.done_today, 1);
    }

    #[test]
    fn test_empty_projects_yield_empty_output() {
        let now = Utc::now();
        assert!(aggregate(&[], &[], &now).is_empty());
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let now = Utc.with_ymd_and_hms(2025, 1, 4, 18, 0, 0).unwrap();
        let projects = vec![
            Project::new("p1", "A").with_target(3).with_pay_per_task(25),
            Project::new("p2", "B").with_target(1),
        ];
        let activities = vec![done_today("p1", now), done_today("p2", now)];

        let first = aggregate(&projects, &activities, &now);
        let second = aggregate(&projects, &activities, &now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_completion_near_midnight_follows_local_offset() {
        // 23:30 UTC on Jan 4 is already Jan 5 at UTC+5:30. The same
        // completion lands in different "today"s depending on the offset
        // the caller passes.
        let completed = Utc.with_ymd_and_hms(2025, 1, 4, 23, 30, 0).unwrap();
        let project = Project::new("p1", "A").with_target(1);
        let activities = vec![Activity::new("p1", ActivityKind::Quiz).complete_at(completed)];

        let now_utc = Utc.with_ymd_and_hms(2025, 1, 5, 1, 0, 0).unwrap();
        let p = &aggregate(std::slice::from_ref(&project), &activities, &now_utc)[0];
        assert_eq!(p.done_today, 0);

        let ist = chrono::FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now_ist = now_utc.with_timezone(&ist);
        let p = &aggregate(&[project], &activities, &now_ist)[0];
        assert_eq!(p.done_today, 1);
    }
}
