use std::collections::HashSet;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{MudawamaError, Result};
use crate::model::{validate_activity, validate_project, Activity, Project};
use crate::timewindow::day_key;

/// Materialized input handed over by the persistence collaborator: every
/// project and activity the caller wants aggregated, already in memory.
/// Durability, querying, and authentication are the collaborator's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub activities: Vec<Activity>,
}

impl Snapshot {
    /// Boundary validation, run once on ingestion. Rejects duplicate
    /// project ids, activities referencing unknown projects, and any
    /// violation of the done/completed_at invariant. Everything downstream
    /// assumes a validated snapshot and never errors on shape.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for project in &self.projects {
            validate_project(project)?;
            if !seen.insert(project.id.as_str()) {
                return Err(MudawamaError::InvalidInput(format!(
                    "duplicate project id: {}",
                    project.id
                )));
            }
        }
        for activity in &self.activities {
            validate_activity(activity)?;
            if !seen.contains(activity.project_id.as_str()) {
                return Err(MudawamaError::InvalidInput(format!(
                    "activity {} references unknown project {}",
                    activity.id, activity.project_id
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a snapshot from JSON.
    pub fn from_json(data: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(data)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Lifetime completion count across all projects.
    pub fn lifetime_completed(&self) -> u64 {
        self.activities.iter().filter(|a| a.is_done()).count() as u64
    }

    /// Derived completion record: one day-key per local calendar day with
    /// at least one completion, in the timezone of `now`. Two completions
    /// on the same day contribute one key.
    pub fn completion_day_keys<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> HashSet<String> {
        self.activities
            .iter()
            .filter(|a| a.is_done())
            .filter_map(|a| a.completed_at.as_ref())
            .map(|at| day_key(&at.with_timezone(&now.timezone())))
            .collect()
    }
}
