use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MudawamaError, Result};

/// Validate a project at the ingestion boundary.
pub fn validate_project(project: &Project) -> Result<()> {
    if project.id.trim().is_empty() {
        return Err(MudawamaError::InvalidInput(
            "project id cannot be empty".into(),
        ));
    }
    if project.name.trim().is_empty() {
        return Err(MudawamaError::InvalidInput(format!(
            "project {} has an empty name",
            project.id
        )));
    }
    Ok(())
}

/// Named container of activities with scheduling and payout metadata.
///
/// `today_target_count` is advisory — completions past the target are
/// counted normally, never capped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub today_target_count: u64,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub pay_per_task_cents: u64,
    #[serde(default)]
    pub avg_minutes_per_task: u64,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            today_target_count: 0,
            due_at: None,
            priority: Priority::Med,
            pay_per_task_cents: 0,
            avg_minutes_per_task: 0,
        }
    }

    pub fn with_target(mut self, count: u64) -> Self {
        self.today_target_count = count;
        self
    }

    pub fn with_due(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_pay_per_task(mut self, cents: u64) -> Self {
        self.pay_per_task_cents = cents;
        self
    }

    pub fn with_avg_minutes(mut self, minutes: u64) -> Self {
        self.avg_minutes_per_task = minutes;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Med,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Med => write!(f, "med"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "med" => Ok(Self::Med),
            "low" => Ok(Self::Low),
            _ => Err(format!("unknown priority: {s}")),
        }
    }
}
