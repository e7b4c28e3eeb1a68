use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MudawamaError, Result};

/// Validate the completion invariant for a single activity.
///
/// `completed_at` must be present if and only if the activity is done.
/// This runs at the ingestion boundary so the aggregation functions
/// downstream stay total.
pub fn validate_activity(activity: &Activity) -> Result<()> {
    match (activity.status, activity.completed_at.is_some()) {
        (ActivityStatus::Done, false) => Err(MudawamaError::InvalidInput(format!(
            "activity {} is done but has no completed_at",
            activity.id
        ))),
        (status, true) if status != ActivityStatus::Done => {
            Err(MudawamaError::InvalidInput(format!(
                "activity {} has completed_at but status is {status}",
                activity.id
            )))
        }
        _ => Ok(()),
    }
}

/// The smallest unit of completable work: a reading item, quiz, revision
/// pass, or labeling task. Append-only history — activities are never
/// deleted, only completed, skipped, or flagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub project_id: String,
    #[serde(default)]
    pub chapter_id: Option<String>,
    pub kind: ActivityKind,
    #[serde(default)]
    pub time_needed_minutes: u64,
    #[serde(default)]
    pub pay_cents: Option<u64>,
    #[serde(default)]
    pub status: ActivityStatus,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn new(project_id: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            id: Uuid::now_v7(),
            project_id: project_id.into(),
            chapter_id: None,
            kind,
            time_needed_minutes: 0,
            pay_cents: None,
            status: ActivityStatus::Pending,
            completed_at: None,
        }
    }

    pub fn with_chapter(mut self, chapter_id: impl Into<String>) -> Self {
        self.chapter_id = Some(chapter_id.into());
        self
    }

    pub fn with_time_needed(mut self, minutes: u64) -> Self {
        self.time_needed_minutes = minutes;
        self
    }

    pub fn with_pay(mut self, cents: u64) -> Self {
        self.pay_cents = Some(cents);
        self
    }

    /// Mark as done at the given instant. Status and `completed_at` only
    /// ever change together.
    pub fn complete_at(mut self, at: DateTime<Utc>) -> Self {
        self.status = ActivityStatus::Done;
        self.completed_at = Some(at);
        self
    }

    pub fn skipped(mut self) -> Self {
        self.status = ActivityStatus::Skipped;
        self
    }

    pub fn is_done(&self) -> bool {
        self.status == ActivityStatus::Done
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Reading,
    Quiz,
    Revision,
    Labeling,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "reading"),
            Self::Quiz => write!(f, "quiz"),
            Self::Revision => write!(f, "revision"),
            Self::Labeling => write!(f, "labeling"),
        }
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reading" => Ok(Self::Reading),
            "quiz" => Ok(Self::Quiz),
            "revision" => Ok(Self::Revision),
            "labeling" => Ok(Self::Labeling),
            _ => Err(format!("unknown activity kind: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    #[default]
    Pending,
    Done,
    Skipped,
    Flagged,
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Done => write!(f, "done"),
            Self::Skipped => write!(f, "skipped"),
            Self::Flagged => write!(f, "flagged"),
        }
    }
}

impl std::str::FromStr for ActivityStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            "skipped" => Ok(Self::Skipped),
            "flagged" => Ok(Self::Flagged),
            _ => Err(format!("unknown activity status: {s}")),
        }
    }
}
