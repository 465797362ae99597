use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for job openings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for worker profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkerId(pub String);

/// Identifier wrapper for persisted shortlists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShortlistId(pub String);

/// Opaque actor supplied by the identity collaborator; used as author and `created_by`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ShortlistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Staffing request as supplied by the job registry. Read-only during matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOpening {
    pub id: JobId,
    pub code: String,
    pub title: String,
    pub profession_required: String,
    #[serde(default)]
    pub documentation_required: Vec<String>,
    #[serde(default)]
    pub languages_required: Vec<String>,
    #[serde(default)]
    pub location_country: String,
    pub quantity: u32,
    pub priority: JobPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl JobPriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// Person profile eligible for placement, distinct from a raw incoming application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub id: WorkerId,
    pub status: WorkerStatus,
    pub profession: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub documentation: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub location: String,
}

/// Availability of a worker in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Active,
    Standby,
    Blocked,
}

impl WorkerStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Standby => "standby",
            Self::Blocked => "blocked",
        }
    }
}

/// Recruiter decision state for one worker within one shortlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortlistItemStatus {
    Suggested,
    Contacted,
    Approved,
    Rejected,
}

impl ShortlistItemStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Suggested => "suggested",
            Self::Contacted => "contacted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "suggested" => Some(Self::Suggested),
            "contacted" => Some(Self::Contacted),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ShortlistItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One ranked candidate owned by exactly one shortlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortlistItem {
    pub worker_id: WorkerId,
    pub score: u32,
    pub reasons: Vec<String>,
    pub status: ShortlistItemStatus,
    pub updated_at: DateTime<Utc>,
    /// Incremented by the store on every persisted status write.
    #[serde(default)]
    pub revision: u32,
}

/// Ranked candidate list produced for one job opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortlist {
    pub id: ShortlistId,
    pub job_id: JobId,
    pub created_at: DateTime<Utc>,
    pub created_by: ActorId,
    pub items: Vec<ShortlistItem>,
    /// Set once a newer shortlist for the same job has been saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_at: Option<DateTime<Utc>>,
}

impl Shortlist {
    /// Lookup on a read snapshot. Writes go through the store's worker index instead.
    pub fn item(&self, worker_id: &WorkerId) -> Option<&ShortlistItem> {
        self.items.iter().find(|item| &item.worker_id == worker_id)
    }

    pub fn is_active(&self) -> bool {
        self.superseded_at.is_none()
    }

    pub fn count_by_status(&self, status: ShortlistItemStatus) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }
}
