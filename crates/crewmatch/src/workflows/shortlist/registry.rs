use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ActorId, JobId, JobOpening, WorkerId, WorkerProfile, WorkerStatus};

/// Read-only source of job openings.
pub trait JobRegistry: Send + Sync {
    fn job(&self, id: &JobId) -> Result<Option<JobOpening>, RegistryError>;
}

/// Source of worker profiles and sink for workflow side effects.
pub trait WorkerRegistry: Send + Sync {
    fn workers(&self) -> Result<Vec<WorkerProfile>, RegistryError>;
    fn worker(&self, id: &WorkerId) -> Result<Option<WorkerProfile>, RegistryError>;
    fn append_note(
        &self,
        worker_id: &WorkerId,
        author: &ActorId,
        text: &str,
    ) -> Result<(), RegistryError>;
    fn set_status(&self, worker_id: &WorkerId, status: WorkerStatus) -> Result<(), RegistryError>;
}

/// Note attached to a worker record, as kept by registry adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerNote {
    pub worker_id: WorkerId,
    pub author: ActorId,
    pub text: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("worker {0} is not registered")]
    UnknownWorker(WorkerId),
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}
