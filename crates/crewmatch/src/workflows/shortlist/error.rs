use super::domain::{JobId, ShortlistId, ShortlistItemStatus, WorkerId};

/// Request rejected before any scoring took place.
///
/// Distinct from a build that ran and found no strong matches, which still yields items.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("a job id is required to build a shortlist")]
    MissingJobId,
    #[error("worker pool for job {job_id} is empty")]
    EmptyWorkerPool { job_id: JobId },
    #[error("worker {worker_id} listed more than once")]
    DuplicateWorker { worker_id: WorkerId },
}

/// Status change outside the recruiter workflow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionConflict {
    #[error("cannot move candidate from {from} to {to}")]
    NotAllowed {
        from: ShortlistItemStatus,
        to: ShortlistItemStatus,
    },
    #[error("shortlist {shortlist_id} has been superseded by a newer build")]
    Superseded { shortlist_id: ShortlistId },
    #[error("worker {worker_id} moved to {actual} while the request expected {expected}")]
    Stale {
        worker_id: WorkerId,
        expected: ShortlistItemStatus,
        actual: ShortlistItemStatus,
    },
}

/// Entity a lookup failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingEntity {
    Job(JobId),
    Shortlist(ShortlistId),
    Worker(WorkerId),
    ShortlistItem {
        shortlist_id: ShortlistId,
        worker_id: WorkerId,
    },
}

impl std::fmt::Display for MissingEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingEntity::Job(id) => write!(f, "job {id}"),
            MissingEntity::Shortlist(id) => write!(f, "shortlist {id}"),
            MissingEntity::Worker(id) => write!(f, "worker {id}"),
            MissingEntity::ShortlistItem {
                shortlist_id,
                worker_id,
            } => write!(f, "worker {worker_id} in shortlist {shortlist_id}"),
        }
    }
}
