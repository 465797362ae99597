use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{
    ActorId, JobId, Shortlist, ShortlistId, ShortlistItem, ShortlistItemStatus, WorkerId,
};

/// Storage abstraction for shortlist aggregates.
///
/// `save` supersedes the job's current active shortlist; superseded shortlists stay readable
/// through `get_by_id` and `history`.
pub trait ShortlistRepository: Send + Sync {
    fn save(
        &self,
        job_id: &JobId,
        created_by: &ActorId,
        items: Vec<ShortlistItem>,
        created_at: DateTime<Utc>,
    ) -> Result<Shortlist, RepositoryError>;

    fn get_active_by_job(&self, job_id: &JobId) -> Result<Option<Shortlist>, RepositoryError>;

    fn get_by_id(&self, shortlist_id: &ShortlistId) -> Result<Option<Shortlist>, RepositoryError>;

    /// Writes one item's status when it still holds `expected` and the shortlist is active.
    ///
    /// `Ok(None)` when the worker is not part of the shortlist.
    fn update_item_status(
        &self,
        shortlist_id: &ShortlistId,
        worker_id: &WorkerId,
        expected: ShortlistItemStatus,
        status: ShortlistItemStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<ShortlistItem>, RepositoryError>;

    /// Every shortlist saved for the job, newest first.
    fn history(&self, job_id: &JobId) -> Result<Vec<Shortlist>, RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("shortlist {0} not found")]
    NotFound(ShortlistId),
    #[error("worker {0} appears more than once in the shortlist")]
    DuplicateItem(WorkerId),
    #[error("shortlist {0} has been superseded")]
    Superseded(ShortlistId),
    #[error("worker {worker_id} is {actual}, expected {expected}")]
    StaleStatus {
        worker_id: WorkerId,
        expected: ShortlistItemStatus,
        actual: ShortlistItemStatus,
    },
    #[error("shortlist store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store keyed by shortlist id with a per-shortlist worker index.
#[derive(Debug, Default)]
pub struct InMemoryShortlistRepository {
    state: Mutex<StoreState>,
    sequence: AtomicU64,
}

#[derive(Debug, Default)]
struct StoreState {
    shortlists: HashMap<ShortlistId, StoredShortlist>,
    active: HashMap<JobId, ShortlistId>,
    by_job: HashMap<JobId, Vec<ShortlistId>>,
}

#[derive(Debug)]
struct StoredShortlist {
    shortlist: Shortlist,
    positions: HashMap<WorkerId, usize>,
}

impl InMemoryShortlistRepository {
    fn next_id(&self) -> ShortlistId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        ShortlistId(format!("sl-{id:06}"))
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("shortlist store lock poisoned".to_string()))
    }
}

impl ShortlistRepository for InMemoryShortlistRepository {
    fn save(
        &self,
        job_id: &JobId,
        created_by: &ActorId,
        items: Vec<ShortlistItem>,
        created_at: DateTime<Utc>,
    ) -> Result<Shortlist, RepositoryError> {
        let mut positions = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if positions.insert(item.worker_id.clone(), position).is_some() {
                return Err(RepositoryError::DuplicateItem(item.worker_id.clone()));
            }
        }

        let shortlist = Shortlist {
            id: self.next_id(),
            job_id: job_id.clone(),
            created_at,
            created_by: created_by.clone(),
            items,
            superseded_at: None,
        };

        let mut state = self.lock()?;
        if let Some(previous) = state.active.insert(job_id.clone(), shortlist.id.clone()) {
            if let Some(stored) = state.shortlists.get_mut(&previous) {
                stored.shortlist.superseded_at = Some(created_at);
            }
        }
        state
            .by_job
            .entry(job_id.clone())
            .or_default()
            .push(shortlist.id.clone());
        state.shortlists.insert(
            shortlist.id.clone(),
            StoredShortlist {
                shortlist: shortlist.clone(),
                positions,
            },
        );

        Ok(shortlist)
    }

    fn get_active_by_job(&self, job_id: &JobId) -> Result<Option<Shortlist>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .active
            .get(job_id)
            .and_then(|id| state.shortlists.get(id))
            .map(|stored| stored.shortlist.clone()))
    }

    fn get_by_id(&self, shortlist_id: &ShortlistId) -> Result<Option<Shortlist>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .shortlists
            .get(shortlist_id)
            .map(|stored| stored.shortlist.clone()))
    }

    fn update_item_status(
        &self,
        shortlist_id: &ShortlistId,
        worker_id: &WorkerId,
        expected: ShortlistItemStatus,
        status: ShortlistItemStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<ShortlistItem>, RepositoryError> {
        let mut state = self.lock()?;
        let stored = state
            .shortlists
            .get_mut(shortlist_id)
            .ok_or_else(|| RepositoryError::NotFound(shortlist_id.clone()))?;
        if !stored.shortlist.is_active() {
            return Err(RepositoryError::Superseded(shortlist_id.clone()));
        }

        let Some(&position) = stored.positions.get(worker_id) else {
            return Ok(None);
        };
        let item = &mut stored.shortlist.items[position];
        if item.status != expected {
            return Err(RepositoryError::StaleStatus {
                worker_id: worker_id.clone(),
                expected,
                actual: item.status,
            });
        }
        item.status = status;
        item.updated_at = updated_at;
        item.revision += 1;

        Ok(Some(item.clone()))
    }

    fn history(&self, job_id: &JobId) -> Result<Vec<Shortlist>, RepositoryError> {
        let state = self.lock()?;
        let Some(ids) = state.by_job.get(job_id) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .rev()
            .filter_map(|id| state.shortlists.get(id))
            .map(|stored| stored.shortlist.clone())
            .collect())
    }
}
