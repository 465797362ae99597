use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::builder::ShortlistBuilder;
use super::domain::{
    ActorId, JobId, JobOpening, Shortlist, ShortlistId, ShortlistItem, ShortlistItemStatus,
    WorkerId, WorkerProfile, WorkerStatus,
};
use super::error::{MissingEntity, TransitionConflict, ValidationError};
use super::registry::{JobRegistry, RegistryError, WorkerRegistry};
use super::repository::{RepositoryError, ShortlistRepository};
use super::scoring::{MatchingConfig, ScoringEngine};
use super::transitions::check_transition;

/// Service composing the registries, the shortlist store and the scoring rubric.
///
/// Every mutating call takes the acting user explicitly.
pub struct ShortlistService<J, W, S> {
    jobs: Arc<J>,
    workers: Arc<W>,
    store: Arc<S>,
    builder: ShortlistBuilder,
    include_inactive_workers: bool,
}

impl<J, W, S> ShortlistService<J, W, S>
where
    J: JobRegistry + 'static,
    W: WorkerRegistry + 'static,
    S: ShortlistRepository + 'static,
{
    pub fn new(jobs: Arc<J>, workers: Arc<W>, store: Arc<S>, config: MatchingConfig) -> Self {
        let builder = ShortlistBuilder::new(ScoringEngine::new(config.scoring));
        Self::with_builder(jobs, workers, store, builder, config.include_inactive_workers)
    }

    pub fn with_builder(
        jobs: Arc<J>,
        workers: Arc<W>,
        store: Arc<S>,
        builder: ShortlistBuilder,
        include_inactive_workers: bool,
    ) -> Self {
        Self {
            jobs,
            workers,
            store,
            builder,
            include_inactive_workers,
        }
    }

    /// Score the worker pool for a job and persist the ranking as the job's active shortlist.
    pub fn generate_shortlist(
        &self,
        job_id: &JobId,
        actor: &ActorId,
    ) -> Result<Shortlist, ShortlistServiceError> {
        if job_id.0.trim().is_empty() {
            return Err(ValidationError::MissingJobId.into());
        }
        let job = self.require_job(job_id)?;

        let pool: Vec<WorkerProfile> = self
            .workers
            .workers()?
            .into_iter()
            .filter(|worker| self.include_inactive_workers || worker.status == WorkerStatus::Active)
            .collect();

        let now = Utc::now();
        let items = self.builder.build(&job, &pool, now)?;
        let shortlist = self.store.save(job_id, actor, items, now)?;

        info!(
            job_id = %job_id,
            shortlist_id = %shortlist.id,
            candidates = shortlist.items.len(),
            top_score = shortlist.items.first().map(|item| item.score).unwrap_or(0),
            actor = %actor,
            "shortlist generated"
        );

        Ok(shortlist)
    }

    /// Active shortlist for a job. `Ok(None)` only when the store confirms none exists.
    pub fn get_shortlist(
        &self,
        job_id: &JobId,
    ) -> Result<Option<Shortlist>, ShortlistServiceError> {
        Ok(self.store.get_active_by_job(job_id)?)
    }

    pub fn get_shortlist_by_id(
        &self,
        shortlist_id: &ShortlistId,
    ) -> Result<Shortlist, ShortlistServiceError> {
        self.store.get_by_id(shortlist_id)?.ok_or_else(|| {
            ShortlistServiceError::NotFound(MissingEntity::Shortlist(shortlist_id.clone()))
        })
    }

    /// All shortlists built for a job, newest first.
    pub fn shortlist_history(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<Shortlist>, ShortlistServiceError> {
        Ok(self.store.history(job_id)?)
    }

    /// Move one candidate through the recruiter workflow.
    ///
    /// Entering `approved` annotates the worker record and, for standby workers, returns a
    /// promotion recommendation that must be confirmed through [`Self::confirm_promotion`].
    /// Re-applying the current status writes nothing and triggers no side effects.
    /// The write is conditional on the status read here, so a concurrent change surfaces as
    /// [`TransitionConflict::Stale`]. A failed approval note puts the item back.
    pub fn set_item_status(
        &self,
        shortlist_id: &ShortlistId,
        worker_id: &WorkerId,
        status: ShortlistItemStatus,
        actor: &ActorId,
    ) -> Result<StatusChange, ShortlistServiceError> {
        let shortlist = self.get_shortlist_by_id(shortlist_id)?;
        if !shortlist.is_active() {
            return Err(TransitionConflict::Superseded {
                shortlist_id: shortlist_id.clone(),
            }
            .into());
        }

        let current = shortlist
            .item(worker_id)
            .cloned()
            .ok_or_else(|| missing_item(shortlist_id, worker_id))?;
        let previous = current.status;

        if !check_transition(previous, status)? {
            return Ok(StatusChange {
                shortlist_id: shortlist_id.clone(),
                item: current,
                previous,
                changed: false,
                promotion: None,
            });
        }

        let approved_worker = if status == ShortlistItemStatus::Approved {
            Some(self.require_worker(worker_id)?)
        } else {
            None
        };

        let now = Utc::now();
        let item = self
            .store
            .update_item_status(shortlist_id, worker_id, previous, status, now)?
            .ok_or_else(|| missing_item(shortlist_id, worker_id))?;

        let promotion = match approved_worker {
            Some(worker) => {
                match self.apply_approval(&shortlist.job_id, &worker, actor, now) {
                    Ok(promotion) => promotion,
                    Err(error) => {
                        self.revert_item_status(shortlist_id, worker_id, status, previous);
                        return Err(error);
                    }
                }
            }
            None => None,
        };

        info!(
            shortlist_id = %shortlist_id,
            worker_id = %worker_id,
            from = %previous,
            to = %status,
            actor = %actor,
            "shortlist item status changed"
        );

        Ok(StatusChange {
            shortlist_id: shortlist_id.clone(),
            item,
            previous,
            changed: true,
            promotion,
        })
    }

    /// Confirmation step for a promotion recommendation. Only standby workers are promoted.
    pub fn confirm_promotion(
        &self,
        worker_id: &WorkerId,
        actor: &ActorId,
    ) -> Result<bool, ShortlistServiceError> {
        let worker = self.require_worker(worker_id)?;
        if worker.status != WorkerStatus::Standby {
            return Ok(false);
        }

        self.workers.set_status(worker_id, WorkerStatus::Active)?;
        self.workers
            .append_note(worker_id, actor, &promotion_note(Utc::now()))?;
        info!(worker_id = %worker_id, actor = %actor, "standby worker promoted to active");
        Ok(true)
    }

    fn apply_approval(
        &self,
        job_id: &JobId,
        worker: &WorkerProfile,
        actor: &ActorId,
        now: DateTime<Utc>,
    ) -> Result<Option<PromotionRecommendation>, ShortlistServiceError> {
        let job = self.jobs.job(job_id)?;
        let note = approval_note(job_id, job.as_ref(), now);
        if let Err(error) = self.workers.append_note(&worker.id, actor, &note) {
            warn!(worker_id = %worker.id, %error, "approval note could not be recorded");
            return Err(error.into());
        }
        info!(worker_id = %worker.id, job_id = %job_id, "approval noted on worker record");

        if worker.status != WorkerStatus::Standby {
            return Ok(None);
        }

        warn!(
            worker_id = %worker.id,
            job_id = %job_id,
            "approved worker is on standby; promotion awaits confirmation"
        );
        Ok(Some(PromotionRecommendation {
            worker_id: worker.id.clone(),
            job_id: job_id.clone(),
            current_status: worker.status,
            recommended_status: WorkerStatus::Active,
        }))
    }

    /// Puts an item back to `previous` after its approval side effect failed.
    fn revert_item_status(
        &self,
        shortlist_id: &ShortlistId,
        worker_id: &WorkerId,
        applied: ShortlistItemStatus,
        previous: ShortlistItemStatus,
    ) {
        match self
            .store
            .update_item_status(shortlist_id, worker_id, applied, previous, Utc::now())
        {
            Ok(_) => info!(
                shortlist_id = %shortlist_id,
                worker_id = %worker_id,
                restored = %previous,
                "shortlist item status reverted"
            ),
            Err(error) => warn!(
                shortlist_id = %shortlist_id,
                worker_id = %worker_id,
                %error,
                "shortlist item status could not be reverted"
            ),
        }
    }

    fn require_job(&self, job_id: &JobId) -> Result<JobOpening, ShortlistServiceError> {
        self.jobs
            .job(job_id)?
            .ok_or_else(|| ShortlistServiceError::NotFound(MissingEntity::Job(job_id.clone())))
    }

    fn require_worker(&self, worker_id: &WorkerId) -> Result<WorkerProfile, ShortlistServiceError> {
        self.workers.worker(worker_id)?.ok_or_else(|| {
            ShortlistServiceError::NotFound(MissingEntity::Worker(worker_id.clone()))
        })
    }
}

fn missing_item(shortlist_id: &ShortlistId, worker_id: &WorkerId) -> ShortlistServiceError {
    ShortlistServiceError::NotFound(MissingEntity::ShortlistItem {
        shortlist_id: shortlist_id.clone(),
        worker_id: worker_id.clone(),
    })
}

fn approval_note(
    job_id: &JobId,
    job: Option<&JobOpening>,
    now: DateTime<Utc>,
) -> String {
    let stamp = now.format("%Y-%m-%d %H:%M UTC");
    match job {
        Some(job) => format!("[{stamp}] Approved for job {} - {}", job.code, job.title),
        None => format!("[{stamp}] Approved for job {job_id}"),
    }
}

fn promotion_note(now: DateTime<Utc>) -> String {
    format!(
        "[{}] Status changed from standby to active after approval",
        now.format("%Y-%m-%d %H:%M UTC")
    )
}

/// Outcome of a status request, including whether anything was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub shortlist_id: ShortlistId,
    pub item: ShortlistItem,
    pub previous: ShortlistItemStatus,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PromotionRecommendation>,
}

/// Suggestion to activate a standby worker; never applied without confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotionRecommendation {
    pub worker_id: WorkerId,
    pub job_id: JobId,
    pub current_status: WorkerStatus,
    pub recommended_status: WorkerStatus,
}

/// Error raised by the shortlist service.
#[derive(Debug, thiserror::Error)]
pub enum ShortlistServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(MissingEntity),
    #[error(transparent)]
    Conflict(#[from] TransitionConflict),
    #[error("infrastructure unavailable: {0}")]
    Infrastructure(String),
}

impl From<RepositoryError> for ShortlistServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound(id) => Self::NotFound(MissingEntity::Shortlist(id)),
            RepositoryError::DuplicateItem(worker_id) => {
                Self::Validation(ValidationError::DuplicateWorker { worker_id })
            }
            RepositoryError::Superseded(shortlist_id) => {
                Self::Conflict(TransitionConflict::Superseded { shortlist_id })
            }
            RepositoryError::StaleStatus {
                worker_id,
                expected,
                actual,
            } => Self::Conflict(TransitionConflict::Stale {
                worker_id,
                expected,
                actual,
            }),
            RepositoryError::Unavailable(reason) => Self::Infrastructure(reason),
        }
    }
}

impl From<RegistryError> for ShortlistServiceError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::UnknownWorker(id) => Self::NotFound(MissingEntity::Worker(id)),
            RegistryError::Unavailable(reason) => Self::Infrastructure(reason),
        }
    }
}
