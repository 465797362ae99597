use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::shortlist::domain::{
    ActorId, JobId, JobOpening, JobPriority, Shortlist, ShortlistId, ShortlistItem,
    ShortlistItemStatus, WorkerId, WorkerProfile, WorkerStatus,
};
use crate::workflows::shortlist::registry::{
    JobRegistry, RegistryError, WorkerNote, WorkerRegistry,
};
use crate::workflows::shortlist::repository::{
    InMemoryShortlistRepository, RepositoryError, ShortlistRepository,
};
use crate::workflows::shortlist::scoring::{MatchingConfig, ScoringEngine};
use crate::workflows::shortlist::service::ShortlistService;

pub(super) const PASSPORT_EU: &str = "Pasaporte de la UE (Europeo)";

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn recruiter() -> ActorId {
    ActorId("recruiter-ana".to_string())
}

pub(super) fn pipe_fitter_job() -> JobOpening {
    JobOpening {
        id: JobId("job-tub-01".to_string()),
        code: "TUB-01".to_string(),
        title: "Tuberos industriales".to_string(),
        profession_required: "TUBERO".to_string(),
        documentation_required: vec![PASSPORT_EU.to_string()],
        languages_required: vec!["Español".to_string()],
        location_country: "España".to_string(),
        quantity: 4,
        priority: JobPriority::High,
    }
}

pub(super) fn pipe_fitter(id: &str) -> WorkerProfile {
    WorkerProfile {
        id: WorkerId(id.to_string()),
        status: WorkerStatus::Active,
        profession: "TUBERO".to_string(),
        tags: vec!["Tubero".to_string()],
        documentation: vec![PASSPORT_EU.to_string()],
        languages: vec!["Español".to_string(), "Inglés".to_string()],
        location: "Madrid, España".to_string(),
    }
}

/// Worker sharing nothing with the pipe fitter job.
pub(super) fn unrelated_worker(id: &str) -> WorkerProfile {
    WorkerProfile {
        id: WorkerId(id.to_string()),
        status: WorkerStatus::Active,
        profession: "COCINERO".to_string(),
        tags: vec!["Cocina".to_string()],
        documentation: vec!["NIE".to_string()],
        languages: vec!["Rumano".to_string()],
        location: "Bucarest, Rumanía".to_string(),
    }
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::default()
}

pub(super) type TestService =
    ShortlistService<MemoryJobs, MemoryWorkers, InMemoryShortlistRepository>;

pub(super) fn build_service(
    jobs: Vec<JobOpening>,
    workers: Vec<WorkerProfile>,
) -> (TestService, Arc<MemoryWorkers>, Arc<InMemoryShortlistRepository>) {
    build_service_with(jobs, workers, MatchingConfig::default())
}

pub(super) fn build_service_with(
    jobs: Vec<JobOpening>,
    workers: Vec<WorkerProfile>,
    config: MatchingConfig,
) -> (TestService, Arc<MemoryWorkers>, Arc<InMemoryShortlistRepository>) {
    let jobs = Arc::new(MemoryJobs::with_jobs(jobs));
    let workers = Arc::new(MemoryWorkers::with_workers(workers));
    let store = Arc::new(InMemoryShortlistRepository::default());
    let service = ShortlistService::new(jobs, workers.clone(), store.clone(), config);
    (service, workers, store)
}

#[derive(Default)]
pub(super) struct MemoryJobs {
    jobs: Mutex<HashMap<JobId, JobOpening>>,
}

impl MemoryJobs {
    pub(super) fn with_jobs(jobs: Vec<JobOpening>) -> Self {
        let jobs = jobs.into_iter().map(|job| (job.id.clone(), job)).collect();
        Self {
            jobs: Mutex::new(jobs),
        }
    }
}

impl JobRegistry for MemoryJobs {
    fn job(&self, id: &JobId) -> Result<Option<JobOpening>, RegistryError> {
        Ok(self.jobs.lock().expect("jobs mutex poisoned").get(id).cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryWorkers {
    workers: Mutex<Vec<WorkerProfile>>,
    notes: Mutex<Vec<WorkerNote>>,
    failing_notes: AtomicUsize,
}

impl MemoryWorkers {
    pub(super) fn with_workers(workers: Vec<WorkerProfile>) -> Self {
        Self {
            workers: Mutex::new(workers),
            notes: Mutex::new(Vec::new()),
            failing_notes: AtomicUsize::new(0),
        }
    }

    /// The next `count` calls to `append_note` fail as if the registry were offline.
    pub(super) fn fail_next_notes(&self, count: usize) {
        self.failing_notes.store(count, Ordering::SeqCst);
    }

    pub(super) fn notes(&self) -> Vec<WorkerNote> {
        self.notes.lock().expect("notes mutex poisoned").clone()
    }

    pub(super) fn replace(&self, workers: Vec<WorkerProfile>) {
        *self.workers.lock().expect("workers mutex poisoned") = workers;
    }

    pub(super) fn status_of(&self, id: &str) -> Option<WorkerStatus> {
        self.workers
            .lock()
            .expect("workers mutex poisoned")
            .iter()
            .find(|worker| worker.id.0 == id)
            .map(|worker| worker.status)
    }
}

impl WorkerRegistry for MemoryWorkers {
    fn workers(&self) -> Result<Vec<WorkerProfile>, RegistryError> {
        Ok(self.workers.lock().expect("workers mutex poisoned").clone())
    }

    fn worker(&self, id: &WorkerId) -> Result<Option<WorkerProfile>, RegistryError> {
        Ok(self
            .workers
            .lock()
            .expect("workers mutex poisoned")
            .iter()
            .find(|worker| &worker.id == id)
            .cloned())
    }

    fn append_note(
        &self,
        worker_id: &WorkerId,
        author: &ActorId,
        text: &str,
    ) -> Result<(), RegistryError> {
        let failing = self
            .failing_notes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1));
        if failing.is_ok() {
            return Err(RegistryError::Unavailable("notes service down".to_string()));
        }
        self.notes.lock().expect("notes mutex poisoned").push(WorkerNote {
            worker_id: worker_id.clone(),
            author: author.clone(),
            text: text.to_string(),
            recorded_at: fixed_now(),
        });
        Ok(())
    }

    fn set_status(&self, worker_id: &WorkerId, status: WorkerStatus) -> Result<(), RegistryError> {
        let mut guard = self.workers.lock().expect("workers mutex poisoned");
        let worker = guard
            .iter_mut()
            .find(|worker| &worker.id == worker_id)
            .ok_or_else(|| RegistryError::UnknownWorker(worker_id.clone()))?;
        worker.status = status;
        Ok(())
    }
}

pub(super) struct UnavailableWorkers;

impl WorkerRegistry for UnavailableWorkers {
    fn workers(&self) -> Result<Vec<WorkerProfile>, RegistryError> {
        Err(RegistryError::Unavailable("worker registry offline".to_string()))
    }

    fn worker(&self, _id: &WorkerId) -> Result<Option<WorkerProfile>, RegistryError> {
        Err(RegistryError::Unavailable("worker registry offline".to_string()))
    }

    fn append_note(
        &self,
        _worker_id: &WorkerId,
        _author: &ActorId,
        _text: &str,
    ) -> Result<(), RegistryError> {
        Err(RegistryError::Unavailable("worker registry offline".to_string()))
    }

    fn set_status(
        &self,
        _worker_id: &WorkerId,
        _status: WorkerStatus,
    ) -> Result<(), RegistryError> {
        Err(RegistryError::Unavailable("worker registry offline".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl ShortlistRepository for UnavailableStore {
    fn save(
        &self,
        _job_id: &JobId,
        _created_by: &ActorId,
        _items: Vec<ShortlistItem>,
        _created_at: DateTime<Utc>,
    ) -> Result<Shortlist, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn get_active_by_job(&self, _job_id: &JobId) -> Result<Option<Shortlist>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn get_by_id(&self, _shortlist_id: &ShortlistId) -> Result<Option<Shortlist>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_item_status(
        &self,
        _shortlist_id: &ShortlistId,
        _worker_id: &WorkerId,
        _expected: ShortlistItemStatus,
        _status: ShortlistItemStatus,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<ShortlistItem>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _job_id: &JobId) -> Result<Vec<Shortlist>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Write another request lands between a status read and the matching write.
pub(super) enum Interleaved {
    Status(WorkerId, ShortlistItemStatus),
    Regenerate,
}

/// Store that applies one interleaved write right after the next `get_by_id` snapshot.
#[derive(Default)]
pub(super) struct InterleavingStore {
    inner: InMemoryShortlistRepository,
    pending: Mutex<Option<Interleaved>>,
}

impl InterleavingStore {
    pub(super) fn interleave(&self, write: Interleaved) {
        *self.pending.lock().expect("pending mutex poisoned") = Some(write);
    }
}

impl ShortlistRepository for InterleavingStore {
    fn save(
        &self,
        job_id: &JobId,
        created_by: &ActorId,
        items: Vec<ShortlistItem>,
        created_at: DateTime<Utc>,
    ) -> Result<Shortlist, RepositoryError> {
        self.inner.save(job_id, created_by, items, created_at)
    }

    fn get_active_by_job(&self, job_id: &JobId) -> Result<Option<Shortlist>, RepositoryError> {
        self.inner.get_active_by_job(job_id)
    }

    fn get_by_id(&self, shortlist_id: &ShortlistId) -> Result<Option<Shortlist>, RepositoryError> {
        let snapshot = self.inner.get_by_id(shortlist_id)?;
        let pending = self.pending.lock().expect("pending mutex poisoned").take();
        if let (Some(write), Some(shortlist)) = (pending, snapshot.as_ref()) {
            match write {
                Interleaved::Status(worker_id, status) => {
                    let current = shortlist.item(&worker_id).expect("worker listed").status;
                    self.inner.update_item_status(
                        shortlist_id,
                        &worker_id,
                        current,
                        status,
                        fixed_now(),
                    )?;
                }
                Interleaved::Regenerate => {
                    self.inner.save(
                        &shortlist.job_id,
                        &recruiter(),
                        shortlist.items.clone(),
                        fixed_now(),
                    )?;
                }
            }
        }
        Ok(snapshot)
    }

    fn update_item_status(
        &self,
        shortlist_id: &ShortlistId,
        worker_id: &WorkerId,
        expected: ShortlistItemStatus,
        status: ShortlistItemStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<ShortlistItem>, RepositoryError> {
        self.inner
            .update_item_status(shortlist_id, worker_id, expected, status, updated_at)
    }

    fn history(&self, job_id: &JobId) -> Result<Vec<Shortlist>, RepositoryError> {
        self.inner.history(job_id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
