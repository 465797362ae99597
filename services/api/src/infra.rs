use chrono::Utc;
use crewmatch::config::RosterConfig;
use crewmatch::error::AppError;
use crewmatch::workflows::roster::RosterImporter;
use crewmatch::workflows::shortlist::{
    ActorId, JobId, JobOpening, JobRegistry, RegistryError, WorkerId, WorkerNote, WorkerProfile,
    WorkerRegistry, WorkerStatus,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryJobRegistry {
    jobs: Mutex<HashMap<JobId, JobOpening>>,
}

impl InMemoryJobRegistry {
    pub(crate) fn with_jobs(jobs: Vec<JobOpening>) -> Self {
        let jobs = jobs.into_iter().map(|job| (job.id.clone(), job)).collect();
        Self {
            jobs: Mutex::new(jobs),
        }
    }
}

impl JobRegistry for InMemoryJobRegistry {
    fn job(&self, id: &JobId) -> Result<Option<JobOpening>, RegistryError> {
        let jobs = self
            .jobs
            .lock()
            .map_err(|_| RegistryError::Unavailable("job registry lock poisoned".to_string()))?;
        Ok(jobs.get(id).cloned())
    }
}

/// Worker roster kept in import order, with the notes recorded against each worker.
#[derive(Default)]
pub(crate) struct InMemoryWorkerRegistry {
    workers: Mutex<Vec<WorkerProfile>>,
    notes: Mutex<Vec<WorkerNote>>,
}

impl InMemoryWorkerRegistry {
    pub(crate) fn with_workers(workers: Vec<WorkerProfile>) -> Self {
        Self {
            workers: Mutex::new(workers),
            notes: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn notes_for(&self, worker_id: &WorkerId) -> Result<Vec<WorkerNote>, RegistryError> {
        let notes = lock(&self.notes)?;
        Ok(notes
            .iter()
            .filter(|note| &note.worker_id == worker_id)
            .cloned()
            .collect())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RegistryError> {
    mutex
        .lock()
        .map_err(|_| RegistryError::Unavailable("worker registry lock poisoned".to_string()))
}

impl WorkerRegistry for InMemoryWorkerRegistry {
    fn workers(&self) -> Result<Vec<WorkerProfile>, RegistryError> {
        Ok(lock(&self.workers)?.clone())
    }

    fn worker(&self, id: &WorkerId) -> Result<Option<WorkerProfile>, RegistryError> {
        Ok(lock(&self.workers)?
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
        if self.worker(worker_id)?.is_none() {
            return Err(RegistryError::UnknownWorker(worker_id.clone()));
        }
        lock(&self.notes)?.push(WorkerNote {
            worker_id: worker_id.clone(),
            author: author.clone(),
            text: text.to_string(),
            recorded_at: Utc::now(),
        });
        Ok(())
    }

    fn set_status(&self, worker_id: &WorkerId, status: WorkerStatus) -> Result<(), RegistryError> {
        let mut workers = lock(&self.workers)?;
        let worker = workers
            .iter_mut()
            .find(|worker| &worker.id == worker_id)
            .ok_or_else(|| RegistryError::UnknownWorker(worker_id.clone()))?;
        worker.status = status;
        Ok(())
    }
}

/// Builds the registries from the configured roster files. Missing paths leave a registry empty.
pub(crate) fn seed_registries(
    roster: &RosterConfig,
) -> Result<(InMemoryJobRegistry, InMemoryWorkerRegistry), AppError> {
    let jobs = match &roster.jobs_csv {
        Some(path) => RosterImporter::jobs_from_path(path)?,
        None => Vec::new(),
    };
    let workers = match &roster.workers_csv {
        Some(path) => RosterImporter::workers_from_path(path)?,
        None => Vec::new(),
    };

    info!(jobs = jobs.len(), workers = workers.len(), "registries seeded from roster");
    Ok((
        InMemoryJobRegistry::with_jobs(jobs),
        InMemoryWorkerRegistry::with_workers(workers),
    ))
}
