use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

use super::domain::{JobOpening, ShortlistItem, ShortlistItemStatus, WorkerProfile};
use super::error::ValidationError;
use super::scoring::ScoringEngine;

/// Runs the scoring engine over a worker pool and ranks the result.
#[derive(Debug, Clone, Default)]
pub struct ShortlistBuilder {
    engine: ScoringEngine,
}

impl ShortlistBuilder {
    pub fn new(engine: ScoringEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Scores every worker and sorts by descending score. Equal scores keep pool order.
    ///
    /// Workers are not filtered by status; a zero score still yields an item. A worker id
    /// appearing more than once in the pool is scored only for its first occurrence.
    pub fn build(
        &self,
        job: &JobOpening,
        pool: &[WorkerProfile],
        now: DateTime<Utc>,
    ) -> Result<Vec<ShortlistItem>, ValidationError> {
        if job.id.0.trim().is_empty() {
            return Err(ValidationError::MissingJobId);
        }
        if pool.is_empty() {
            return Err(ValidationError::EmptyWorkerPool {
                job_id: job.id.clone(),
            });
        }

        let mut seen = HashSet::new();
        let mut items: Vec<ShortlistItem> = pool
            .iter()
            .filter(|worker| seen.insert(worker.id.clone()))
            .map(|worker| {
                let breakdown = self.engine.score(job, worker);
                debug!(
                    job_id = %job.id,
                    worker_id = %worker.id,
                    score = breakdown.score,
                    "scored worker"
                );
                ShortlistItem {
                    worker_id: breakdown.worker_id,
                    score: breakdown.score,
                    reasons: breakdown.reasons,
                    status: ShortlistItemStatus::Suggested,
                    updated_at: now,
                    revision: 0,
                }
            })
            .collect();

        // Vec::sort_by is stable.
        items.sort_by(|a, b| b.score.cmp(&a.score));

        Ok(items)
    }
}
