mod config;
mod matcher;
pub(crate) mod rules;

pub use config::{MatchingConfig, ScoringConfig};
pub use matcher::{AccentFoldingMatcher, CaseInsensitiveMatcher, TermMatcher};

use super::domain::{JobOpening, WorkerId, WorkerProfile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stateless evaluator that applies the rubric to one worker for one job.
#[derive(Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    matcher: Arc<dyn TermMatcher>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_matcher(config, Arc::new(CaseInsensitiveMatcher))
    }

    pub fn with_matcher(config: ScoringConfig, matcher: Arc<dyn TermMatcher>) -> Self {
        Self { config, matcher }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, job: &JobOpening, worker: &WorkerProfile) -> ScoreBreakdown {
        let (components, total) =
            rules::score_worker(job, worker, &self.config, self.matcher.as_ref());

        ScoreBreakdown {
            worker_id: worker.id.clone(),
            score: total.clamp(0, u32::MAX as i64) as u32,
            reasons: components.iter().map(|component| component.note.clone()).collect(),
            components,
        }
    }
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Rubric rule a component was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    Profession,
    TagRelevance,
    Documentation,
    Languages,
    Location,
    StatusPenalty,
}

/// Discrete contribution to a score, kept for audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub points: i64,
    pub note: String,
}

/// Transient scoring output; never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub worker_id: WorkerId,
    pub score: u32,
    pub reasons: Vec<String>,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn has_warnings(&self) -> bool {
        self.reasons
            .iter()
            .any(|reason| reason.starts_with(rules::WARNING_PREFIX))
    }

    pub fn points_for(&self, factor: MatchFactor) -> i64 {
        self.components
            .iter()
            .filter(|component| component.factor == factor)
            .map(|component| component.points)
            .sum()
    }
}
