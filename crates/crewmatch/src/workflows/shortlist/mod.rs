//! Candidate-to-opening matching and shortlist lifecycle.
//!
//! The scoring rubric ranks a worker pool for one job, the builder orders the result, the
//! repository keeps one active shortlist per job and the service drives each candidate through
//! the recruiter decision workflow, calling out to the worker registry for side effects.

pub mod builder;
pub mod domain;
pub mod error;
pub mod registry;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
mod transitions;

#[cfg(test)]
mod tests;

pub use builder::ShortlistBuilder;
pub use domain::{
    ActorId, JobId, JobOpening, JobPriority, Shortlist, ShortlistId, ShortlistItem,
    ShortlistItemStatus, WorkerId, WorkerProfile, WorkerStatus,
};
pub use error::{MissingEntity, TransitionConflict, ValidationError};
pub use registry::{JobRegistry, RegistryError, WorkerNote, WorkerRegistry};
pub use repository::{InMemoryShortlistRepository, RepositoryError, ShortlistRepository};
pub use router::{shortlist_router, ShortlistView};
pub use scoring::{
    AccentFoldingMatcher, CaseInsensitiveMatcher, MatchFactor, MatchingConfig, ScoreBreakdown,
    ScoreComponent, ScoringConfig, ScoringEngine, TermMatcher,
};
pub use service::{PromotionRecommendation, ShortlistService, ShortlistServiceError, StatusChange};
