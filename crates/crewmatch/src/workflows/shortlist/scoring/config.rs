use serde::{Deserialize, Serialize};

/// Rubric weights. Penalties are stored as magnitudes and subtracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub profession: u32,
    pub tag_relevance: u32,
    pub documentation_match: u32,
    pub documentation_baseline: u32,
    pub language_per_match: u32,
    pub language_cap: u32,
    pub location: u32,
    pub blocked_penalty: u32,
    pub standby_penalty: u32,
    /// Required-documentation entries that accept any document type.
    pub any_documentation_sentinels: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            profession: 50,
            tag_relevance: 25,
            documentation_match: 20,
            documentation_baseline: 10,
            language_per_match: 10,
            language_cap: 30,
            location: 10,
            blocked_penalty: 50,
            standby_penalty: 20,
            any_documentation_sentinels: vec!["any".to_string(), "cualquiera".to_string()],
        }
    }
}

impl ScoringConfig {
    pub(crate) fn is_any_documentation(&self, entry: &str) -> bool {
        let entry = entry.trim();
        self.any_documentation_sentinels
            .iter()
            .any(|sentinel| sentinel.eq_ignore_ascii_case(entry))
    }
}

/// Service-level matching settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Score standby and blocked workers too instead of only active ones.
    pub include_inactive_workers: bool,
    pub scoring: ScoringConfig,
}
