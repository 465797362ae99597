use super::super::domain::{JobOpening, WorkerProfile, WorkerStatus};
use super::config::ScoringConfig;
use super::matcher::TermMatcher;
use super::{MatchFactor, ScoreComponent};

/// Prefix marking penalty reasons so they stand apart from positive matches.
pub(crate) const WARNING_PREFIX: &str = "⚠ ";

const MIN_TOKEN_CHARS: usize = 3;

/// Applies the rubric in its fixed order and returns the components with the unfloored sum.
pub(crate) fn score_worker(
    job: &JobOpening,
    worker: &WorkerProfile,
    config: &ScoringConfig,
    matcher: &dyn TermMatcher,
) -> (Vec<ScoreComponent>, i64) {
    let mut components = Vec::new();
    let mut total: i64 = 0;

    let required = job.profession_required.trim();
    if !required.is_empty() && worker.profession.trim().to_lowercase() == required.to_lowercase() {
        components.push(ScoreComponent {
            factor: MatchFactor::Profession,
            points: config.profession as i64,
            note: format!("Profession matches: {}", worker.profession.trim()),
        });
        total += config.profession as i64;
    }

    if let Some((tag, token)) = first_relevant_tag(job, worker, matcher) {
        components.push(ScoreComponent {
            factor: MatchFactor::TagRelevance,
            points: config.tag_relevance as i64,
            note: format!("Tag '{tag}' relevant to '{token}'"),
        });
        total += config.tag_relevance as i64;
    }

    if job.documentation_required.is_empty() {
        components.push(ScoreComponent {
            factor: MatchFactor::Documentation,
            points: config.documentation_baseline as i64,
            note: "No documentation requirement".to_string(),
        });
        total += config.documentation_baseline as i64;
    } else if let Some(accepted) = accepted_documentation(job, worker, config) {
        components.push(ScoreComponent {
            factor: MatchFactor::Documentation,
            points: config.documentation_match as i64,
            note: format!("Documentation accepted: {accepted}"),
        });
        total += config.documentation_match as i64;
    }

    let matched_languages: Vec<&str> = job
        .languages_required
        .iter()
        .map(|language| language.trim())
        .filter(|language| !language.is_empty())
        .filter(|language| {
            worker
                .languages
                .iter()
                .any(|spoken| matcher.matches(spoken, language))
        })
        .collect();
    if !matched_languages.is_empty() {
        let points = (matched_languages.len() as u64 * config.language_per_match as u64)
            .min(config.language_cap as u64) as i64;
        components.push(ScoreComponent {
            factor: MatchFactor::Languages,
            points,
            note: format!("Languages: {}", matched_languages.join(", ")),
        });
        total += points;
    }

    let country = job.location_country.trim();
    if !country.is_empty() && matcher.matches(&worker.location, country) {
        components.push(ScoreComponent {
            factor: MatchFactor::Location,
            points: config.location as i64,
            note: format!("Located in {country}"),
        });
        total += config.location as i64;
    }

    match worker.status {
        WorkerStatus::Blocked => {
            components.push(ScoreComponent {
                factor: MatchFactor::StatusPenalty,
                points: -(config.blocked_penalty as i64),
                note: format!("{WARNING_PREFIX}Worker is blocked"),
            });
            total -= config.blocked_penalty as i64;
        }
        WorkerStatus::Standby => {
            components.push(ScoreComponent {
                factor: MatchFactor::StatusPenalty,
                points: -(config.standby_penalty as i64),
                note: format!("{WARNING_PREFIX}Worker is on standby"),
            });
            total -= config.standby_penalty as i64;
        }
        WorkerStatus::Active => {}
    }

    (components, total)
}

/// Tokens of `title + " " + profession_required` longer than two characters.
pub(crate) fn relevance_tokens(job: &JobOpening) -> Vec<String> {
    let combined = format!("{} {}", job.title, job.profession_required);
    combined
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

fn first_relevant_tag<'w>(
    job: &JobOpening,
    worker: &'w WorkerProfile,
    matcher: &dyn TermMatcher,
) -> Option<(&'w str, String)> {
    let tokens = relevance_tokens(job);
    worker.tags.iter().find_map(|tag| {
        tokens
            .iter()
            .find(|token| matcher.matches(tag, token))
            .map(|token| (tag.as_str(), token.clone()))
    })
}

fn accepted_documentation<'j>(
    job: &'j JobOpening,
    worker: &WorkerProfile,
    config: &ScoringConfig,
) -> Option<&'j str> {
    job.documentation_required
        .iter()
        .map(|entry| entry.trim())
        .find(|entry| {
            config.is_any_documentation(entry)
                || worker
                    .documentation
                    .iter()
                    .any(|held| held.trim().to_lowercase() == entry.to_lowercase())
        })
}
