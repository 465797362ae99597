use super::normalizer::{clean_cell, parse_priority, parse_worker_status, split_list};
use crate::workflows::shortlist::domain::{JobId, JobOpening, WorkerId, WorkerProfile};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::RosterImportError;

#[derive(Debug, Deserialize)]
struct WorkerRow {
    id: String,
    status: String,
    profession: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tags: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    documentation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    languages: Option<String>,
    #[serde(default)]
    location: String,
}

#[derive(Debug, Deserialize)]
struct JobRow {
    id: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    title: String,
    profession: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    documentation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    languages: Option<String>,
    #[serde(default)]
    country: String,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    priority: String,
}

pub(crate) fn parse_workers<R: Read>(reader: R) -> Result<Vec<WorkerProfile>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut workers = Vec::new();

    for (index, record) in csv_reader.deserialize::<WorkerRow>().enumerate() {
        let row = record?;
        let status =
            parse_worker_status(&row.status).ok_or_else(|| RosterImportError::InvalidStatus {
                // header occupies line 1
                line: index + 2,
                value: row.status.clone(),
            })?;

        workers.push(WorkerProfile {
            id: WorkerId(clean_cell(&row.id)),
            status,
            profession: clean_cell(&row.profession),
            tags: row.tags.as_deref().map(split_list).unwrap_or_default(),
            documentation: row
                .documentation
                .as_deref()
                .map(split_list)
                .unwrap_or_default(),
            languages: row.languages.as_deref().map(split_list).unwrap_or_default(),
            location: clean_cell(&row.location),
        });
    }

    Ok(workers)
}

pub(crate) fn parse_jobs<R: Read>(reader: R) -> Result<Vec<JobOpening>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut jobs = Vec::new();

    for record in csv_reader.deserialize::<JobRow>() {
        let row = record?;
        let id = clean_cell(&row.id);
        let code = match clean_cell(&row.code) {
            code if code.is_empty() => id.clone(),
            code => code,
        };

        jobs.push(JobOpening {
            id: JobId(id),
            code,
            title: clean_cell(&row.title),
            profession_required: clean_cell(&row.profession),
            documentation_required: row
                .documentation
                .as_deref()
                .map(split_list)
                .unwrap_or_default(),
            languages_required: row.languages.as_deref().map(split_list).unwrap_or_default(),
            location_country: clean_cell(&row.country),
            quantity: row.quantity.unwrap_or(1),
            priority: parse_priority(&row.priority),
        });
    }

    Ok(jobs)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
