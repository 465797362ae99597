//! CSV roster import for seeding job and worker registries.

mod normalizer;
mod parser;

use crate::workflows::shortlist::domain::{JobOpening, WorkerProfile};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidStatus { line: usize, value: String },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster file: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::InvalidStatus { line, value } => {
                write!(f, "line {}: unknown worker status '{}'", line, value)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::InvalidStatus { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads worker and job rosters exported as CSV.
///
/// Worker columns: `id,status,profession,tags,documentation,languages,location`.
/// Job columns: `id,code,title,profession,documentation,languages,country,quantity,priority`.
/// Multi-value cells separate entries with `;` or `|`.
pub struct RosterImporter;

impl RosterImporter {
    pub fn workers_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<WorkerProfile>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::workers_from_reader(file)
    }

    pub fn workers_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<WorkerProfile>, RosterImportError> {
        parser::parse_workers(reader)
    }

    pub fn jobs_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<JobOpening>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::jobs_from_reader(file)
    }

    pub fn jobs_from_reader<R: Read>(reader: R) -> Result<Vec<JobOpening>, RosterImportError> {
        parser::parse_jobs(reader)
    }
}
