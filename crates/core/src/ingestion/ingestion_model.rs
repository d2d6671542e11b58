use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::UpsertOutcome;

/// Per-run counters of an ingestion job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionReport {
    pub job: String,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Items that could not be stored (missing or invalid value, write failure).
    pub skipped: usize,
}

impl IngestionReport {
    pub fn new(job: &str) -> Self {
        Self {
            job: job.to_string(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
        }
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }
}

impl fmt::Display for IngestionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: created {}, updated {}, unchanged {}, skipped {}",
            self.job, self.created, self.updated, self.unchanged, self.skipped
        )
    }
}
