use async_trait::async_trait;

use super::ingestion_model::IngestionReport;
use crate::errors::Result;

/// One reference-data feed.
#[async_trait]
pub trait IngestionJob: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetches and stores one cycle. An `Err` means the feed was abandoned
    /// before any write; per-item problems are counted as skipped instead.
    async fn run(&self) -> Result<IngestionReport>;
}
