use async_trait::async_trait;

use super::economic_indices_model::{EconomicIndex, EconomicIndexUpdate};
use crate::errors::Result;
use crate::utils::UpsertOutcome;

#[async_trait]
pub trait EconomicIndexRepositoryTrait: Send + Sync {
    fn get_by_id(&self, index_id: &str) -> Result<Option<EconomicIndex>>;
    fn list(&self) -> Result<Vec<EconomicIndex>>;

    /// Applies [`plan_index_upsert`](super::plan_index_upsert) against the
    /// stored row within a single write unit.
    async fn upsert(&self, update: EconomicIndexUpdate) -> Result<UpsertOutcome>;
}

#[async_trait]
pub trait EconomicIndexServiceTrait: Send + Sync {
    fn get_index(&self, index_id: &str) -> Result<EconomicIndex>;
    fn list_indices(&self) -> Result<Vec<EconomicIndex>>;
    async fn upsert_index(&self, update: EconomicIndexUpdate) -> Result<UpsertOutcome>;
}
