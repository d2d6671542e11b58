use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::economic_indices_model::{EconomicIndex, EconomicIndexUpdate};
use super::economic_indices_traits::{EconomicIndexRepositoryTrait, EconomicIndexServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::UpsertOutcome;

pub struct EconomicIndexService {
    repository: Arc<dyn EconomicIndexRepositoryTrait>,
}

impl EconomicIndexService {
    pub fn new(repository: Arc<dyn EconomicIndexRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EconomicIndexServiceTrait for EconomicIndexService {
    fn get_index(&self, index_id: &str) -> Result<EconomicIndex> {
        self.repository
            .get_by_id(index_id)?
            .ok_or_else(|| Error::NotFound(format!("Economic index '{}'", index_id)))
    }

    fn list_indices(&self) -> Result<Vec<EconomicIndex>> {
        self.repository.list()
    }

    async fn upsert_index(&self, update: EconomicIndexUpdate) -> Result<UpsertOutcome> {
        update.validate()?;
        let id = update.id.clone();
        let value = update.value;
        let outcome = self.repository.upsert(update).await?;
        match outcome {
            UpsertOutcome::Created => info!("Created economic index {} ({})", id, value),
            UpsertOutcome::Updated => info!("Updated economic index {} to {}", id, value),
            UpsertOutcome::Unchanged => debug!("Economic index {} unchanged ({})", id, value),
        }
        Ok(outcome)
    }
}
