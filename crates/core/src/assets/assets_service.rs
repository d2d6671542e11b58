use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::assets_model::{normalize_asset_id, normalize_rate, Asset, AssetCategory};
use super::assets_traits::{AssetRepositoryTrait, AssetServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::UpsertOutcome;

/// Service for reading and refreshing the asset catalog
pub struct AssetService {
    repository: Arc<dyn AssetRepositoryTrait>,
}

impl AssetService {
    pub fn new(repository: Arc<dyn AssetRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl AssetServiceTrait for AssetService {
    fn get_asset(&self, asset_id: &str) -> Result<Asset> {
        let id = normalize_asset_id(asset_id)?;
        self.repository
            .get_by_id(&id)?
            .ok_or_else(|| Error::NotFound(format!("Asset '{}'", id)))
    }

    fn list_assets(&self) -> Result<Vec<Asset>> {
        self.repository.list()
    }

    fn get_assets_by_ids(&self, asset_ids: &[String]) -> Result<Vec<Asset>> {
        self.repository.list_by_ids(asset_ids)
    }

    async fn upsert_rate(
        &self,
        asset_id: &str,
        category: AssetCategory,
        rate: Decimal,
    ) -> Result<UpsertOutcome> {
        let id = normalize_asset_id(asset_id)?;
        let rate = normalize_rate(rate)?;
        let outcome = self.repository.upsert_rate(&id, category, rate).await?;
        debug!("Asset {} ({}) rate {}: {:?}", id, category.as_db_str(), rate, outcome);
        Ok(outcome)
    }
}
