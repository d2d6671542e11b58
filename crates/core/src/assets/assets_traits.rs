use async_trait::async_trait;
use rust_decimal::Decimal;

use super::assets_model::{Asset, AssetCategory};
use crate::errors::Result;
use crate::utils::UpsertOutcome;

/// Trait defining the contract for Asset repository operations.
#[async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    fn get_by_id(&self, asset_id: &str) -> Result<Option<Asset>>;
    fn list(&self) -> Result<Vec<Asset>>;
    fn list_by_ids(&self, asset_ids: &[String]) -> Result<Vec<Asset>>;

    /// Creates the asset, or updates its rate when it differs from the
    /// stored one. The read and the write happen in one write unit; the
    /// decision itself is [`plan_rate_upsert`](super::plan_rate_upsert).
    ///
    /// An existing asset keeps its category.
    async fn upsert_rate(
        &self,
        asset_id: &str,
        category: AssetCategory,
        rate: Decimal,
    ) -> Result<UpsertOutcome>;
}

/// Trait defining the contract for Asset service operations.
#[async_trait]
pub trait AssetServiceTrait: Send + Sync {
    fn get_asset(&self, asset_id: &str) -> Result<Asset>;
    fn list_assets(&self) -> Result<Vec<Asset>>;
    fn get_assets_by_ids(&self, asset_ids: &[String]) -> Result<Vec<Asset>>;

    /// Normalizes id and rate, then upserts.
    async fn upsert_rate(
        &self,
        asset_id: &str,
        category: AssetCategory,
        rate: Decimal,
    ) -> Result<UpsertOutcome>;
}
