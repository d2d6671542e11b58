//! Assets module - the catalog of tradable units and their USD exchange rates.

mod assets_model;
mod assets_service;
mod assets_traits;

#[cfg(test)]
mod assets_model_tests;

pub use assets_model::{normalize_asset_id, plan_rate_upsert, Asset, AssetCategory, RateUpsert};
pub use assets_service::AssetService;
pub use assets_traits::{AssetRepositoryTrait, AssetServiceTrait};
