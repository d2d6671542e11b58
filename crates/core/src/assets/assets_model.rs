//! Asset domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ASSET_ID_LENGTH, RATE_MAX_DIGITS, RATE_SCALE};
use crate::errors::{Error, Result};
use crate::utils::fit_decimal;

/// Broad classification of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Cash,
    Equity,
    Crypto,
    Fund,
    #[default]
    Other,
}

impl AssetCategory {
    /// Returns the database string representation.
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            AssetCategory::Cash => "cash",
            AssetCategory::Equity => "equity",
            AssetCategory::Crypto => "crypto",
            AssetCategory::Fund => "fund",
            AssetCategory::Other => "other",
        }
    }

    /// Parses a category from its database string. Unknown values map to `Other`.
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "cash" => AssetCategory::Cash,
            "equity" => AssetCategory::Equity,
            "crypto" => AssetCategory::Crypto,
            "fund" => AssetCategory::Fund,
            _ => AssetCategory::Other,
        }
    }
}

/// Domain model representing a catalog entry.
///
/// `exchange_rate` always reads "1 unit of this asset = rate USD", whatever
/// direction the upstream feed quotes in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub category: AssetCategory,
    pub exchange_rate: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Asset {
    /// USD value of `amount` units of this asset.
    pub fn value_usd(&self, amount: Decimal) -> Decimal {
        amount * self.exchange_rate
    }
}

/// What a rate upsert has to do for a given catalog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUpsert {
    Create,
    Update,
    Unchanged,
}

/// Decides between create, update and no-op for an incoming rate.
///
/// `rate` must already be rounded to catalog precision, otherwise every
/// sighting would compare unequal.
pub fn plan_rate_upsert(existing: Option<&Asset>, rate: Decimal) -> RateUpsert {
    match existing {
        None => RateUpsert::Create,
        Some(asset) if asset.exchange_rate == rate => RateUpsert::Unchanged,
        Some(_) => RateUpsert::Update,
    }
}

/// Lower-cases and trims an asset id, rejecting empty or oversized ids.
pub fn normalize_asset_id(id: &str) -> Result<String> {
    let normalized = id.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(Error::invalid_input("Asset id cannot be empty"));
    }
    if normalized.len() > MAX_ASSET_ID_LENGTH {
        return Err(Error::invalid_input(format!(
            "Asset id '{}' is longer than {} characters",
            normalized, MAX_ASSET_ID_LENGTH
        )));
    }
    Ok(normalized)
}

/// Rounds a rate to catalog precision and rejects non-positive values.
pub(crate) fn normalize_rate(rate: Decimal) -> Result<Decimal> {
    let rate = fit_decimal(rate, RATE_MAX_DIGITS, RATE_SCALE, "exchange_rate")?;
    if rate <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "Exchange rate must be positive, got {}",
            rate
        )));
    }
    Ok(rate)
}
