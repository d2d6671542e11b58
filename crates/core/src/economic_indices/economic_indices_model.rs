//! Economic index domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::UpsertOutcome;

/// Signed differences between the latest value and the value N periods
/// back. A horizon is `None` when that historical observation was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDeltas {
    pub daily: Option<Decimal>,
    pub weekly: Option<Decimal>,
    pub monthly: Option<Decimal>,
    pub yearly: Option<Decimal>,
    pub decennial: Option<Decimal>,
}

impl IndexDeltas {
    /// Takes every horizon present in `incoming`, keeping `self` for the rest.
    pub fn overlay(&self, incoming: &IndexDeltas) -> IndexDeltas {
        IndexDeltas {
            daily: incoming.daily.or(self.daily),
            weekly: incoming.weekly.or(self.weekly),
            monthly: incoming.monthly.or(self.monthly),
            yearly: incoming.yearly.or(self.yearly),
            decennial: incoming.decennial.or(self.decennial),
        }
    }
}

/// Domain model representing a stored macro indicator, keyed by series code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicIndex {
    pub id: String,
    pub value: Decimal,
    #[serde(flatten)]
    pub deltas: IndexDeltas,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for refreshing an index from a fresh fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct EconomicIndexUpdate {
    pub id: String,
    pub value: Decimal,
    pub deltas: IndexDeltas,
}

impl EconomicIndexUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_input("Economic index id cannot be empty"));
        }
        Ok(())
    }
}

/// Decides what an update does to the stored index and which deltas to write.
///
/// Only horizons the fetch could compute are overwritten; the others keep
/// their stored value.
pub fn plan_index_upsert(
    existing: Option<&EconomicIndex>,
    update: &EconomicIndexUpdate,
) -> (UpsertOutcome, IndexDeltas) {
    match existing {
        None => (UpsertOutcome::Created, update.deltas),
        Some(index) => {
            let merged = index.deltas.overlay(&update.deltas);
            if index.value == update.value && index.deltas == merged {
                (UpsertOutcome::Unchanged, merged)
            } else {
                (UpsertOutcome::Updated, merged)
            }
        }
    }
}
