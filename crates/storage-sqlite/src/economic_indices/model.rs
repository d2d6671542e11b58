use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use keibo_core::economic_indices::{EconomicIndex, IndexDeltas};

use crate::utils::{parse_decimal, parse_optional_decimal};

#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::economic_indices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EconomicIndexDB {
    pub id: String,
    pub value: String,
    pub daily_delta: Option<String>,
    pub weekly_delta: Option<String>,
    pub monthly_delta: Option<String>,
    pub yearly_delta: Option<String>,
    pub decennial_delta: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<EconomicIndexDB> for EconomicIndex {
    fn from(db: EconomicIndexDB) -> Self {
        let deltas = IndexDeltas {
            daily: parse_optional_decimal(db.daily_delta.as_deref(), "daily_delta"),
            weekly: parse_optional_decimal(db.weekly_delta.as_deref(), "weekly_delta"),
            monthly: parse_optional_decimal(db.monthly_delta.as_deref(), "monthly_delta"),
            yearly: parse_optional_decimal(db.yearly_delta.as_deref(), "yearly_delta"),
            decennial: parse_optional_decimal(db.decennial_delta.as_deref(), "decennial_delta"),
        };
        Self {
            value: parse_decimal(&db.value, "economic_indices.value"),
            deltas,
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl EconomicIndexDB {
    pub fn new(
        id: String,
        value: rust_decimal::Decimal,
        deltas: &IndexDeltas,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        let text = |d: Option<rust_decimal::Decimal>| d.map(|v| v.to_string());
        Self {
            id,
            value: value.to_string(),
            daily_delta: text(deltas.daily),
            weekly_delta: text(deltas.weekly),
            monthly_delta: text(deltas.monthly),
            yearly_delta: text(deltas.yearly),
            decennial_delta: text(deltas.decennial),
            created_at,
            updated_at,
        }
    }
}
