//! Database model for assets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use keibo_core::assets::{Asset, AssetCategory};

use crate::utils::parse_decimal;

/// Database model for assets
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetDB {
    pub id: String,
    pub category: String,
    pub exchange_rate: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<AssetDB> for Asset {
    fn from(db: AssetDB) -> Self {
        Self {
            category: AssetCategory::from_db_str(&db.category),
            exchange_rate: parse_decimal(&db.exchange_rate, "assets.exchange_rate"),
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
