use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use keibo_core::assets::{
    plan_rate_upsert, Asset, AssetCategory, AssetRepositoryTrait, RateUpsert,
};
use keibo_core::utils::UpsertOutcome;
use keibo_core::Result;

use super::model::AssetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::assets;
use crate::utils::chunk_for_sqlite;

/// Repository for the asset catalog
pub struct AssetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AssetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_asset(conn: &mut SqliteConnection, asset_id: &str) -> Result<Option<AssetDB>> {
    assets::table
        .find(asset_id)
        .select(AssetDB::as_select())
        .first::<AssetDB>(conn)
        .optional()
        .into_core()
}

#[async_trait]
impl AssetRepositoryTrait for AssetRepository {
    fn get_by_id(&self, asset_id: &str) -> Result<Option<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(find_asset(&mut conn, asset_id)?.map(Asset::from))
    }

    fn list(&self) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        let results = assets::table
            .select(AssetDB::as_select())
            .order(assets::id.asc())
            .load::<AssetDB>(&mut conn)
            .into_core()?;
        Ok(results.into_iter().map(Asset::from).collect())
    }

    fn list_by_ids(&self, asset_ids: &[String]) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        let mut results = Vec::new();
        for chunk in chunk_for_sqlite(asset_ids) {
            let rows = assets::table
                .select(AssetDB::as_select())
                .filter(assets::id.eq_any(chunk))
                .load::<AssetDB>(&mut conn)
                .into_core()?;
            results.extend(rows.into_iter().map(Asset::from));
        }
        Ok(results)
    }

    async fn upsert_rate(
        &self,
        asset_id: &str,
        category: AssetCategory,
        rate: Decimal,
    ) -> Result<UpsertOutcome> {
        let asset_id = asset_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UpsertOutcome> {
                let existing = find_asset(conn, &asset_id)?.map(Asset::from);
                let now = Utc::now().naive_utc();

                match plan_rate_upsert(existing.as_ref(), rate) {
                    RateUpsert::Unchanged => Ok(UpsertOutcome::Unchanged),
                    RateUpsert::Update => {
                        diesel::update(assets::table.find(&asset_id))
                            .set((
                                assets::exchange_rate.eq(rate.to_string()),
                                assets::updated_at.eq(now),
                            ))
                            .execute(conn)
                            .into_core()?;
                        Ok(UpsertOutcome::Updated)
                    }
                    RateUpsert::Create => {
                        let row = AssetDB {
                            id: asset_id,
                            category: category.as_db_str().to_string(),
                            exchange_rate: rate.to_string(),
                            created_at: now,
                            updated_at: now,
                        };
                        diesel::insert_into(assets::table)
                            .values(&row)
                            .execute(conn)
                            .into_core()?;
                        Ok(UpsertOutcome::Created)
                    }
                }
            })
            .await
    }
}
