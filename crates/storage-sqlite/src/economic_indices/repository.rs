use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use keibo_core::economic_indices::{
    plan_index_upsert, EconomicIndex, EconomicIndexRepositoryTrait, EconomicIndexUpdate,
};
use keibo_core::utils::UpsertOutcome;
use keibo_core::Result;

use super::model::EconomicIndexDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::economic_indices;

pub struct EconomicIndexRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EconomicIndexRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_index(conn: &mut SqliteConnection, index_id: &str) -> Result<Option<EconomicIndex>> {
    let row = economic_indices::table
        .find(index_id)
        .select(EconomicIndexDB::as_select())
        .first::<EconomicIndexDB>(conn)
        .optional()
        .into_core()?;
    Ok(row.map(EconomicIndex::from))
}

#[async_trait]
impl EconomicIndexRepositoryTrait for EconomicIndexRepository {
    fn get_by_id(&self, index_id: &str) -> Result<Option<EconomicIndex>> {
        let mut conn = get_connection(&self.pool)?;
        find_index(&mut conn, index_id)
    }

    fn list(&self) -> Result<Vec<EconomicIndex>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = economic_indices::table
            .select(EconomicIndexDB::as_select())
            .order(economic_indices::id.asc())
            .load::<EconomicIndexDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(EconomicIndex::from).collect())
    }

    async fn upsert(&self, update: EconomicIndexUpdate) -> Result<UpsertOutcome> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UpsertOutcome> {
                let existing = find_index(conn, &update.id)?;
                let (outcome, deltas) = plan_index_upsert(existing.as_ref(), &update);
                let now = Utc::now().naive_utc();

                match (outcome, existing) {
                    (UpsertOutcome::Unchanged, _) => {}
                    (_, Some(existing)) => {
                        let row = EconomicIndexDB::new(
                            update.id,
                            update.value,
                            &deltas,
                            existing.created_at,
                            now,
                        );
                        diesel::update(economic_indices::table.find(&row.id))
                            .set((
                                economic_indices::value.eq(&row.value),
                                economic_indices::daily_delta.eq(&row.daily_delta),
                                economic_indices::weekly_delta.eq(&row.weekly_delta),
                                economic_indices::monthly_delta.eq(&row.monthly_delta),
                                economic_indices::yearly_delta.eq(&row.yearly_delta),
                                economic_indices::decennial_delta.eq(&row.decennial_delta),
                                economic_indices::updated_at.eq(now),
                            ))
                            .execute(conn)
                            .into_core()?;
                    }
                    (_, None) => {
                        let row = EconomicIndexDB::new(update.id, update.value, &deltas, now, now);
                        diesel::insert_into(economic_indices::table)
                            .values(&row)
                            .execute(conn)
                            .into_core()?;
                    }
                }
                Ok(outcome)
            })
            .await
    }
}
