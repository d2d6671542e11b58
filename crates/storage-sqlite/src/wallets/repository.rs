use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::ops::RangeInclusive;
use std::sync::Arc;
use uuid::Uuid;

use keibo_core::access::Role;
use keibo_core::wallets::{
    BalanceHistoryEntry, NewWallet, Wallet, WalletRepositoryTrait, WalletUpdate,
};
use keibo_core::{Error, Result};

use super::model::{BalanceHistoryDB, WalletDB};
use crate::access::{role_from_db, WalletAccessDB, STATUS_GRANTED};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{balance_history, transactions, wallet_access, wallets};
use crate::utils::{chunk_for_sqlite, parse_stored_decimal};

/// Repository for wallets and their balance history
pub struct WalletRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WalletRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

pub(crate) fn find_wallet(conn: &mut SqliteConnection, wallet_id: &str) -> Result<Option<WalletDB>> {
    wallets::table
        .find(wallet_id)
        .select(WalletDB::as_select())
        .first::<WalletDB>(conn)
        .optional()
        .into_core()
}

#[async_trait]
impl WalletRepositoryTrait for WalletRepository {
    async fn create_with_owner(&self, new_wallet: NewWallet, owner_id: &str) -> Result<Wallet> {
        let now = Utc::now().naive_utc();
        let wallet_db = WalletDB {
            id: new_wallet
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_wallet.name.unwrap_or_default(),
            asset_id: new_wallet.asset_id,
            provider: new_wallet.provider.unwrap_or_default(),
            balance: new_wallet.balance.unwrap_or_default().to_string(),
            is_public: new_wallet.is_public,
            created_at: now,
            updated_at: now,
        };
        let owner_db = WalletAccessDB::granted(&wallet_db.id, owner_id, Role::Owner, now);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Wallet> {
                diesel::insert_into(wallets::table)
                    .values(&wallet_db)
                    .execute(conn)
                    .into_core()?;
                diesel::insert_into(wallet_access::table)
                    .values(&owner_db)
                    .execute(conn)
                    .into_core()?;
                Ok(wallet_db.into())
            })
            .await
    }

    fn get_by_id(&self, wallet_id: &str) -> Result<Option<Wallet>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(find_wallet(&mut conn, wallet_id)?.map(Wallet::from))
    }

    fn list_by_ids(&self, wallet_ids: &[String]) -> Result<Vec<Wallet>> {
        let mut conn = get_connection(&self.pool)?;
        let mut results = Vec::new();
        for chunk in chunk_for_sqlite(wallet_ids) {
            let rows = wallets::table
                .select(WalletDB::as_select())
                .filter(wallets::id.eq_any(chunk))
                .load::<WalletDB>(&mut conn)
                .into_core()?;
            results.extend(rows.into_iter().map(Wallet::from));
        }
        Ok(results)
    }

    fn list_for_user(
        &self,
        user_id: &str,
        roles: RangeInclusive<i32>,
    ) -> Result<Vec<(Wallet, Role)>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = wallets::table
            .inner_join(wallet_access::table)
            .filter(wallet_access::user_id.eq(user_id))
            .filter(wallet_access::status.eq(STATUS_GRANTED))
            .filter(wallet_access::role.between(*roles.start(), *roles.end()))
            .select((WalletDB::as_select(), wallet_access::role))
            .order(wallets::created_at.asc())
            .load::<(WalletDB, i32)>(&mut conn)
            .into_core()?;

        Ok(rows
            .into_iter()
            .map(|(wallet, role)| (wallet.into(), role_from_db(role)))
            .collect())
    }

    async fn update(&self, wallet_id: &str, update: WalletUpdate) -> Result<Wallet> {
        let wallet_id = wallet_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Wallet> {
                let existing = find_wallet(conn, &wallet_id)?
                    .ok_or_else(|| Error::NotFound(format!("Wallet '{}'", wallet_id)))?;
                let now = Utc::now().naive_utc();

                let old_balance = parse_stored_decimal(&existing.balance, "wallets.balance")?;
                let new_balance = update.balance.unwrap_or(old_balance);
                let updated = WalletDB {
                    name: update.name.unwrap_or(existing.name),
                    provider: update.provider.unwrap_or(existing.provider),
                    is_public: update.is_public.unwrap_or(existing.is_public),
                    balance: new_balance.to_string(),
                    updated_at: now,
                    ..existing
                };

                diesel::update(wallets::table.find(&wallet_id))
                    .set((
                        wallets::name.eq(&updated.name),
                        wallets::provider.eq(&updated.provider),
                        wallets::is_public.eq(updated.is_public),
                        wallets::balance.eq(&updated.balance),
                        wallets::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .into_core()?;

                if new_balance != old_balance {
                    let entry =
                        BalanceHistoryDB::new(&wallet_id, None, old_balance, new_balance, now);
                    diesel::insert_into(balance_history::table)
                        .values(&entry)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(updated.into())
            })
            .await
    }

    async fn delete(&self, wallet_id: &str) -> Result<usize> {
        let wallet_id = wallet_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::update(transactions::table.filter(transactions::recipient_id.eq(&wallet_id)))
                    .set(transactions::recipient_id.eq(None::<String>))
                    .execute(conn)
                    .into_core()?;
                diesel::update(transactions::table.filter(transactions::sender_id.eq(&wallet_id)))
                    .set(transactions::sender_id.eq(None::<String>))
                    .execute(conn)
                    .into_core()?;
                let purged = diesel::delete(
                    transactions::table.filter(
                        transactions::recipient_id
                            .is_null()
                            .and(transactions::sender_id.is_null()),
                    ),
                )
                .execute(conn)
                .into_core()?;

                diesel::delete(balance_history::table.filter(balance_history::wallet_id.eq(&wallet_id)))
                    .execute(conn)
                    .into_core()?;
                diesel::delete(wallet_access::table.filter(wallet_access::wallet_id.eq(&wallet_id)))
                    .execute(conn)
                    .into_core()?;
                let deleted = diesel::delete(wallets::table.find(&wallet_id))
                    .execute(conn)
                    .into_core()?;

                debug!(
                    "Deleted wallet {} and purged {} orphaned transactions",
                    wallet_id, purged
                );
                Ok(deleted)
            })
            .await
    }

    fn list_balance_history(&self, wallet_id: &str) -> Result<Vec<BalanceHistoryEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = balance_history::table
            .filter(balance_history::wallet_id.eq(wallet_id))
            .select(BalanceHistoryDB::as_select())
            .order(balance_history::created_at.desc())
            .load::<BalanceHistoryDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(BalanceHistoryEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_db;
    use rust_decimal_macros::dec;

    fn new_wallet(balance: rust_decimal::Decimal) -> NewWallet {
        NewWallet {
            name: Some("Checking".to_string()),
            asset_id: "usd".to_string(),
            provider: Some("Bank".to_string()),
            balance: Some(balance),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_with_owner_grants_owner_role() {
        let (pool, writer, _dir) = setup_db().await;
        let repo = WalletRepository::new(pool, writer);

        let wallet = repo
            .create_with_owner(new_wallet(dec!(12.5)), "alice")
            .await
            .unwrap();

        let stored = repo.get_by_id(&wallet.id).unwrap().unwrap();
        assert_eq!(stored.balance, dec!(12.5));
        let mine = repo.list_for_user("alice", 1..=4).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].1, Role::Owner);
        assert!(repo.list_for_user("alice", 1..=3).unwrap().is_empty());
        assert!(repo.list_for_user("bob", 1..=4).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_balance_update_writes_history() {
        let (pool, writer, _dir) = setup_db().await;
        let repo = WalletRepository::new(pool, writer);
        let wallet = repo
            .create_with_owner(new_wallet(dec!(100)), "alice")
            .await
            .unwrap();

        repo.update(
            &wallet.id,
            WalletUpdate {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(repo.list_balance_history(&wallet.id).unwrap().is_empty());

        let updated = repo
            .update(
                &wallet.id,
                WalletUpdate {
                    balance: Some(dec!(75.25)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.balance, dec!(75.25));
        let history = repo.list_balance_history(&wallet.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].old_balance, dec!(100));
        assert_eq!(history[0].new_balance, dec!(75.25));
    }

    #[tokio::test]
    async fn test_update_missing_wallet() {
        let (pool, writer, _dir) = setup_db().await;
        let repo = WalletRepository::new(pool, writer);

        let result = repo.update("nope", WalletUpdate::default()).await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_grants() {
        let (pool, writer, _dir) = setup_db().await;
        let repo = WalletRepository::new(pool, writer);
        let wallet = repo
            .create_with_owner(new_wallet(dec!(1)), "alice")
            .await
            .unwrap();

        assert_eq!(repo.delete(&wallet.id).await.unwrap(), 1);
        assert!(repo.get_by_id(&wallet.id).unwrap().is_none());
        assert!(repo.list_for_user("alice", 1..=4).unwrap().is_empty());
        assert_eq!(repo.delete(&wallet.id).await.unwrap(), 0);
    }
}
