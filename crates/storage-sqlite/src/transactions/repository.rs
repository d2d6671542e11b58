use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use keibo_core::constants::{AMOUNT_MAX_DIGITS, AMOUNT_SCALE};
use keibo_core::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionUpdate,
};
use keibo_core::utils::{fit_decimal, UpsertOutcome};
use keibo_core::{Error, Result};

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{balance_history, transactions, wallets};
use crate::utils::{chunk_for_sqlite, parse_stored_decimal};
use crate::wallets::{find_wallet, BalanceHistoryDB};

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_transaction(
    conn: &mut SqliteConnection,
    transaction_id: &str,
) -> Result<Option<TransactionDB>> {
    transactions::table
        .find(transaction_id)
        .select(TransactionDB::as_select())
        .first::<TransactionDB>(conn)
        .optional()
        .into_core()
}

/// Moves one wallet balance by `delta` and records the change against the
/// transaction. Returns false when the wallet no longer exists.
fn apply_delta(
    conn: &mut SqliteConnection,
    wallet_id: &str,
    delta: rust_decimal::Decimal,
    transaction_id: &str,
) -> Result<bool> {
    let Some(wallet) = find_wallet(conn, wallet_id)? else {
        warn!(
            "Wallet {} is gone, skipping its side of transaction {}",
            wallet_id, transaction_id
        );
        return Ok(false);
    };

    let now = Utc::now().naive_utc();
    let old_balance = parse_stored_decimal(&wallet.balance, "wallets.balance")?;
    let new_balance = fit_decimal(
        old_balance + delta,
        AMOUNT_MAX_DIGITS,
        AMOUNT_SCALE,
        "balance",
    )?;

    diesel::update(wallets::table.find(wallet_id))
        .set((
            wallets::balance.eq(new_balance.to_string()),
            wallets::updated_at.eq(now),
        ))
        .execute(conn)
        .into_core()?;
    diesel::insert_into(balance_history::table)
        .values(&BalanceHistoryDB::new(
            wallet_id,
            Some(transaction_id),
            old_balance,
            new_balance,
            now,
        ))
        .execute(conn)
        .into_core()?;
    Ok(true)
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create(
        &self,
        new_transaction: NewTransaction,
        apply_balances: bool,
    ) -> Result<(Transaction, UpsertOutcome)> {
        let now = Utc::now().naive_utc();
        let net_amount = new_transaction.net_amount.unwrap_or(new_transaction.gross_amount);
        let transaction_db = TransactionDB {
            id: new_transaction
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            category: new_transaction.category.unwrap_or_default(),
            recipient_id: new_transaction.recipient_id,
            sender_id: new_transaction.sender_id,
            confirmed_by_recipient: false,
            confirmed_by_sender: false,
            gross_amount: new_transaction.gross_amount.to_string(),
            net_amount: net_amount.to_string(),
            transaction_fee: new_transaction
                .transaction_fee
                .unwrap_or(new_transaction.gross_amount - net_amount)
                .to_string(),
            description: new_transaction.description.unwrap_or_default(),
            balance_applied: false,
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<(Transaction, UpsertOutcome)> {
                    if let Some(stored) = find_transaction(conn, &transaction_db.id)? {
                        debug!("Transaction {} already recorded", stored.id);
                        return Ok((stored.into(), UpsertOutcome::Unchanged));
                    }

                    diesel::insert_into(transactions::table)
                        .values(&transaction_db)
                        .execute(conn)
                        .into_core()?;

                    let mut transaction: Transaction = transaction_db.into();
                    if apply_balances {
                        let mut applied = false;
                        for (wallet_id, delta) in transaction.balance_deltas() {
                            applied |= apply_delta(conn, &wallet_id, delta, &transaction.id)?;
                        }
                        if applied {
                            diesel::update(transactions::table.find(&transaction.id))
                                .set(transactions::balance_applied.eq(true))
                                .execute(conn)
                                .into_core()?;
                            transaction.balance_applied = true;
                        }
                    }
                    Ok((transaction, UpsertOutcome::Created))
                },
            )
            .await
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(find_transaction(&mut conn, transaction_id)?.map(Transaction::from))
    }

    fn list_for_wallets(&self, wallet_ids: &[String]) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for chunk in chunk_for_sqlite(wallet_ids) {
            let rows = transactions::table
                .filter(
                    transactions::recipient_id
                        .eq_any(chunk)
                        .or(transactions::sender_id.eq_any(chunk)),
                )
                .select(TransactionDB::as_select())
                .load::<TransactionDB>(&mut conn)
                .into_core()?;
            for row in rows {
                if seen.insert(row.id.clone()) {
                    results.push(Transaction::from(row));
                }
            }
        }

        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }

    async fn update(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let transaction_id = transaction_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let existing = find_transaction(conn, &transaction_id)?.ok_or_else(|| {
                    Error::NotFound(format!("Transaction '{}'", transaction_id))
                })?;

                let updated = TransactionDB {
                    category: update.category.unwrap_or(existing.category.clone()),
                    description: update.description.unwrap_or(existing.description.clone()),
                    confirmed_by_recipient: update
                        .confirmed_by_recipient
                        .unwrap_or(existing.confirmed_by_recipient),
                    confirmed_by_sender: update
                        .confirmed_by_sender
                        .unwrap_or(existing.confirmed_by_sender),
                    updated_at: Utc::now().naive_utc(),
                    ..existing
                };

                diesel::update(transactions::table.find(&transaction_id))
                    .set((
                        transactions::category.eq(&updated.category),
                        transactions::description.eq(&updated.description),
                        transactions::confirmed_by_recipient.eq(updated.confirmed_by_recipient),
                        transactions::confirmed_by_sender.eq(updated.confirmed_by_sender),
                        transactions::updated_at.eq(updated.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;
                Ok(updated.into())
            })
            .await
    }
}
