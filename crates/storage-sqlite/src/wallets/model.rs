//! Database models for wallets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use keibo_core::wallets::{BalanceHistoryEntry, Wallet};

use crate::utils::parse_decimal;

/// Database model for wallets
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::wallets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WalletDB {
    pub id: String,
    pub name: String,
    pub asset_id: String,
    pub provider: String,
    pub balance: String,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<WalletDB> for Wallet {
    fn from(db: WalletDB) -> Self {
        Self {
            balance: parse_decimal(&db.balance, "wallets.balance"),
            id: db.id,
            name: db.name,
            asset_id: db.asset_id,
            provider: db.provider,
            is_public: db.is_public,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Database model for balance history entries
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::balance_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceHistoryDB {
    pub id: String,
    pub wallet_id: String,
    pub transaction_id: Option<String>,
    pub old_balance: String,
    pub new_balance: String,
    pub created_at: NaiveDateTime,
}

impl BalanceHistoryDB {
    pub fn new(
        wallet_id: &str,
        transaction_id: Option<&str>,
        old_balance: Decimal,
        new_balance: Decimal,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            wallet_id: wallet_id.to_string(),
            transaction_id: transaction_id.map(str::to_string),
            old_balance: old_balance.to_string(),
            new_balance: new_balance.to_string(),
            created_at,
        }
    }
}

impl From<BalanceHistoryDB> for BalanceHistoryEntry {
    fn from(db: BalanceHistoryDB) -> Self {
        Self {
            old_balance: parse_decimal(&db.old_balance, "balance_history.old_balance"),
            new_balance: parse_decimal(&db.new_balance, "balance_history.new_balance"),
            id: db.id,
            wallet_id: db.wallet_id,
            transaction_id: db.transaction_id,
            created_at: db.created_at,
        }
    }
}
