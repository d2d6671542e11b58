//! Database models for transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use keibo_core::transactions::Transaction;

use crate::utils::parse_decimal;

/// Database model for transactions
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub category: String,
    pub recipient_id: Option<String>,
    pub sender_id: Option<String>,
    pub confirmed_by_recipient: bool,
    pub confirmed_by_sender: bool,
    pub gross_amount: String,
    pub net_amount: String,
    pub transaction_fee: String,
    pub description: String,
    pub balance_applied: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            gross_amount: parse_decimal(&db.gross_amount, "transactions.gross_amount"),
            net_amount: parse_decimal(&db.net_amount, "transactions.net_amount"),
            transaction_fee: parse_decimal(&db.transaction_fee, "transactions.transaction_fee"),
            id: db.id,
            category: db.category,
            recipient_id: db.recipient_id,
            sender_id: db.sender_id,
            confirmed_by_recipient: db.confirmed_by_recipient,
            confirmed_by_sender: db.confirmed_by_sender,
            description: db.description,
            balance_applied: db.balance_applied,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
