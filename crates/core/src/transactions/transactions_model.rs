//! Transaction domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{AMOUNT_MAX_DIGITS, AMOUNT_SCALE, MAX_LABEL_LENGTH};
use crate::errors::{Error, Result};
use crate::utils::fit_decimal;

/// Domain model representing a recorded transaction.
///
/// `net_amount + transaction_fee == gross_amount` always holds, and at least
/// one of `recipient_id` / `sender_id` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub category: String,
    /// Credited wallet
    pub recipient_id: Option<String>,
    /// Debited wallet
    pub sender_id: Option<String>,
    pub confirmed_by_recipient: bool,
    pub confirmed_by_sender: bool,
    pub gross_amount: Decimal,
    pub net_amount: Decimal,
    pub transaction_fee: Decimal,
    pub description: String,
    /// Set once the net amount has moved the endpoint balances. Never reset.
    pub balance_applied: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// Balance movements this transaction implies: recipient `+net`,
    /// sender `-net`.
    pub fn balance_deltas(&self) -> Vec<(String, Decimal)> {
        let mut deltas = Vec::with_capacity(2);
        if let Some(recipient) = &self.recipient_id {
            deltas.push((recipient.clone(), self.net_amount));
        }
        if let Some(sender) = &self.sender_id {
            deltas.push((sender.clone(), -self.net_amount));
        }
        deltas
    }

    pub fn touches(&self, wallet_id: &str) -> bool {
        self.recipient_id.as_deref() == Some(wallet_id)
            || self.sender_id.as_deref() == Some(wallet_id)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.recipient_id
            .as_deref()
            .into_iter()
            .chain(self.sender_id.as_deref())
    }
}

/// Fee that makes `net + fee == gross`. A supplied fee is kept only when it
/// already satisfies the identity.
pub fn reconcile_fee(gross: Decimal, net: Decimal, fee: Option<Decimal>) -> Decimal {
    match fee {
        Some(fee) if net + fee == gross => fee,
        _ => gross - net,
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn check_label(value: &str, field: &str) -> Result<()> {
    if value.chars().count() > MAX_LABEL_LENGTH {
        return Err(Error::invalid_input(format!(
            "{} cannot be longer than {} characters",
            field, MAX_LABEL_LENGTH
        )));
    }
    Ok(())
}

fn amount(value: Decimal, field: &str) -> Result<Decimal> {
    let value = fit_decimal(value, AMOUNT_MAX_DIGITS, AMOUNT_SCALE, field)?;
    if value < Decimal::ZERO {
        return Err(Error::invalid_input(format!("{} cannot be negative", field)));
    }
    Ok(value)
}

/// Input model for recording a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Client-chosen id. Re-submitting an existing id returns the stored
    /// transaction instead of recording it twice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub recipient_id: Option<String>,
    pub sender_id: Option<String>,
    pub gross_amount: Decimal,
    /// Defaults to `gross_amount - transaction_fee`.
    #[serde(default)]
    pub net_amount: Option<Decimal>,
    #[serde(default)]
    pub transaction_fee: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTransaction {
    /// Validates the payload and brings it to storage form.
    ///
    /// After this call `net_amount` and `transaction_fee` are both set and
    /// consistent with `gross_amount`, amounts sit at ledger precision and
    /// blank endpoint ids are `None`.
    pub fn normalized(mut self) -> Result<Self> {
        self.id = blank_to_none(self.id);
        self.recipient_id = blank_to_none(self.recipient_id);
        self.sender_id = blank_to_none(self.sender_id);

        if self.recipient_id.is_none() && self.sender_id.is_none() {
            return Err(Error::invalid_input(
                "A transaction needs a recipient or a sender wallet",
            ));
        }
        if self.recipient_id.is_some() && self.recipient_id == self.sender_id {
            return Err(Error::invalid_input(
                "Recipient and sender must be different wallets",
            ));
        }

        let gross = amount(self.gross_amount, "gross_amount")?;
        let fee = self
            .transaction_fee
            .map(|f| fit_decimal(f, AMOUNT_MAX_DIGITS, AMOUNT_SCALE, "transaction_fee"))
            .transpose()?;
        let net = match self.net_amount {
            Some(net) => amount(net, "net_amount")?,
            None => amount(gross - fee.unwrap_or(Decimal::ZERO), "net_amount")?,
        };
        if net > gross {
            return Err(Error::invalid_input(
                "net_amount cannot exceed gross_amount",
            ));
        }

        self.gross_amount = gross;
        self.net_amount = Some(net);
        self.transaction_fee = Some(reconcile_fee(gross, net, fee));

        let category = self.category.unwrap_or_default().trim().to_string();
        check_label(&category, "Category")?;
        self.category = Some(category);
        let description = self.description.unwrap_or_default().trim().to_string();
        check_label(&description, "Description")?;
        self.description = Some(description);

        Ok(self)
    }

    /// Whether a normalized payload describes the same movement as a stored
    /// transaction: same endpoints and amounts. Labels may differ.
    pub fn same_movement(&self, stored: &Transaction) -> bool {
        self.recipient_id == stored.recipient_id
            && self.sender_id == stored.sender_id
            && self.gross_amount == stored.gross_amount
            && self.net_amount == Some(stored.net_amount)
            && self.transaction_fee == Some(stored.transaction_fee)
    }
}

/// Input model for a partial update. Endpoints and amounts are fixed once
/// recorded; confirmation flags are acknowledgement metadata and never move
/// balances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub category: Option<String>,
    pub description: Option<String>,
    pub confirmed_by_recipient: Option<bool>,
    pub confirmed_by_sender: Option<bool>,
}

impl TransactionUpdate {
    pub fn normalized(mut self) -> Result<Self> {
        if let Some(category) = &self.category {
            let category = category.trim().to_string();
            check_label(&category, "Category")?;
            self.category = Some(category);
        }
        if let Some(description) = &self.description {
            let description = description.trim().to_string();
            check_label(&description, "Description")?;
            self.description = Some(description);
        }
        Ok(self)
    }

    pub fn touches_labels(&self) -> bool {
        self.category.is_some() || self.description.is_some()
    }
}

/// Read filter for transaction listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub wallet_id: Option<String>,
    pub category: Option<String>,
}
