//! Wallet domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::access::Role;
use crate::assets::{normalize_asset_id, Asset, AssetCategory};
use crate::constants::{AMOUNT_MAX_DIGITS, AMOUNT_SCALE, MAX_LABEL_LENGTH};
use crate::errors::{Error, Result};
use crate::utils::fit_decimal;

/// Domain model representing a wallet.
///
/// `balance` is denominated in the wallet asset's native units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub asset_id: String,
    pub provider: String,
    pub balance: Decimal,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
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

/// Input model for creating a new wallet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub asset_id: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub is_public: bool,
}

impl NewWallet {
    /// Validates the payload and brings it to storage form: lower-cased
    /// asset id, trimmed labels, balance at ledger precision.
    pub fn normalized(mut self) -> Result<Self> {
        self.asset_id = normalize_asset_id(&self.asset_id)?;
        self.name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if let Some(name) = &self.name {
            check_label(name, "Wallet name")?;
        }
        self.provider = Some(self.provider.unwrap_or_default().trim().to_string());
        if let Some(provider) = &self.provider {
            check_label(provider, "Provider")?;
        }
        let balance = self.balance.unwrap_or(Decimal::ZERO);
        self.balance = Some(fit_decimal(
            balance,
            AMOUNT_MAX_DIGITS,
            AMOUNT_SCALE,
            "balance",
        )?);
        Ok(self)
    }
}

/// Input model for updating an existing wallet. Absent fields are left as is;
/// the asset of a wallet never changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletUpdate {
    pub name: Option<String>,
    pub provider: Option<String>,
    pub is_public: Option<bool>,
    pub balance: Option<Decimal>,
}

impl WalletUpdate {
    pub fn normalized(mut self) -> Result<Self> {
        if let Some(name) = &self.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(Error::invalid_input("Wallet name cannot be empty"));
            }
            check_label(&name, "Wallet name")?;
            self.name = Some(name);
        }
        if let Some(provider) = &self.provider {
            let provider = provider.trim().to_string();
            check_label(&provider, "Provider")?;
            self.provider = Some(provider);
        }
        if let Some(balance) = self.balance {
            self.balance = Some(fit_decimal(
                balance,
                AMOUNT_MAX_DIGITS,
                AMOUNT_SCALE,
                "balance",
            )?);
        }
        Ok(self)
    }
}

/// Wallet as seen by one caller: their role (0 without a grant), the asset
/// category and the USD valuation at the current catalog rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    #[serde(flatten)]
    pub wallet: Wallet,
    pub role: i32,
    pub category: Option<AssetCategory>,
    pub value_usd: Option<Decimal>,
}

impl WalletView {
    pub fn new(wallet: Wallet, role: Option<Role>, asset: Option<&Asset>) -> Self {
        let value_usd = asset.map(|a| a.value_usd(wallet.balance));
        Self {
            role: role.map(|r| r.as_i32()).unwrap_or(0),
            category: asset.map(|a| a.category),
            value_usd,
            wallet,
        }
    }
}

/// One applied balance change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceHistoryEntry {
    pub id: String,
    pub wallet_id: String,
    /// The transaction that moved the balance; `None` for manual edits.
    pub transaction_id: Option<String>,
    pub old_balance: Decimal,
    pub new_balance: Decimal,
    pub created_at: NaiveDateTime,
}
