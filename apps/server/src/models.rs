use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use keibo_core::access as core_access;
use keibo_core::assets as core_assets;
use keibo_core::economic_indices as core_indices;
use keibo_core::transactions as core_transactions;
use keibo_core::wallets as core_wallets;

/// Wallet as seen by the caller.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub asset_id: String,
    pub provider: String,
    pub balance: Decimal,
    pub is_public: bool,
    /// Caller's role, 0 without a grant.
    pub role: i32,
    pub category: Option<String>,
    pub value_usd: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_wallets::WalletView> for Wallet {
    fn from(view: core_wallets::WalletView) -> Self {
        let w = view.wallet;
        Self {
            id: w.id,
            name: w.name,
            asset_id: w.asset_id,
            provider: w.provider,
            balance: w.balance,
            is_public: w.is_public,
            role: view.role,
            category: view.category.map(|c| c.as_db_str().to_string()),
            value_usd: view.value_usd,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// A random name is generated when omitted.
    pub name: Option<String>,
    pub asset_id: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub is_public: bool,
}

impl From<NewWallet> for core_wallets::NewWallet {
    fn from(w: NewWallet) -> Self {
        Self {
            id: w.id,
            name: w.name,
            asset_id: w.asset_id,
            provider: w.provider,
            balance: w.balance,
            is_public: w.is_public,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct WalletUpdate {
    pub name: Option<String>,
    pub provider: Option<String>,
    pub is_public: Option<bool>,
    pub balance: Option<Decimal>,
}

impl From<WalletUpdate> for core_wallets::WalletUpdate {
    fn from(u: WalletUpdate) -> Self {
        Self {
            name: u.name,
            provider: u.provider,
            is_public: u.is_public,
            balance: u.balance,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BalanceHistoryEntry {
    pub id: String,
    pub wallet_id: String,
    pub transaction_id: Option<String>,
    pub old_balance: Decimal,
    pub new_balance: Decimal,
    pub created_at: NaiveDateTime,
}

impl From<core_wallets::BalanceHistoryEntry> for BalanceHistoryEntry {
    fn from(e: core_wallets::BalanceHistoryEntry) -> Self {
        Self {
            id: e.id,
            wallet_id: e.wallet_id,
            transaction_id: e.transaction_id,
            old_balance: e.old_balance,
            new_balance: e.new_balance,
            created_at: e.created_at,
        }
    }
}

/// A grant or a pending invitation.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccess {
    pub id: String,
    pub wallet_id: String,
    pub user_id: String,
    pub role: i32,
    /// `GRANTED` or `PENDING`
    pub status: String,
    pub granted_at: Option<NaiveDateTime>,
    pub invited_at: Option<NaiveDateTime>,
}

impl From<core_access::WalletAccess> for WalletAccess {
    fn from(a: core_access::WalletAccess) -> Self {
        let (granted_at, invited_at) = match a.status {
            core_access::AccessStatus::Granted { granted_at } => (Some(granted_at), None),
            core_access::AccessStatus::Pending { created_at } => (None, Some(created_at)),
        };
        Self {
            status: a.status.as_db_str().to_string(),
            id: a.id,
            wallet_id: a.wallet_id,
            user_id: a.user_id,
            role: a.role.as_i32(),
            granted_at,
            invited_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewInvitation {
    pub user_id: String,
    /// 1 viewer, 2 editor, 3 manager, 4 owner
    pub role: i32,
}

impl TryFrom<NewInvitation> for core_access::NewInvitation {
    type Error = keibo_core::Error;

    fn try_from(i: NewInvitation) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: i.user_id,
            role: core_access::Role::try_from(i.role)?,
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub category: String,
    pub recipient_id: Option<String>,
    pub sender_id: Option<String>,
    pub confirmed_by_recipient: bool,
    pub confirmed_by_sender: bool,
    pub gross_amount: Decimal,
    pub net_amount: Decimal,
    pub transaction_fee: Decimal,
    pub description: String,
    pub balance_applied: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_transactions::Transaction> for Transaction {
    fn from(t: core_transactions::Transaction) -> Self {
        Self {
            id: t.id,
            category: t.category,
            recipient_id: t.recipient_id,
            sender_id: t.sender_id,
            confirmed_by_recipient: t.confirmed_by_recipient,
            confirmed_by_sender: t.confirmed_by_sender,
            gross_amount: t.gross_amount,
            net_amount: t.net_amount,
            transaction_fee: t.transaction_fee,
            description: t.description,
            balance_applied: t.balance_applied,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Re-submitting an existing id returns the stored transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub recipient_id: Option<String>,
    pub sender_id: Option<String>,
    pub gross_amount: Decimal,
    #[serde(default)]
    pub net_amount: Option<Decimal>,
    #[serde(default)]
    pub transaction_fee: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<NewTransaction> for core_transactions::NewTransaction {
    fn from(t: NewTransaction) -> Self {
        Self {
            id: t.id,
            category: t.category,
            recipient_id: t.recipient_id,
            sender_id: t.sender_id,
            gross_amount: t.gross_amount,
            net_amount: t.net_amount,
            transaction_fee: t.transaction_fee,
            description: t.description,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub category: Option<String>,
    pub description: Option<String>,
    pub confirmed_by_recipient: Option<bool>,
    pub confirmed_by_sender: Option<bool>,
}

impl From<TransactionUpdate> for core_transactions::TransactionUpdate {
    fn from(u: TransactionUpdate) -> Self {
        Self {
            category: u.category,
            description: u.description,
            confirmed_by_recipient: u.confirmed_by_recipient,
            confirmed_by_sender: u.confirmed_by_sender,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub category: String,
    /// USD per unit
    pub exchange_rate: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_assets::Asset> for Asset {
    fn from(a: core_assets::Asset) -> Self {
        Self {
            category: a.category.as_db_str().to_string(),
            id: a.id,
            exchange_rate: a.exchange_rate,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EconomicIndex {
    pub id: String,
    pub value: Decimal,
    pub daily_delta: Option<Decimal>,
    pub weekly_delta: Option<Decimal>,
    pub monthly_delta: Option<Decimal>,
    pub yearly_delta: Option<Decimal>,
    pub decennial_delta: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_indices::EconomicIndex> for EconomicIndex {
    fn from(i: core_indices::EconomicIndex) -> Self {
        Self {
            id: i.id,
            value: i.value,
            daily_delta: i.deltas.daily,
            weekly_delta: i.deltas.weekly,
            monthly_delta: i.deltas.monthly,
            yearly_delta: i.deltas.yearly,
            decennial_delta: i.deltas.decennial,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}
