//! In-memory repositories and providers shared by the service tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use keibo_market_data::{
    BatchQuote, CryptoQuoteProvider, FxRateProvider, MarketDataError, Observation,
    SeriesFrequency, SeriesProvider,
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::access::{AccessRepositoryTrait, AccessStatus, NewInvitation, Role, WalletAccess};
use crate::assets::{plan_rate_upsert, Asset, AssetCategory, AssetRepositoryTrait, RateUpsert};
use crate::economic_indices::{
    plan_index_upsert, EconomicIndex, EconomicIndexRepositoryTrait, EconomicIndexUpdate,
};
use crate::errors::{Error, Result};
use crate::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait, TransactionUpdate};
use crate::utils::UpsertOutcome;
use crate::wallets::{BalanceHistoryEntry, NewWallet, Wallet, WalletRepositoryTrait, WalletUpdate};

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

// --- Ledger: wallets, access records and transactions share one store ---

#[derive(Default)]
struct LedgerState {
    wallets: Vec<Wallet>,
    access: Vec<WalletAccess>,
    history: Vec<BalanceHistoryEntry>,
    transactions: Vec<Transaction>,
}

#[derive(Clone, Default)]
pub struct MemoryLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_wallet(&self, id: &str, asset_id: &str, balance: Decimal, is_public: bool) -> Wallet {
        let wallet = Wallet {
            id: id.to_string(),
            name: format!("{} wallet", id),
            asset_id: asset_id.to_string(),
            provider: String::new(),
            balance,
            is_public,
            created_at: now(),
            updated_at: now(),
        };
        self.state.lock().unwrap().wallets.push(wallet.clone());
        wallet
    }

    pub fn grant(&self, wallet_id: &str, user_id: &str, role: Role) {
        self.state.lock().unwrap().access.push(WalletAccess {
            id: Uuid::new_v4().to_string(),
            wallet_id: wallet_id.to_string(),
            user_id: user_id.to_string(),
            role,
            status: AccessStatus::Granted { granted_at: now() },
        });
    }

    pub fn invite(&self, wallet_id: &str, user_id: &str, role: Role) -> WalletAccess {
        let record = WalletAccess {
            id: Uuid::new_v4().to_string(),
            wallet_id: wallet_id.to_string(),
            user_id: user_id.to_string(),
            role,
            status: AccessStatus::Pending { created_at: now() },
        };
        self.state.lock().unwrap().access.push(record.clone());
        record
    }

    pub fn balance_of(&self, wallet_id: &str) -> Option<Decimal> {
        self.state
            .lock()
            .unwrap()
            .wallets
            .iter()
            .find(|w| w.id == wallet_id)
            .map(|w| w.balance)
    }

    pub fn history_len(&self) -> usize {
        self.state.lock().unwrap().history.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.state.lock().unwrap().transactions.len()
    }
}

fn move_balance(
    state: &mut LedgerState,
    wallet_id: &str,
    delta: Decimal,
    transaction_id: &str,
) -> bool {
    let Some(wallet) = state.wallets.iter_mut().find(|w| w.id == wallet_id) else {
        return false;
    };
    let old_balance = wallet.balance;
    wallet.balance += delta;
    wallet.updated_at = now();
    let entry = BalanceHistoryEntry {
        id: Uuid::new_v4().to_string(),
        wallet_id: wallet_id.to_string(),
        transaction_id: Some(transaction_id.to_string()),
        old_balance,
        new_balance: wallet.balance,
        created_at: now(),
    };
    state.history.push(entry);
    true
}

#[async_trait]
impl WalletRepositoryTrait for MemoryLedger {
    async fn create_with_owner(&self, new_wallet: NewWallet, owner_id: &str) -> Result<Wallet> {
        let wallet = Wallet {
            id: new_wallet
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_wallet.name.unwrap_or_default(),
            asset_id: new_wallet.asset_id,
            provider: new_wallet.provider.unwrap_or_default(),
            balance: new_wallet.balance.unwrap_or_default(),
            is_public: new_wallet.is_public,
            created_at: now(),
            updated_at: now(),
        };
        self.state.lock().unwrap().wallets.push(wallet.clone());
        self.grant(&wallet.id, owner_id, Role::Owner);
        Ok(wallet)
    }

    fn get_by_id(&self, wallet_id: &str) -> Result<Option<Wallet>> {
        let state = self.state.lock().unwrap();
        Ok(state.wallets.iter().find(|w| w.id == wallet_id).cloned())
    }

    fn list_by_ids(&self, wallet_ids: &[String]) -> Result<Vec<Wallet>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .wallets
            .iter()
            .filter(|w| wallet_ids.contains(&w.id))
            .cloned()
            .collect())
    }

    fn list_for_user(
        &self,
        user_id: &str,
        roles: RangeInclusive<i32>,
    ) -> Result<Vec<(Wallet, Role)>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .access
            .iter()
            .filter(|a| a.user_id == user_id && a.status.is_granted())
            .filter(|a| roles.contains(&a.role.as_i32()))
            .filter_map(|a| {
                state
                    .wallets
                    .iter()
                    .find(|w| w.id == a.wallet_id)
                    .map(|w| (w.clone(), a.role))
            })
            .collect())
    }

    async fn update(&self, wallet_id: &str, update: WalletUpdate) -> Result<Wallet> {
        let mut state = self.state.lock().unwrap();
        let wallet = state
            .wallets
            .iter_mut()
            .find(|w| w.id == wallet_id)
            .ok_or_else(|| Error::NotFound(format!("Wallet '{}'", wallet_id)))?;
        let old_balance = wallet.balance;
        if let Some(name) = update.name {
            wallet.name = name;
        }
        if let Some(provider) = update.provider {
            wallet.provider = provider;
        }
        if let Some(is_public) = update.is_public {
            wallet.is_public = is_public;
        }
        if let Some(balance) = update.balance {
            wallet.balance = balance;
        }
        wallet.updated_at = now();
        let updated = wallet.clone();
        if updated.balance != old_balance {
            state.history.push(BalanceHistoryEntry {
                id: Uuid::new_v4().to_string(),
                wallet_id: wallet_id.to_string(),
                transaction_id: None,
                old_balance,
                new_balance: updated.balance,
                created_at: now(),
            });
        }
        Ok(updated)
    }

    async fn delete(&self, wallet_id: &str) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.wallets.len();
        state.wallets.retain(|w| w.id != wallet_id);
        state.access.retain(|a| a.wallet_id != wallet_id);
        state.history.retain(|h| h.wallet_id != wallet_id);
        for transaction in state.transactions.iter_mut() {
            if transaction.recipient_id.as_deref() == Some(wallet_id) {
                transaction.recipient_id = None;
            }
            if transaction.sender_id.as_deref() == Some(wallet_id) {
                transaction.sender_id = None;
            }
        }
        state
            .transactions
            .retain(|t| t.recipient_id.is_some() || t.sender_id.is_some());
        Ok(before - state.wallets.len())
    }

    fn list_balance_history(&self, wallet_id: &str) -> Result<Vec<BalanceHistoryEntry>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .history
            .iter()
            .rev()
            .filter(|h| h.wallet_id == wallet_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AccessRepositoryTrait for MemoryLedger {
    fn get_by_id(&self, access_id: &str) -> Result<Option<WalletAccess>> {
        let state = self.state.lock().unwrap();
        Ok(state.access.iter().find(|a| a.id == access_id).cloned())
    }

    fn find(&self, wallet_id: &str, user_id: &str) -> Result<Option<WalletAccess>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .access
            .iter()
            .find(|a| a.wallet_id == wallet_id && a.user_id == user_id)
            .cloned())
    }

    fn get_role(&self, wallet_id: &str, user_id: &str) -> Result<Option<Role>> {
        Ok(AccessRepositoryTrait::find(self, wallet_id, user_id)?.and_then(|a| a.effective_role()))
    }

    fn list_roles_for_user(&self, user_id: &str) -> Result<Vec<(String, Role)>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .access
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| a.effective_role().map(|r| (a.wallet_id.clone(), r)))
            .collect())
    }

    fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<WalletAccess>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .access
            .iter()
            .filter(|a| a.wallet_id == wallet_id)
            .cloned()
            .collect())
    }

    fn list_pending_for_user(&self, user_id: &str) -> Result<Vec<WalletAccess>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .access
            .iter()
            .filter(|a| a.user_id == user_id && !a.status.is_granted())
            .cloned()
            .collect())
    }

    async fn create_invitation(
        &self,
        wallet_id: &str,
        invitation: NewInvitation,
    ) -> Result<WalletAccess> {
        Ok(self.invite(wallet_id, &invitation.user_id, invitation.role))
    }

    async fn accept(&self, access_id: &str) -> Result<WalletAccess> {
        let mut state = self.state.lock().unwrap();
        let record = state
            .access
            .iter_mut()
            .find(|a| a.id == access_id)
            .ok_or_else(|| Error::NotFound(format!("Invitation '{}'", access_id)))?;
        record.status = AccessStatus::Granted { granted_at: now() };
        Ok(record.clone())
    }

    async fn delete(&self, access_id: &str) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.access.len();
        state.access.retain(|a| a.id != access_id);
        Ok(before - state.access.len())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for MemoryLedger {
    async fn create(
        &self,
        new_transaction: NewTransaction,
        apply_balances: bool,
    ) -> Result<(Transaction, UpsertOutcome)> {
        let mut state = self.state.lock().unwrap();
        if let Some(id) = &new_transaction.id {
            if let Some(existing) = state.transactions.iter().find(|t| &t.id == id) {
                return Ok((existing.clone(), UpsertOutcome::Unchanged));
            }
        }

        let mut transaction = Transaction {
            id: new_transaction
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            category: new_transaction.category.unwrap_or_default(),
            recipient_id: new_transaction.recipient_id,
            sender_id: new_transaction.sender_id,
            confirmed_by_recipient: false,
            confirmed_by_sender: false,
            gross_amount: new_transaction.gross_amount,
            net_amount: new_transaction.net_amount.unwrap_or_default(),
            transaction_fee: new_transaction.transaction_fee.unwrap_or_default(),
            description: new_transaction.description.unwrap_or_default(),
            balance_applied: false,
            created_at: now(),
            updated_at: now(),
        };
        if apply_balances {
            for (wallet_id, delta) in transaction.balance_deltas() {
                if move_balance(&mut state, &wallet_id, delta, &transaction.id) {
                    transaction.balance_applied = true;
                }
            }
        }
        state.transactions.push(transaction.clone());
        Ok((transaction, UpsertOutcome::Created))
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned())
    }

    fn list_for_wallets(&self, wallet_ids: &[String]) -> Result<Vec<Transaction>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .transactions
            .iter()
            .rev()
            .filter(|t| wallet_ids.iter().any(|id| t.touches(id)))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        let transaction = state
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction_id)
            .ok_or_else(|| Error::NotFound(format!("Transaction '{}'", transaction_id)))?;
        if let Some(category) = update.category {
            transaction.category = category;
        }
        if let Some(description) = update.description {
            transaction.description = description;
        }
        if let Some(flag) = update.confirmed_by_recipient {
            transaction.confirmed_by_recipient = flag;
        }
        if let Some(flag) = update.confirmed_by_sender {
            transaction.confirmed_by_sender = flag;
        }
        transaction.updated_at = now();
        Ok(transaction.clone())
    }
}

// --- Catalog stores ---

#[derive(Clone, Default)]
pub struct MemoryAssets {
    assets: Arc<Mutex<HashMap<String, Asset>>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, id: &str, category: AssetCategory, rate: Decimal) {
        self.assets.lock().unwrap().insert(
            id.to_string(),
            Asset {
                id: id.to_string(),
                category,
                exchange_rate: rate,
                created_at: now(),
                updated_at: now(),
            },
        );
    }

    pub fn rate_of(&self, id: &str) -> Option<Decimal> {
        self.assets
            .lock()
            .unwrap()
            .get(id)
            .map(|a| a.exchange_rate)
    }

    pub fn len(&self) -> usize {
        self.assets.lock().unwrap().len()
    }
}

#[async_trait]
impl AssetRepositoryTrait for MemoryAssets {
    fn get_by_id(&self, asset_id: &str) -> Result<Option<Asset>> {
        Ok(self.assets.lock().unwrap().get(asset_id).cloned())
    }

    fn list(&self) -> Result<Vec<Asset>> {
        let mut assets: Vec<Asset> = self.assets.lock().unwrap().values().cloned().collect();
        assets.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(assets)
    }

    fn list_by_ids(&self, asset_ids: &[String]) -> Result<Vec<Asset>> {
        let assets = self.assets.lock().unwrap();
        Ok(asset_ids
            .iter()
            .filter_map(|id| assets.get(id).cloned())
            .collect())
    }

    async fn upsert_rate(
        &self,
        asset_id: &str,
        category: AssetCategory,
        rate: Decimal,
    ) -> Result<UpsertOutcome> {
        let mut assets = self.assets.lock().unwrap();
        match plan_rate_upsert(assets.get(asset_id), rate) {
            RateUpsert::Unchanged => Ok(UpsertOutcome::Unchanged),
            RateUpsert::Update => {
                if let Some(asset) = assets.get_mut(asset_id) {
                    asset.exchange_rate = rate;
                    asset.updated_at = now();
                }
                Ok(UpsertOutcome::Updated)
            }
            RateUpsert::Create => {
                assets.insert(
                    asset_id.to_string(),
                    Asset {
                        id: asset_id.to_string(),
                        category,
                        exchange_rate: rate,
                        created_at: now(),
                        updated_at: now(),
                    },
                );
                Ok(UpsertOutcome::Created)
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryIndices {
    indices: Arc<Mutex<HashMap<String, EconomicIndex>>>,
}

impl MemoryIndices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<EconomicIndex> {
        self.indices.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl EconomicIndexRepositoryTrait for MemoryIndices {
    fn get_by_id(&self, index_id: &str) -> Result<Option<EconomicIndex>> {
        Ok(self.get(index_id))
    }

    fn list(&self) -> Result<Vec<EconomicIndex>> {
        Ok(self.indices.lock().unwrap().values().cloned().collect())
    }

    async fn upsert(&self, update: EconomicIndexUpdate) -> Result<UpsertOutcome> {
        let mut indices = self.indices.lock().unwrap();
        let existing = indices.get(&update.id);
        let (outcome, deltas) = plan_index_upsert(existing, &update);
        if outcome == UpsertOutcome::Unchanged {
            return Ok(outcome);
        }
        let created_at = existing.map(|i| i.created_at).unwrap_or_else(now);
        indices.insert(
            update.id.clone(),
            EconomicIndex {
                id: update.id,
                value: update.value,
                deltas,
                created_at,
                updated_at: now(),
            },
        );
        Ok(outcome)
    }
}

// --- Providers ---

/// Serves a fixed crypto quote batch.
pub struct FixedCryptoProvider {
    pub quotes: Vec<BatchQuote>,
}

#[async_trait]
impl CryptoQuoteProvider for FixedCryptoProvider {
    fn id(&self) -> &'static str {
        "FIXED_CRYPTO"
    }

    async fn quote_batch(
        &self,
        _symbols: &[&str],
        _vs_currency: &str,
    ) -> std::result::Result<Vec<BatchQuote>, MarketDataError> {
        Ok(self.quotes.clone())
    }
}

/// Serves a fixed rate table body.
pub struct FixedFxProvider {
    pub body: Value,
}

#[async_trait]
impl FxRateProvider for FixedFxProvider {
    fn id(&self) -> &'static str {
        "FIXED_FX"
    }

    async fn rate_table(&self) -> std::result::Result<Value, MarketDataError> {
        Ok(self.body.clone())
    }
}

/// Serves canned observations per series and counts fetches. Unknown series
/// answer with HTTP 400.
#[derive(Default)]
pub struct FixedSeriesProvider {
    pub series: HashMap<String, Vec<Observation>>,
    pub calls: AtomicUsize,
}

impl FixedSeriesProvider {
    pub fn with_series(series_id: &str, observations: Vec<Observation>) -> Self {
        let mut provider = Self::default();
        provider.series.insert(series_id.to_string(), observations);
        provider
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeriesProvider for FixedSeriesProvider {
    fn id(&self) -> &'static str {
        "FIXED_SERIES"
    }

    async fn observations(
        &self,
        series_id: &str,
        _start: NaiveDate,
        _frequency: SeriesFrequency,
    ) -> std::result::Result<Vec<Observation>, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.series
            .get(series_id)
            .cloned()
            .ok_or_else(|| MarketDataError::Http {
                provider: self.id().to_string(),
                status: 400,
            })
    }
}
