//! Wallet repository and service traits.

use async_trait::async_trait;
use std::ops::RangeInclusive;

use super::wallets_model::{BalanceHistoryEntry, NewWallet, Wallet, WalletUpdate, WalletView};
use crate::access::Role;
use crate::errors::Result;

/// Trait defining the contract for Wallet repository operations.
#[async_trait]
pub trait WalletRepositoryTrait: Send + Sync {
    /// Inserts the wallet and an Owner grant for `owner_id` in one write unit.
    /// `new_wallet` must already be normalized and named.
    async fn create_with_owner(&self, new_wallet: NewWallet, owner_id: &str) -> Result<Wallet>;

    fn get_by_id(&self, wallet_id: &str) -> Result<Option<Wallet>>;

    fn list_by_ids(&self, wallet_ids: &[String]) -> Result<Vec<Wallet>>;

    /// Wallets on which `user_id` holds a granted role inside `roles`.
    fn list_for_user(&self, user_id: &str, roles: RangeInclusive<i32>)
        -> Result<Vec<(Wallet, Role)>>;

    /// Applies the present fields. A balance change is recorded in the
    /// balance history within the same write unit.
    async fn update(&self, wallet_id: &str, update: WalletUpdate) -> Result<Wallet>;

    /// Deletes the wallet with its access records and balance history.
    /// Transactions lose the reference; those left with no endpoint at all
    /// are purged in the same write unit.
    async fn delete(&self, wallet_id: &str) -> Result<usize>;

    /// Newest first.
    fn list_balance_history(&self, wallet_id: &str) -> Result<Vec<BalanceHistoryEntry>>;
}

/// Trait defining the contract for Wallet service operations.
///
/// Every operation takes the authenticated caller and checks their role.
#[async_trait]
pub trait WalletServiceTrait: Send + Sync {
    /// Wallets the user holds a grant on, optionally limited to a role band.
    fn list_wallets_for(
        &self,
        user_id: &str,
        role: Option<i32>,
        range: Option<i32>,
    ) -> Result<Vec<WalletView>>;

    async fn create_wallet(&self, new_wallet: NewWallet, creator: &str) -> Result<WalletView>;
    fn get_wallet(&self, wallet_id: &str, caller: &str) -> Result<WalletView>;
    async fn update_wallet(
        &self,
        wallet_id: &str,
        caller: &str,
        update: WalletUpdate,
    ) -> Result<WalletView>;
    async fn delete_wallet(&self, wallet_id: &str, caller: &str) -> Result<()>;
    fn get_balance_history(&self, wallet_id: &str, caller: &str)
        -> Result<Vec<BalanceHistoryEntry>>;
}
