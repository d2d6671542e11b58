//! Transaction repository and service traits.

use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction, TransactionFilter, TransactionUpdate};
use crate::errors::Result;
use crate::utils::UpsertOutcome;

/// Trait defining the contract for Transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Records a normalized transaction in a single write unit.
    ///
    /// With `apply_balances` the recipient is credited and the sender debited
    /// by the net amount, each side on its own; a wallet that no longer
    /// exists is skipped. Every applied change lands in the balance history
    /// and `balance_applied` is set.
    ///
    /// When `new_transaction.id` names a stored transaction nothing is
    /// written and the stored row comes back with [`UpsertOutcome::Unchanged`].
    async fn create(
        &self,
        new_transaction: NewTransaction,
        apply_balances: bool,
    ) -> Result<(Transaction, UpsertOutcome)>;

    fn get_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>>;

    /// Transactions touching any of the wallets, newest first.
    fn list_for_wallets(&self, wallet_ids: &[String]) -> Result<Vec<Transaction>>;

    async fn update(&self, transaction_id: &str, update: TransactionUpdate)
        -> Result<Transaction>;
}

/// Trait defining the contract for Transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Records a transaction. A `retro` transaction documents history and
    /// leaves live balances alone.
    async fn create_transaction(
        &self,
        caller: &str,
        new_transaction: NewTransaction,
        retro: bool,
    ) -> Result<Transaction>;

    async fn update_transaction(
        &self,
        caller: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    fn get_transaction(&self, caller: &str, transaction_id: &str) -> Result<Transaction>;

    /// Transactions on wallets the caller can see. Without a wallet filter
    /// that means every wallet the caller holds a grant on.
    fn list_transactions(&self, caller: &str, filter: TransactionFilter)
        -> Result<Vec<Transaction>>;
}
