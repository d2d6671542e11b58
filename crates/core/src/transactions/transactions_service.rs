use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::transactions_model::{NewTransaction, Transaction, TransactionFilter, TransactionUpdate};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::access::{
    can_read_wallet, require_read, require_role, AccessRepositoryTrait, Role,
    WRITE_TRANSACTION_MIN_ROLE,
};
use crate::errors::{Error, Result};
use crate::utils::UpsertOutcome;
use crate::wallets::{Wallet, WalletRepositoryTrait};

/// Service for recording and reading transactions
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    wallet_repository: Arc<dyn WalletRepositoryTrait>,
    access_repository: Arc<dyn AccessRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        wallet_repository: Arc<dyn WalletRepositoryTrait>,
        access_repository: Arc<dyn AccessRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            wallet_repository,
            access_repository,
        }
    }

    fn endpoint_wallet(&self, wallet_id: &str, side: &str) -> Result<Wallet> {
        self.wallet_repository.get_by_id(wallet_id)?.ok_or_else(|| {
            Error::invalid_input(format!("Unknown {} wallet '{}'", side, wallet_id))
        })
    }

    fn role_on(&self, wallet_id: Option<&str>, caller: &str) -> Result<Option<Role>> {
        match wallet_id {
            Some(id) => self.access_repository.get_role(id, caller),
            None => Ok(None),
        }
    }

    /// Readable when the caller can read at least one endpoint that still exists.
    fn can_read(&self, transaction: &Transaction, caller: &str) -> Result<bool> {
        for wallet_id in transaction.endpoints() {
            if let Some(wallet) = self.wallet_repository.get_by_id(wallet_id)? {
                let role = self.access_repository.get_role(wallet_id, caller)?;
                if can_read_wallet(&wallet, role) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn load(&self, transaction_id: &str) -> Result<Transaction> {
        self.repository
            .get_by_id(transaction_id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction '{}'", transaction_id)))
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(
        &self,
        caller: &str,
        new_transaction: NewTransaction,
        retro: bool,
    ) -> Result<Transaction> {
        let new_transaction = new_transaction.normalized()?;

        if let Some(id) = &new_transaction.recipient_id {
            self.endpoint_wallet(id, "recipient")?;
        }
        if let Some(id) = &new_transaction.sender_id {
            self.endpoint_wallet(id, "sender")?;
        }

        let best_role = self
            .role_on(new_transaction.recipient_id.as_deref(), caller)?
            .max(self.role_on(new_transaction.sender_id.as_deref(), caller)?);
        require_role(
            best_role,
            WRITE_TRANSACTION_MIN_ROLE,
            "record transactions on these wallets",
        )?;

        let (transaction, outcome) = self
            .repository
            .create(new_transaction.clone(), !retro)
            .await?;
        match outcome {
            UpsertOutcome::Unchanged => {
                // A reused id only resolves to the stored row for callers who
                // could read it and who resubmit the same movement.
                if !self.can_read(&transaction, caller)?
                    || !new_transaction.same_movement(&transaction)
                {
                    return Err(Error::ConstraintViolation(format!(
                        "Transaction id '{}' is already in use",
                        transaction.id
                    )));
                }
                debug!(
                    "Transaction {} already recorded, returning stored copy",
                    transaction.id
                )
            }
            _ => info!(
                "User {} recorded transaction {} (net {}, retro: {}, applied: {})",
                caller,
                transaction.id,
                transaction.net_amount,
                retro,
                transaction.balance_applied
            ),
        }
        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        caller: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let transaction = self.load(transaction_id)?;
        if !self.can_read(&transaction, caller)? {
            return Err(Error::PermissionDenied(
                "Not allowed to view this transaction".to_string(),
            ));
        }
        let update = update.normalized()?;

        let recipient_role = self.role_on(transaction.recipient_id.as_deref(), caller)?;
        let sender_role = self.role_on(transaction.sender_id.as_deref(), caller)?;

        if update.confirmed_by_recipient.is_some() {
            if transaction.recipient_id.is_none() {
                return Err(Error::invalid_input("Transaction has no recipient wallet"));
            }
            require_role(
                recipient_role,
                WRITE_TRANSACTION_MIN_ROLE,
                "confirm on behalf of the recipient",
            )?;
        }
        if update.confirmed_by_sender.is_some() {
            if transaction.sender_id.is_none() {
                return Err(Error::invalid_input("Transaction has no sender wallet"));
            }
            require_role(
                sender_role,
                WRITE_TRANSACTION_MIN_ROLE,
                "confirm on behalf of the sender",
            )?;
        }
        if update.touches_labels() {
            require_role(
                recipient_role.max(sender_role),
                WRITE_TRANSACTION_MIN_ROLE,
                "edit this transaction",
            )?;
        }

        let updated = self.repository.update(transaction_id, update).await?;
        debug!("User {} updated transaction {}", caller, transaction_id);
        Ok(updated)
    }

    fn get_transaction(&self, caller: &str, transaction_id: &str) -> Result<Transaction> {
        let transaction = self.load(transaction_id)?;
        if !self.can_read(&transaction, caller)? {
            return Err(Error::PermissionDenied(
                "Not allowed to view this transaction".to_string(),
            ));
        }
        Ok(transaction)
    }

    fn list_transactions(
        &self,
        caller: &str,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let wallet_ids: Vec<String> = match &filter.wallet_id {
            Some(wallet_id) => {
                let wallet = self
                    .wallet_repository
                    .get_by_id(wallet_id)?
                    .ok_or_else(|| Error::NotFound(format!("Wallet '{}'", wallet_id)))?;
                let role = self.access_repository.get_role(wallet_id, caller)?;
                require_read(&wallet, role, "view this wallet's transactions")?;
                vec![wallet_id.clone()]
            }
            None => self
                .access_repository
                .list_roles_for_user(caller)?
                .into_iter()
                .map(|(wallet_id, _)| wallet_id)
                .collect(),
        };

        if wallet_ids.is_empty() {
            return Ok(Vec::new());
        }

        let transactions = self.repository.list_for_wallets(&wallet_ids)?;
        Ok(match &filter.category {
            Some(category) => transactions
                .into_iter()
                .filter(|t| t.category.eq_ignore_ascii_case(category))
                .collect(),
            None => transactions,
        })
    }
}
