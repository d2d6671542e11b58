//! Transactions module - value movements between wallets and the balance
//! rules that go with them.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

#[cfg(test)]
mod transactions_model_tests;


pub use transactions_model::{
    reconcile_fee, NewTransaction, Transaction, TransactionFilter, TransactionUpdate,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
