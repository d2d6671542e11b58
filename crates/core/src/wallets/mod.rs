//! Wallets module - balance-holding containers and their history.

mod wallet_names;
mod wallets_model;
mod wallets_service;
mod wallets_traits;


#[cfg(test)]
mod wallets_service_tests;

pub use wallet_names::random_wallet_name;
pub use wallets_model::{BalanceHistoryEntry, NewWallet, Wallet, WalletUpdate, WalletView};
pub use wallets_service::WalletService;
pub use wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
