//! SQLite storage implementation for wallets and their balance history.

mod model;
mod repository;

pub use model::{BalanceHistoryDB, WalletDB};
pub(crate) use repository::find_wallet;
pub use repository::WalletRepository;
