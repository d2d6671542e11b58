//! SQLite storage implementation for wallet access records.

mod model;
mod repository;

pub(crate) use model::{role_from_db, STATUS_GRANTED};
pub use model::WalletAccessDB;
pub use repository::AccessRepository;
