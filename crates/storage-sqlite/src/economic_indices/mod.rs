//! SQLite storage implementation for economic indices.

mod model;
mod repository;

pub use model::EconomicIndexDB;
pub use repository::EconomicIndexRepository;
