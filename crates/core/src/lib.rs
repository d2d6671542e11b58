//! Keibo Core - Domain entities, services, and traits.
//!
//! This crate contains the ledger's business logic: wallets and their access
//! grants, the transaction engine, the asset catalog, the economic index
//! store and the reference-data ingestion pipeline. It is database-agnostic
//! and defines traits that are implemented by the `storage-sqlite` crate.

pub mod access;
pub mod assets;
pub mod constants;
pub mod economic_indices;
pub mod errors;
pub mod ingestion;
pub mod transactions;
pub mod utils;
pub mod wallets;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
