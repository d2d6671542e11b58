//! SQLite storage implementation for Keibo.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `keibo-core` and contains:
//! - Database connection pooling and the single serialized writer
//! - Diesel migrations
//! - Repository implementations for the catalog, index store and ledger
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` stays database-agnostic and works with traits.
//!
//! ```text
//!     core (domain)      server (HTTP)
//!           │                 │
//!           └────────┬────────┘
//!                    ▼
//!         storage-sqlite (this crate)
//!                    │
//!                    ▼
//!                SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod access;
pub mod assets;
pub mod economic_indices;
pub mod transactions;
pub mod wallets;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, ping, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from keibo-core for convenience
pub use keibo_core::errors::{DatabaseError, Error, Result};
