//! Keibo HTTP server.
//!
//! Wires the SQLite repositories into the core services, exposes them under
//! `/api/v1` and runs the reference-data scheduler.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod models;
pub mod scheduler;

pub use main_lib::{build_state, init_tracing, AppState};
