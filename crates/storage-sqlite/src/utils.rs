//! Helpers shared by the repositories.

use keibo_core::errors::{DatabaseError, Error, Result};
use log::warn;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Maximum number of parameters for SQLite IN (...) queries.
///
/// SQLite caps bound parameters per statement (SQLITE_MAX_VARIABLE_NUMBER,
/// 999 on older builds). 500 leaves room for the rest of the query.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Chunk a slice into pieces that fit in one `IN (...)` clause.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Decimals are stored as TEXT. A value that does not parse reads as zero.
pub fn parse_decimal(value: &str, column: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| {
        warn!("Unparseable decimal '{}' in {}: {}", value, column, e);
        Decimal::ZERO
    })
}

/// Strict read for a stored amount that a write builds on.
pub fn parse_stored_decimal(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        Error::Database(DatabaseError::Internal(format!(
            "Unparseable decimal '{}' in {}: {}",
            value, column, e
        )))
    })
}

pub fn parse_optional_decimal(value: Option<&str>, column: &str) -> Option<Decimal> {
    value.map(|v| parse_decimal(v, column))
}
