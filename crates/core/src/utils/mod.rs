pub mod decimal_utils;
pub mod upsert;

pub use decimal_utils::fit_decimal;
pub use upsert::UpsertOutcome;
