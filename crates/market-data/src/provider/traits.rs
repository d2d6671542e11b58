//! Provider trait definitions.
//!
//! Each reference-data feed has its own narrow trait so the ingestion
//! pipeline can be driven by in-memory fakes in tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::{BatchQuote, Observation, SeriesFrequency};

/// Quotes a batch of symbols against one quote currency in a single call.
#[async_trait]
pub trait CryptoQuoteProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Returns one row per symbol the provider recognised. Symbols it does
    /// not know are simply absent.
    async fn quote_batch(
        &self,
        symbols: &[&str],
        vs_currency: &str,
    ) -> Result<Vec<BatchQuote>, MarketDataError>;
}

/// Returns the whole currency table quoted against USD ("1 USD = X").
#[async_trait]
pub trait FxRateProvider: Send + Sync {
    fn id(&self) -> &'static str;

    /// The raw JSON body. Shape validation is the caller's job, so a
    /// malformed table can be rejected before anything is written.
    async fn rate_table(&self) -> Result<Value, MarketDataError>;
}

/// Time-series observations for a macroeconomic series.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    fn id(&self) -> &'static str;

    /// Observations from `start` onwards, newest first.
    async fn observations(
        &self,
        series_id: &str,
        start: NaiveDate,
        frequency: SeriesFrequency,
    ) -> Result<Vec<Observation>, MarketDataError>;
}
