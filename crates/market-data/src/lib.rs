//! Keibo Market Data Crate
//!
//! Provider clients for the reference data Keibo keeps in its asset catalog
//! and economic index store.
//!
//! # Overview
//!
//! - Crypto prices: batch quotes against USD ([`CoinGeckoProvider`])
//! - Currency rates: whole "1 USD = X" table ([`ExchangeRatesProvider`])
//! - Economic series: dated observations ([`FredProvider`])
//!
//! Every provider failure is a [`MarketDataError`] carrying a
//! [`RetryClass`](errors::RetryClass), so callers can decide whether a second
//! attempt is worthwhile without knowing which provider failed.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};

pub use models::{decimal_from_json, BatchQuote, Observation, ObservationValue, SeriesFrequency};

pub use provider::coingecko::CoinGeckoProvider;
pub use provider::exchange_rates::ExchangeRatesProvider;
pub use provider::fred::{FredProvider, FRED_OBSERVATIONS_URL};
pub use provider::{
    CryptoQuoteProvider, FxRateProvider, ProviderEndpoint, SeriesProvider, DEFAULT_REQUEST_TIMEOUT,
};
