//! Reference-data provider abstractions and implementations.
//!
//! This module contains:
//! - The provider traits the ingestion pipeline depends on
//! - [`ProviderEndpoint`], the per-feed connection settings
//! - Concrete providers (CoinGecko, exchange-rate table, FRED)

mod traits;

pub mod coingecko;
pub mod exchange_rates;
pub mod fred;

pub use traits::{CryptoQuoteProvider, FxRateProvider, SeriesProvider};

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

use crate::errors::MarketDataError;

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for one feed.
///
/// Hosted APIs (RapidAPI style) authenticate with a key header and route
/// on a host header; both header names are configurable because they vary
/// between gateways.
#[derive(Clone, Debug, Default)]
pub struct ProviderEndpoint {
    pub url: String,
    pub host: Option<String>,
    pub key_header: Option<String>,
    pub host_header: Option<String>,
    pub key: Option<String>,
}

impl ProviderEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Attaches the key and host headers when both name and value are set.
    pub(crate) fn apply_headers(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let (Some(name), Some(key)) = (non_empty(&self.key_header), non_empty(&self.key)) {
            request = request.header(name, key);
        }
        if let (Some(name), Some(host)) = (non_empty(&self.host_header), non_empty(&self.host)) {
            request = request.header(name, host);
        }
        request
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Sends a request and decodes the JSON body, mapping every failure mode to
/// a classified [`MarketDataError`].
pub(crate) async fn fetch_json(
    provider: &str,
    request: RequestBuilder,
) -> Result<Value, MarketDataError> {
    let response = request
        .send()
        .await
        .map_err(|e| MarketDataError::from_request(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MarketDataError::from_status(provider, status));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| MarketDataError::InvalidResponse {
            provider: provider.to_string(),
            message: e.to_string(),
        })
}
