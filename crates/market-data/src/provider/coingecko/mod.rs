//! CoinGecko "simple price" provider.
//!
//! Returns prices for a batch of coin ids in one request:
//! `GET {url}?ids=bitcoin,ethereum&vs_currencies=usd` answers
//! `{"bitcoin": {"usd": 64250.12}, "ethereum": {"usd": 3120.5}}`.
//! Usually reached through a hosted gateway, hence the configurable headers.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{decimal_from_json, BatchQuote};
use crate::provider::{build_client, fetch_json, CryptoQuoteProvider, ProviderEndpoint};

/// Provider ID constant
const PROVIDER_ID: &str = "COINGECKO";

pub struct CoinGeckoProvider {
    client: Client,
    endpoint: ProviderEndpoint,
}

impl CoinGeckoProvider {
    pub fn new(endpoint: ProviderEndpoint, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            endpoint,
        }
    }
}

/// Flattens the `{id: {currency: price}}` body into rows.
///
/// A top-level value that is not an object is an invalid response; an entry
/// without a numeric price for `vs_currency` becomes a row with `rate: None`.
pub(crate) fn parse_quote_batch(
    body: &Value,
    vs_currency: &str,
) -> Result<Vec<BatchQuote>, MarketDataError> {
    let entries = body
        .as_object()
        .ok_or_else(|| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: "expected an object keyed by coin id".to_string(),
        })?;

    Ok(entries
        .iter()
        .map(|(symbol, details)| BatchQuote {
            symbol: symbol.clone(),
            rate: details.get(vs_currency).and_then(decimal_from_json),
        })
        .collect())
}

#[async_trait]
impl CryptoQuoteProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn quote_batch(
        &self,
        symbols: &[&str],
        vs_currency: &str,
    ) -> Result<Vec<BatchQuote>, MarketDataError> {
        let ids = symbols.join(",");
        let request = self
            .client
            .get(&self.endpoint.url)
            .query(&[("ids", ids.as_str()), ("vs_currencies", vs_currency)]);
        let request = self.endpoint.apply_headers(request);

        let body = fetch_json(PROVIDER_ID, request).await?;
        let quotes = parse_quote_batch(&body, vs_currency)?;
        tracing::debug!(
            "{} returned {} quotes for {} requested ids",
            PROVIDER_ID,
            quotes.len(),
            symbols.len()
        );
        Ok(quotes)
    }
}
