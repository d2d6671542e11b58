//! Currency exchange-rate table provider.
//!
//! `GET {url}` answers `{"base": "USD", "rates": {"EUR": 0.92, "JPY": 151.3, ...}}`,
//! every rate read as "1 USD = X currency".

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::provider::{build_client, fetch_json, FxRateProvider, ProviderEndpoint};

/// Provider ID constant
const PROVIDER_ID: &str = "EXCHANGE_RATES";

pub struct ExchangeRatesProvider {
    client: Client,
    endpoint: ProviderEndpoint,
}

impl ExchangeRatesProvider {
    pub fn new(endpoint: ProviderEndpoint, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            endpoint,
        }
    }
}

#[async_trait]
impl FxRateProvider for ExchangeRatesProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn rate_table(&self) -> Result<Value, MarketDataError> {
        let request = self.endpoint.apply_headers(self.client.get(&self.endpoint.url));
        fetch_json(PROVIDER_ID, request).await
    }
}
