use async_trait::async_trait;
use keibo_market_data::CryptoQuoteProvider;
use log::{debug, warn};
use std::sync::Arc;

use super::ingestion_config::RetryPolicy;
use super::ingestion_model::IngestionReport;
use super::ingestion_traits::IngestionJob;
use super::retry::fetch_with_retry;
use crate::assets::{AssetCategory, AssetServiceTrait};
use crate::constants::USD_ASSET_ID;
use crate::errors::Result;

/// Coin ids quoted on every run.
pub const SUPPORTED_CRYPTOS: &[&str] = &[
    "bitcoin",
    "bitcoin-cash",
    "binancecoin",
    "cardano",
    "dogecoin",
    "ethereum",
    "ripple",
    "solana",
    "tron",
    "tether",
    "usd-coin",
    "matic-network",
    "polkadot",
    "litecoin",
    "avalanche-2",
    "uniswap",
    "chainlink",
    "monero",
    "ethereum-classic",
    "stellar",
    "aave",
    "dydx",
];

/// Refreshes crypto asset prices against USD.
pub struct CryptoPricesJob {
    provider: Arc<dyn CryptoQuoteProvider>,
    assets: Arc<dyn AssetServiceTrait>,
    retry: RetryPolicy,
}

impl CryptoPricesJob {
    pub fn new(
        provider: Arc<dyn CryptoQuoteProvider>,
        assets: Arc<dyn AssetServiceTrait>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            assets,
            retry,
        }
    }
}

#[async_trait]
impl IngestionJob for CryptoPricesJob {
    fn name(&self) -> &'static str {
        "crypto_prices"
    }

    async fn run(&self) -> Result<IngestionReport> {
        let quotes = fetch_with_retry(&self.retry, self.provider.id(), || {
            self.provider.quote_batch(SUPPORTED_CRYPTOS, USD_ASSET_ID)
        })
        .await?;

        let mut report = IngestionReport::new(self.name());
        for quote in quotes {
            let Some(rate) = quote.rate else {
                debug!("No {} price for {}, skipping", USD_ASSET_ID, quote.symbol);
                report.skip();
                continue;
            };
            let id = quote.symbol.to_lowercase();
            match self
                .assets
                .upsert_rate(&id, AssetCategory::Crypto, rate)
                .await
            {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    warn!("Skipping crypto {}: {}", id, e);
                    report.skip();
                }
            }
        }
        Ok(report)
    }
}
