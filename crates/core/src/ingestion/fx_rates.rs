use async_trait::async_trait;
use keibo_market_data::{decimal_from_json, FxRateProvider};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::ingestion_config::RetryPolicy;
use super::ingestion_errors::IngestionError;
use super::ingestion_model::IngestionReport;
use super::ingestion_traits::IngestionJob;
use super::retry::fetch_with_retry;
use crate::assets::{AssetCategory, AssetServiceTrait};
use crate::errors::Result;

/// Currencies kept in the catalog; everything else in the table is ignored.
pub const SUPPORTED_CURRENCIES: &[&str] = &[
    "usd", "eur", "chf", "gbp", "jpy", "rub", "krw", "cny", "cad", "inr", "idr", "aed",
];

/// Validates a "1 USD = X currency" table and returns it keyed by lower-cased
/// currency code.
///
/// The whole table is rejected if `rates` is not a mapping or any value is
/// not a number, so a malformed payload never produces partial writes.
pub fn parse_rate_table(
    body: &Value,
) -> std::result::Result<BTreeMap<String, Decimal>, IngestionError> {
    let rates = body.get("rates").ok_or(IngestionError::MissingRates)?;
    let rates = rates.as_object().ok_or(IngestionError::RatesNotAMapping)?;

    rates
        .iter()
        .map(|(currency, rate)| {
            let rate = decimal_from_json(rate).ok_or_else(|| IngestionError::NonNumericRate {
                currency: currency.clone(),
            })?;
            Ok((currency.to_lowercase(), rate))
        })
        .collect()
}

/// Refreshes currency assets, stored as "1 currency = X USD".
pub struct FxRatesJob {
    provider: Arc<dyn FxRateProvider>,
    assets: Arc<dyn AssetServiceTrait>,
    retry: RetryPolicy,
}

impl FxRatesJob {
    pub fn new(
        provider: Arc<dyn FxRateProvider>,
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
impl IngestionJob for FxRatesJob {
    fn name(&self) -> &'static str {
        "fx_rates"
    }

    async fn run(&self) -> Result<IngestionReport> {
        let body = fetch_with_retry(&self.retry, self.provider.id(), || {
            self.provider.rate_table()
        })
        .await?;
        let table = parse_rate_table(&body)?;

        let mut report = IngestionReport::new(self.name());
        for (currency, rate) in table
            .iter()
            .filter(|(c, _)| SUPPORTED_CURRENCIES.contains(&c.as_str()))
        {
            let inverted = match Decimal::ONE.checked_div(*rate) {
                Some(inverted) if *rate > Decimal::ZERO => inverted,
                _ => {
                    warn!("Skipping {}: cannot invert rate {}", currency, rate);
                    report.skip();
                    continue;
                }
            };
            debug!("1 {} = {} usd", currency, inverted);
            match self
                .assets
                .upsert_rate(currency, AssetCategory::Cash, inverted)
                .await
            {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    warn!("Skipping currency {}: {}", currency, e);
                    report.skip();
                }
            }
        }
        Ok(report)
    }
}
