//! FRED (Federal Reserve Economic Data) observations provider.
//!
//! `GET {url}?series_id=FEDFUNDS&api_key=..&file_type=json&observation_start=..&frequency=m&sort_order=desc`
//! answers `{"observations": [{"date": "2024-05-01", "value": "5.33"}, ...]}`.
//! Values are strings; `"."` marks a period without data.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{Observation, ObservationValue, SeriesFrequency};
use crate::provider::{build_client, fetch_json, ProviderEndpoint, SeriesProvider};

/// Provider ID constant
const PROVIDER_ID: &str = "FRED";

/// Public observations endpoint
pub const FRED_OBSERVATIONS_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

pub struct FredProvider {
    client: Client,
    endpoint: ProviderEndpoint,
}

impl FredProvider {
    /// `endpoint.key` carries the FRED API key; it is sent as a query
    /// parameter rather than a header.
    pub fn new(endpoint: ProviderEndpoint, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            endpoint,
        }
    }
}

fn invalid(message: impl Into<String>) -> MarketDataError {
    MarketDataError::InvalidResponse {
        provider: PROVIDER_ID.to_string(),
        message: message.into(),
    }
}

pub(crate) fn parse_observations(body: Value) -> Result<Vec<Observation>, MarketDataError> {
    let response: ObservationsResponse =
        serde_json::from_value(body).map_err(|e| invalid(e.to_string()))?;

    response
        .observations
        .into_iter()
        .map(|raw| {
            let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
                .map_err(|e| invalid(format!("bad observation date '{}': {}", raw.date, e)))?;
            let value = match Decimal::from_str(raw.value.trim()) {
                Ok(v) => ObservationValue::Value(v),
                Err(_) => ObservationValue::Missing,
            };
            Ok(Observation { date, value })
        })
        .collect()
}

#[async_trait]
impl SeriesProvider for FredProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn observations(
        &self,
        series_id: &str,
        start: NaiveDate,
        frequency: SeriesFrequency,
    ) -> Result<Vec<Observation>, MarketDataError> {
        let start = start.format("%Y-%m-%d").to_string();
        let api_key = self.endpoint.key.clone().unwrap_or_default();
        let request = self.client.get(&self.endpoint.url).query(&[
            ("series_id", series_id),
            ("api_key", api_key.as_str()),
            ("file_type", "json"),
            ("observation_start", start.as_str()),
            ("frequency", frequency.fred_code()),
            ("sort_order", "desc"),
        ]);

        let body = fetch_json(PROVIDER_ID, request).await?;
        let observations = parse_observations(body)?;
        tracing::debug!(
            "{} returned {} observations for {}",
            PROVIDER_ID,
            observations.len(),
            series_id
        );
        Ok(observations)
    }
}
