use keibo_market_data::{
    CoinGeckoProvider, CryptoQuoteProvider, ExchangeRatesProvider, FredProvider, FxRateProvider,
    SeriesFrequency, SeriesProvider,
};
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;

use super::crypto_prices::CryptoPricesJob;
use super::economic_series::EconomicIndicesJob;
use super::fx_rates::FxRatesJob;
use super::ingestion_config::{IngestionConfig, RetryPolicy};
use super::ingestion_model::IngestionReport;
use super::ingestion_traits::IngestionJob;
use crate::assets::AssetServiceTrait;
use crate::economic_indices::EconomicIndexServiceTrait;
use crate::errors::Result;
use crate::utils::UpsertOutcome;

/// Runs a job and logs how it went. Failures stop here: callers such as the
/// scheduler only ever see `None`.
pub async fn run_job(job: &dyn IngestionJob) -> Option<IngestionReport> {
    let started = Instant::now();
    match job.run().await {
        Ok(report) => {
            info!("{} in {:?}", report, started.elapsed());
            Some(report)
        }
        Err(e) => {
            warn!("{} abandoned after {:?}: {}", job.name(), started.elapsed(), e);
            None
        }
    }
}

/// The three reference-data feeds behind one handle.
pub struct ReferenceDataPipeline {
    crypto_prices: CryptoPricesJob,
    fx_rates: FxRatesJob,
    economic_indices: EconomicIndicesJob,
}

impl ReferenceDataPipeline {
    /// Builds the HTTP providers from `config`.
    pub fn new(
        config: &IngestionConfig,
        assets: Arc<dyn AssetServiceTrait>,
        indices: Arc<dyn EconomicIndexServiceTrait>,
    ) -> Self {
        Self::with_providers(
            Arc::new(CoinGeckoProvider::new(
                config.crypto_prices.clone(),
                config.request_timeout,
            )),
            Arc::new(ExchangeRatesProvider::new(
                config.fx_rates.clone(),
                config.request_timeout,
            )),
            Arc::new(FredProvider::new(config.fred.clone(), config.request_timeout)),
            assets,
            indices,
            config.retry,
        )
    }

    pub fn with_providers(
        crypto_provider: Arc<dyn CryptoQuoteProvider>,
        fx_provider: Arc<dyn FxRateProvider>,
        series_provider: Arc<dyn SeriesProvider>,
        assets: Arc<dyn AssetServiceTrait>,
        indices: Arc<dyn EconomicIndexServiceTrait>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            crypto_prices: CryptoPricesJob::new(crypto_provider, assets.clone(), retry),
            fx_rates: FxRatesJob::new(fx_provider, assets, retry),
            economic_indices: EconomicIndicesJob::new(series_provider, indices, retry),
        }
    }

    pub async fn refresh_crypto_prices(&self) -> Option<IngestionReport> {
        run_job(&self.crypto_prices).await
    }

    pub async fn refresh_fx_rates(&self) -> Option<IngestionReport> {
        run_job(&self.fx_rates).await
    }

    /// Refreshes a single series outside the catalog loop. Unlike the
    /// scheduled jobs this surfaces the error to the caller.
    pub async fn refresh_economic_series(
        &self,
        series_id: &str,
        frequency: SeriesFrequency,
    ) -> Result<UpsertOutcome> {
        self.economic_indices
            .refresh_series(series_id, frequency)
            .await
    }

    pub async fn refresh_all_indices(&self) -> Option<IngestionReport> {
        run_job(&self.economic_indices).await
    }
}
