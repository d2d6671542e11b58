//! Reference-data ingestion - pulls crypto prices, currency rates and
//! economic series from external providers into the asset catalog and the
//! economic index store.
//!
//! Every feed is an [`IngestionJob`]. Jobs share no failure domain: a feed
//! that fails is logged and abandoned for the cycle while its siblings run.

mod crypto_prices;
mod economic_series;
mod fx_rates;
mod ingestion_config;
mod ingestion_errors;
mod ingestion_model;
mod ingestion_traits;
mod pipeline;
mod retry;


pub use crypto_prices::{CryptoPricesJob, SUPPORTED_CRYPTOS};
pub use economic_series::{
    compute_deltas, lookback_start, EconomicIndicesJob, SeriesSpec, SERIES_CATALOG,
};
pub use fx_rates::{parse_rate_table, FxRatesJob, SUPPORTED_CURRENCIES};
pub use ingestion_config::{IngestionConfig, RetryPolicy};
pub use ingestion_errors::IngestionError;
pub use ingestion_model::IngestionReport;
pub use ingestion_traits::IngestionJob;
pub use pipeline::{run_job, ReferenceDataPipeline};
pub use retry::fetch_with_retry;
