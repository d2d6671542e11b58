use keibo_market_data::{ProviderEndpoint, DEFAULT_REQUEST_TIMEOUT, FRED_OBSERVATIONS_URL};
use std::time::Duration;

pub const DEFAULT_CRYPTO_PRICES_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
pub const DEFAULT_FX_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";

/// Capped exponential backoff for transient provider failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Policy that gives up after the first failure.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Delay before retry number `retry` (1-based): `base * 2^(retry-1)`, capped.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Everything the ingestion pipeline needs to reach its providers.
///
/// Built once at startup and handed to the pipeline constructor.
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    pub crypto_prices: ProviderEndpoint,
    pub fx_rates: ProviderEndpoint,
    /// `key` carries the FRED API key.
    pub fred: ProviderEndpoint,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            crypto_prices: ProviderEndpoint::new(DEFAULT_CRYPTO_PRICES_URL),
            fx_rates: ProviderEndpoint::new(DEFAULT_FX_RATES_URL),
            fred: ProviderEndpoint::new(FRED_OBSERVATIONS_URL),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}
