//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use keibo_core::ingestion::{IngestionConfig, RetryPolicy};
use keibo_market_data::ProviderEndpoint;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "./db/keibo.db";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    /// `*` allows any origin.
    pub cors_allow_origins: Vec<String>,
    pub request_timeout: Duration,
    /// HS256 secret used to verify caller tokens.
    pub jwt_secret: String,
    pub scheduler_enabled: bool,
    pub ingestion: IngestionConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr = env_or("KEIBO_LISTEN_ADDR", DEFAULT_LISTEN_ADDR)
            .parse()
            .context("KEIBO_LISTEN_ADDR is not a socket address")?;
        let jwt_secret = env_opt("KEIBO_JWT_SECRET")
            .ok_or_else(|| anyhow!("KEIBO_JWT_SECRET must be set"))?;

        Ok(Self {
            listen_addr,
            db_path: env_or("KEIBO_DB_PATH", DEFAULT_DB_PATH),
            cors_allow_origins: env_or("KEIBO_CORS_ALLOW_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            request_timeout: Duration::from_millis(env_parse(
                "KEIBO_REQUEST_TIMEOUT_MS",
                DEFAULT_REQUEST_TIMEOUT_MS,
            )?),
            jwt_secret,
            scheduler_enabled: env_parse("KEIBO_SCHEDULER_ENABLED", true)?,
            ingestion: ingestion_from_env()?,
        })
    }
}

fn ingestion_from_env() -> anyhow::Result<IngestionConfig> {
    let defaults = IngestionConfig::default();
    let key_header = env_opt("KEIBO_PROVIDER_KEY_HEADER");
    let host_header = env_opt("KEIBO_PROVIDER_HOST_HEADER");
    let key = env_opt("KEIBO_PROVIDER_KEY");

    // RapidAPI-style gateways share one key across hosts.
    let endpoint = |url_var: &str, host_var: &str, fallback: &ProviderEndpoint| ProviderEndpoint {
        url: env_opt(url_var).unwrap_or_else(|| fallback.url.clone()),
        host: env_opt(host_var),
        key_header: key_header.clone(),
        host_header: host_header.clone(),
        key: key.clone(),
    };

    Ok(IngestionConfig {
        crypto_prices: endpoint(
            "KEIBO_CRYPTO_PRICES_URL",
            "KEIBO_CRYPTO_PRICES_HOST",
            &defaults.crypto_prices,
        ),
        fx_rates: endpoint("KEIBO_FX_RATES_URL", "KEIBO_FX_RATES_HOST", &defaults.fx_rates),
        fred: ProviderEndpoint {
            url: env_opt("KEIBO_FRED_URL").unwrap_or(defaults.fred.url),
            key: env_opt("KEIBO_FRED_API_KEY"),
            ..Default::default()
        },
        request_timeout: Duration::from_millis(env_parse(
            "KEIBO_PROVIDER_TIMEOUT_MS",
            DEFAULT_PROVIDER_TIMEOUT_MS,
        )?),
        retry: RetryPolicy::default(),
    })
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

fn env_parse<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_opt(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value '{}'", name, raw)),
        None => Ok(default),
    }
}
