//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all provider operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while talking to a reference-data provider.
///
/// Each variant is classified into a [`RetryClass`] via the [`retry_class`](Self::retry_class)
/// method, which the ingestion runner uses to decide whether to try again.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {status} from {provider}")]
    Http {
        /// The provider that answered
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The provider could not be reached (DNS, TLS, connection reset).
    #[error("Provider unreachable: {provider} - {message}")]
    Unreachable {
        /// The provider that could not be reached
        provider: String,
        /// The underlying transport error
        message: String,
    },

    /// The provider answered, but the body could not be decoded.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the body
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// The request could not be built from the configured endpoint.
    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest {
        /// The provider the request was meant for
        provider: String,
        /// What was wrong with it
        message: String,
    },
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use keibo_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { provider: "COINGECKO".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::Http { provider: "FRED".to_string(), status: 400 };
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Unreachable { .. } => {
                RetryClass::WithBackoff
            }
            Self::Http { status, .. } if *status >= 500 => RetryClass::WithBackoff,
            Self::Http { .. } | Self::InvalidResponse { .. } | Self::InvalidRequest { .. } => {
                RetryClass::Never
            }
        }
    }

    /// Maps a transport-level reqwest error for the given provider.
    pub fn from_request(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else if err.is_builder() {
            Self::InvalidRequest {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::InvalidResponse {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Unreachable {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Maps a non-success HTTP status for the given provider.
    pub fn from_status(provider: &str, status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimited {
                provider: provider.to_string(),
            }
        } else {
            Self::Http {
                provider: provider.to_string(),
                status: status.as_u16(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_retries_with_backoff() {
        let error = MarketDataError::RateLimited {
            provider: "COINGECKO".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_timeout_retries_with_backoff() {
        let error = MarketDataError::Timeout {
            provider: "FRED".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_server_error_retries_with_backoff() {
        let error = MarketDataError::Http {
            provider: "EXCHANGE_RATES".to_string(),
            status: 503,
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_client_error_never_retries() {
        let error = MarketDataError::Http {
            provider: "EXCHANGE_RATES".to_string(),
            status: 403,
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_invalid_response_never_retries() {
        let error = MarketDataError::InvalidResponse {
            provider: "FRED".to_string(),
            message: "missing observations".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_status_mapping() {
        let error =
            MarketDataError::from_status("COINGECKO", reqwest::StatusCode::TOO_MANY_REQUESTS);
        assert!(matches!(error, MarketDataError::RateLimited { .. }));

        let error = MarketDataError::from_status("COINGECKO", reqwest::StatusCode::BAD_GATEWAY);
        assert!(matches!(error, MarketDataError::Http { status: 502, .. }));
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::Http {
            provider: "FRED".to_string(),
            status: 500,
        };
        assert_eq!(format!("{}", error), "HTTP 500 from FRED");

        let error = MarketDataError::Unreachable {
            provider: "COINGECKO".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider unreachable: COINGECKO - connection reset"
        );
    }
}
