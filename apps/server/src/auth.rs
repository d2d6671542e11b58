//! Caller authentication.
//!
//! Tokens are minted by an external identity service; this server only
//! verifies the HS256 signature and reads the subject as the caller id.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::main_lib::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: u64,
}

pub struct AuthManager {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthManager {
    pub fn new(secret: &str) -> anyhow::Result<Self> {
        if secret.trim().is_empty() {
            anyhow::bail!("JWT secret cannot be empty");
        }
        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        })
    }

    /// Returns the caller id carried by a valid token.
    pub fn verify(&self, token: &str) -> Result<String, ApiError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            ApiError::unauthorized("Invalid or expired token")
        })?;
        let sub = data.claims.sub.trim();
        if sub.is_empty() {
            return Err(ApiError::unauthorized("Token has no subject"));
        }
        Ok(sub.to_string())
    }
}

/// The authenticated user behind a request.
#[derive(Debug, Clone)]
pub struct Caller(pub String);

impl Caller {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;
        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Expected a Bearer token"))?;
        state.auth.verify(token.trim()).map(Caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, sub: &str, exp: u64) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                sub: sub.to_string(),
                exp,
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_an_hour() -> u64 {
        (chrono::Utc::now().timestamp() + 3600) as u64
    }

    #[test]
    fn accepts_valid_token() {
        let auth = AuthManager::new("s3cret").unwrap();
        let caller = auth.verify(&token("s3cret", "alice", in_an_hour())).unwrap();
        assert_eq!(caller, "alice");
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let auth = AuthManager::new("s3cret").unwrap();
        assert!(auth.verify(&token("other", "alice", in_an_hour())).is_err());
        assert!(auth.verify(&token("s3cret", "alice", 1_000)).is_err());
        assert!(auth.verify(&token("s3cret", "  ", in_an_hour())).is_err());
    }

    #[test]
    fn empty_secret_is_a_config_error() {
        assert!(AuthManager::new(" ").is_err());
    }
}
