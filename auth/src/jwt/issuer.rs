use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use super::ALGORITHM;
use crate::config::TokenConfig;

/// A freshly signed bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs claims into compact HS256 tokens.
///
/// Stamps `iat` and `exp` on every token; the validity window comes from
/// the `TokenConfig` it was built with.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    validity: Duration,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            validity: config.validity(),
        }
    }

    /// Sign claims with `exp = now + validity`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, claims: Claims) -> Result<IssuedToken, JwtError> {
        self.issue_at(claims, Utc::now())
    }

    /// Sign claims as if issued at `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + validity` is out of range, or signing failed
    pub fn issue_at(&self, claims: Claims, now: DateTime<Utc>) -> Result<IssuedToken, JwtError> {
        let expires_at = now.checked_add_signed(self.validity).ok_or_else(|| {
            JwtError::EncodingFailed("token expiry is out of range".to_string())
        })?;
        let claims = claims.stamped(now, expires_at);

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        tracing::debug!(subject = %claims.sub, expires_at = %expires_at, "Token issued");

        Ok(IssuedToken { token, expires_at })
    }

    /// Mint a new token from the claims of an already verified one.
    ///
    /// Subject and custom fields carry over; timestamps are recomputed.
    pub fn reissue(&self, claims: &Claims) -> Result<IssuedToken, JwtError> {
        let fresh = Claims {
            exp: None,
            iat: None,
            ..claims.clone()
        };
        self.issue(fresh)
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }
}
