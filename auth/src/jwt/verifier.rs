use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::ALGORITHM;
use crate::config::TokenConfig;

/// Decodes and validates bearer tokens.
///
/// A token is accepted only when its encoding, HS256 signature, required
/// claims (`sub`, `exp`) and expiry all check out. Expiry is evaluated
/// here rather than by `jsonwebtoken` so that the clock can be injected
/// and no leeway applies.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret()),
            validation,
        }
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed encoding, bad signature or missing claim
    /// * `TokenExpired` - Current time is at or past `exp`
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            },
        )?;

        let claims = token_data.claims;
        if claims.exp.is_none() {
            return Err(JwtError::InvalidToken("missing exp claim".to_string()));
        }
        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
