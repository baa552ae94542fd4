use std::fmt;

use chrono::Duration;
use chrono::Utc;
use thiserror::Error;

/// Error raised while building token configuration.
///
/// Always fatal: a process that cannot sign tokens must not serve
/// authenticated traffic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Token signing key is missing or empty")]
    MissingSigningKey,

    #[error("Token validity window must be positive and representable, got {0} seconds")]
    InvalidValidityWindow(i64),
}

/// Signing key and validity window shared by the token issuer and verifier.
///
/// Built once at startup and handed to the components that need it.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    validity: Duration,
}

impl TokenConfig {
    pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

    /// Create a configuration from a signing secret and validity window.
    ///
    /// # Errors
    /// * `MissingSigningKey` - Secret is empty or whitespace
    /// * `InvalidValidityWindow` - Window is zero, negative, or puts `exp` out of range
    pub fn new(secret: impl Into<String>, validity: Duration) -> Result<Self, ConfigurationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigurationError::MissingSigningKey);
        }
        if validity <= Duration::zero() || Utc::now().checked_add_signed(validity).is_none() {
            return Err(ConfigurationError::InvalidValidityWindow(
                validity.num_seconds(),
            ));
        }

        Ok(Self { secret, validity })
    }

    /// Create a configuration with the default 30 minute validity window.
    pub fn with_default_validity(secret: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::new(secret, Duration::minutes(Self::DEFAULT_VALIDITY_MINUTES))
    }

    /// Build from an optional minute count, falling back to the default window.
    pub fn from_minutes(
        secret: impl Into<String>,
        validity_minutes: Option<i64>,
    ) -> Result<Self, ConfigurationError> {
        let minutes = validity_minutes.unwrap_or(Self::DEFAULT_VALIDITY_MINUTES);
        let validity = Duration::try_minutes(minutes).ok_or(
            ConfigurationError::InvalidValidityWindow(minutes.saturating_mul(60)),
        )?;
        Self::new(secret, validity)
    }

    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[redacted]")
            .field("validity", &self.validity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        assert_eq!(
            TokenConfig::with_default_validity("").unwrap_err(),
            ConfigurationError::MissingSigningKey
        );
        assert_eq!(
            TokenConfig::with_default_validity("   ").unwrap_err(),
            ConfigurationError::MissingSigningKey
        );
    }

    #[test]
    fn test_non_positive_window_rejected() {
        let result = TokenConfig::new("secret", Duration::zero());
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::InvalidValidityWindow(0)
        );
    }

    #[test]
    fn test_out_of_range_window_rejected() {
        assert!(matches!(
            TokenConfig::from_minutes("secret", Some(i64::MAX / 1000)),
            Err(ConfigurationError::InvalidValidityWindow(_))
        ));
        assert!(matches!(
            TokenConfig::from_minutes("secret", Some(1_000_000_000_000)),
            Err(ConfigurationError::InvalidValidityWindow(_))
        ));
        assert!(matches!(
            TokenConfig::new("secret", Duration::days(365 * 400_000)),
            Err(ConfigurationError::InvalidValidityWindow(_))
        ));
    }

    #[test]
    fn test_default_window_applied() {
        let config = TokenConfig::from_minutes("secret", None).unwrap();
        assert_eq!(config.validity(), Duration::minutes(30));

        let config = TokenConfig::from_minutes("secret", Some(5)).unwrap();
        assert_eq!(config.validity(), Duration::minutes(5));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = TokenConfig::with_default_validity("super-secret-value").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("redacted"));
    }
}
