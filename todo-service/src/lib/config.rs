use std::env;

use auth::ConfigurationError;
use auth::TokenConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for todo-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Bearer token configuration.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    /// Token validity window; the auth default applies when unset
    pub expiration_minutes: Option<i64>,
}

fn default_max_connections() -> u32 {
    5
}

impl JwtConfig {
    /// Validate into the token configuration used by the auth core.
    ///
    /// # Errors
    /// * `MissingSigningKey` - No secret configured
    /// * `InvalidValidityWindow` - Non-positive expiration
    pub fn token_config(&self) -> Result<TokenConfig, ConfigurationError> {
        TokenConfig::from_minutes(self.secret.clone(), self.expiration_minutes)
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required configuration values are missing or invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_config_requires_secret() {
        let jwt = JwtConfig {
            secret: String::new(),
            expiration_minutes: Some(30),
        };
        assert_eq!(
            jwt.token_config().unwrap_err(),
            ConfigurationError::MissingSigningKey
        );
    }

    #[test]
    fn test_token_config_default_window() {
        let jwt = JwtConfig {
            secret: "a-secret".to_string(),
            expiration_minutes: None,
        };
        let token_config = jwt.token_config().unwrap();
        assert_eq!(
            token_config.validity().num_minutes(),
            TokenConfig::DEFAULT_VALIDITY_MINUTES
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let jwt = JwtConfig {
            secret: "hunter2-hunter2".to_string(),
            expiration_minutes: None,
        };
        assert!(!format!("{:?}", jwt).contains("hunter2"));
    }
}
