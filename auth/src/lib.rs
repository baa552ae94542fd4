//! Authentication core for the to-do service.
//!
//! - Secret hashing (Argon2id)
//! - Bearer token issuance and verification (HS256 JWT)
//! - Per-request identity resolution through an `AccountLookup` port
//!
//! Tokens are stateless: there is no server-side revocation, so a token
//! stays valid until its `exp`.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, TokenConfig, TokenIssuer, TokenVerifier};
//!
//! let config = TokenConfig::with_default_validity("secret_key_at_least_32_bytes_long!").unwrap();
//! let issued = TokenIssuer::new(&config).issue(Claims::new("alice@example.com")).unwrap();
//! let claims = TokenVerifier::new(&config).verify(&issued.token).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! ```

pub mod authenticator;
pub mod config;
pub mod jwt;
pub mod password;
pub mod resolver;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use config::ConfigurationError;
pub use config::TokenConfig;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use resolver::AccountLookup;
pub use resolver::IdentityError;
pub use resolver::IdentityResolver;
pub use resolver::LookupError;
