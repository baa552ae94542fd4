use std::sync::Arc;
use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Utc;

use crate::config::TokenConfig;
use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

pub const TOKEN_TYPE: &str = "Bearer";

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication coordinator combining password verification and token issuance.
///
/// Covers the login and refresh flows. Per-request identity resolution
/// lives in `IdentityResolver`, which shares this coordinator's verifier.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    decoy_digest: Arc<OnceLock<String>>,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
    /// Always `"Bearer"`
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for AuthenticationResult {
    fn from(issued: IssuedToken) -> Self {
        Self {
            access_token: issued.token,
            token_type: TOKEN_TYPE,
            expires_at: issued.expires_at,
        }
    }
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator from validated token configuration.
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::new(config),
            verifier: TokenVerifier::new(config),
            decoy_digest: Arc::new(OnceLock::new()),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored digest. Mismatch is `Ok(false)`.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `claims`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored digest is unreadable
    /// * `JwtError` - Token generation failed
    pub fn login(
        &self,
        password: &str,
        stored_hash: &str,
        claims: Claims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issuer.issue(claims)?.into())
    }

    /// Fail a login for which no account exists.
    ///
    /// Runs one Argon2 verification against a decoy digest first, so an
    /// unknown email costs as much as a wrong password. Returns
    /// `InvalidCredentials` unless the decoy itself could not be hashed.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let digest = match self.decoy_digest.get() {
            Some(digest) => digest,
            None => match self.password_hasher.hash(DECOY_PASSWORD) {
                Ok(digest) => self.decoy_digest.get_or_init(|| digest),
                Err(e) => return e.into(),
            },
        };

        match self.password_hasher.verify(password, digest) {
            Ok(_) => AuthenticationError::InvalidCredentials,
            Err(e) => e.into(),
        }
    }

    /// Issue a token without password verification.
    ///
    /// For flows where the caller is already authenticated.
    pub fn generate_token(&self, claims: Claims) -> Result<AuthenticationResult, JwtError> {
        Ok(self.issuer.issue(claims)?.into())
    }

    /// Verify a still valid token and mint a replacement with a fresh expiry.
    pub fn refresh_token(&self, token: &str) -> Result<AuthenticationResult, JwtError> {
        let claims = self.verifier.verify(token)?;
        Ok(self.issuer.reissue(&claims)?.into())
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.verifier.verify(token)
    }

    /// Verifier sharing this authenticator's key, for building an `IdentityResolver`.
    pub fn verifier(&self) -> TokenVerifier {
        self.verifier.clone()
    }
}
