use thiserror::Error;

/// Error type for token issuance and verification.
///
/// The variants exist for diagnostics. Callers outside this crate see
/// them collapsed into a single unauthenticated outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
