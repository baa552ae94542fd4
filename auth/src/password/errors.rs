use thiserror::Error;

/// Error type for password operations.
///
/// A mismatching password is not an error; see `PasswordHasher::verify`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored digest is unreadable: {0}")]
    MalformedDigest(String),
}
