use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::jwt::JwtError;
use crate::jwt::TokenVerifier;

const BEARER_SCHEME: &str = "Bearer";

/// Failure reported by an account store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Account lookup failed: {0}")]
pub struct LookupError(pub String);

/// Read-only account lookup by the unique key carried in the token subject.
#[async_trait]
pub trait AccountLookup: Send + Sync + 'static {
    type Account: Send;

    /// Find a single account by its unique key (the email address).
    ///
    /// # Returns
    /// `None` if no account matches
    ///
    /// # Errors
    /// * `LookupError` - The store could not be queried
    async fn find_account_by_unique_key(
        &self,
        key: &str,
    ) -> Result<Option<Self::Account>, LookupError>;
}

/// Identity resolution errors.
///
/// `Unauthenticated` carries no reason: a bad signature, an
/// expired token and a deleted account look the same to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Turns a bearer token into the account it was issued for.
pub struct IdentityResolver<L: AccountLookup> {
    verifier: TokenVerifier,
    lookup: Arc<L>,
}

impl<L: AccountLookup> IdentityResolver<L> {
    pub fn new(verifier: TokenVerifier, lookup: Arc<L>) -> Self {
        Self { verifier, lookup }
    }

    /// Resolve the raw value of an `Authorization` header.
    ///
    /// # Errors
    /// * `Unauthenticated` - Header is not `Bearer <token>` (scheme case-insensitive) or the token does not resolve
    /// * `Lookup` - The account store failed
    pub async fn authenticate(&self, authorization: &str) -> Result<L::Account, IdentityError> {
        let token = authorization
            .trim_start()
            .split_once(' ')
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case(BEARER_SCHEME))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                tracing::debug!("Authorization header is not a bearer credential");
                IdentityError::Unauthenticated
            })?;

        self.resolve(token).await
    }

    /// Verify a token and load its subject's account.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token rejected, or no account matches the subject
    /// * `Lookup` - The account store failed
    pub async fn resolve(&self, token: &str) -> Result<L::Account, IdentityError> {
        self.resolve_at(token, Utc::now()).await
    }

    /// Resolve as if the current time were `now`.
    pub async fn resolve_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<L::Account, IdentityError> {
        let claims = self.verifier.verify_at(token, now).map_err(|e| {
            match &e {
                JwtError::TokenExpired => tracing::debug!("Rejected expired token"),
                _ => tracing::warn!(reason = %e, "Rejected invalid token"),
            }
            IdentityError::Unauthenticated
        })?;

        let account = self
            .lookup
            .find_account_by_unique_key(&claims.sub)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Account lookup failed during authentication");
                IdentityError::from(e)
            })?;

        account.ok_or_else(|| {
            tracing::warn!(subject = %claims.sub, "Token subject has no matching account");
            IdentityError::Unauthenticated
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;
    use crate::config::TokenConfig;
    use crate::jwt::Claims;
    use crate::jwt::TokenIssuer;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Account {
        id: i64,
        email: String,
    }

    #[derive(Default)]
    struct InMemoryAccounts {
        accounts: Mutex<HashMap<String, Account>>,
        lookups: AtomicUsize,
        fail: bool,
    }

    impl InMemoryAccounts {
        fn with(accounts: &[Account]) -> Self {
            let store = Self::default();
            {
                let mut map = store.accounts.lock().unwrap();
                for account in accounts {
                    map.insert(account.email.clone(), account.clone());
                }
            }
            store
        }

        fn remove(&self, email: &str) {
            self.accounts.lock().unwrap().remove(email);
        }
    }

    #[async_trait]
    impl AccountLookup for InMemoryAccounts {
        type Account = Account;

        async fn find_account_by_unique_key(
            &self,
            key: &str,
        ) -> Result<Option<Account>, LookupError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LookupError("connection refused".to_string()));
            }
            Ok(self.accounts.lock().unwrap().get(key).cloned())
        }
    }

    fn config() -> TokenConfig {
        TokenConfig::new("resolver_test_secret_32_bytes_long!", Duration::minutes(30)).unwrap()
    }

    fn alice() -> Account {
        Account {
            id: 1,
            email: "alice@example.com".to_string(),
        }
    }

    fn resolver(store: Arc<InMemoryAccounts>) -> IdentityResolver<InMemoryAccounts> {
        IdentityResolver::new(TokenVerifier::new(&config()), store)
    }

    fn token_for(subject: &str) -> String {
        TokenIssuer::new(&config())
            .issue(Claims::new(subject))
            .unwrap()
            .token
    }

    #[tokio::test]
    async fn test_resolve_success_with_single_lookup() {
        let store = Arc::new(InMemoryAccounts::with(&[alice()]));
        let resolver = resolver(Arc::clone(&store));

        let account = resolver.resolve(&token_for("alice@example.com")).await.unwrap();

        assert_eq!(account.id, 1);
        assert_eq!(account, alice());
        assert_eq!(store.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_authenticate_bearer_header() {
        let store = Arc::new(InMemoryAccounts::with(&[alice()]));
        let resolver = resolver(store);
        let header = format!("Bearer {}", token_for("alice@example.com"));

        assert_eq!(resolver.authenticate(&header).await.unwrap(), alice());
    }

    #[tokio::test]
    async fn test_authenticate_scheme_is_case_insensitive() {
        let store = Arc::new(InMemoryAccounts::with(&[alice()]));
        let resolver = resolver(Arc::clone(&store));
        let token = token_for("alice@example.com");

        for scheme in ["bearer", "BEARER", "bEaReR"] {
            let header = format!("{} {}", scheme, token);
            assert_eq!(resolver.authenticate(&header).await.unwrap(), alice());
        }

        let header = format!("Token {}", token);
        assert_eq!(
            resolver.authenticate(&header).await.unwrap_err(),
            IdentityError::Unauthenticated
        );
        assert_eq!(store.lookups.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_non_bearer_header() {
        let store = Arc::new(InMemoryAccounts::with(&[alice()]));
        let resolver = resolver(Arc::clone(&store));
        let token = token_for("alice@example.com");

        for header in [token.clone(), format!("Basic {}", token), "Bearer ".to_string()] {
            assert_eq!(
                resolver.authenticate(&header).await.unwrap_err(),
                IdentityError::Unauthenticated
            );
        }
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthenticated_without_lookup() {
        let store = Arc::new(InMemoryAccounts::with(&[alice()]));
        let resolver = resolver(Arc::clone(&store));

        let result = resolver.resolve("invalid.token.here").await;

        assert_eq!(result.unwrap_err(), IdentityError::Unauthenticated);
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthenticated() {
        let store = Arc::new(InMemoryAccounts::with(&[alice()]));
        let resolver = resolver(store);
        let issued_at = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let token = TokenIssuer::new(&config())
            .issue_at(Claims::new("alice@example.com"), issued_at)
            .unwrap()
            .token;

        assert!(resolver.resolve_at(&token, issued_at).await.is_ok());
        assert_eq!(
            resolver
                .resolve_at(&token, issued_at + Duration::minutes(31))
                .await
                .unwrap_err(),
            IdentityError::Unauthenticated
        );
    }

    #[tokio::test]
    async fn test_deleted_account_looks_like_invalid_token() {
        let store = Arc::new(InMemoryAccounts::with(&[alice()]));
        let resolver = resolver(Arc::clone(&store));
        let token = token_for("alice@example.com");

        store.remove("alice@example.com");

        let missing_account = resolver.resolve(&token).await.unwrap_err();
        let bad_token = resolver.resolve("invalid.token.here").await.unwrap_err();

        assert_eq!(missing_account, bad_token);
        assert_eq!(missing_account.to_string(), bad_token.to_string());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_not_an_authentication_outcome() {
        let store = Arc::new(InMemoryAccounts {
            fail: true,
            ..InMemoryAccounts::default()
        });
        let resolver = resolver(store);

        let result = resolver.resolve(&token_for("alice@example.com")).await;
        assert!(matches!(result, Err(IdentityError::Lookup(_))));
    }

    #[tokio::test]
    async fn test_concurrent_resolutions_agree() {
        let store = Arc::new(InMemoryAccounts::with(&[alice()]));
        let resolver = Arc::new(resolver(Arc::clone(&store)));
        let token = token_for("alice@example.com");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                let token = token.clone();
                tokio::spawn(async move { resolver.resolve(&token).await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), alice());
        }
        assert_eq!(store.lookups.load(Ordering::SeqCst), 8);
    }
}
