use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token claims.
///
/// The subject is mandatory. `iat` and `exp` are stamped by the issuer and
/// are always present on a verified token. Any other field lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (unique account key, the email address)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims for a subject. Timestamps are left for the issuer.
    pub fn new(sub: impl ToString) -> Self {
        Self {
            sub: sub.to_string(),
            exp: None,
            iat: None,
            extra: HashMap::new(),
        }
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    pub(crate) fn stamped(mut self, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        self.iat = Some(issued_at.timestamp());
        self.exp = Some(expires_at.timestamp());
        self
    }

    /// Check if token is expired.
    ///
    /// A token is expired from its `exp` second onwards. Claims without
    /// `exp` are treated as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| current_timestamp >= exp)
    }
}
