//! API key credential

use crate::{Result, SnailError};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "SNAIL_API_KEY";

/// Opaque API key sent verbatim in the `Authorization` header.
///
/// The key is never inspected locally; a bad key only shows up as a failure
/// reported by the service.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw API key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Load the API key from `SNAIL_API_KEY`
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(Self(key)),
            _ => Err(SnailError::config(format!(
                "Missing SnailPay API key.\n\n\
                 Set it as an environment variable:\n\
                 {API_KEY_ENV}=your-api-key\n\n\
                 Or pass it directly to SnailClient::new."
            ))),
        }
    }

    /// The raw key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
