//! Client configuration

use std::time::Duration;

use url::Url;

use crate::{Result, SnailError};

/// Default SnailPay API host
pub const DEFAULT_BASE_URL: &str = "https://snailpay.app";

/// Environment variable overriding the API host
pub const BASE_URL_ENV: &str = "SNAIL_BASE_URL";

/// Environment variable setting the transport timeout in seconds
pub const TIMEOUT_ENV: &str = "SNAIL_TIMEOUT_SECS";

/// Configuration for a [`SnailClient`](crate::SnailClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is resolved against
    pub base_url: String,
    /// Request timeout applied to the default HTTP transport
    pub timeout: Option<Duration>,
    /// User agent sent by the default HTTP transport
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            user_agent: format!("snailpay-rust/{}", crate::VERSION),
        }
    }

    /// Build a config from `SNAIL_BASE_URL` and `SNAIL_TIMEOUT_SECS`,
    /// falling back to the defaults for anything unset
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        };

        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                SnailError::config(format!("{TIMEOUT_ENV} must be a whole number of seconds"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the client configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(SnailError::config("Base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SnailError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        self.parsed_base_url()?;
        Ok(())
    }

    /// The base URL parsed, with a trailing slash so relative paths append
    pub(crate) fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
