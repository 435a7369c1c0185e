//! Public configuration for the catalog client.
//!
//! This module provides a stable public API for configuring the client.
//! The internal config is derived from this.

use std::time::Duration;

use toolhub_core::Language;
use tracing::warn;

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "TOOLHUB_API_BASE_URL";

/// Environment variable overriding the default language.
pub const DEFAULT_LANGUAGE_ENV: &str = "TOOLHUB_DEFAULT_LANGUAGE";

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the catalog client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use toolhub_api::CatalogClientConfig;
/// use toolhub_core::Language;
/// use std::time::Duration;
///
/// let config = CatalogClientConfig::new()
///     .with_base_url("https://api.example.com")
///     .with_default_language(Language::Cn)
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Base URL of the catalog API (scheme, host, optional path prefix)
    pub(crate) base_url: String,
    /// Language used when a request doesn't name one
    pub(crate) default_language: Language,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_language: Language::En,
            user_agent: concat!("toolhub-api/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CatalogClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `TOOLHUB_API_BASE_URL` and
    /// `TOOLHUB_DEFAULT_LANGUAGE` when they are set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(code) = lookup(DEFAULT_LANGUAGE_ENV) {
            match Language::parse_code(&code) {
                Ok(language) => config.default_language = language,
                Err(_) => warn!(
                    value = %code,
                    var = DEFAULT_LANGUAGE_ENV,
                    "Ignoring unknown default language"
                ),
            }
        }

        config
    }

    /// Set the base URL of the catalog API.
    ///
    /// Defaults to `http://localhost:8000`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the language used when a request doesn't carry one.
    #[must_use]
    pub const fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured default language.
    pub const fn default_language(&self) -> Language {
        self.default_language
    }
}
