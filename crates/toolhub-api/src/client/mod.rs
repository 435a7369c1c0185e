//! Catalog client for listing items and fetching metadata.
//!
//! This module provides the main client interface for interacting with
//! the catalog API.

mod items;
mod meta;

use toolhub_core::{CatalogResult, Language};
use tracing::warn;
use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::ApiResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{ApiConfig, Envelope};
use crate::parsing::{into_success, parse_envelope};
use crate::port::map_error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default catalog client using the reqwest HTTP backend.
pub type DefaultCatalogClient = CatalogClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the catalog API.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultCatalogClient` for production code. It holds no mutable
/// state, so one instance can be shared by any number of paginators.
pub struct CatalogClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: ApiConfig,
}

impl DefaultCatalogClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails if the base URL doesn't parse or the HTTP client can't be built.
    pub fn new(config: &CatalogClientConfig) -> CatalogResult<Self> {
        let internal_config = ApiConfig::from_public(config).map_err(map_error)?;
        let backend = ReqwestBackend::new(&internal_config).map_err(map_error)?;
        Ok(Self {
            backend,
            config: internal_config,
        })
    }

    /// Create a client from `TOOLHUB_*` environment variables.
    pub fn from_env() -> CatalogResult<Self> {
        Self::new(&CatalogClientConfig::from_env())
    }
}

impl<B: HttpBackend> CatalogClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: ApiConfig, backend: B) -> Self {
        Self { backend, config }
    }

    /// The request language, or the configured default.
    pub(crate) fn language_or_default(&self, language: Option<Language>) -> Language {
        language.unwrap_or(self.config.default_language)
    }

    /// GET `url`, normalize the envelope and reject `success: false`.
    pub(crate) async fn get_envelope(&self, url: &Url) -> ApiResult<Envelope> {
        let result = async {
            let body: serde_json::Value = self.backend.get_json(url).await?;
            into_success(parse_envelope(body)?)
        }
        .await;

        if let Err(ref e) = result {
            warn!(url = %url, error = %e, "Catalog API request failed");
        }
        result
    }
}
