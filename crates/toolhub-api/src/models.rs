//! Internal configuration and response types for the catalog API.
//!
//! These types are internal to `toolhub-api` and are not exposed to consumers.
//! External consumers should use the port DTOs defined in `toolhub-core`.

use std::time::Duration;

use serde_json::Value;
use toolhub_core::{Language, PaginationInfo};
use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::ApiResult;

// ============================================================================
// Configuration (used internally, see config.rs for public config)
// ============================================================================

/// Internal configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Parsed base URL of the API
    pub base_url: Url,
    pub default_language: Language,
    pub user_agent: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Validate the public configuration.
    pub fn from_public(config: &CatalogClientConfig) -> ApiResult<Self> {
        Ok(Self {
            base_url: Url::parse(&config.base_url)?,
            default_language: config.default_language,
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
        })
    }
}

#[cfg(test)]
impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_public(&CatalogClientConfig::default()).unwrap()
    }
}

// ============================================================================
// Response Envelope
// ============================================================================

/// A response body after envelope normalization.
///
/// Every body is coerced into this shape before anything reads `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub success: bool,
    /// Payload; not to be trusted when `success` is false.
    pub data: Value,
    pub pagination: Option<PaginationInfo>,
    pub message: Option<String>,
}
