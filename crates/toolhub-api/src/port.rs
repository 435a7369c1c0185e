//! Port trait implementation for `CatalogClient`.
//!
//! This module implements the core-owned `CatalogClientPort` trait for
//! `CatalogClient`, mapping internal errors onto `CatalogError`.

use async_trait::async_trait;
use toolhub_core::{
    CatalogClientPort, CatalogError, CatalogResult, Category, HealthStatus, Item, ItemPage,
    ItemQuery, Language,
};

use crate::client::CatalogClient;
use crate::error::ApiError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `ApiError` to core `CatalogError`.
pub(crate) fn map_error(err: ApiError) -> CatalogError {
    match err {
        ApiError::Status { status, .. } => CatalogError::Http { status },
        ApiError::Application { message } => CatalogError::Application { message },
        ApiError::InvalidResponse { message } => CatalogError::InvalidResponse { message },
        ApiError::Network(e) => CatalogError::Transport {
            message: e.to_string(),
        },
        ApiError::InvalidUrl(e) => CatalogError::Configuration {
            message: e.to_string(),
        },
        ApiError::JsonParse(e) => CatalogError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

/// Like [`map_error`], but a 404 names the missing item.
fn map_item_error(err: ApiError, identifier: &str) -> CatalogError {
    match err {
        ApiError::Status { status: 404, .. } => CatalogError::NotFound {
            identifier: identifier.to_string(),
        },
        other => map_error(other),
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> CatalogClientPort for CatalogClient<B> {
    async fn fetch_items(&self, query: &ItemQuery) -> CatalogResult<ItemPage> {
        self.list_items(query).await.map_err(map_error)
    }

    async fn fetch_item(&self, identifier: &str, language: Language) -> CatalogResult<Item> {
        self.get_item(identifier, language)
            .await
            .map_err(|e| map_item_error(e, identifier))
    }

    async fn fetch_related(
        &self,
        identifier: &str,
        language: Language,
        limit: u32,
    ) -> CatalogResult<Vec<Item>> {
        self.related_items(identifier, language, limit)
            .await
            .map_err(|e| map_item_error(e, identifier))
    }

    async fn fetch_categories(&self, language: Language) -> CatalogResult<Vec<Category>> {
        self.list_categories(language).await.map_err(map_error)
    }

    async fn health(&self) -> CatalogResult<HealthStatus> {
        self.check_health().await.map_err(map_error)
    }
}
