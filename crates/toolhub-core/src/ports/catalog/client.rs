//! Catalog client port trait.

use super::error::CatalogResult;
use super::types::{ItemPage, ItemQuery};
use crate::domain::{Category, HealthStatus, Item, Language};
use async_trait::async_trait;

/// Port trait for reading the remote catalog.
///
/// Implementations are stateless and safe to share between paginators
/// behind an `Arc`. The HTTP implementation lives in `toolhub-api`.
///
/// # Design
///
/// - Uses core-owned DTOs, not wire types
/// - Returns `CatalogError` for all failures
/// - No caching at this layer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClientPort: Send + Sync {
    /// List items matching `query`.
    ///
    /// With `query.all` set the whole matching set comes back and the
    /// pagination metadata may be absent or meaningless.
    async fn fetch_items(&self, query: &ItemQuery) -> CatalogResult<ItemPage>;

    /// Fetch one item by id or slug.
    async fn fetch_item(&self, identifier: &str, language: Language) -> CatalogResult<Item>;

    /// Items related to the given one.
    async fn fetch_related(
        &self,
        identifier: &str,
        language: Language,
        limit: u32,
    ) -> CatalogResult<Vec<Item>>;

    /// All categories with their item counts.
    async fn fetch_categories(&self, language: Language) -> CatalogResult<Vec<Category>>;

    /// Liveness probe, for diagnostics only.
    async fn health(&self) -> CatalogResult<HealthStatus>;
}
