//! Showcase service - thin orchestrator for the non-paginated catalog reads.
//!
//! Home and detail views need a handful of fixed-size lists and single
//! items. They bypass the paginators and go straight through the port.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Category, Item, Language};
use crate::ports::{CatalogClientPort, CatalogResult, ItemQuery};

/// Number of items in the featured and latest strips.
pub const SHOWCASE_LIMIT: u32 = 8;

/// Number of related items shown on a detail view.
pub const DEFAULT_RELATED_LIMIT: u32 = 4;

/// Service for the fixed lists around the paginated catalog.
pub struct ShowcaseService {
    client: Arc<dyn CatalogClientPort>,
}

impl ShowcaseService {
    /// Create a new showcase service.
    pub fn new(client: Arc<dyn CatalogClientPort>) -> Self {
        Self { client }
    }

    /// Featured items, or the latest items when nothing is featured.
    pub async fn featured(&self, language: Language) -> CatalogResult<Vec<Item>> {
        let query = ItemQuery::new()
            .featured(true)
            .with_limit(SHOWCASE_LIMIT)
            .with_language(language)
            .minimal(true);

        let featured = self.client.fetch_items(&query).await?;
        if !featured.items.is_empty() {
            return Ok(featured.items);
        }

        debug!(%language, "No featured items, falling back to latest");
        self.latest(language).await
    }

    /// The most recent items.
    pub async fn latest(&self, language: Language) -> CatalogResult<Vec<Item>> {
        let query = ItemQuery::new()
            .with_limit(SHOWCASE_LIMIT)
            .with_language(language)
            .minimal(true);
        Ok(self.client.fetch_items(&query).await?.items)
    }

    /// A single item by id or slug.
    pub async fn item(&self, identifier: &str, language: Language) -> CatalogResult<Item> {
        self.client.fetch_item(identifier, language).await
    }

    /// Items related to `identifier`.
    pub async fn related(&self, identifier: &str, language: Language) -> CatalogResult<Vec<Item>> {
        self.client
            .fetch_related(identifier, language, DEFAULT_RELATED_LIMIT)
            .await
    }

    /// All categories.
    pub async fn categories(&self, language: Language) -> CatalogResult<Vec<Category>> {
        self.client.fetch_categories(language).await
    }
}
