//! Item listing and single-item reads.

use toolhub_core::{Item, ItemPage, ItemQuery, Language};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::http::HttpBackend;
use crate::parsing::{parse_item, parse_items};
use crate::url::{build_item_url, build_items_url, build_related_url};

use super::CatalogClient;

impl<B: HttpBackend> CatalogClient<B> {
    /// One page of items, or every match when `query.all` is set.
    pub(crate) async fn list_items(&self, query: &ItemQuery) -> ApiResult<ItemPage> {
        let language = self.language_or_default(query.language);
        let url = build_items_url(&self.config, query, language);

        let envelope = self.get_envelope(&url).await?;
        let items = parse_items(&envelope.data);
        debug!(count = items.len(), %language, "Fetched catalog items");

        Ok(ItemPage::new(items, envelope.pagination))
    }

    /// A single item by id or slug.
    pub(crate) async fn get_item(&self, identifier: &str, language: Language) -> ApiResult<Item> {
        let url = build_item_url(&self.config, identifier, language);
        let envelope = self.get_envelope(&url).await?;

        parse_item(&envelope.data).ok_or_else(|| ApiError::InvalidResponse {
            message: format!("item '{identifier}' has no id"),
        })
    }

    /// Items related to `identifier`.
    pub(crate) async fn related_items(
        &self,
        identifier: &str,
        language: Language,
        limit: u32,
    ) -> ApiResult<Vec<Item>> {
        let url = build_related_url(&self.config, identifier, language, limit);
        let envelope = self.get_envelope(&url).await?;
        Ok(parse_items(&envelope.data))
    }
}
