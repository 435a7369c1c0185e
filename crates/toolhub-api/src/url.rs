//! URL construction helpers for the catalog API.
//!
//! This module provides pure functions for building catalog API URLs,
//! ensuring consistent URL construction across all API calls.

use toolhub_core::{ItemQuery, Language};
use url::Url;

use crate::models::ApiConfig;

/// Append `path` to the base URL's path, keeping any prefix.
fn endpoint(config: &ApiConfig, path: &str) -> Url {
    let mut url = config.base_url.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}{path}"));
    url.set_query(None);
    url
}

/// Build the `/api/tools` list URL.
///
/// Parameters are emitted only when set. Tags are comma-joined.
pub fn build_items_url(config: &ApiConfig, query: &ItemQuery, language: Language) -> Url {
    let mut url = endpoint(config, "/api/tools");

    {
        let mut pairs = url.query_pairs_mut();
        if let Some(page) = query.page {
            pairs.append_pair("page", &page.max(1).to_string());
        }
        if let Some(limit) = query.limit {
            pairs.append_pair("limit", &limit.max(1).to_string());
        }
        if let Some(ref category) = query.category {
            pairs.append_pair("category", category);
        }
        if !query.tags.is_empty() {
            pairs.append_pair("tags", &query.tags.join(","));
        }
        if let Some(featured) = query.featured {
            pairs.append_pair("featured", &featured.to_string());
        }
        if let Some(ref search) = query.search {
            pairs.append_pair("search", search);
        }
        pairs.append_pair("language", language.as_code());
        if let Some(minimal) = query.minimal {
            pairs.append_pair("minimal", &minimal.to_string());
        }
        if let Some(all) = query.all {
            pairs.append_pair("all", &all.to_string());
        }
    }

    url
}

/// Build the single-item URL. `identifier` may be an id or a slug.
pub fn build_item_url(config: &ApiConfig, identifier: &str, language: Language) -> Url {
    let mut url = endpoint(
        config,
        &format!("/api/tools/{}", urlencoding::encode(identifier)),
    );
    url.query_pairs_mut()
        .append_pair("language", language.as_code());
    url
}

/// Build the related-items URL.
pub fn build_related_url(
    config: &ApiConfig,
    identifier: &str,
    language: Language,
    limit: u32,
) -> Url {
    let mut url = endpoint(
        config,
        &format!("/api/tools/{}/related", urlencoding::encode(identifier)),
    );
    url.query_pairs_mut()
        .append_pair("language", language.as_code())
        .append_pair("limit", &limit.max(1).to_string());
    url
}

/// Build the category list URL.
pub fn build_categories_url(config: &ApiConfig, language: Language) -> Url {
    let mut url = endpoint(config, "/api/categories");
    url.query_pairs_mut()
        .append_pair("language", language.as_code());
    url
}

/// Build the health probe URL.
pub fn build_health_url(config: &ApiConfig) -> Url {
    endpoint(config, "/health")
}
