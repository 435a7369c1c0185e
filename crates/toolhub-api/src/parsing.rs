//! JSON parsing functions for catalog API responses.
//!
//! This module provides sync, total functions that convert loosely shaped
//! JSON into domain types. Missing or mistyped optional fields fall back to
//! fixed defaults; only an item without any identifier is dropped.

use serde_json::{Map, Value};
use toolhub_core::{
    Category, DEFAULT_CATEGORY, FullData, HealthStatus, Item, PaginationInfo, Pricing,
    total_pages,
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::models::Envelope;

/// Message used when the server reports failure without saying why.
const GENERIC_FAILURE: &str = "Request failed";

// ============================================================================
// Field helpers
// ============================================================================

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A string field that must not be blank.
fn non_empty(obj: &Map<String, Value>, key: &str) -> Option<String> {
    str_field(obj, key).filter(|s| !s.trim().is_empty())
}

// Counters sent as floats are whole and non-negative.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn u64_field(obj: &Map<String, Value>, key: &str) -> Option<u64> {
    match obj.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    match obj.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Tags arrive as a JSON array or a comma-joined string.
pub fn parse_tags(value: Option<&Value>) -> Vec<String> {
    let raw: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        Some(Value::String(joined)) => joined.split(',').map(String::from).collect(),
        _ => Vec::new(),
    };

    raw.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

// ============================================================================
// Envelope
// ============================================================================

/// Coerce any response body into an [`Envelope`].
///
/// - An object with `success` is taken as is.
/// - An object without it is wrapped as a success; `data` falls back to
///   the whole body.
/// - A bare array is a successful list.
pub fn parse_envelope(body: Value) -> ApiResult<Envelope> {
    match body {
        Value::Array(_) => Ok(Envelope {
            success: true,
            data: body,
            pagination: None,
            message: None,
        }),
        Value::Object(mut obj) => {
            let pagination = obj.get("pagination").and_then(parse_pagination);
            let message = str_field(&obj, "message");

            if let Some(success) = obj.get("success") {
                let success = success.as_bool().unwrap_or(false);
                let data = obj.remove("data").unwrap_or(Value::Null);
                return Ok(Envelope {
                    success,
                    data,
                    pagination,
                    message,
                });
            }

            let data = match obj.remove("data") {
                Some(data) if !data.is_null() => data,
                _ => Value::Object(obj),
            };
            Ok(Envelope {
                success: true,
                data,
                pagination,
                message,
            })
        }
        other => Err(ApiError::InvalidResponse {
            message: format!("expected a JSON object or array, got {other}"),
        }),
    }
}

/// Unwrap a successful envelope, or turn `success: false` into an error.
pub fn into_success(envelope: Envelope) -> ApiResult<Envelope> {
    if envelope.success {
        Ok(envelope)
    } else {
        Err(ApiError::Application {
            message: envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        })
    }
}

/// Tolerant pagination parsing; `totalPages` is recomputed when absent.
pub fn parse_pagination(value: &Value) -> Option<PaginationInfo> {
    let obj = value.as_object()?;
    let total = u64_field(obj, "total")?;
    let limit = u64_field(obj, "limit")
        .and_then(|l| u32::try_from(l).ok())
        .unwrap_or(u32::MAX)
        .max(1);
    let page = u64_field(obj, "page")
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(1)
        .max(1);
    let pages = u64_field(obj, "totalPages")
        .or_else(|| u64_field(obj, "total_pages"))
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or_else(|| total_pages(total, limit))
        .max(1);

    Some(PaginationInfo {
        page,
        limit,
        total,
        total_pages: pages,
    })
}

// ============================================================================
// Items
// ============================================================================

/// Map one raw item object onto [`Item`].
///
/// Returns None only when the object has neither an id nor a slug.
pub fn parse_item(value: &Value) -> Option<Item> {
    let obj = value.as_object()?;

    let slug = non_empty(obj, "slug");
    let id = non_empty(obj, "id").or_else(|| slug.clone())?;

    let name = str_field(obj, "name").unwrap_or_default();
    let title = non_empty(obj, "title").unwrap_or_else(|| name.clone());

    let pricing = non_empty(obj, "pricing_type")
        .or_else(|| non_empty(obj, "pricing"))
        .map_or(Pricing::Unknown, |raw| Pricing::from_raw(&raw));

    let traffic = u64_field(obj, "traffic")
        .filter(|t| *t > 0)
        .or_else(|| u64_field(obj, "view_count"))
        .unwrap_or(0);

    let category = non_empty(obj, "category")
        .or_else(|| non_empty(obj, "category_key"))
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let full_data = obj.get("full_data").and_then(|raw| {
        serde_json::from_value::<FullData>(raw.clone())
            .map_err(|e| debug!(id = %id, error = %e, "Dropping malformed full_data"))
            .ok()
            .map(Box::new)
    });

    Some(Item {
        id,
        slug,
        name,
        title,
        description: str_field(obj, "description").unwrap_or_default(),
        url: str_field(obj, "url").unwrap_or_default(),
        thumbnail_url: non_empty(obj, "thumbnail_url"),
        category,
        tags: parse_tags(obj.get("tags")),
        pricing,
        featured: bool_field(obj, "featured").unwrap_or(false),
        traffic,
        rating: obj.get("rating").and_then(Value::as_f64),
        created_at: non_empty(obj, "created_at"),
        updated_at: non_empty(obj, "updated_at"),
        full_data,
    })
}

/// Parse a list payload, skipping entries that can't be identified.
pub fn parse_items(data: &Value) -> Vec<Item> {
    let Some(entries) = data.as_array() else {
        debug!("Expected an item list, got {}", kind_of(data));
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let item = parse_item(entry);
            if item.is_none() {
                debug!("Skipping catalog entry without id");
            }
            item
        })
        .collect()
}

// ============================================================================
// Categories & health
// ============================================================================

/// Map one raw category; `slug` and `name` fall back to `id`.
pub fn parse_category(value: &Value) -> Option<Category> {
    let obj = value.as_object()?;
    let id = non_empty(obj, "id").or_else(|| non_empty(obj, "slug"))?;

    Some(Category {
        name: non_empty(obj, "name").unwrap_or_else(|| id.clone()),
        slug: non_empty(obj, "slug").unwrap_or_else(|| id.clone()),
        description: non_empty(obj, "description"),
        count: u64_field(obj, "count"),
        id,
    })
}

pub fn parse_categories(data: &Value) -> Vec<Category> {
    data.as_array()
        .map(|entries| entries.iter().filter_map(parse_category).collect())
        .unwrap_or_default()
}

/// The health body is not enveloped.
pub fn parse_health(body: &Value) -> HealthStatus {
    let obj = body.as_object();
    HealthStatus {
        status: obj
            .and_then(|o| non_empty(o, "status"))
            .unwrap_or_else(|| "unknown".to_string()),
        database: obj.and_then(|o| non_empty(o, "database")),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolhub_core::Language;

    // ------------------------------------------------------------------------
    // Envelope
    // ------------------------------------------------------------------------

    #[test]
    fn test_standard_envelope() {
        let envelope = parse_envelope(json!({
            "success": true,
            "data": [{"id": "1"}],
            "pagination": {"page": 2, "limit": 12, "total": 30, "totalPages": 3}
        }))
        .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data, json!([{"id": "1"}]));
        assert_eq!(
            envelope.pagination,
            Some(PaginationInfo { page: 2, limit: 12, total: 30, total_pages: 3 })
        );
    }

    #[test]
    fn test_envelope_without_success_is_wrapped() {
        let envelope = parse_envelope(json!({"data": [], "pagination": null})).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data, json!([]));
        assert!(envelope.pagination.is_none());

        let envelope = parse_envelope(json!({"id": "42", "name": "Solo"})).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data["id"], "42");
    }

    #[test]
    fn test_bare_array_is_success() {
        let envelope = parse_envelope(json!([{"id": "1"}, {"id": "2"}])).unwrap();
        assert!(envelope.success);
        assert_eq!(parse_items(&envelope.data).len(), 2);
    }

    #[test]
    fn test_scalar_body_is_invalid() {
        assert!(matches!(
            parse_envelope(json!("nope")),
            Err(ApiError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_failure_envelope_carries_message() {
        let envelope = parse_envelope(json!({"success": false, "message": "boom"})).unwrap();
        match into_success(envelope) {
            Err(ApiError::Application { message }) => assert_eq!(message, "boom"),
            other => panic!("expected Application error, got {other:?}"),
        }

        let envelope = parse_envelope(json!({"success": false})).unwrap();
        match into_success(envelope) {
            Err(ApiError::Application { message }) => assert_eq!(message, GENERIC_FAILURE),
            other => panic!("expected Application error, got {other:?}"),
        }
    }

    #[test]
    fn test_pagination_tolerance() {
        let p = parse_pagination(&json!({"total": 25, "limit": 12})).unwrap();
        assert_eq!((p.page, p.total_pages), (1, 3));

        let p = parse_pagination(&json!({"page": 1, "limit": 0, "total": 0, "totalPages": 0}))
            .unwrap();
        assert_eq!((p.limit, p.total_pages), (1, 1));

        assert!(parse_pagination(&json!({"page": 1})).is_none());
        assert!(parse_pagination(&json!("x")).is_none());
    }

    // ------------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------------

    #[test]
    fn test_item_field_mapping() {
        let item = parse_item(&json!({
            "id": 7,
            "slug": "chatgpt",
            "name": "ChatGPT",
            "title": "ChatGPT by OpenAI",
            "description": "Conversational assistant",
            "url": "https://chat.openai.com",
            "thumbnail_url": "/api/images/chatgpt.png",
            "category": "chat",
            "tags": ["llm", "assistant"],
            "pricing_type": "Freemium",
            "rating": 4.7,
            "view_count": 1200,
            "featured": true,
            "created_at": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(item.id, "7");
        assert_eq!(item.identifier(), "chatgpt");
        assert_eq!(item.title, "ChatGPT by OpenAI");
        assert_eq!(item.pricing, Pricing::Freemium);
        assert_eq!(item.traffic, 1200);
        assert_eq!(item.rating, Some(4.7));
        assert!(item.featured);
        assert_eq!(item.tags, ["llm", "assistant"]);
        assert!(item.updated_at.is_none());
    }

    #[test]
    fn test_item_defaults() {
        let item = parse_item(&json!({"id": "x", "name": "Bare", "slug": ""})).unwrap();

        assert_eq!(item.slug, None);
        assert_eq!(item.title, "Bare");
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.pricing, Pricing::Unknown);
        assert_eq!(item.traffic, 0);
        assert_eq!(item.rating, None);
        assert!(item.tags.is_empty());
        assert!(!item.featured);
    }

    #[test]
    fn test_item_fallback_fields() {
        let item = parse_item(&json!({
            "slug": "only-slug",
            "pricing": "paid",
            "traffic": 0,
            "view_count": 9,
            "category_key": "video",
            "tags": "a, b,,c"
        }))
        .unwrap();

        assert_eq!(item.id, "only-slug");
        assert_eq!(item.pricing, Pricing::Paid);
        assert_eq!(item.traffic, 9);
        assert_eq!(item.category, "video");
        assert_eq!(item.tags, ["a", "b", "c"]);
    }

    #[test]
    fn test_unrecognized_pricing_is_unknown() {
        let item = parse_item(&json!({"id": "1", "pricing_type": "contact sales"})).unwrap();
        assert_eq!(item.pricing, Pricing::Unknown);
    }

    #[test]
    fn test_item_without_identifier_is_dropped() {
        assert!(parse_item(&json!({"name": "Ghost"})).is_none());
        let items = parse_items(&json!([{"name": "Ghost"}, {"id": "real"}]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "real");
    }

    #[test]
    fn test_full_data_parsed_or_dropped() {
        let item = parse_item(&json!({
            "id": "1",
            "full_data": {
                "name": {"en": "Painter", "cn": "画家"},
                "key_features": [{"en": "Fast", "cn": "快速"}]
            }
        }))
        .unwrap();
        let full = item.full_data.unwrap();
        assert_eq!(full.name.get(Language::Cn), "画家");
        assert_eq!(full.key_features.len(), 1);

        let item = parse_item(&json!({"id": "1", "full_data": "garbage"})).unwrap();
        assert!(item.full_data.is_none());
    }

    #[test]
    fn test_non_list_data_yields_no_items() {
        assert!(parse_items(&json!({"id": "1"})).is_empty());
        assert!(parse_items(&Value::Null).is_empty());
    }

    // ------------------------------------------------------------------------
    // Categories & health
    // ------------------------------------------------------------------------

    #[test]
    fn test_categories() {
        let categories = parse_categories(&json!([
            {"id": "writing", "name": "Writing", "slug": "writing", "description": "", "count": 12},
            {"id": "image"},
            {"name": "nameless"}
        ]));

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].count, Some(12));
        assert_eq!(categories[0].description, None);
        assert_eq!(categories[1].name, "image");
        assert_eq!(categories[1].slug, "image");
    }

    #[test]
    fn test_health() {
        let health = parse_health(&json!({
            "status": "healthy",
            "database": "connected",
            "architecture": "multilingual"
        }));
        assert!(health.is_healthy());
        assert_eq!(health.database.as_deref(), Some("connected"));

        let health = parse_health(&json!({"status": "unhealthy", "error": "db down"}));
        assert!(!health.is_healthy());

        assert_eq!(parse_health(&json!([])).status, "unknown");
    }
}
