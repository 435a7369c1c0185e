//! Catalog item domain types.
//!
//! An [`Item`] is one listed tool, with its text fields already resolved
//! for a single display language. Items are read-only on the client side.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use super::language::Language;

/// Category assigned when the server omits one.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

// ─────────────────────────────────────────────────────────────────────────────
// Pricing
// ─────────────────────────────────────────────────────────────────────────────

/// Commercial pricing tier of an item.
///
/// Always resolves to one of the four variants; anything the server sends
/// that isn't recognized becomes [`Pricing::Unknown`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Pricing {
    Free,
    Freemium,
    Paid,
    #[default]
    Unknown,
}

impl Pricing {
    /// Resolve a raw pricing string, falling back to `Unknown`.
    pub fn from_raw(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bilingual payload
// ─────────────────────────────────────────────────────────────────────────────

/// A text value carried in both supported languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilingualText {
    pub en: String,
    pub cn: String,
}

impl BilingualText {
    /// Get the variant for a language.
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Cn => &self.cn,
        }
    }
}

/// Full bilingual record attached to an item.
///
/// Only detail views read this; the paginators never look inside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullData {
    pub name: BilingualText,
    pub title: BilingualText,
    pub description: BilingualText,
    pub long_description: Option<BilingualText>,
    pub key_features: Vec<BilingualText>,
    pub use_cases: Option<BilingualText>,
    pub target_audience: Option<BilingualText>,
    pub subcategory: Option<BilingualText>,
    pub tags: Vec<BilingualText>,
    pub industry_tags: Vec<BilingualText>,
    pub pricing_type: Option<BilingualText>,
    pub pricing_details: Option<serde_json::Value>,
    pub trial_available: Option<BilingualText>,
    pub rating: Option<f64>,
    pub view_count: Option<u64>,
    pub traffic_estimate: Option<u64>,
    pub featured: Option<bool>,
    pub status: Option<String>,
    pub slug: Option<String>,
    pub page_screenshot: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Item
// ─────────────────────────────────────────────────────────────────────────────

/// A catalog entry representing one listed tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque unique identifier.
    pub id: String,
    /// URL-friendly identifier, if the item has one.
    pub slug: Option<String>,
    /// Short name in the display language.
    pub name: String,
    /// Title in the display language.
    pub title: String,
    /// Description in the display language.
    pub description: String,
    /// Link to the tool itself.
    pub url: String,
    /// Screenshot or thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Category key (always present).
    pub category: String,
    /// Free-form tags, possibly empty.
    #[serde(default)]
    pub tags: Vec<String>,
    pub pricing: Pricing,
    pub featured: bool,
    /// Popularity counter; zero when the server reports nothing.
    pub traffic: u64,
    pub rating: Option<f64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Parallel-language record for detail views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_data: Option<Box<FullData>>,
}

impl Item {
    /// Create an item with the required fields and defaults for the rest.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: None,
            title: name.clone(),
            name,
            description: String::new(),
            url: String::new(),
            thumbnail_url: None,
            category: category.into(),
            tags: Vec::new(),
            pricing: Pricing::Unknown,
            featured: false,
            traffic: 0,
            rating: None,
            created_at: None,
            updated_at: None,
            full_data: None,
        }
    }

    /// Identifier used in item URLs: the slug when present, else the id.
    pub fn identifier(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.id)
    }

    /// True if the item carries at least one of `wanted`.
    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        wanted.iter().any(|tag| self.tags.contains(tag))
    }

    /// Case-insensitive substring match on name, title and description.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        [&self.name, &self.title, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Companion types
// ─────────────────────────────────────────────────────────────────────────────

/// A category as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Number of active items in this category.
    #[serde(default)]
    pub count: Option<u64>,
}

/// Liveness report from the catalog's health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
