//! Core-owned DTOs for catalog reads.

use serde::{Deserialize, Serialize};

use crate::domain::{FilterCriteria, Item, Language, PaginationInfo};

/// Parameters for a catalog list request.
///
/// Every field is optional; unset fields are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    pub category: Option<String>,
    /// Any-match tag set; sent comma-joined
    pub tags: Vec<String>,
    pub search: Option<String>,
    /// Restrict to featured items
    pub featured: Option<bool>,
    pub language: Option<Language>,
    /// Ask for the reduced field set
    pub minimal: Option<bool>,
    /// Ask for the entire matching set; the server ignores page/limit
    pub all: Option<bool>,
}

impl ItemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query carrying the category, tags, search and language of `criteria`.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let criteria = criteria.clone().normalized();
        Self {
            category: criteria.category,
            tags: criteria.tags,
            search: criteria.search,
            language: Some(criteria.language),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    #[must_use]
    pub const fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    #[must_use]
    pub const fn minimal(mut self, minimal: bool) -> Self {
        self.minimal = Some(minimal);
        self
    }

    #[must_use]
    pub const fn fetch_all(mut self, all: bool) -> Self {
        self.all = Some(all);
        self
    }

    /// True if the entire matching set was requested.
    pub fn is_fetch_all(&self) -> bool {
        self.all == Some(true)
    }
}

/// One response worth of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPage {
    pub items: Vec<Item>,
    /// Server-computed metadata, absent for some responses
    pub pagination: Option<PaginationInfo>,
}

impl ItemPage {
    pub const fn new(items: Vec<Item>, pagination: Option<PaginationInfo>) -> Self {
        Self { items, pagination }
    }
}
