//! Filter criteria and the canonical filter key.
//!
//! All paginators compare criteria through [`FilterKey`], so the three
//! strategies agree on what counts as "the filters changed".

use serde::{Deserialize, Serialize};

use super::item::Item;
use super::language::Language;

/// The combination of category, tags, search text and language that
/// narrows the catalog.
///
/// Blank strings mean "no filter". The builders drop them up front; a value
/// built literally or deserialized goes through [`normalized`](Self::normalized)
/// before any paginator, key or query sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Exact category key.
    pub category: Option<String>,
    /// Any-match tag set.
    pub tags: Vec<String>,
    /// Case-insensitive substring over name, title and description.
    pub search: Option<String>,
    /// Display language; drives both the query and locale resolution.
    pub language: Language,
}

impl FilterCriteria {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(category.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !is_blank(t))
            .collect();
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(search.into());
        self
    }

    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Drop blank category, search and tags so they read as "no filter".
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            category: self.category.and_then(non_empty),
            tags: self.tags.into_iter().filter(|t| !is_blank(t)).collect(),
            search: self.search.and_then(non_empty),
            language: self.language,
        }
    }

    /// Canonical key: category, sorted and de-duplicated tags, search, language.
    pub fn key(&self) -> FilterKey {
        let normalized = self.clone().normalized();
        let mut tags = normalized.tags;
        tags.sort();
        tags.dedup();
        FilterKey {
            category: normalized.category,
            tags,
            search: normalized.search,
            language: normalized.language,
        }
    }

    /// True if category, tags or search differ. Language is ignored.
    pub fn content_differs(&self, other: &Self) -> bool {
        let (mine, theirs) = (self.key(), other.key());
        mine.category != theirs.category || mine.tags != theirs.tags || mine.search != theirs.search
    }

    /// Apply the local matching rules to one item.
    ///
    /// Category must match exactly, tags match if any overlap, search is a
    /// case-insensitive substring over name, title or description.
    pub fn matches(&self, item: &Item) -> bool {
        self.clone().normalized().matches_normalized(item)
    }

    /// Filter a collection, preserving order.
    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        let criteria = self.clone().normalized();
        items
            .iter()
            .filter(|item| criteria.matches_normalized(item))
            .cloned()
            .collect()
    }

    fn matches_normalized(&self, item: &Item) -> bool {
        if let Some(ref category) = self.category {
            if &item.category != category {
                return false;
            }
        }

        if !self.tags.is_empty() && !item.has_any_tag(&self.tags) {
            return false;
        }

        if let Some(ref search) = self.search {
            if !item.matches_text(&search.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// Normalized identity of a set of filter criteria.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub search: Option<String>,
    pub language: Language,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_empty(value: String) -> Option<String> {
    if is_blank(&value) { None } else { Some(value) }
}
