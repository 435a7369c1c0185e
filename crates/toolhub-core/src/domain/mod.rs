//! Core domain types.
//!
//! These types represent the catalog as the client sees it, independent
//! of any transport concerns.
//!
//! # Structure
//!
//! - `item` - Catalog entries (`Item`, `Pricing`, `Category`)
//! - `language` - Supported display languages
//! - `filter` - Filter criteria and the canonical filter key
//! - `pagination` - Page metadata and the page-bound guard

mod filter;
mod item;
mod language;
pub mod pagination;

pub use filter::{FilterCriteria, FilterKey};
pub use item::{
    BilingualText, Category, DEFAULT_CATEGORY, FullData, HealthStatus, Item, Pricing,
};
pub use language::Language;
pub use pagination::{DEFAULT_PAGE_SIZE, PaginationInfo, clamp_page, page_slice, total_pages};
