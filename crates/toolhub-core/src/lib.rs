//! Core types for browsing the toolhub catalog.
//!
//! - [`domain`]: items, categories, languages, filter criteria, pagination
//! - [`ports`]: the [`CatalogClientPort`] trait adapters implement
//! - [`browse`]: the three [`Paginator`] strategies
//! - [`services`]: non-paginated reads (featured, latest, detail)
//! - [`utils`]: the search [`Debouncer`]
//!
//! This crate does no I/O of its own; `toolhub-api` provides the HTTP
//! adapter.

#![deny(unused_crate_dependencies)]

pub mod browse;
pub mod domain;
pub mod ports;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use browse::{
    CachedPaginator, DEFAULT_SEARCH_DEBOUNCE, FetchGuard, FetchTicket, FullFetchPaginator,
    LoadState, PageView, Paginator, PaginatorConfig, PaginatorKind, ServerPaginator,
    build_paginator,
};
pub use domain::{
    BilingualText, Category, DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE, FilterCriteria, FilterKey,
    FullData, HealthStatus, Item, Language, PaginationInfo, Pricing, clamp_page, page_slice,
    total_pages,
};
pub use ports::{CatalogClientPort, CatalogError, CatalogResult, ItemPage, ItemQuery};
pub use services::{DEFAULT_RELATED_LIMIT, SHOWCASE_LIMIT, ShowcaseService};
pub use utils::Debouncer;
