//! Paginated, filtered views of the catalog.
//!
//! Three interchangeable strategies sit behind the [`Paginator`] trait:
//!
//! - [`FullFetchPaginator`]: fetch the whole filtered set on every filter
//!   change, page locally
//! - [`CachedPaginator`]: fetch the whole catalog once per language, filter
//!   and page locally
//! - [`ServerPaginator`]: ask the server for each page, with debounced search
//!
//! # Concurrency Model
//!
//! - Methods take `&self`; state sits behind a `tokio::sync::Mutex` that is
//!   never held across a network call
//! - Each fetch carries a ticket from the paginator's [`FetchGuard`]; stale
//!   responses are dropped
//! - [`Paginator::dispose`] (also run on drop) turns in-flight fetches and
//!   pending debounce timers into no-ops

mod cached;
mod full_fetch;
mod guard;
mod server;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::domain::{DEFAULT_PAGE_SIZE, FilterCriteria, Item, PaginationInfo};
use crate::ports::CatalogClientPort;

pub use cached::CachedPaginator;
pub use full_fetch::FullFetchPaginator;
pub use guard::{FetchGuard, FetchTicket};
pub use server::ServerPaginator;

/// Default delay before a search keystroke reaches the server.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

// ─────────────────────────────────────────────────────────────────────────────
// View types
// ─────────────────────────────────────────────────────────────────────────────

/// Where a paginator is in its fetch cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready,
    /// The last fetch failed; the view is empty and carries a message.
    Error,
}

/// Snapshot of a paginator, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    /// Items on the current page, in order.
    pub items: Vec<Item>,
    pub state: LoadState,
    pub error: Option<String>,
    /// Metadata for the current page; the server strategy has none until
    /// its first successful response.
    pub pagination: Option<PaginationInfo>,
    /// Current page (1-based).
    pub current_page: u32,
}

impl PageView {
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Total pages, treating unknown as one.
    pub fn total_pages(&self) -> u32 {
        self.pagination.map_or(1, |p| p.total_pages.max(1))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategy trait
// ─────────────────────────────────────────────────────────────────────────────

/// Common contract of the three paginator strategies.
///
/// None of the methods fail: fetch errors end up in [`PageView::error`].
#[async_trait]
pub trait Paginator: Send + Sync {
    /// Which strategy this is.
    fn kind(&self) -> PaginatorKind;

    /// Initial load, run once after construction.
    async fn load(&self);

    /// Replace the filter criteria (category, tags, search, language).
    async fn set_criteria(&self, criteria: FilterCriteria);

    /// Move to a page, clamped into `[1, total_pages]`.
    ///
    /// Asking for the current page does nothing.
    async fn set_page(&self, page: u32);

    /// Repeat the last fetch.
    async fn refetch(&self);

    /// Current snapshot.
    async fn view(&self) -> PageView;

    /// Stop all pending work. Later responses are ignored.
    fn dispose(&self);
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Selects a paginator strategy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PaginatorKind {
    /// Fetch all matches per filter change, page locally.
    FullFetch,
    /// Fetch the catalog per language, filter and page locally.
    Cached,
    /// Server-side paging with debounced search.
    #[default]
    Server,
}

/// Construction parameters for any paginator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatorConfig {
    pub kind: PaginatorKind,
    /// Items per page (fixed for the paginator's lifetime).
    pub page_size: u32,
    /// Search debounce; only the server strategy uses it.
    pub search_debounce: Duration,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            kind: PaginatorKind::default(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

impl PaginatorConfig {
    pub fn new(kind: PaginatorKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = if page_size == 0 { 1 } else { page_size };
        self
    }

    #[must_use]
    pub const fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }
}

/// Build the paginator selected by `config`.
///
/// The result hasn't fetched anything yet; call [`Paginator::load`].
pub fn build_paginator(
    config: &PaginatorConfig,
    client: Arc<dyn CatalogClientPort>,
    criteria: FilterCriteria,
) -> Arc<dyn Paginator> {
    match config.kind {
        PaginatorKind::FullFetch => Arc::new(FullFetchPaginator::new(
            client,
            criteria,
            config.page_size,
        )),
        PaginatorKind::Cached => {
            Arc::new(CachedPaginator::new(client, criteria, config.page_size))
        }
        PaginatorKind::Server => Arc::new(ServerPaginator::new(
            client,
            criteria,
            config.page_size,
            config.search_debounce,
        )),
    }
}
