//! Cache strategy: one catalog per language, filtered and paged locally.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::guard::FetchGuard;
use super::{LoadState, PageView, Paginator, PaginatorKind};
use crate::domain::{
    FilterCriteria, Item, Language, PaginationInfo, clamp_page, page_slice, total_pages,
};
use crate::ports::{CatalogClientPort, ItemQuery};

/// The unfiltered catalog for one language.
struct CacheEntry {
    language: Language,
    items: Vec<Item>,
}

struct CachedState {
    criteria: FilterCriteria,
    cache: Option<CacheEntry>,
    /// `criteria` applied to the cache.
    filtered: Vec<Item>,
    current_page: u32,
    load_state: LoadState,
    error: Option<String>,
}

impl CachedState {
    fn rederive(&mut self, page_size: u32) {
        self.filtered = self
            .cache
            .as_ref()
            .map(|entry| self.criteria.apply(&entry.items))
            .unwrap_or_default();
        let pages = total_pages(self.filtered.len() as u64, page_size);
        self.current_page = clamp_page(self.current_page, pages);
    }
}

/// Holds the entire catalog for the display language and answers every
/// filter or page change from memory.
///
/// Only a language change (or [`refetch`](Paginator::refetch)) goes to the
/// network. The cache is replaced wholesale, never patched.
pub struct CachedPaginator {
    client: Arc<dyn CatalogClientPort>,
    page_size: u32,
    guard: FetchGuard,
    state: Mutex<CachedState>,
}

impl CachedPaginator {
    pub fn new(
        client: Arc<dyn CatalogClientPort>,
        criteria: FilterCriteria,
        page_size: u32,
    ) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
            guard: FetchGuard::new(),
            state: Mutex::new(CachedState {
                criteria: criteria.normalized(),
                cache: None,
                filtered: Vec::new(),
                current_page: 1,
                load_state: LoadState::Idle,
                error: None,
            }),
        }
    }

    async fn fetch_catalog(&self) {
        if self.guard.is_disposed() {
            return;
        }

        let (ticket, language) = {
            let mut state = self.state.lock().await;
            state.load_state = LoadState::Loading;
            state.error = None;
            (self.guard.issue(), state.criteria.language)
        };

        let query = ItemQuery::new()
            .with_language(language)
            .minimal(true)
            .fetch_all(true);
        let Some(result) = self.guard.run(self.client.fetch_items(&query)).await else {
            return;
        };

        let mut state = self.state.lock().await;
        if !self.guard.accepts(ticket) {
            debug!(?ticket, %language, "Ignoring stale catalog response");
            return;
        }

        match result {
            Ok(page) => {
                debug!(%language, count = page.items.len(), "Catalog cached");
                state.cache = Some(CacheEntry {
                    language,
                    items: page.items,
                });
                state.load_state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, %language, "Catalog fetch failed");
                state.cache = None;
                state.error = Some(e.user_message());
                state.load_state = LoadState::Error;
            }
        }
        state.rederive(self.page_size);
    }

    /// Language of the cached catalog, if one is held.
    pub async fn cached_language(&self) -> Option<Language> {
        self.state.lock().await.cache.as_ref().map(|entry| entry.language)
    }
}

#[async_trait]
impl Paginator for CachedPaginator {
    fn kind(&self) -> PaginatorKind {
        PaginatorKind::Cached
    }

    async fn load(&self) {
        self.fetch_catalog().await;
    }

    async fn set_criteria(&self, criteria: FilterCriteria) {
        let criteria = criteria.normalized();
        let language_changed = {
            let mut state = self.state.lock().await;
            let language_changed = criteria.language != state.criteria.language;
            let content_changed = criteria.content_differs(&state.criteria);
            state.criteria = criteria;

            if language_changed {
                if let Some(old) = state.cache.take() {
                    debug!(
                        from = %old.language,
                        to = %state.criteria.language,
                        "Dropping cached catalog"
                    );
                }
            }
            if language_changed || content_changed {
                state.current_page = 1;
                state.rederive(self.page_size);
            }
            language_changed
        };

        if language_changed {
            self.fetch_catalog().await;
        }
    }

    async fn set_page(&self, page: u32) {
        let mut state = self.state.lock().await;
        let pages = total_pages(state.filtered.len() as u64, self.page_size);
        state.current_page = clamp_page(page, pages);
    }

    async fn refetch(&self) {
        self.fetch_catalog().await;
    }

    async fn view(&self) -> PageView {
        let state = self.state.lock().await;
        let pagination = PaginationInfo::for_total(
            state.filtered.len() as u64,
            self.page_size,
            state.current_page,
        );

        PageView {
            items: page_slice(&state.filtered, pagination.page, self.page_size),
            state: state.load_state,
            error: state.error.clone(),
            pagination: Some(pagination),
            current_page: pagination.page,
        }
    }

    fn dispose(&self) {
        self.guard.dispose();
    }
}

impl Drop for CachedPaginator {
    fn drop(&mut self) {
        self.guard.dispose();
    }
}
