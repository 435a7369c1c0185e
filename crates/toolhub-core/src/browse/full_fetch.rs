//! Full-fetch strategy: one request per filter change, local paging.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::guard::FetchGuard;
use super::{LoadState, PageView, Paginator, PaginatorKind};
use crate::domain::{
    FilterCriteria, FilterKey, Item, PaginationInfo, clamp_page, page_slice, total_pages,
};
use crate::ports::{CatalogClientPort, ItemQuery};

struct FullFetchState {
    criteria: FilterCriteria,
    key: FilterKey,
    items: Vec<Item>,
    current_page: u32,
    load_state: LoadState,
    error: Option<String>,
}

impl FullFetchState {
    fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.items.len() as u64, page_size)
    }
}

/// Fetches the entire filtered result set whenever the filter key changes,
/// then pages purely in memory.
///
/// Page changes never touch the network. A new filter key supersedes any
/// fetch still in flight.
pub struct FullFetchPaginator {
    client: Arc<dyn CatalogClientPort>,
    page_size: u32,
    guard: FetchGuard,
    state: Mutex<FullFetchState>,
}

impl FullFetchPaginator {
    pub fn new(
        client: Arc<dyn CatalogClientPort>,
        criteria: FilterCriteria,
        page_size: u32,
    ) -> Self {
        let criteria = criteria.normalized();
        let key = criteria.key();
        Self {
            client,
            page_size: page_size.max(1),
            guard: FetchGuard::new(),
            state: Mutex::new(FullFetchState {
                criteria,
                key,
                items: Vec::new(),
                current_page: 1,
                load_state: LoadState::Idle,
                error: None,
            }),
        }
    }

    async fn fetch_all(&self) {
        if self.guard.is_disposed() {
            return;
        }

        let (ticket, query) = {
            let mut state = self.state.lock().await;
            state.load_state = LoadState::Loading;
            state.error = None;
            let query = ItemQuery::from_criteria(&state.criteria)
                .minimal(true)
                .fetch_all(true);
            (self.guard.issue(), query)
        };

        let Some(result) = self.guard.run(self.client.fetch_items(&query)).await else {
            return;
        };

        let mut state = self.state.lock().await;
        if !self.guard.accepts(ticket) {
            debug!(?ticket, "Ignoring stale full-fetch response");
            return;
        }

        match result {
            Ok(page) => {
                state.items = page.items;
                state.current_page = 1;
                state.load_state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                state.items.clear();
                state.error = Some(e.user_message());
                state.load_state = LoadState::Error;
            }
        }

        let pages = state.total_pages(self.page_size);
        state.current_page = clamp_page(state.current_page, pages);
    }
}

#[async_trait]
impl Paginator for FullFetchPaginator {
    fn kind(&self) -> PaginatorKind {
        PaginatorKind::FullFetch
    }

    async fn load(&self) {
        self.fetch_all().await;
    }

    async fn set_criteria(&self, criteria: FilterCriteria) {
        let criteria = criteria.normalized();
        {
            let mut state = self.state.lock().await;
            let key = criteria.key();
            state.criteria = criteria;
            if key == state.key {
                return;
            }
            state.key = key;
        }
        self.fetch_all().await;
    }

    async fn set_page(&self, page: u32) {
        let mut state = self.state.lock().await;
        let pages = state.total_pages(self.page_size);
        state.current_page = clamp_page(page, pages);
    }

    async fn refetch(&self) {
        self.fetch_all().await;
    }

    async fn view(&self) -> PageView {
        let state = self.state.lock().await;
        let pagination =
            PaginationInfo::for_total(state.items.len() as u64, self.page_size, state.current_page);

        PageView {
            items: page_slice(&state.items, pagination.page, self.page_size),
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

impl Drop for FullFetchPaginator {
    fn drop(&mut self) {
        self.guard.dispose();
    }
}
