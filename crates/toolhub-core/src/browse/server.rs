//! Server strategy: one request per page, debounced search.

use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::guard::FetchGuard;
use super::{LoadState, PageView, Paginator, PaginatorKind};
use crate::domain::{FilterCriteria, Item, PaginationInfo, clamp_page};
use crate::ports::{CatalogClientPort, ItemQuery};
use crate::utils::Debouncer;

struct ServerState {
    /// Latest criteria as given, including the not-yet-applied search text.
    criteria: FilterCriteria,
    /// Search value that reached the server.
    applied_search: Option<String>,
    search: Debouncer<Option<String>>,
    /// Handed to the listener task on first load.
    search_rx: Option<watch::Receiver<Option<String>>>,
    items: Vec<Item>,
    /// Last metadata the server sent.
    pagination: Option<PaginationInfo>,
    current_page: u32,
    load_state: LoadState,
    error: Option<String>,
}

impl ServerState {
    fn known_total_pages(&self) -> u32 {
        self.pagination.map_or(1, |p| p.total_pages)
    }

    fn query(&self, page_size: u32) -> ItemQuery {
        ItemQuery::from_criteria(&self.criteria)
            .with_search(self.applied_search.clone())
            .with_page(self.current_page)
            .with_limit(page_size)
            .minimal(true)
    }
}

struct Inner {
    client: Arc<dyn CatalogClientPort>,
    page_size: u32,
    guard: FetchGuard,
    state: Mutex<ServerState>,
}

impl Inner {
    /// Fetch the current page and commit it.
    ///
    /// If the response shrinks `totalPages` below the current page, the page
    /// is clamped and fetched once more.
    async fn fetch_current(&self) {
        let mut reclamped = false;

        loop {
            if self.guard.is_disposed() {
                return;
            }

            let (ticket, query) = {
                let mut state = self.state.lock().await;
                state.load_state = LoadState::Loading;
                state.error = None;
                (self.guard.issue(), state.query(self.page_size))
            };

            let Some(result) = self.guard.run(self.client.fetch_items(&query)).await else {
                return;
            };

            let mut state = self.state.lock().await;
            if !self.guard.accepts(ticket) {
                debug!(?ticket, page = ?query.page, "Ignoring stale page response");
                return;
            }

            match result {
                Ok(page) => {
                    state.items = page.items;
                    if page.pagination.is_some() {
                        state.pagination = page.pagination;
                    }
                    state.load_state = LoadState::Ready;

                    let clamped = clamp_page(state.current_page, state.known_total_pages());
                    if clamped != state.current_page {
                        debug!(
                            from = state.current_page,
                            to = clamped,
                            "Page out of range after fetch"
                        );
                        state.current_page = clamped;
                        if !reclamped {
                            reclamped = true;
                            continue;
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, page = state.current_page, "Catalog page fetch failed");
                    state.items.clear();
                    state.error = Some(e.user_message());
                    state.load_state = LoadState::Error;
                }
            }
            return;
        }
    }

    async fn apply_search(&self, search: Option<String>) {
        {
            let mut state = self.state.lock().await;
            if state.applied_search == search {
                return;
            }
            debug!(?search, "Applying debounced search");
            state.applied_search = search;
            state.current_page = 1;
        }
        self.fetch_current().await;
    }
}

/// Waits for debounced search values and applies them until disposal.
async fn listen_for_search(
    inner: Weak<Inner>,
    mut rx: watch::Receiver<Option<String>>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let search = rx.borrow_and_update().clone();
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                inner.apply_search(search).await;
            }
        }
    }
}

/// Asks the server for one page at a time.
///
/// Category, tag and language changes reset to page 1 and fetch right
/// away. Search text goes through a [`Debouncer`] first, so a burst of
/// keystrokes costs one request. Page bounds come from the last
/// `totalPages` the server reported.
pub struct ServerPaginator {
    inner: Arc<Inner>,
}

impl ServerPaginator {
    pub fn new(
        client: Arc<dyn CatalogClientPort>,
        criteria: FilterCriteria,
        page_size: u32,
        search_debounce: Duration,
    ) -> Self {
        let criteria = criteria.normalized();
        let guard = FetchGuard::new();
        let search = Debouncer::with_cancellation(
            criteria.search.clone(),
            search_debounce,
            guard.token(),
        );
        let search_rx = Some(search.subscribe());

        Self {
            inner: Arc::new(Inner {
                client,
                page_size: page_size.max(1),
                guard,
                state: Mutex::new(ServerState {
                    applied_search: criteria.search.clone(),
                    criteria,
                    search,
                    search_rx,
                    items: Vec::new(),
                    pagination: None,
                    current_page: 1,
                    load_state: LoadState::Idle,
                    error: None,
                }),
            }),
        }
    }
}

#[async_trait]
impl Paginator for ServerPaginator {
    fn kind(&self) -> PaginatorKind {
        PaginatorKind::Server
    }

    async fn load(&self) {
        if self.inner.guard.is_disposed() {
            return;
        }

        let rx = self.inner.state.lock().await.search_rx.take();
        if let Some(rx) = rx {
            tokio::spawn(listen_for_search(
                Arc::downgrade(&self.inner),
                rx,
                self.inner.guard.token(),
            ));
        }

        self.inner.state.lock().await.current_page = 1;
        self.inner.fetch_current().await;
    }

    async fn set_criteria(&self, criteria: FilterCriteria) {
        let criteria = criteria.normalized();
        let fetch_now = {
            let mut state = self.inner.state.lock().await;
            let (old, new) = (state.criteria.key(), criteria.key());
            let immediate = old.category != new.category
                || old.tags != new.tags
                || old.language != new.language;

            if old.search != new.search {
                state.search.set(criteria.search.clone());
            }
            state.criteria = criteria;
            if immediate {
                state.current_page = 1;
            }
            immediate
        };

        if fetch_now {
            self.inner.fetch_current().await;
        }
    }

    async fn set_page(&self, page: u32) {
        {
            let mut state = self.inner.state.lock().await;
            let target = clamp_page(page, state.known_total_pages());
            if target == state.current_page {
                return;
            }
            state.current_page = target;
        }
        self.inner.fetch_current().await;
    }

    async fn refetch(&self) {
        self.inner.fetch_current().await;
    }

    async fn view(&self) -> PageView {
        let state = self.inner.state.lock().await;
        PageView {
            items: state.items.clone(),
            state: state.load_state,
            error: state.error.clone(),
            pagination: state.pagination,
            current_page: state.current_page,
        }
    }

    fn dispose(&self) {
        self.inner.guard.dispose();
        if let Ok(mut state) = self.inner.state.try_lock() {
            state.search.cancel();
        }
    }
}

impl Drop for ServerPaginator {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::testing::FakeCatalog;
    use crate::domain::Language;
    use crate::ports::{CatalogError, ItemPage, MockCatalogClientPort};
    use tokio::time::sleep;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn paginator(fake: &Arc<FakeCatalog>) -> ServerPaginator {
        ServerPaginator::new(
            Arc::clone(fake) as Arc<dyn CatalogClientPort>,
            FilterCriteria::new(Language::En),
            12,
            DEBOUNCE,
        )
    }

    fn catalog() -> Vec<Item> {
        let mut items = FakeCatalog::numbered(30);
        items.push(Item::new("abc", "Abc Studio", "design"));
        items.push(Item::new("abd", "Abd Writer", "writing"));
        items
    }

    #[tokio::test]
    async fn test_load_fetches_first_page() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = paginator(&fake);
        p.load().await;

        let query = &fake.queries()[0];
        assert_eq!(query.page, Some(1));
        assert_eq!(query.limit, Some(12));
        assert!(!query.is_fetch_all());

        let view = p.view().await;
        assert_eq!(view.items.len(), 12);
        assert_eq!(view.pagination.unwrap().total_pages, 3);
    }

    #[tokio::test]
    async fn test_page_change_fetches_that_page() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = paginator(&fake);
        p.load().await;

        p.set_page(2).await;
        assert_eq!(fake.queries()[1].page, Some(2));
        assert_eq!(p.view().await.items[0].id, "13");

        p.set_page(1).await;
        assert_eq!(fake.queries()[2].page, Some(1));
        assert_eq!(p.view().await.items[0].id, "1");
    }

    #[tokio::test]
    async fn test_setting_current_page_is_free() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = paginator(&fake);
        p.load().await;
        p.set_page(2).await;

        p.set_page(2).await;
        p.set_page(2).await;
        assert_eq!(fake.call_count(), 2);
    }

    #[tokio::test]
    async fn test_page_clamped_to_known_total() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = paginator(&fake);

        p.set_page(4).await;
        assert_eq!(fake.call_count(), 0);

        p.load().await;
        p.set_page(9).await;
        assert_eq!(fake.queries()[1].page, Some(3));
        assert_eq!(p.view().await.current_page, 3);
    }

    #[tokio::test]
    async fn test_category_change_resets_page_without_debounce() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = paginator(&fake);
        p.load().await;
        p.set_page(3).await;

        p.set_criteria(FilterCriteria::new(Language::En).with_category("writing"))
            .await;

        let query = &fake.queries()[2];
        assert_eq!(query.page, Some(1));
        assert_eq!(query.category.as_deref(), Some("writing"));
        let view = p.view().await;
        assert_eq!(view.current_page, 1);
        assert_eq!(view.items.len(), 1);
    }

    #[tokio::test]
    async fn test_shrinking_total_reclamps_once() {
        let mut mock = MockCatalogClientPort::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_fetch_items()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(ItemPage::new(
                    FakeCatalog::numbered(12),
                    Some(PaginationInfo { page: 1, limit: 12, total: 40, total_pages: 4 }),
                ))
            });
        mock.expect_fetch_items()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|q| q.page == Some(4))
            .returning(|_| {
                Ok(ItemPage::new(
                    Vec::new(),
                    Some(PaginationInfo { page: 4, limit: 12, total: 14, total_pages: 2 }),
                ))
            });
        mock.expect_fetch_items()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|q| q.page == Some(2))
            .returning(|_| {
                Ok(ItemPage::new(
                    FakeCatalog::numbered(2),
                    Some(PaginationInfo { page: 2, limit: 12, total: 14, total_pages: 2 }),
                ))
            });

        let r = ServerPaginator::new(
            Arc::new(mock),
            FilterCriteria::new(Language::En),
            12,
            DEBOUNCE,
        );
        r.load().await;
        r.set_page(4).await;

        let view = r.view().await;
        assert_eq!(view.current_page, 2);
        assert_eq!(view.items.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_pagination_keeps_previous() {
        let mut mock = MockCatalogClientPort::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_fetch_items()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(ItemPage::new(
                    FakeCatalog::numbered(12),
                    Some(PaginationInfo { page: 1, limit: 12, total: 30, total_pages: 3 }),
                ))
            });
        mock.expect_fetch_items()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ItemPage::new(FakeCatalog::numbered(12), None)));

        let p = ServerPaginator::new(
            Arc::new(mock),
            FilterCriteria::new(Language::En),
            12,
            DEBOUNCE,
        );
        p.load().await;
        p.set_page(2).await;

        let view = p.view().await;
        assert_eq!(view.current_page, 2);
        assert_eq!(view.pagination.unwrap().total_pages, 3);
    }

    #[tokio::test]
    async fn test_application_error_surfaces_message() {
        let mut mock = MockCatalogClientPort::new();
        mock.expect_fetch_items().returning(|_| {
            Err(CatalogError::Application {
                message: "boom".to_string(),
            })
        });

        let p = ServerPaginator::new(
            Arc::new(mock),
            FilterCriteria::new(Language::En),
            12,
            DEBOUNCE,
        );
        p.load().await;

        let view = p.view().await;
        assert_eq!(view.error.as_deref(), Some("boom"));
        assert_eq!(view.state, LoadState::Error);
        assert!(view.items.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_burst_costs_one_request() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = paginator(&fake);
        p.load().await;

        for text in ["a", "ab", "abc"] {
            p.set_criteria(FilterCriteria::new(Language::En).with_search(text))
                .await;
            sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(fake.call_count(), 1);

        sleep(Duration::from_millis(400)).await;

        let queries = fake.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].search.as_deref(), Some("abc"));
        assert_eq!(queries[1].page, Some(1));

        let ids: Vec<_> = p.view().await.items.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, ["abc"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_resets_page() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = paginator(&fake);
        p.load().await;
        p.set_page(2).await;

        p.set_criteria(FilterCriteria::new(Language::En).with_search("ab"))
            .await;
        sleep(Duration::from_millis(400)).await;

        let view = p.view().await;
        assert_eq!(view.current_page, 1);
        assert_eq!(view.items.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_reverted_within_window_does_not_fetch() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = paginator(&fake);
        p.load().await;

        p.set_criteria(FilterCriteria::new(Language::En).with_search("a"))
            .await;
        sleep(Duration::from_millis(100)).await;
        p.set_criteria(FilterCriteria::new(Language::En)).await;
        sleep(Duration::from_millis(400)).await;

        assert_eq!(fake.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_deserialized_filters_send_no_params() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = paginator(&fake);
        p.load().await;

        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"category":"","tags":[""],"search":"","language":"en"}"#,
        )
        .unwrap();
        p.set_criteria(criteria).await;
        sleep(Duration::from_millis(400)).await;

        assert_eq!(fake.call_count(), 1);
        let query = &fake.queries()[0];
        assert!(query.category.is_none());
        assert!(query.search.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_cancels_pending_search() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = paginator(&fake);
        p.load().await;

        p.set_criteria(FilterCriteria::new(Language::En).with_search("abc"))
            .await;
        p.dispose();
        sleep(Duration::from_millis(400)).await;

        assert_eq!(fake.call_count(), 1);
        p.set_page(2).await;
        assert_eq!(fake.call_count(), 1);
    }

    #[tokio::test]
    async fn test_stale_page_response_is_discarded() {
        let fake = Arc::new(FakeCatalog::with_items(Language::En, catalog()));
        let p = Arc::new(paginator(&fake));
        p.load().await;

        let release = fake.hold_next();
        let slow = {
            let p = Arc::clone(&p);
            tokio::spawn(async move { p.set_page(3).await })
        };
        while fake.call_count() < 2 {
            tokio::task::yield_now().await;
        }

        p.set_criteria(FilterCriteria::new(Language::En).with_category("design"))
            .await;
        release.send(()).unwrap();
        slow.await.unwrap();

        let view = p.view().await;
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].id, "abc");
        assert_eq!(view.current_page, 1);
    }
}
