//! In-memory catalog for paginator tests.
//!
//! Emulates the server: filters with the same rules as the real API,
//! honors `all`, pages otherwise, and records every query it receives.
//! Individual calls can be made to fail or to block until released.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::domain::{
    Category, FilterCriteria, HealthStatus, Item, Language, PaginationInfo, page_slice,
    total_pages,
};
use crate::ports::{CatalogClientPort, CatalogError, CatalogResult, ItemPage, ItemQuery};

#[derive(Default)]
pub struct FakeCatalog {
    catalogs: HashMap<Language, Vec<Item>>,
    queries: Mutex<Vec<ItemQuery>>,
    failures: Mutex<VecDeque<CatalogError>>,
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(language: Language, items: Vec<Item>) -> Self {
        Self::new().and_items(language, items)
    }

    pub fn and_items(mut self, language: Language, items: Vec<Item>) -> Self {
        self.catalogs.insert(language, items);
        self
    }

    /// Items with ids `1..=count`, all in category `general`.
    pub fn numbered(count: usize) -> Vec<Item> {
        (1..=count)
            .map(|i| Item::new(i.to_string(), format!("Tool {i}"), "general"))
            .collect()
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: CatalogError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Make the next call block until the returned sender fires.
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn queries(&self) -> Vec<ItemQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn serve(&self, query: &ItemQuery) -> ItemPage {
        let language = query.language.unwrap_or_default();
        let all_items = self.catalogs.get(&language).cloned().unwrap_or_default();

        let criteria = FilterCriteria {
            category: query.category.clone(),
            tags: query.tags.clone(),
            search: query.search.clone(),
            language,
        };
        let matched = criteria.apply(&all_items);
        let total = matched.len() as u64;

        if query.is_fetch_all() {
            let pagination = PaginationInfo {
                page: 1,
                limit: u32::try_from(total).unwrap_or(u32::MAX),
                total,
                total_pages: 1,
            };
            return ItemPage::new(matched, Some(pagination));
        }

        let limit = query.limit.unwrap_or(12);
        let page = query.page.unwrap_or(1);
        let pagination = PaginationInfo {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        };
        ItemPage::new(page_slice(&matched, page, limit), Some(pagination))
    }
}

#[async_trait]
impl CatalogClientPort for FakeCatalog {
    async fn fetch_items(&self, query: &ItemQuery) -> CatalogResult<ItemPage> {
        self.queries.lock().unwrap().push(query.clone());

        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let failure = self.failures.lock().unwrap().pop_front();
        if let Some(error) = failure {
            return Err(error);
        }

        Ok(self.serve(query))
    }

    async fn fetch_item(&self, identifier: &str, language: Language) -> CatalogResult<Item> {
        self.catalogs
            .get(&language)
            .and_then(|items| items.iter().find(|i| i.identifier() == identifier))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                identifier: identifier.to_string(),
            })
    }

    async fn fetch_related(
        &self,
        _identifier: &str,
        _language: Language,
        _limit: u32,
    ) -> CatalogResult<Vec<Item>> {
        Ok(Vec::new())
    }

    async fn fetch_categories(&self, _language: Language) -> CatalogResult<Vec<Category>> {
        Ok(Vec::new())
    }

    async fn health(&self) -> CatalogResult<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            database: None,
        })
    }
}
