//! Pagination metadata and the page-bound guard.
//!
//! Every paginator routes page requests and total changes through
//! [`clamp_page`], so `1 <= page <= total_pages` holds after each transition.

use serde::{Deserialize, Serialize};

/// Items per page when the caller doesn't pick a size.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Page metadata as exchanged with the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// Current page (1-based).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total matching items.
    pub total: u64,
    /// Total pages, at least 1.
    pub total_pages: u32,
}

impl PaginationInfo {
    /// Metadata for a locally held collection of `total` items.
    ///
    /// The requested page is clamped into range.
    pub fn for_total(total: u64, page_size: u32, requested_page: u32) -> Self {
        let pages = total_pages(total, page_size);
        Self {
            page: clamp_page(requested_page, pages),
            limit: page_size.max(1),
            total,
            total_pages: pages,
        }
    }
}

/// `max(1, ceil(total / page_size))`.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    let pages = total.div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp a requested page into `[1, total_pages]`.
///
/// A `total_pages` of zero is treated as one.
pub const fn clamp_page(requested: u32, total_pages: u32) -> u32 {
    let upper = if total_pages == 0 { 1 } else { total_pages };
    let page = if requested < upper { requested } else { upper };
    if page == 0 { 1 } else { page }
}

/// Copy out the items of one 1-based page.
pub fn page_slice<T: Clone>(items: &[T], page: u32, page_size: u32) -> Vec<T> {
    let size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(size);
    items.iter().skip(start).take(size).cloned().collect()
}
