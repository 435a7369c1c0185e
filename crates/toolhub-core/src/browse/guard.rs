//! Fetch tickets and disposal for paginators.
//!
//! Every fetch a paginator issues gets a ticket from a monotonically
//! increasing counter. A response is only committed if its ticket is still
//! the latest one and the paginator hasn't been disposed.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

/// Sequence number of one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

/// Per-paginator generation counter plus disposal token.
#[derive(Debug, Default)]
pub struct FetchGuard {
    latest: AtomicU64,
    cancel: CancellationToken,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one.
    pub fn issue(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True if `ticket` is the newest issued and the owner is still alive.
    pub fn accepts(&self, ticket: FetchTicket) -> bool {
        !self.cancel.is_cancelled() && self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Drive `fut` unless the owner is disposed first.
    ///
    /// Returns `None` when disposal wins; the future is dropped.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => None,
            output = fut => Some(output),
        }
    }

    /// Token that fires on disposal, for background tasks.
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn dispose(&self) {
        self.cancel.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
