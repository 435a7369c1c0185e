//! Debounced value propagation.
//!
//! A [`Debouncer`] holds back a rapidly changing value until it has been
//! stable for a fixed delay, then publishes it on a `watch` channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Delays propagation of a value until it stops changing.
///
/// Each [`set`](Self::set) restarts the timer. Subscribers only observe
/// values that survived a full delay, and only when they differ from the
/// last published one. Cancelling (or dropping) the debouncer aborts the
/// pending timer, so nothing is published after disposal.
///
/// `set` spawns onto the current tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    output: Arc<watch::Sender<T>>,
    pending: Option<JoinHandle<()>>,
    cancel: CancellationToken,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a debouncer whose published value starts at `initial`.
    pub fn new(initial: T, delay: Duration) -> Self {
        Self::with_cancellation(initial, delay, CancellationToken::new())
    }

    /// Create a debouncer that goes quiet once `cancel` fires.
    pub fn with_cancellation(initial: T, delay: Duration, cancel: CancellationToken) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            delay,
            output: Arc::new(tx),
            pending: None,
            cancel,
        }
    }

    /// Feed a new input value, restarting the timer.
    pub fn set(&mut self, value: T) {
        self.abort_pending();
        if self.cancel.is_cancelled() {
            return;
        }

        let output = Arc::clone(&self.output);
        let cancel = self.cancel.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    output.send_if_modified(|current| {
                        if *current == value {
                            false
                        } else {
                            *current = value;
                            true
                        }
                    });
                }
            }
        }));
    }

    /// Subscribe to published values.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.subscribe()
    }

    /// The last published value.
    pub fn value(&self) -> T {
        self.output.borrow().clone()
    }

    /// True while a timer is waiting to publish.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop for good: abort the pending timer and ignore later input.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.abort_pending();
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
