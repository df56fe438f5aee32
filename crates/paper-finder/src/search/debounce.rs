//! Debounced live search.
//!
//! Each trigger replaces the previous one: the pending timer is cleared and a
//! search already running for an older query is aborted, so only the outcome
//! of the latest query is ever delivered.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

type RunFn<T> = Arc<dyn Fn(String) -> BoxFuture<'static, T> + Send + Sync>;

/// Outcome of one debounced search.
#[derive(Debug)]
pub struct SearchUpdate<T> {
    /// Trigger sequence number; higher is newer.
    pub generation: u64,
    /// Query the search ran for.
    pub query: String,
    /// Search outcome.
    pub result: T,
}

/// Delays a search until the query stops changing.
pub struct Debouncer<T> {
    delay: Duration,
    run: RunFn<T>,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<SearchUpdate<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its updates arrive on.
    pub fn new<F, Fut>(delay: Duration, run: F) -> (Self, mpsc::UnboundedReceiver<SearchUpdate<T>>)
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let run: RunFn<T> =
            Arc::new(move |query| -> BoxFuture<'static, T> { Box::pin(run(query)) });

        let debouncer = Self {
            delay,
            run,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
            tx,
        };
        (debouncer, rx)
    }

    /// Schedule a search for `query`, superseding any earlier trigger.
    ///
    /// Returns the generation the eventual update will carry. Must be called
    /// from within a Tokio runtime.
    pub fn trigger(&mut self, query: impl Into<String>) -> u64 {
        let query = query.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_pending();

        let latest = Arc::clone(&self.generation);
        let run = Arc::clone(&self.run);
        let tx = self.tx.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(generation, query = %query, "Debounce elapsed, searching");

            let result = run(query.clone()).await;

            if latest.load(Ordering::SeqCst) == generation {
                // Receiver gone means nobody is listening any more.
                let _ = tx.send(SearchUpdate { generation, query, result });
            } else {
                debug!(generation, "Dropping superseded search result");
            }
        }));

        generation
    }

    /// Clear the pending timer and any in-flight search.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_pending();
    }

    /// Generation of the most recent trigger or cancel.
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a timer or search is still outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the outcome of the latest trigger, if it will ever arrive.
    ///
    /// Updates already queued are drained first, so a search that finished
    /// before the caller stopped listening is not lost. Stale generations are
    /// skipped. Returns `None` when the latest trigger was cancelled or no
    /// search is outstanding.
    pub async fn settle(
        &self,
        updates: &mut mpsc::UnboundedReceiver<SearchUpdate<T>>,
    ) -> Option<SearchUpdate<T>> {
        let current = self.current_generation();

        while let Ok(update) = updates.try_recv() {
            if update.generation == current {
                return Some(update);
            }
        }

        if !self.is_pending() {
            return None;
        }

        while let Some(update) = updates.recv().await {
            if update.generation == current {
                return Some(update);
            }
        }
        None
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

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}
