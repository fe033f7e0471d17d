//! Infinite-scroll consumption state machine.
//!
//! [`InfiniteFeed`] buffers pages fetched through a [`PageSource`] and
//! flattens them into one ordered view. State transitions:
//!
//! ```text
//! Idle -> Loading -> Ready <-> Ready (+1 page, via fetch_next_page)
//!            |
//!            v
//!          Failed          (first-page failure after retries)
//! ```
//!
//! A proximity signal ([`notify_sentinel_visible`](InfiniteFeed::notify_sentinel_visible))
//! is ignored while a fetch is in flight or when the last page said there
//! is nothing more, so two rapid signals can never race two appends. Any
//! successful mutation must [`invalidate`](InfiniteFeed::invalidate) the
//! feed; the generation token guarantees a fetch that completes after an
//! invalidation can never overwrite newer state.

use tokio::sync::Mutex;

use cinelog_core::entry::Entry;
use cinelog_core::pagination::Page;

use crate::error::ClientError;
use crate::retry::{with_retries, RetryConfig};
use crate::source::PageSource;

/// Consumption lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// No data yet and nothing in flight.
    Idle,
    /// First page in flight.
    Loading,
    /// At least one page loaded.
    Ready,
    /// The first page failed after retries were exhausted.
    Failed,
}

struct FeedState {
    pages: Vec<Page>,
    status: FeedStatus,
    is_fetching_next: bool,
    /// Bumped by every invalidation; a completing fetch whose captured
    /// generation no longer matches discards its result.
    generation: u64,
    last_error: Option<ClientError>,
}

impl FeedState {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            status: FeedStatus::Idle,
            is_fetching_next: false,
            generation: 0,
            last_error: None,
        }
    }

    fn next_cursor(&self) -> Option<String> {
        self.pages
            .last()
            .filter(|page| page.has_more)
            .and_then(|page| page.next_cursor.clone())
    }
}

/// Accumulates pages and decides when to request the next one.
pub struct InfiniteFeed<S> {
    source: S,
    limit: Option<i64>,
    retry: RetryConfig,
    state: Mutex<FeedState>,
}

impl<S: PageSource> InfiniteFeed<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            limit: None,
            retry: RetryConfig::default(),
            state: Mutex::new(FeedState::new()),
        }
    }

    /// Request pages of a specific size instead of the server default.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    // -- Accessors ---------------------------------------------------------

    pub async fn status(&self) -> FeedStatus {
        self.state.lock().await.status
    }

    /// All buffered pages flattened into one ordered sequence.
    pub async fn entries(&self) -> Vec<Entry> {
        let state = self.state.lock().await;
        state
            .pages
            .iter()
            .flat_map(|page| page.data.iter().cloned())
            .collect()
    }

    /// Whether the last loaded page announced more data.
    pub async fn has_next_page(&self) -> bool {
        self.state.lock().await.next_cursor().is_some()
    }

    pub async fn is_fetching_next_page(&self) -> bool {
        self.state.lock().await.is_fetching_next
    }

    /// The most recent fetch failure, if any. Cleared by invalidation.
    pub async fn last_error(&self) -> Option<ClientError> {
        self.state.lock().await.last_error.clone()
    }

    // -- Transitions -------------------------------------------------------

    /// Load the first page. No-op when already loading or loaded; from
    /// `Failed` this is the retry path.
    pub async fn load_first_page(&self) -> Result<(), ClientError> {
        let generation = {
            let mut state = self.state.lock().await;
            match state.status {
                FeedStatus::Loading | FeedStatus::Ready => return Ok(()),
                FeedStatus::Idle | FeedStatus::Failed => {}
            }
            state.status = FeedStatus::Loading;
            state.last_error = None;
            state.generation
        };

        let result = with_retries(&self.retry, || self.source.fetch_page(None, self.limit)).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            // Invalidated while in flight; this result describes a dead
            // traversal and must not overwrite newer state.
            tracing::debug!("Discarding stale first page");
            return Ok(());
        }

        match result {
            Ok(page) => {
                state.pages = vec![page];
                state.status = FeedStatus::Ready;
                Ok(())
            }
            Err(err) => {
                state.status = FeedStatus::Failed;
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Fetch and append the next page.
    ///
    /// Returns `Ok(false)` when the guard suppressed the fetch (not ready,
    /// already fetching, or nothing more to load), `Ok(true)` when a page
    /// was appended. A failure is recorded in `last_error` and does not
    /// roll back already-loaded pages.
    pub async fn fetch_next_page(&self) -> Result<bool, ClientError> {
        let (cursor, generation) = {
            let mut state = self.state.lock().await;
            if state.status != FeedStatus::Ready || state.is_fetching_next {
                return Ok(false);
            }
            let Some(cursor) = state.next_cursor() else {
                return Ok(false);
            };
            state.is_fetching_next = true;
            (cursor, state.generation)
        };

        let result = with_retries(&self.retry, || {
            self.source.fetch_page(Some(cursor.clone()), self.limit)
        })
        .await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            // The in-flight flag was already reset by the invalidation.
            tracing::debug!("Discarding stale page");
            return Ok(false);
        }
        state.is_fetching_next = false;

        match result {
            Ok(page) => {
                state.pages.push(page);
                Ok(true)
            }
            Err(err) => {
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Proximity signal: the scroll sentinel became visible.
    ///
    /// Returns whether a fetch was actually triggered. Fetch failures are
    /// recorded in `last_error` rather than propagated, matching how a
    /// scroll event has no caller to report to.
    pub async fn notify_sentinel_visible(&self) -> bool {
        match self.fetch_next_page().await {
            Ok(triggered) => triggered,
            Err(_) => true,
        }
    }

    /// Discard all buffered pages and return to `Idle`.
    ///
    /// Called after every successful create/update/delete: patching pages
    /// in place would have to reconcile cursor offsets the mutation just
    /// invalidated.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.pages.clear();
        state.status = FeedStatus::Idle;
        state.is_fetching_next = false;
        state.last_error = None;
    }

    /// Invalidate and immediately reload the first page.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        self.invalidate().await;
        self.load_first_page().await
    }
}
