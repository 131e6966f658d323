use std::collections::HashSet;
use std::sync::Arc;

use reqwest::Url;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::api::{ApiError, ReportsApi};
use crate::domain::filter::{Filter, FilterPatch};
use crate::domain::page::Page;
use crate::domain::report::Report;
use crate::services::notify::{Notice, NoticeSink};

/// Read-only projection handed to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub items: Vec<Report>,
    pub loading: bool,
    pub has_more: bool,
}

/// What a `request_page` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Page results appended to the current list.
    Appended(usize),
    /// Items replaced wholesale after a reset.
    Replaced(usize),
    /// Preconditions not met (fetch in flight, or terminal page); nothing
    /// was issued.
    Skipped,
    /// The response belonged to a superseded filter and was dropped.
    Discarded,
}

struct FeedState {
    items: Vec<Report>,
    seen: HashSet<i64>,
    loading: bool,
    has_more: bool,
    /// Continuation URL for the next page; `None` means "first page of the
    /// current filter".
    cursor: Option<String>,
    filter: Filter,
    /// Bumped on every reset. A fetch carries the generation it was issued
    /// under and its result only applies if the stamp still matches.
    generation: u64,
}

impl FeedState {
    fn fresh(filter: Filter, generation: u64) -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            loading: false,
            has_more: true,
            cursor: None,
            filter,
            generation,
        }
    }

    /// Appends a page's results in arrival order, skipping ids already in
    /// the list (overlapping pages happen when the server-side collection
    /// shifts between fetches). Returns how many items were added.
    fn append_page(&mut self, page: Page<Report>) -> usize {
        let mut added = 0;
        for report in page.results {
            if self.seen.insert(report.id) {
                self.items.push(report);
                added += 1;
            }
        }

        match page.next {
            Some(next) if Url::parse(&next).is_ok() => {
                self.cursor = Some(next);
                self.has_more = true;
            }
            Some(next) => {
                // A retry loop on a token we cannot follow risks hammering
                // the server; treat the feed as complete instead.
                warn!(next = %next, "malformed continuation token; treating feed as terminal");
                self.cursor = None;
                self.has_more = false;
            }
            None => {
                self.cursor = None;
                self.has_more = false;
            }
        }

        added
    }
}

/// The report feed: accumulates pages of reports for the active filter,
/// admits one fetch at a time, and discards responses that arrive after the
/// filter they were issued for has been superseded.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct Feed {
    api: Arc<dyn ReportsApi>,
    notices: Arc<dyn NoticeSink>,
    state: Arc<RwLock<FeedState>>,
}

impl Feed {
    pub fn new(api: Arc<dyn ReportsApi>, notices: Arc<dyn NoticeSink>) -> Self {
        Self::with_filter(api, notices, Filter::default())
    }

    pub fn with_filter(
        api: Arc<dyn ReportsApi>,
        notices: Arc<dyn NoticeSink>,
        filter: Filter,
    ) -> Self {
        Self {
            api,
            notices,
            state: Arc::new(RwLock::new(FeedState::fresh(filter, 0))),
        }
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.read().await;
        FeedSnapshot {
            items: state.items.clone(),
            loading: state.loading,
            has_more: state.has_more,
        }
    }

    pub async fn filter(&self) -> Filter {
        self.state.read().await.filter.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more
    }

    /// Applies a filter patch. Returns `true` when the resulting filter
    /// differs by value from the current one, in which case the feed was
    /// reset and any in-flight fetch invalidated; the caller follows up
    /// with `request_page(true)`. Equal filters are a no-op.
    pub async fn set_filter(&self, patch: &FilterPatch) -> bool {
        let mut state = self.state.write().await;
        let next = state.filter.apply_patch(patch);
        if next == state.filter {
            return false;
        }
        debug!(filter = ?next, "filter changed; resetting feed");
        let generation = state.generation + 1;
        *state = FeedState::fresh(next, generation);
        true
    }

    /// Fetches one page.
    ///
    /// With `is_reset` false this is the scroll path: a silent no-op while a
    /// fetch is in flight or after the terminal page, so duplicate
    /// scroll-triggered calls cannot double-fetch. With `is_reset` true the
    /// accumulated items are dropped and the first page of the current
    /// filter is fetched, superseding any outstanding request.
    ///
    /// Failures clear `loading`, leave the rest of the state untouched,
    /// record one user-visible notice, and propagate the error.
    pub async fn request_page(&self, is_reset: bool) -> Result<FetchOutcome, ApiError> {
        let (generation, locator) = {
            let mut state = self.state.write().await;
            if !is_reset && (state.loading || !state.has_more) {
                debug!(
                    loading = state.loading,
                    has_more = state.has_more,
                    "page request skipped"
                );
                return Ok(FetchOutcome::Skipped);
            }
            if is_reset {
                let generation = state.generation + 1;
                *state = FeedState::fresh(state.filter.clone(), generation);
            }
            state.loading = true;
            let locator = match &state.cursor {
                Some(next) => next.clone(),
                None => self.api.first_page_locator(&state.filter),
            };
            (state.generation, locator)
        };

        debug!(%locator, generation, is_reset, "fetching page");
        // Lock released while the request is outstanding: filter edits and
        // snapshot reads stay responsive.
        let result = self.api.fetch_page(&locator).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!(
                stamped = generation,
                current = state.generation,
                "discarding stale page response"
            );
            return Ok(FetchOutcome::Discarded);
        }

        match result {
            Ok(page) => {
                let added = state.append_page(page);
                state.loading = false;
                debug!(added, total = state.items.len(), has_more = state.has_more, "page applied");
                Ok(if is_reset {
                    FetchOutcome::Replaced(added)
                } else {
                    FetchOutcome::Appended(added)
                })
            }
            Err(err) => {
                state.loading = false;
                warn!(error = %err, "page fetch failed");
                self.notices
                    .push(Notice::error("Could not load reports. Please try again."));
                Err(err)
            }
        }
    }
}
