use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::filter::FilterPatch;
use crate::services::feed::Feed;

/// Coalesces rapid filter edits (fast typing in the search box) into a
/// single reset fetch: each edit restarts a trailing-edge settle window,
/// and only the edit that survives the window commits. Superseded edits
/// never reach the network.
pub struct FilterDebouncer {
    feed: Feed,
    settle_delay: Duration,
    edit_seq: Arc<AtomicU64>,
    pending: Arc<Mutex<FilterPatch>>,
}

impl FilterDebouncer {
    pub fn new(feed: Feed, settle_delay: Duration) -> Self {
        Self {
            feed,
            settle_delay,
            edit_seq: Arc::new(AtomicU64::new(0)),
            pending: Arc::new(Mutex::new(FilterPatch::default())),
        }
    }

    /// Records one edit and schedules its commit after the settle delay.
    /// A newer edit inside the window supersedes this one; the patches are
    /// still merged, so nothing typed is lost.
    pub fn submit(&self, patch: FilterPatch) {
        // Merge before spawning: edit order must be the caller's call
        // order, never the scheduler's.
        self.pending.lock().merge(patch);

        let stamp = self.edit_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let feed = self.feed.clone();
        let edit_seq = self.edit_seq.clone();
        let pending = self.pending.clone();
        let settle_delay = self.settle_delay;

        tokio::spawn(async move {
            tokio::time::sleep(settle_delay).await;
            if edit_seq.load(Ordering::SeqCst) != stamp {
                // A newer edit owns the window now.
                return;
            }

            let merged = std::mem::take(&mut *pending.lock());
            if merged == FilterPatch::default() {
                return;
            }
            if feed.set_filter(&merged).await {
                if let Err(err) = feed.request_page(true).await {
                    debug!(error = %err, "settled filter fetch failed");
                }
            }
        });
    }
}
