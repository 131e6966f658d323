use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::services::feed::Feed;

/// Identity of the sentinel marker the rendering layer places at the end of
/// the list. The trigger re-subscribes whenever this changes.
pub type SentinelId = u64;

/// Viewport-intersection capability supplied by the platform. Abstracted so
/// the trigger can be tested without a real rendering surface.
pub trait VisibilityObserver: Send + Sync {
    /// Start watching `sentinel`; `on_visible` fires every time it enters
    /// the viewport.
    fn observe(&self, sentinel: SentinelId, on_visible: Box<dyn Fn() + Send + Sync>);

    fn unobserve(&self, sentinel: SentinelId);
}

/// Bridges sentinel visibility to `Feed::request_page(false)`. The feed's
/// own loading/terminal guard makes duplicate visibility events silent
/// no-ops, so no extra rate limiting lives here.
pub struct ScrollTrigger {
    feed: Feed,
    observer: Arc<dyn VisibilityObserver>,
    sentinel: Mutex<Option<SentinelId>>,
}

impl ScrollTrigger {
    pub fn new(feed: Feed, observer: Arc<dyn VisibilityObserver>) -> Self {
        Self {
            feed,
            observer,
            sentinel: Mutex::new(None),
        }
    }

    /// (Re)binds the trigger to a sentinel. The previous subscription, if
    /// any, is released first.
    pub fn attach(&self, sentinel: SentinelId) {
        let mut current = self.sentinel.lock();
        if let Some(old) = current.take() {
            self.observer.unobserve(old);
        }

        let feed = self.feed.clone();
        self.observer.observe(
            sentinel,
            Box::new(move || {
                let feed = feed.clone();
                tokio::spawn(async move {
                    if !feed.has_more().await || feed.is_loading().await {
                        return;
                    }
                    if let Err(err) = feed.request_page(false).await {
                        // Already surfaced to the user through the notice
                        // sink; the scroll path just logs it.
                        debug!(error = %err, "scroll-triggered fetch failed");
                    }
                });
            }),
        );
        *current = Some(sentinel);
    }

    /// Releases the current subscription, if any.
    pub fn detach(&self) {
        if let Some(old) = self.sentinel.lock().take() {
            self.observer.unobserve(old);
        }
    }
}

impl Drop for ScrollTrigger {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::api::{ApiError, ReportsApi};
    use crate::domain::filter::Filter;
    use crate::domain::page::Page;
    use crate::domain::report::Report;
    use crate::services::notify::NoticeLog;

    /// Observer fake that lets tests fire visibility events by hand.
    #[derive(Default)]
    struct FakeObserver {
        callbacks: Mutex<HashMap<SentinelId, Box<dyn Fn() + Send + Sync>>>,
        unobserved: Mutex<Vec<SentinelId>>,
    }

    impl FakeObserver {
        fn fire(&self, sentinel: SentinelId) {
            if let Some(callback) = self.callbacks.lock().get(&sentinel) {
                callback();
            }
        }

        fn observed(&self) -> Vec<SentinelId> {
            self.callbacks.lock().keys().copied().collect()
        }
    }

    impl VisibilityObserver for FakeObserver {
        fn observe(&self, sentinel: SentinelId, on_visible: Box<dyn Fn() + Send + Sync>) {
            self.callbacks.lock().insert(sentinel, on_visible);
        }

        fn unobserve(&self, sentinel: SentinelId) {
            self.callbacks.lock().remove(&sentinel);
            self.unobserved.lock().push(sentinel);
        }
    }

    struct EmptyApi;

    #[async_trait]
    impl ReportsApi for EmptyApi {
        fn first_page_locator(&self, _filter: &Filter) -> String {
            "https://api.example.edu/api/reports/".to_string()
        }

        async fn fetch_page(&self, _locator: &str) -> Result<Page<Report>, ApiError> {
            Ok(Page::terminal(Vec::new()))
        }
    }

    fn feed() -> Feed {
        Feed::new(Arc::new(EmptyApi), NoticeLog::new())
    }

    #[tokio::test]
    async fn test_attach_resubscribes_on_sentinel_change() {
        let observer = Arc::new(FakeObserver::default());
        let trigger = ScrollTrigger::new(feed(), observer.clone());

        trigger.attach(1);
        assert_eq!(observer.observed(), vec![1]);

        trigger.attach(2);
        assert_eq!(observer.observed(), vec![2]);
        assert_eq!(*observer.unobserved.lock(), vec![1]);
    }

    #[tokio::test]
    async fn test_drop_releases_the_subscription() {
        let observer = Arc::new(FakeObserver::default());
        {
            let trigger = ScrollTrigger::new(feed(), observer.clone());
            trigger.attach(7);
        }
        assert!(observer.observed().is_empty());
        assert_eq!(*observer.unobserved.lock(), vec![7]);
    }

    #[tokio::test]
    async fn test_visibility_requests_the_next_page() {
        let observer = Arc::new(FakeObserver::default());
        let feed = feed();
        let trigger = ScrollTrigger::new(feed.clone(), observer.clone());
        trigger.attach(1);

        observer.fire(1);
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        // The empty terminal page flips the feed to terminal.
        assert!(!feed.has_more().await);

        // Firing again after the terminal page is a silent no-op.
        observer.fire(1);
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!feed.has_more().await);
    }
}
