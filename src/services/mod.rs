mod debounce;
mod feed;
mod notify;
mod scroll;

pub use debounce::FilterDebouncer;
pub use feed::{Feed, FeedSnapshot, FetchOutcome};
pub use notify::{Notice, NoticeLevel, NoticeLog, NoticeSink};
pub use scroll::{ScrollTrigger, SentinelId, VisibilityObserver};
