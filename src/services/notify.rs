use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A dismissable, user-visible message (the toast equivalent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Where the feed reports recoverable problems. The rendering layer decides
/// how to show them.
pub trait NoticeSink: Send + Sync {
    fn push(&self, notice: Notice);
}

/// Default sink: collects notices in memory for the UI to drain.
#[derive(Default)]
pub struct NoticeLog {
    entries: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Removes and returns everything accumulated so far.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl NoticeSink for NoticeLog {
    fn push(&self, notice: Notice) {
        self.entries.lock().push(notice);
    }
}
