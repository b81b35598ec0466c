//! Notifier that forwards notices to `tracing`.

use crate::agreement::ports::{Notice, NoticeId, NoticeLevel, Notifier};
use std::sync::atomic::{AtomicU64, Ordering};

/// Notifier for headless use: every notice becomes a log event.
#[derive(Debug, Default)]
pub struct TracingNotifier {
    next_id: AtomicU64,
}

impl TracingNotifier {
    /// Creates a notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
        }
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) -> NoticeId {
        let id = NoticeId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => {
                tracing::info!(notice_id = %id, message = %notice.message, "notice");
            }
            NoticeLevel::Error => {
                tracing::warn!(notice_id = %id, message = %notice.message, "notice");
            }
        }
        id
    }

    fn dismiss(&self, id: NoticeId) {
        tracing::debug!(notice_id = %id, "notice dismissed");
    }
}
