//! Notifier that keeps notices in memory.

use crate::agreement::ports::{Notice, NoticeId, NoticeLevel, Notifier};
use std::sync::{Arc, RwLock};

/// Thread-safe notifier recording every notice it is given.
///
/// Dismissed notices drop out of [`RecordingNotifier::visible`] but stay in
/// [`RecordingNotifier::history`].
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    state: Arc<RwLock<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    next_id: u64,
    history: Vec<(NoticeId, Notice)>,
    dismissed: Vec<NoticeId>,
}

impl RecordingNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notice ever shown, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Notice> {
        self.state
            .read()
            .map(|state| state.history.iter().map(|(_, notice)| notice.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns notices not yet dismissed, oldest first.
    #[must_use]
    pub fn visible(&self) -> Vec<(NoticeId, Notice)> {
        self.state
            .read()
            .map(|state| {
                state
                    .history
                    .iter()
                    .filter(|(id, _)| !state.dismissed.contains(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns how many notices of `level` were shown.
    #[must_use]
    pub fn count(&self, level: NoticeLevel) -> usize {
        self.history()
            .iter()
            .filter(|notice| notice.level == level)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) -> NoticeId {
        let Ok(mut state) = self.state.write() else {
            return NoticeId::new(0);
        };
        state.next_id += 1;
        let id = NoticeId::new(state.next_id);
        state.history.push((id, notice));
        id
    }

    fn dismiss(&self, id: NoticeId) {
        if let Ok(mut state) = self.state.write() {
            if !state.dismissed.contains(&id) {
                state.dismissed.push(id);
            }
        }
    }
}
