//! Per-file transfer task state machine.

use std::sync::RwLock;

use filedock_protocol::{StoredItem, TransferStatus};

use crate::policy::FileCategory;
use crate::types::UploadOutcome;

/// Tracks one file's transfer (thread-safe).
///
/// Invariants, enforced here rather than trusted to callers:
/// - exactly one status at any instant, advancing forward only;
/// - progress is monotonically non-decreasing and capped at 100;
/// - a stored item is present if and only if the task succeeded;
/// - an error message is present if and only if the task failed.
pub struct TransferTask {
    inner: RwLock<TaskInner>,
}

struct TaskInner {
    id: String,
    file_name: String,
    category: FileCategory,
    status: TransferStatus,
    progress: u8,
    item: Option<StoredItem>,
    error: Option<String>,
}

impl TransferTask {
    /// Creates a queued task for one file.
    pub fn new(id: String, file_name: String) -> Self {
        let category = FileCategory::from_name(&file_name);
        Self {
            inner: RwLock::new(TaskInner {
                id,
                file_name,
                category,
                status: TransferStatus::Queueing,
                progress: 0,
                item: None,
                error: None,
            }),
        }
    }

    pub fn id(&self) -> String {
        self.inner.read().unwrap().id.clone()
    }

    pub fn file_name(&self) -> String {
        self.inner.read().unwrap().file_name.clone()
    }

    pub fn status(&self) -> TransferStatus {
        self.inner.read().unwrap().status
    }

    pub fn progress(&self) -> u8 {
        self.inner.read().unwrap().progress
    }

    /// Advances to `next` if that is a legal forward transition.
    ///
    /// Returns `true` when the status actually changed, so the caller
    /// knows whether to fire the status-change hook. Illegal or repeated
    /// transitions are ignored, which also shields terminal tasks from
    /// late updates.
    pub fn advance(&self, next: TransferStatus) -> bool {
        let mut inner = self.inner.write().unwrap();
        if !inner.status.can_advance_to(next) {
            return false;
        }
        inner.status = next;
        true
    }

    /// Raises progress to `pct` (clamped to 100).
    ///
    /// Returns the new value when it increased, `None` when the update
    /// was stale or the task is already terminal.
    pub fn set_progress(&self, pct: u8) -> Option<u8> {
        let mut inner = self.inner.write().unwrap();
        if inner.status.is_terminal() {
            return None;
        }
        let pct = pct.min(100);
        if pct <= inner.progress {
            return None;
        }
        inner.progress = pct;
        Some(pct)
    }

    /// Marks the task successful with the stored item; progress is forced
    /// to 100. Returns `false` if the task was already terminal.
    pub fn succeed(&self, item: StoredItem) -> bool {
        let mut inner = self.inner.write().unwrap();
        if !inner.status.can_advance_to(TransferStatus::Success) {
            return false;
        }
        inner.status = TransferStatus::Success;
        inner.progress = 100;
        inner.item = Some(item);
        true
    }

    /// Marks the task failed. Returns `false` if already terminal.
    pub fn fail(&self, message: impl Into<String>) -> bool {
        let mut inner = self.inner.write().unwrap();
        if !inner.status.can_advance_to(TransferStatus::Error) {
            return false;
        }
        inner.status = TransferStatus::Error;
        inner.error = Some(message.into());
        true
    }

    /// Snapshot of the terminal result for aggregation.
    ///
    /// Meaningful once the task is terminal; an in-flight task reports
    /// its current (non-terminal) status with neither item nor error.
    pub fn outcome(&self) -> UploadOutcome {
        let inner = self.inner.read().unwrap();
        UploadOutcome {
            file_id: inner.id.clone(),
            file_name: inner.file_name.clone(),
            category: inner.category,
            status: inner.status,
            item: inner.item.clone(),
            error: inner.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> TransferTask {
        TransferTask::new("upload_1".into(), "budget.xlsx".into())
    }

    fn item(id: &str) -> StoredItem {
        StoredItem {
            item_id: id.into(),
            download_url: None,
        }
    }

    #[test]
    fn new_task_is_queueing() {
        let t = task();
        assert_eq!(t.status(), TransferStatus::Queueing);
        assert_eq!(t.progress(), 0);
        let outcome = t.outcome();
        assert!(outcome.item.is_none());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn success_path_fires_each_transition_once() {
        let t = task();
        assert!(t.advance(TransferStatus::Transferring));
        assert!(!t.advance(TransferStatus::Transferring));
        assert!(t.advance(TransferStatus::Finalizing));
        assert!(!t.advance(TransferStatus::Transferring));
        assert!(t.succeed(item("item-1")));
        assert_eq!(t.status(), TransferStatus::Success);
    }

    #[test]
    fn progress_is_monotonic() {
        let t = task();
        assert_eq!(t.set_progress(10), Some(10));
        assert_eq!(t.set_progress(10), None);
        assert_eq!(t.set_progress(5), None);
        assert_eq!(t.set_progress(60), Some(60));
        assert_eq!(t.progress(), 60);
    }

    #[test]
    fn progress_is_clamped() {
        let t = task();
        assert_eq!(t.set_progress(200), Some(100));
        assert_eq!(t.progress(), 100);
    }

    #[test]
    fn success_forces_progress_to_100() {
        let t = task();
        t.set_progress(40);
        assert!(t.succeed(item("item-1")));
        assert_eq!(t.progress(), 100);
        let outcome = t.outcome();
        assert_eq!(outcome.item.unwrap().item_id, "item-1");
        assert!(outcome.error.is_none());
    }

    #[test]
    fn failure_sets_error_and_no_item() {
        let t = task();
        t.advance(TransferStatus::Transferring);
        assert!(t.fail("connectivity error: offline"));
        let outcome = t.outcome();
        assert_eq!(outcome.status, TransferStatus::Error);
        assert!(outcome.item.is_none());
        assert_eq!(
            outcome.error.as_deref(),
            Some("connectivity error: offline")
        );
    }

    #[test]
    fn terminal_tasks_ignore_late_updates() {
        let t = task();
        assert!(t.succeed(item("item-1")));
        assert!(!t.fail("too late"));
        assert!(!t.advance(TransferStatus::Transferring));
        assert_eq!(t.set_progress(100), None);
        assert!(t.outcome().error.is_none());

        let t = task();
        assert!(t.fail("boom"));
        assert!(!t.succeed(item("item-2")));
        assert!(t.outcome().item.is_none());
    }

    #[test]
    fn concurrent_access() {
        use std::sync::Arc;
        use std::thread;

        let t = Arc::new(task());
        t.advance(TransferStatus::Transferring);

        let mut handles = vec![];
        for i in 0u8..10 {
            let t = Arc::clone(&t);
            handles.push(thread::spawn(move || {
                for j in 0u8..10 {
                    t.set_progress(i * 10 + j);
                    let _ = t.status();
                    let _ = t.progress();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(t.progress(), 99);
    }
}
