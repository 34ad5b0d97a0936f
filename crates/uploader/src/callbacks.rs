//! Observer hooks invoked as transfers advance.

use filedock_protocol::{StoredItem, TransferStatus};

/// Progress hook: correlation id and 0–100 percentage.
pub type ProgressHook = Box<dyn Fn(&str, u8) + Send + Sync>;
/// Status-change hook: correlation id and the new status.
pub type StatusHook = Box<dyn Fn(&str, TransferStatus) + Send + Sync>;
/// Success hook: correlation id and the stored item.
pub type SuccessHook = Box<dyn Fn(&str, &StoredItem) + Send + Sync>;
/// Error hook: correlation id and the classified message.
pub type ErrorHook = Box<dyn Fn(&str, &str) + Send + Sync>;

/// The four optional observer hooks a manager owns.
///
/// All hooks default to absent; an absent hook means the event is
/// silently dropped for that manager instance. Callbacks fire from the
/// transfer tasks, so callers must correlate by id and never rely on
/// arrival order across files.
#[derive(Default)]
pub struct UploadCallbacks {
    on_progress: Option<ProgressHook>,
    on_status_change: Option<StatusHook>,
    on_success: Option<SuccessHook>,
    on_error: Option<ErrorHook>,
}

impl UploadCallbacks {
    /// No-op callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_progress(mut self, hook: impl Fn(&str, u8) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(hook));
        self
    }

    pub fn on_status_change(
        mut self,
        hook: impl Fn(&str, TransferStatus) + Send + Sync + 'static,
    ) -> Self {
        self.on_status_change = Some(Box::new(hook));
        self
    }

    pub fn on_success(mut self, hook: impl Fn(&str, &StoredItem) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl Fn(&str, &str) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub(crate) fn emit_progress(&self, file_id: &str, pct: u8) {
        if let Some(hook) = &self.on_progress {
            hook(file_id, pct);
        }
    }

    pub(crate) fn emit_status(&self, file_id: &str, status: TransferStatus) {
        if let Some(hook) = &self.on_status_change {
            hook(file_id, status);
        }
    }

    pub(crate) fn emit_success(&self, file_id: &str, item: &StoredItem) {
        if let Some(hook) = &self.on_success {
            hook(file_id, item);
        }
    }

    pub(crate) fn emit_error(&self, file_id: &str, message: &str) {
        if let Some(hook) = &self.on_error {
            hook(file_id, message);
        }
    }
}
