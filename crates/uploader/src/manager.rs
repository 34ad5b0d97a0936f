//! Upload manager: the public operation set over a remote store.
//!
//! One manager instance serves one caller-defined session (typically one
//! editing screen) under one immutable [`RetentionPolicy`]. It owns no
//! remote resources, only in-memory task bookkeeping; callers observe
//! transfers exclusively through the four callbacks and correlate every
//! event by file id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use filedock_protocol::{RetentionMode, StoredItem, TransferStatus};
use filedock_store::RemoteStore;
use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::DEFAULT_MAX_CONCURRENT;
use crate::callbacks::UploadCallbacks;
use crate::error::UploadError;
use crate::policy::RetentionPolicy;
use crate::task::TransferTask;
use crate::types::{
    DownloadedFile, RemoteFileRef, RemoveOutcome, SourceFile, UploadOptions, UploadOutcome,
};
use crate::validation::{ValidationResult, validate_files};

/// Orchestrates file transfers against a remote store.
pub struct UploadManager {
    store: Arc<dyn RemoteStore>,
    policy: RetentionPolicy,
    callbacks: Arc<UploadCallbacks>,
    max_concurrent: usize,
    in_flight: Arc<Mutex<HashMap<String, Arc<TransferTask>>>>,
}

impl UploadManager {
    /// Manager for ephemeral budget-draft files (order id optional).
    pub fn staged(store: Arc<dyn RemoteStore>, callbacks: UploadCallbacks) -> Self {
        Self::new(store, RetentionPolicy::staged(), callbacks)
    }

    /// Manager for files attached to finalized records (order id required).
    pub fn permanent(store: Arc<dyn RemoteStore>, callbacks: UploadCallbacks) -> Self {
        Self::new(store, RetentionPolicy::permanent(), callbacks)
    }

    /// Manager with an explicit policy.
    pub fn new(store: Arc<dyn RemoteStore>, policy: RetentionPolicy, callbacks: UploadCallbacks) -> Self {
        Self {
            store,
            policy,
            callbacks: Arc::new(callbacks),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Overrides the number of files transferred simultaneously
    /// (minimum 1).
    pub fn with_max_concurrent(mut self, limit: usize) -> Self {
        self.max_concurrent = limit.max(1);
        self
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Number of tasks currently tracked (non-terminal).
    pub fn active_transfers(&self) -> usize {
        self.in_flight.lock().unwrap().len()
    }

    /// Uploads a batch of files concurrently, bounded by the manager's
    /// concurrency limit.
    ///
    /// Resolves once every file reaches a terminal state, with one
    /// outcome per input file in input order. A single file's failure
    /// never aborts its siblings; partial failure is a normal outcome.
    /// Fails fast with a configuration error when the policy requires an
    /// order id and none is supplied.
    pub async fn upload_files(
        &self,
        context_id: &str,
        files: Vec<SourceFile>,
        options: &UploadOptions,
    ) -> Result<Vec<UploadOutcome>, UploadError> {
        self.check_context(options)?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            context = %context_id,
            files = files.len(),
            limit = self.max_concurrent,
            mode = %self.policy.mode(),
            "starting batch upload"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = Vec::with_capacity(files.len());
        let mut handles = Vec::with_capacity(files.len());

        for file in files {
            let task = self.register_task(file.id.clone(), file.name.clone());
            tasks.push(Arc::clone(&task));

            let semaphore = Arc::clone(&semaphore);
            let store = Arc::clone(&self.store);
            let callbacks = Arc::clone(&self.callbacks);
            let context_id = context_id.to_string();
            let mode = self.policy.mode();
            let data = file.data;

            handles.push(tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    fail_task(&task, &callbacks, "upload error: scheduler shut down");
                    return;
                };
                let _ = run_transfer(&*store, mode, &context_id, &task, &data, &callbacks).await;
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (handle, task) in handles.into_iter().zip(&tasks) {
            if let Err(e) = handle.await {
                fail_task(task, &self.callbacks, &format!("upload error: {e}"));
            }
            self.in_flight.lock().unwrap().remove(&task.id());
            outcomes.push(task.outcome());
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(
            total = outcomes.len(),
            failed,
            context = %context_id,
            "batch upload finished"
        );
        Ok(outcomes)
    }

    /// Uploads exactly one file and returns its outcome directly.
    ///
    /// Unlike [`upload_files`](Self::upload_files), a transfer failure is
    /// propagated as an error.
    pub async fn upload_single_file(
        &self,
        file: SourceFile,
        context_id: &str,
        options: &UploadOptions,
    ) -> Result<UploadOutcome, UploadError> {
        self.check_context(options)?;

        let id = options.file_id.clone().or_else(|| file.id.clone());
        let task = self.register_task(id, file.name.clone());

        let result = run_transfer(
            &*self.store,
            self.policy.mode(),
            context_id,
            &task,
            &file.data,
            &self.callbacks,
        )
        .await;

        self.in_flight.lock().unwrap().remove(&task.id());

        match result {
            Ok(_) => Ok(task.outcome()),
            Err(e) => Err(e),
        }
    }

    /// Fetches a stored object's bytes under the namespace implied by
    /// `staged`.
    ///
    /// An empty item id is a guarded no-op returning `Ok(None)`.
    pub async fn download_file(
        &self,
        item_id: &str,
        file_name: &str,
        staged: bool,
    ) -> Result<Option<DownloadedFile>, UploadError> {
        if item_id.is_empty() {
            warn!(file = %file_name, "download requested without an item id");
            return Ok(None);
        }

        let data = self.store.get_bytes(item_id, mode_for(staged)).await?;
        info!(file = %file_name, item = %item_id, bytes = data.len(), "download complete");
        Ok(Some(DownloadedFile {
            name: file_name.to_string(),
            data,
        }))
    }

    /// Deletes a stored object. Removal is idempotent: an already-absent
    /// item is treated as success, and an empty item id is a guarded
    /// no-op.
    pub async fn remove_file(
        &self,
        item_id: &str,
        file_name: &str,
        staged: bool,
    ) -> Result<(), UploadError> {
        if item_id.is_empty() {
            warn!(file = %file_name, "removal requested without an item id");
            return Ok(());
        }

        match self.store.delete(item_id, mode_for(staged)).await {
            Ok(()) => {
                info!(file = %file_name, item = %item_id, "file removed");
                Ok(())
            }
            Err(e) if e.is_absent() => {
                warn!(file = %file_name, item = %item_id, "file already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Downloads several stored objects, isolating per-item failures.
    /// Results are in input order.
    pub async fn download_files(
        &self,
        files: &[RemoteFileRef],
        staged: bool,
    ) -> Vec<Result<Option<DownloadedFile>, UploadError>> {
        join_all(
            files
                .iter()
                .map(|f| self.download_file(&f.item_id, &f.file_name, staged)),
        )
        .await
    }

    /// Removes several stored objects, isolating per-item failures.
    /// Results are in input order.
    pub async fn remove_files(&self, files: &[RemoteFileRef], staged: bool) -> Vec<RemoveOutcome> {
        join_all(files.iter().map(|f| async {
            match self.remove_file(&f.item_id, &f.file_name, staged).await {
                Ok(()) => RemoveOutcome {
                    item_id: f.item_id.clone(),
                    file_name: f.file_name.clone(),
                    removed: true,
                    error: None,
                },
                Err(e) => RemoveOutcome {
                    item_id: f.item_id.clone(),
                    file_name: f.file_name.clone(),
                    removed: false,
                    error: Some(e.caller_message()),
                },
            }
        }))
        .await
    }

    /// Validates a candidate file set against this manager's policy.
    ///
    /// Pure and synchronous; never starts a transfer. `require_excel`
    /// demands at least one spreadsheet in the set.
    pub fn validate_budget_files(
        &self,
        files: &[SourceFile],
        require_excel: bool,
    ) -> ValidationResult {
        validate_files(files, &self.policy, require_excel)
    }

    /// Creates a queued task, registers it in the in-flight set, and
    /// reports its initial status.
    fn register_task(&self, id: Option<String>, file_name: String) -> Arc<TransferTask> {
        let id = id.unwrap_or_else(generate_file_id);
        let task = Arc::new(TransferTask::new(id.clone(), file_name));
        self.in_flight
            .lock()
            .unwrap()
            .insert(id.clone(), Arc::clone(&task));
        self.callbacks.emit_status(&id, TransferStatus::Queueing);
        task
    }

    fn check_context(&self, options: &UploadOptions) -> Result<(), UploadError> {
        if self.policy.order_id_required()
            && options.order_id.as_deref().is_none_or(str::is_empty)
        {
            return Err(UploadError::Config(
                "order id is required for permanent uploads".into(),
            ));
        }
        Ok(())
    }
}

fn mode_for(staged: bool) -> RetentionMode {
    if staged {
        RetentionMode::Staged
    } else {
        RetentionMode::Permanent
    }
}

fn generate_file_id() -> String {
    format!("upload_{}", Uuid::new_v4().simple())
}

/// Runs the full transfer pipeline for one admitted task.
///
/// Session creation happens under the task's `queueing` status; the task
/// moves to `carregando` once the session exists, to `finalizando` when
/// all bytes are accepted, and to a terminal state when the store answers.
/// All observer hooks fire from here with the task's id.
async fn run_transfer(
    store: &dyn RemoteStore,
    mode: RetentionMode,
    context_id: &str,
    task: &Arc<TransferTask>,
    data: &[u8],
    callbacks: &Arc<UploadCallbacks>,
) -> Result<StoredItem, UploadError> {
    let file_id = task.id();
    let file_name = task.file_name();

    debug!(file = %file_name, id = %file_id, context = %context_id, "creating upload session");
    let session = match store.create_session(context_id, mode).await {
        Ok(session) => session,
        Err(e) => {
            let err = UploadError::from(e);
            fail_task(task, callbacks, &err.caller_message());
            return Err(err);
        }
    };

    if task.advance(TransferStatus::Transferring) {
        callbacks.emit_status(&file_id, TransferStatus::Transferring);
    }

    let progress_task = Arc::clone(task);
    let progress_callbacks = Arc::clone(callbacks);
    let progress_id = file_id.clone();
    let on_progress = move |pct: u8| {
        if let Some(new_pct) = progress_task.set_progress(pct) {
            progress_callbacks.emit_progress(&progress_id, new_pct);
        }
        // The store reports 100 once every byte is accepted; from then on
        // the task is waiting for server-side confirmation.
        if pct >= 100 && progress_task.advance(TransferStatus::Finalizing) {
            progress_callbacks.emit_status(&progress_id, TransferStatus::Finalizing);
        }
    };

    match store
        .put_bytes(&session, &file_name, data, &on_progress)
        .await
    {
        Ok(item) => {
            // Covers stores that answer without a final 100% progress call.
            if task.advance(TransferStatus::Finalizing) {
                callbacks.emit_status(&file_id, TransferStatus::Finalizing);
            }
            if task.succeed(item.clone()) {
                callbacks.emit_status(&file_id, TransferStatus::Success);
                callbacks.emit_success(&file_id, &item);
            }
            info!(file = %file_name, id = %file_id, item = %item.item_id, "upload complete");
            Ok(item)
        }
        Err(e) => {
            let err = UploadError::from(e);
            fail_task(task, callbacks, &err.caller_message());
            Err(err)
        }
    }
}

fn fail_task(task: &TransferTask, callbacks: &UploadCallbacks, message: &str) {
    if task.fail(message) {
        let id = task.id();
        error!(file = %task.file_name(), id = %id, error = %message, "upload failed");
        callbacks.emit_status(&id, TransferStatus::Error);
        callbacks.emit_error(&id, message);
    }
}
