//! Upload orchestration core for filedock.
//!
//! This crate implements the **business logic** for moving files between
//! the application and the remote drive: per-file transfer tasks with a
//! strict status lifecycle, policy-gated validation, and a manager that
//! runs multi-file batches under a concurrency bound. It is a library
//! crate with no transport or UI dependencies — the host application
//! supplies a [`RemoteStore`](filedock_store::RemoteStore) implementation
//! and observes progress through [`UploadCallbacks`].
//!
//! # Pipeline (per file)
//!
//! 1. **Queue** — task created, waits for an upload slot
//! 2. **Session** — remote upload session negotiated (still `queueing`)
//! 3. **Transfer** — bytes sent, progress reported (`carregando`)
//! 4. **Finalize** — awaiting server confirmation (`finalizando`)
//! 5. **Terminal** — `success` with the stored item, or `error`

pub mod callbacks;
pub mod error;
pub mod manager;
pub mod policy;
pub mod task;
pub mod types;
pub mod validation;

pub use callbacks::UploadCallbacks;
pub use error::UploadError;
pub use manager::UploadManager;
pub use policy::{FileCategory, RetentionPolicy};
pub use task::TransferTask;
pub use types::{
    DownloadedFile, RemoteFileRef, RemoveOutcome, SourceFile, UploadOptions, UploadOutcome,
};
pub use validation::{FileCounts, ValidationError, ValidationResult, validate_files};

/// Default number of files transferred simultaneously in a batch.
pub const DEFAULT_MAX_CONCURRENT: usize = 3;
