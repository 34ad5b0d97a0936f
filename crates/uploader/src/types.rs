//! Data types for upload operations.

use filedock_protocol::{StoredItem, TransferStatus};
use serde::{Deserialize, Serialize};

use crate::policy::FileCategory;

/// A local file handed to the uploader.
///
/// Read-only once a transfer starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Caller-assigned correlation id. When absent the manager generates
    /// one before the task is created.
    pub id: Option<String>,
    pub name: String,
    pub data: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: None,
            name: name.into(),
            data,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn category(&self) -> FileCategory {
        FileCategory::from_name(&self.name)
    }
}

/// Per-call options for upload operations.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Order identifier; mandatory when the manager's policy requires it.
    pub order_id: Option<String>,
    /// Overrides the generated task id (single-file uploads).
    pub file_id: Option<String>,
}

/// Terminal result of one file's upload.
///
/// A batch resolves with one outcome per input file, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    /// Correlation id, identical to the one used in every callback.
    pub file_id: String,
    pub file_name: String,
    pub category: FileCategory,
    /// `Success` or `Error`.
    pub status: TransferStatus,
    /// Present if and only if `status` is `Success`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<StoredItem>,
    /// Present if and only if `status` is `Error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        self.status == TransferStatus::Success
    }
}

/// A fetched remote object, ready for the caller to persist or display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// Reference to an already-stored remote file, used by bulk operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileRef {
    pub item_id: String,
    pub file_name: String,
}

impl RemoteFileRef {
    pub fn new(item_id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            file_name: file_name.into(),
        }
    }
}

/// Result of one item in a bulk removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveOutcome {
    pub item_id: String,
    pub file_name: String,
    pub removed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
