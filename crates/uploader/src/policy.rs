//! Retention policies and file categorization.

use filedock_protocol::RetentionMode;
use serde::{Deserialize, Serialize};

/// Size cap for staged (draft-context) files: 50 MiB.
pub const STAGED_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Size cap for permanent (record-attached) files: 250 MiB.
pub const PERMANENT_MAX_FILE_SIZE: u64 = 250 * 1024 * 1024;

/// File types accepted in the staged/budget context.
const STAGED_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv", "pdf", "png", "jpg", "jpeg"];

/// File types accepted for permanent storage.
const PERMANENT_EXTENSIONS: &[&str] = &[
    "xlsx", "xls", "csv", "pdf", "png", "jpg", "jpeg", "doc", "docx", "txt", "zip",
];

/// Coarse classification of an uploaded file, used for validation counts
/// and summary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Spreadsheet,
    Document,
    Image,
    Other,
}

impl FileCategory {
    /// Classifies a file by its name's extension.
    pub fn from_name(name: &str) -> Self {
        match extension_of(name).as_deref() {
            Some("xlsx" | "xls" | "csv") => FileCategory::Spreadsheet,
            Some("pdf" | "doc" | "docx" | "txt") => FileCategory::Document,
            Some("png" | "jpg" | "jpeg") => FileCategory::Image,
            _ => FileCategory::Other,
        }
    }
}

/// Immutable per-manager configuration distinguishing staged from
/// permanent behavior.
///
/// Fixed at manager construction; a caller needing the other mode builds
/// a second manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    mode: RetentionMode,
    order_id_required: bool,
    accepted_extensions: &'static [&'static str],
    max_file_size: u64,
}

impl RetentionPolicy {
    /// Policy for ephemeral budget-draft files: order id optional,
    /// accepted types restricted to the budget-relevant set.
    pub fn staged() -> Self {
        Self {
            mode: RetentionMode::Staged,
            order_id_required: false,
            accepted_extensions: STAGED_EXTENSIONS,
            max_file_size: STAGED_MAX_FILE_SIZE,
        }
    }

    /// Policy for files attached to finalized records: order id mandatory,
    /// broader accepted-type set.
    pub fn permanent() -> Self {
        Self {
            mode: RetentionMode::Permanent,
            order_id_required: true,
            accepted_extensions: PERMANENT_EXTENSIONS,
            max_file_size: PERMANENT_MAX_FILE_SIZE,
        }
    }

    pub fn mode(&self) -> RetentionMode {
        self.mode
    }

    pub fn order_id_required(&self) -> bool {
        self.order_id_required
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Returns `true` if the file name's extension is in this policy's
    /// accepted set. Matching is case-insensitive.
    pub fn accepts(&self, file_name: &str) -> bool {
        match extension_of(file_name) {
            Some(ext) => self.accepted_extensions.contains(&ext.as_str()),
            None => false,
        }
    }
}

fn extension_of(name: &str) -> Option<String> {
    let ext = name.rsplit_once('.')?.1;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
