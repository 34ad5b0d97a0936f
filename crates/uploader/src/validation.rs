//! Policy-gated validation of candidate file sets.
//!
//! Validation is pure and synchronous: it never mutates its input and
//! performs no I/O. Rules accumulate per file; the result is only valid
//! when no rule produced an error.

use serde::{Deserialize, Serialize};

use crate::policy::{FileCategory, RetentionPolicy};
use crate::types::SourceFile;

/// One violated validation rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no files provided")]
    NoFiles,

    #[error("file {name} exceeds the maximum size of {max_bytes} bytes")]
    TooLarge { name: String, max_bytes: u64 },

    #[error("file {name} has an unsupported type")]
    UnsupportedType { name: String },

    #[error("at least one spreadsheet file is required")]
    MissingSpreadsheet,
}

/// File counts per recognized category, for summary display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCounts {
    pub total: usize,
    pub spreadsheets: usize,
    pub documents: usize,
    pub images: usize,
    pub other: usize,
}

impl FileCounts {
    fn record(&mut self, category: FileCategory) {
        self.total += 1;
        match category {
            FileCategory::Spreadsheet => self.spreadsheets += 1,
            FileCategory::Document => self.documents += 1,
            FileCategory::Image => self.images += 1,
            FileCategory::Other => self.other += 1,
        }
    }
}

/// Outcome of validating a candidate file set. Produced fresh per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Violations in evaluation order: per-file errors first (input
    /// order), then aggregate errors.
    pub errors: Vec<ValidationError>,
    pub counts: FileCounts,
}

impl ValidationResult {
    /// Human-readable error messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

/// Validates `files` against `policy`.
///
/// When `require_spreadsheet` is set, at least one file must classify as
/// a spreadsheet; the aggregate error is appended after all per-file
/// checks.
pub fn validate_files(
    files: &[SourceFile],
    policy: &RetentionPolicy,
    require_spreadsheet: bool,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut counts = FileCounts::default();

    if files.is_empty() {
        errors.push(ValidationError::NoFiles);
    }

    for file in files {
        counts.record(file.category());

        if file.size() > policy.max_file_size() {
            errors.push(ValidationError::TooLarge {
                name: file.name.clone(),
                max_bytes: policy.max_file_size(),
            });
        }

        if !policy.accepts(&file.name) {
            errors.push(ValidationError::UnsupportedType {
                name: file.name.clone(),
            });
        }
    }

    if require_spreadsheet && counts.spreadsheets == 0 {
        errors.push(ValidationError::MissingSpreadsheet);
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        counts,
    }
}
