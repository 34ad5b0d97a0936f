//! Uploader error types.

use filedock_store::StoreError;

/// Errors produced by upload orchestration.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The call is inconsistent with the manager's policy. Detected
    /// synchronously, before any remote call.
    #[error("configuration error: {0}")]
    Config(String),

    /// A remote-store failure, already classified by the store crate.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Background task failed to complete (runtime-level failure).
    #[error("upload task failed: {0}")]
    TaskJoin(String),
}

impl UploadError {
    /// Caller-facing message carried through the error callback and in
    /// aggregated outcomes. Store errors keep their classification
    /// prefix; everything else falls back to the generic upload prefix.
    pub fn caller_message(&self) -> String {
        match self {
            UploadError::Config(_) | UploadError::Store(_) => self.to_string(),
            UploadError::TaskJoin(e) => format!("upload error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_classification() {
        let err = UploadError::from(StoreError::Session("throttled".into()));
        assert_eq!(err.caller_message(), "session error: throttled");
    }

    #[test]
    fn config_errors_are_prefixed() {
        let err = UploadError::Config("order id is required".into());
        assert_eq!(
            err.caller_message(),
            "configuration error: order id is required"
        );
    }

    #[test]
    fn join_errors_use_generic_prefix() {
        let err = UploadError::TaskJoin("cancelled".into());
        assert_eq!(err.caller_message(), "upload error: cancelled");
    }
}
