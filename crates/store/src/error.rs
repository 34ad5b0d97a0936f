//! Store error classification.

/// Errors produced by a remote store implementation.
///
/// Variants are the classification the presentation layer keys its
/// notifications on, so each carries the underlying cause as text rather
/// than an opaque source chain.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Network-level failure reaching the store.
    #[error("connectivity error: {0}")]
    Connectivity(String),

    /// The store refused to create an upload session.
    #[error("session error: {0}")]
    Session(String),

    /// The store accepted the session but rejected the transfer.
    #[error("server rejected upload: {0}")]
    Rejected(String),

    /// No object exists under the given identifier.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// Anything the store could not classify.
    #[error("store error: {0}")]
    Other(String),
}

impl StoreError {
    /// Returns `true` when the error means the object is simply absent.
    ///
    /// Removal treats this as success so duplicate delete requests stay
    /// idempotent.
    pub fn is_absent(&self) -> bool {
        matches!(self, StoreError::UnknownItem(_))
    }
}
