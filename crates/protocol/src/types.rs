use serde::{Deserialize, Serialize};

/// Lifecycle status of a single file transfer.
///
/// The string forms are the exact tokens the frontend switches on.
/// `carregando` and `finalizando` are legacy Portuguese labels kept for
/// compatibility with existing presentation code; do not rename them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    /// Waiting for an upload slot, or creating the remote session.
    #[serde(rename = "queueing")]
    Queueing,
    /// Bytes are being sent to the remote store.
    #[serde(rename = "carregando")]
    Transferring,
    /// All bytes accepted; waiting for server-side confirmation.
    #[serde(rename = "finalizando")]
    Finalizing,
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "error")]
    Error,
}

impl TransferStatus {
    /// Returns the frozen string token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Queueing => "queueing",
            TransferStatus::Transferring => "carregando",
            TransferStatus::Finalizing => "finalizando",
            TransferStatus::Success => "success",
            TransferStatus::Error => "error",
        }
    }

    /// Returns `true` for `Success` and `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Success | TransferStatus::Error)
    }

    /// Ordinal position in the success path, used to keep per-task
    /// transitions strictly forward. `Error` compares highest so a failed
    /// task can never be revived.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            TransferStatus::Queueing => 0,
            TransferStatus::Transferring => 1,
            TransferStatus::Finalizing => 2,
            TransferStatus::Success => 3,
            TransferStatus::Error => 4,
        }
    }

    /// Returns `true` if moving from `self` to `next` is a legal forward
    /// transition. Any non-terminal status may move to `Error`.
    pub fn can_advance_to(&self, next: TransferStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == TransferStatus::Error {
            return true;
        }
        next.rank() > self.rank()
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which remote namespace a file lives in.
///
/// Staged files belong to an in-progress editing context and are expected
/// to be promoted or discarded; permanent files hang off a durable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetentionMode {
    #[serde(rename = "staged")]
    Staged,
    #[serde(rename = "permanent")]
    Permanent,
}

impl RetentionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionMode::Staged => "staged",
            RetentionMode::Permanent => "permanent",
        }
    }
}

impl std::fmt::Display for RetentionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully stored remote object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    /// Remote store identifier for the object.
    pub item_id: String,
    /// Direct download URL, when the store issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}
