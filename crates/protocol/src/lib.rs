//! Caller-facing data types for filedock file transfers.
//!
//! The presentation layer serializes these types and switches on the
//! literal status strings, so every token here is a frozen contract:
//! renaming a variant's string form is a breaking change even if the
//! Rust identifier stays the same.

mod types;

pub use types::{RetentionMode, StoredItem, TransferStatus};
