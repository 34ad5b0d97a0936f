//! Remote object-store capability for filedock.
//!
//! The actual cloud drive transport lives in the host application; this
//! crate only defines the seam. The uploader talks to a [`RemoteStore`]
//! trait object, which keeps the orchestration logic transport-free and
//! testable with scripted mocks.

mod client;
mod error;

pub use client::{ProgressFn, RemoteStore, SessionHandle};
pub use error::StoreError;
