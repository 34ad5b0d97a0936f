//! Remote store trait and session handle.
//!
//! `RemoteStore` is implemented by the host application on top of its
//! actual cloud drive client. Using a trait keeps upload orchestration
//! decoupled from transport and testable with mocks.

use std::future::Future;
use std::pin::Pin;

use filedock_protocol::{RetentionMode, StoredItem};

use crate::StoreError;

/// Progress observer for a byte transfer, called with 0–100.
///
/// Implementations must report 100 on the final call of a successful
/// transfer.
pub type ProgressFn<'a> = &'a (dyn Fn(u8) + Send + Sync);

/// An upload session issued by the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    /// Opaque session identifier.
    pub session_id: String,
    /// Target URL for the byte transfer, when the store issues one.
    pub upload_url: Option<String>,
}

/// Abstract connection to the remote object store.
pub trait RemoteStore: Send + Sync {
    /// Creates an upload session under the namespace for `mode`,
    /// scoped to `context_id` (a component or order identifier).
    fn create_session(
        &self,
        context_id: &str,
        mode: RetentionMode,
    ) -> Pin<Box<dyn Future<Output = Result<SessionHandle, StoreError>> + Send + '_>>;

    /// Sends the file payload through an open session.
    ///
    /// `on_progress` is invoked with a monotonically increasing 0–100
    /// percentage while bytes are accepted.
    fn put_bytes<'a>(
        &'a self,
        session: &'a SessionHandle,
        file_name: &'a str,
        data: &'a [u8],
        on_progress: ProgressFn<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<StoredItem, StoreError>> + Send + 'a>>;

    /// Fetches the bytes of a stored object.
    fn get_bytes<'a>(
        &'a self,
        item_id: &'a str,
        mode: RetentionMode,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, StoreError>> + Send + 'a>>;

    /// Deletes a stored object. Absence is not an error.
    fn delete<'a>(
        &'a self,
        item_id: &'a str,
        mode: RetentionMode,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Minimal in-memory store proving the trait is implementable
    /// without a transport.
    struct MemoryStore {
        objects: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl RemoteStore for MemoryStore {
        fn create_session(
            &self,
            context_id: &str,
            mode: RetentionMode,
        ) -> Pin<Box<dyn Future<Output = Result<SessionHandle, StoreError>> + Send + '_>> {
            let id = format!("session-{mode}-{context_id}");
            Box::pin(async move {
                Ok(SessionHandle {
                    session_id: id,
                    upload_url: None,
                })
            })
        }

        fn put_bytes<'a>(
            &'a self,
            session: &'a SessionHandle,
            file_name: &'a str,
            data: &'a [u8],
            on_progress: ProgressFn<'a>,
        ) -> Pin<Box<dyn Future<Output = Result<StoredItem, StoreError>> + Send + 'a>> {
            Box::pin(async move {
                on_progress(50);
                on_progress(100);
                let item_id = format!("{}/{file_name}", session.session_id);
                self.objects
                    .lock()
                    .unwrap()
                    .push((item_id.clone(), data.to_vec()));
                Ok(StoredItem {
                    item_id,
                    download_url: None,
                })
            })
        }

        fn get_bytes<'a>(
            &'a self,
            item_id: &'a str,
            _mode: RetentionMode,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, StoreError>> + Send + 'a>> {
            Box::pin(async move {
                self.objects
                    .lock()
                    .unwrap()
                    .iter()
                    .find(|(id, _)| id == item_id)
                    .map(|(_, data)| data.clone())
                    .ok_or_else(|| StoreError::UnknownItem(item_id.to_string()))
            })
        }

        fn delete<'a>(
            &'a self,
            item_id: &'a str,
            _mode: RetentionMode,
        ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>> {
            Box::pin(async move {
                self.objects.lock().unwrap().retain(|(id, _)| id != item_id);
                Ok(())
            })
        }
    }

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let store = MemoryStore {
            objects: Mutex::new(Vec::new()),
        };
        let session = store
            .create_session("component-1", RetentionMode::Staged)
            .await
            .unwrap();

        let seen = Mutex::new(Vec::new());
        let on_progress = |pct: u8| seen.lock().unwrap().push(pct);
        let item = store
            .put_bytes(&session, "budget.xlsx", b"cells", &on_progress)
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![50, 100]);
        let data = store
            .get_bytes(&item.item_id, RetentionMode::Staged)
            .await
            .unwrap();
        assert_eq!(data, b"cells");
    }

    #[tokio::test]
    async fn get_unknown_item_fails() {
        let store = MemoryStore {
            objects: Mutex::new(Vec::new()),
        };
        let err = store
            .get_bytes("missing", RetentionMode::Permanent)
            .await
            .unwrap_err();
        assert!(err.is_absent());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore {
            objects: Mutex::new(vec![("item-1".into(), b"x".to_vec())]),
        };
        store.delete("item-1", RetentionMode::Staged).await.unwrap();
        // Second delete of the same id is still success.
        store.delete("item-1", RetentionMode::Staged).await.unwrap();
    }
}
