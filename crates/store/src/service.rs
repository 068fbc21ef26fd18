//! The scoped key-value service tempo stores its data in.
//!
//! The host owns persistence. tempo only sees [`KeyValueService`]: values
//! are JSON, addressed by `(target, visibility, key)`, and all keys of one
//! `(target, visibility)` pair share a blob whose serialized size is capped.
//!
//! [`MemoryService`] is an in-process implementation used by tests and by
//! hosts that keep state themselves.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tempo_protocol::{StorageTarget, Visibility};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::ServiceError;

/// All keys stored for one `(target, visibility)` pair.
pub type Blob = Map<String, Value>;

/// Returns the size of a JSON value as the host counts it: characters of
/// its compact serialization.
#[must_use]
pub fn serialized_chars(value: &impl serde::Serialize) -> usize {
    serde_json::to_string(value).map_or(0, |json| json.chars().count())
}

/// A scoped get/set key-value service.
///
/// Implementations must offer read-your-writes: once a `write` future has
/// resolved, a later `read` of the same key observes the new value.
#[async_trait]
pub trait KeyValueService: Send + Sync {
    /// Reads a value; `Ok(None)` when the key has never been written.
    async fn read(
        &self,
        target: &StorageTarget,
        visibility: Visibility,
        key: &str,
    ) -> Result<Option<Value>, ServiceError>;

    /// Writes a value, replacing any previous one.
    async fn write(
        &self,
        target: &StorageTarget,
        visibility: Visibility,
        key: &str,
        value: Value,
    ) -> Result<(), ServiceError>;
}

#[async_trait]
impl<T: KeyValueService + ?Sized> KeyValueService for Arc<T> {
    async fn read(
        &self,
        target: &StorageTarget,
        visibility: Visibility,
        key: &str,
    ) -> Result<Option<Value>, ServiceError> {
        (**self).read(target, visibility, key).await
    }

    async fn write(
        &self,
        target: &StorageTarget,
        visibility: Visibility,
        key: &str,
        value: Value,
    ) -> Result<(), ServiceError> {
        (**self).write(target, visibility, key, value).await
    }
}

/// An in-memory [`KeyValueService`].
///
/// Optionally enforces a per-blob quota, and can be switched into a failing
/// mode to exercise error paths.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tempo_protocol::{CardId, StorageTarget, Visibility};
/// use tempo_store::{KeyValueService, MemoryService};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let service = MemoryService::new();
/// let target = StorageTarget::card(&CardId::new("c1"));
///
/// service.write(&target, Visibility::Shared, "k", json!(3)).await.unwrap();
/// let value = service.read(&target, Visibility::Shared, "k").await.unwrap();
/// assert_eq!(value, Some(json!(3)));
///
/// // Visibilities are separate namespaces
/// let private = service.read(&target, Visibility::Private, "k").await.unwrap();
/// assert!(private.is_none());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryService {
    blobs: RwLock<HashMap<(StorageTarget, Visibility), Blob>>,
    quota: Option<usize>,
    write_calls: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryService {
    /// Creates an empty service without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty service rejecting blobs larger than `quota`
    /// characters.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Number of `write` calls received so far, including failed ones.
    #[must_use]
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Makes every following write fail with [`ServiceError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueService for MemoryService {
    async fn read(
        &self,
        target: &StorageTarget,
        visibility: Visibility,
        key: &str,
    ) -> Result<Option<Value>, ServiceError> {
        let blobs = self.blobs.read().await;
        Ok(blobs
            .get(&(target.clone(), visibility))
            .and_then(|blob| blob.get(key))
            .cloned())
    }

    #[instrument(skip(self, value))]
    async fn write(
        &self,
        target: &StorageTarget,
        visibility: Visibility,
        key: &str,
        value: Value,
    ) -> Result<(), ServiceError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("writes disabled".to_string()));
        }

        let mut blobs = self.blobs.write().await;
        let slot = (target.clone(), visibility);
        let mut blob = blobs.get(&slot).cloned().unwrap_or_default();
        blob.insert(key.to_string(), value);

        if let Some(quota) = self.quota {
            let size = serialized_chars(&blob);
            if size > quota {
                debug!(size, quota, "rejecting write over quota");
                return Err(ServiceError::QuotaExceeded { size, quota });
            }
        }

        blobs.insert(slot, blob);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempo_protocol::{CardId, Scope};

    fn card(id: &str) -> StorageTarget {
        StorageTarget::card(&CardId::new(id))
    }

    #[test]
    fn serialized_chars_counts_characters_not_bytes() {
        assert_eq!(serialized_chars(&json!("é")), 3);
        assert_eq!(serialized_chars(&json!({"a": 1})), 7);
    }

    #[tokio::test]
    async fn read_missing_key_is_none() {
        let service = MemoryService::new();
        let value = service
            .read(&card("c1"), Visibility::Shared, "missing")
            .await
            .unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn write_then_read_same_key() {
        let service = MemoryService::new();
        service
            .write(&card("c1"), Visibility::Shared, "k", json!("v"))
            .await
            .unwrap();
        let value = service.read(&card("c1"), Visibility::Shared, "k").await.unwrap();
        assert_eq!(value, Some(json!("v")));
        assert_eq!(service.write_calls(), 1);
    }

    #[tokio::test]
    async fn targets_are_isolated() {
        let service = MemoryService::new();
        service
            .write(&card("c1"), Visibility::Shared, "k", json!(1))
            .await
            .unwrap();

        let other_card = service.read(&card("c2"), Visibility::Shared, "k").await.unwrap();
        assert!(other_card.is_none());

        let board = StorageTarget::new(Scope::Board, "c1");
        let other_scope = service.read(&board, Visibility::Shared, "k").await.unwrap();
        assert!(other_scope.is_none());
    }

    #[tokio::test]
    async fn quota_applies_to_whole_blob() {
        // {"a":"xxxx"} is 12 characters; adding a second key pushes it over 20.
        let service = MemoryService::with_quota(20);
        service
            .write(&card("c1"), Visibility::Shared, "a", json!("xxxx"))
            .await
            .unwrap();

        let err = service
            .write(&card("c1"), Visibility::Shared, "b", json!("yyyy"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::QuotaExceeded { quota: 20, .. }));

        // The rejected key was not stored
        let value = service.read(&card("c1"), Visibility::Shared, "b").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn failing_mode_rejects_writes() {
        let service = MemoryService::new();
        service.set_fail_writes(true);
        let err = service
            .write(&card("c1"), Visibility::Shared, "k", json!(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert_eq!(service.write_calls(), 1);

        service.set_fail_writes(false);
        assert!(
            service
                .write(&card("c1"), Visibility::Shared, "k", json!(1))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn arc_delegates() {
        let service = Arc::new(MemoryService::new());
        let shared: Arc<dyn KeyValueService> = service.clone();
        shared
            .write(&card("c1"), Visibility::Shared, "k", json!(2))
            .await
            .unwrap();
        assert_eq!(service.write_calls(), 1);
    }
}
