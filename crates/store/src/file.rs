//! File-backed key-value service.
//!
//! Stands in for the host store when tempo runs on its own (the `tempo`
//! binary, local experiments). Each `(target, visibility)` blob is a JSON
//! object in its own file, subject to the same character quota the host
//! enforces.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.local/share/tempo/store/              # Linux
//! ~/Library/Application Support/tempo/store/  # macOS
//! ├── card_5f1a2b_shared.json
//! └── board_9c3d_private.json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use tempo_config::StoreConfig;
use tempo_protocol::{StorageTarget, Visibility};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::error::ServiceError;
use crate::service::{Blob, KeyValueService, serialized_chars};

/// A [`KeyValueService`] persisting blobs as JSON files.
///
/// Writes are serialized through an internal lock, so a read issued after a
/// write resolved always sees it.
///
/// # Examples
///
/// ```no_run
/// use tempo_config::StoreConfig;
/// use tempo_store::FileService;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = FileService::from_config(&StoreConfig::default())?;
/// println!("Storing blobs in {}", service.base_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileService {
    base_path: PathBuf,
    quota: usize,
    write_lock: Mutex<()>,
}

impl FileService {
    /// Creates a service storing blobs under `base_path`.
    ///
    /// The directory is created if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument]
    pub fn with_path(base_path: PathBuf, quota: usize) -> Result<Self, ServiceError> {
        if !base_path.exists() {
            debug!(?base_path, "creating store directory");
            std::fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_path,
            quota,
            write_lock: Mutex::new(()),
        })
    }

    /// Creates a service from the store configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined or
    /// created.
    pub fn from_config(config: &StoreConfig) -> Result<Self, ServiceError> {
        let base_path = config.resolve_data_dir().map_err(|e| {
            ServiceError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, e))
        })?;
        Self::with_path(base_path, config.quota_chars)
    }

    /// Returns the directory holding the blobs.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the file path of a blob.
    ///
    /// The entity id is percent-encoded: distinct ids always map to distinct
    /// files, and no id can escape the base directory.
    fn blob_path(&self, target: &StorageTarget, visibility: Visibility) -> PathBuf {
        let entity = utf8_percent_encode(&target.entity_id, NON_ALPHANUMERIC);
        self.base_path
            .join(format!("{}_{entity}_{visibility}.json", target.scope))
    }

    /// Loads a blob; a missing file is an empty blob.
    async fn load_blob(&self, path: &Path) -> Result<Blob, ServiceError> {
        match fs::read_to_string(path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                warn!(?path, error = %source, "failed to parse blob");
                ServiceError::Corrupt {
                    path: path.to_path_buf(),
                    source,
                }
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Blob::new()),
            Err(e) => {
                warn!(?path, error = %e, "failed to read blob");
                Err(ServiceError::Io(e))
            }
        }
    }
}

#[async_trait]
impl KeyValueService for FileService {
    #[instrument(skip(self))]
    async fn read(
        &self,
        target: &StorageTarget,
        visibility: Visibility,
        key: &str,
    ) -> Result<Option<Value>, ServiceError> {
        let path = self.blob_path(target, visibility);
        let mut blob = self.load_blob(&path).await?;
        Ok(blob.remove(key))
    }

    #[instrument(skip(self, value))]
    async fn write(
        &self,
        target: &StorageTarget,
        visibility: Visibility,
        key: &str,
        value: Value,
    ) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        let path = self.blob_path(target, visibility);

        let mut blob = self.load_blob(&path).await?;
        blob.insert(key.to_string(), value);

        let size = serialized_chars(&blob);
        if size > self.quota {
            warn!(?path, size, quota = self.quota, "blob over quota");
            return Err(ServiceError::QuotaExceeded {
                size,
                quota: self.quota,
            });
        }

        let content = serde_json::to_string(&blob).map_err(|source| ServiceError::Corrupt {
            path: path.clone(),
            source,
        })?;
        // Readers do not take the lock; they must only ever see whole blobs.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, content).await?;
        fs::rename(&staging, &path).await?;
        debug!(?path, size, "blob saved");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use tempo_protocol::{CardId, DEFAULT_SCOPE_QUOTA_CHARS, Scope};

    fn create_test_service() -> (FileService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = FileService::with_path(temp_dir.path().to_path_buf(), DEFAULT_SCOPE_QUOTA_CHARS)
            .expect("Failed to create service");
        (service, temp_dir)
    }

    fn card(id: &str) -> StorageTarget {
        StorageTarget::card(&CardId::new(id))
    }

    #[test]
    fn blob_path_sanitizes_entity() {
        let (service, _temp) = create_test_service();

        let path = service.blob_path(&card("abc"), Visibility::Shared);
        assert!(path.ends_with("card_abc_shared.json"));

        let path = service.blob_path(&card("../evil"), Visibility::Private);
        assert!(path.ends_with("card_%2E%2E%2Fevil_private.json"));
        assert_eq!(path.parent(), Some(service.base_path()));
    }

    #[test]
    fn blob_paths_are_distinct_per_entity() {
        let (service, _temp) = create_test_service();
        let ids = ["a.b", "a_b", "a/b", "a\\b", "a%2Eb", "a b"];

        let paths: std::collections::HashSet<_> = ids
            .iter()
            .map(|id| service.blob_path(&card(id), Visibility::Shared))
            .collect();
        assert_eq!(paths.len(), ids.len());
    }

    #[tokio::test]
    async fn similar_card_ids_do_not_share_values() {
        let (service, _temp) = create_test_service();
        service
            .write(&card("a.b"), Visibility::Shared, "effort_hours", json!(7))
            .await
            .expect("write");

        for other in ["a_b", "a/b", "a\\b"] {
            let value = service
                .read(&card(other), Visibility::Shared, "effort_hours")
                .await
                .expect("read");
            assert!(value.is_none(), "{other} sees the value of a.b");
        }
        let value = service
            .read(&card("a.b"), Visibility::Shared, "effort_hours")
            .await
            .expect("read");
        assert_eq!(value, Some(json!(7)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn reads_never_see_partial_writes() {
        let temp = TempDir::new().expect("temp dir");
        let service = std::sync::Arc::new(
            FileService::with_path(temp.path().to_path_buf(), usize::MAX).expect("service"),
        );
        let big = json!("x".repeat(200_000));
        service
            .write(&card("c1"), Visibility::Shared, "note", big)
            .await
            .expect("initial write");

        let writer = {
            let service = service.clone();
            tokio::spawn(async move {
                for round in 0..100 {
                    let value = json!(format!("{round}{}", "y".repeat(200_000)));
                    service
                        .write(&card("c1"), Visibility::Shared, "note", value)
                        .await
                        .expect("write");
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move {
                    for _ in 0..250 {
                        let value = service
                            .read(&card("c1"), Visibility::Shared, "note")
                            .await
                            .expect("read during write");
                        assert!(value.is_some());
                    }
                })
            })
            .collect();

        writer.await.expect("writer task");
        for reader in readers {
            reader.await.expect("reader task");
        }
        assert!(!temp.path().join("card_c1_shared.json.tmp").exists());
    }

    #[tokio::test]
    async fn read_missing_blob_is_none() {
        let (service, _temp) = create_test_service();
        let value = service
            .read(&card("c1"), Visibility::Shared, "effort_hours")
            .await
            .expect("read should not fail");
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn write_and_read_roundtrip() {
        let (service, _temp) = create_test_service();
        service
            .write(&card("c1"), Visibility::Shared, "effort_hours", json!(6.5))
            .await
            .expect("write");

        let value = service
            .read(&card("c1"), Visibility::Shared, "effort_hours")
            .await
            .expect("read");
        assert_eq!(value, Some(json!(6.5)));
    }

    #[tokio::test]
    async fn keys_share_one_blob() {
        let (service, temp) = create_test_service();
        service
            .write(&card("c1"), Visibility::Shared, "a", json!(1))
            .await
            .expect("write a");
        service
            .write(&card("c1"), Visibility::Shared, "b", json!(2))
            .await
            .expect("write b");

        let raw = std::fs::read_to_string(temp.path().join("card_c1_shared.json")).expect("blob");
        let blob: Blob = serde_json::from_str(&raw).expect("parse");
        assert_eq!(blob.len(), 2);
    }

    #[tokio::test]
    async fn scopes_and_visibilities_are_isolated() {
        let (service, _temp) = create_test_service();
        service
            .write(&card("x"), Visibility::Shared, "k", json!("card"))
            .await
            .expect("write");

        let board = StorageTarget::new(Scope::Board, "x");
        assert!(service.read(&board, Visibility::Shared, "k").await.unwrap().is_none());
        assert!(service.read(&card("x"), Visibility::Private, "k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_over_quota_is_rejected_and_not_persisted() {
        let temp = TempDir::new().expect("temp dir");
        let service = FileService::with_path(temp.path().to_path_buf(), 16).expect("service");

        let err = service
            .write(&card("c1"), Visibility::Shared, "note", json!("far too long for the quota"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::QuotaExceeded { quota: 16, .. }));
        assert!(!temp.path().join("card_c1_shared.json").exists());
    }

    #[tokio::test]
    async fn corrupt_blob_is_reported() {
        let (service, temp) = create_test_service();
        std::fs::write(temp.path().join("card_c1_shared.json"), "not json").expect("write");

        let err = service
            .read(&card("c1"), Visibility::Shared, "k")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Corrupt { .. }));
    }

    #[test]
    fn with_path_creates_directory() {
        let temp = TempDir::new().expect("temp dir");
        let nested = temp.path().join("nested").join("store");
        assert!(!nested.exists());

        FileService::with_path(nested.clone(), DEFAULT_SCOPE_QUOTA_CHARS).expect("create");
        assert!(nested.exists());
    }

    #[test]
    fn from_config_uses_configured_dir() {
        let temp = TempDir::new().expect("temp dir");
        let config = StoreConfig {
            data_dir: Some(temp.path().join("blobs")),
            quota_chars: 128,
            ..Default::default()
        };

        let service = FileService::from_config(&config).expect("create");
        assert_eq!(service.base_path(), temp.path().join("blobs"));
        assert_eq!(service.quota, 128);
    }
}
