//! Error types for effort storage.
//!
//! [`ServiceError`] is what a key-value service reports; [`StoreError`] is
//! what the effort store surfaces to its callers, with the failing target
//! attached.

use std::path::PathBuf;

use tempo_protocol::StorageTarget;

/// Errors reported by a [`KeyValueService`](crate::KeyValueService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// An I/O error occurred while accessing persisted blobs.
    #[error("I/O error in key-value service: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted blob exists but cannot be parsed.
    #[error("stored blob at {path} is corrupt: {source}")]
    Corrupt {
        /// Path of the unreadable blob.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The write would push the scope blob over its quota.
    #[error("scope blob of {size} characters exceeds the {quota}-character quota")]
    QuotaExceeded {
        /// Serialized size the blob would have reached.
        size: usize,
        /// The quota in characters.
        quota: usize,
    },

    /// The service refused or failed the request.
    #[error("key-value service unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the [`EffortStore`](crate::EffortStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A card-scoped operation was invoked without a card in context.
    #[error("{operation} of `{key}` requires a card in context")]
    Scope {
        /// The operation that was attempted (`get` or `set`).
        operation: &'static str,
        /// The storage key involved.
        key: String,
    },

    /// The serialized payload is larger than the scope quota.
    ///
    /// Detected before the service is called.
    #[error("payload for {target} is {size} characters, over the {quota}-character quota")]
    QuotaExceeded {
        /// Where the payload would have been written.
        target: StorageTarget,
        /// Serialized payload size in characters.
        size: usize,
        /// The quota in characters.
        quota: usize,
    },

    /// The service rejected the write.
    #[error("failed to write {target}: {source}")]
    Write {
        /// Where the payload was being written.
        target: StorageTarget,
        /// The service error.
        #[source]
        source: ServiceError,
    },

    /// The service failed the read (a missing key is not a failure).
    #[error("failed to read {target}: {source}")]
    Read {
        /// What was being read.
        target: StorageTarget,
        /// The service error.
        #[source]
        source: ServiceError,
    },

    /// The effort value is negative, infinite or NaN.
    #[error("invalid effort value {0}: hours must be a finite, non-negative number")]
    InvalidHours(f64),

    /// The payload could not be serialized.
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns `true` for failures of the storage layer itself (quota or
    /// service errors), as opposed to misuse by the caller.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded { .. } | Self::Write { .. } | Self::Read { .. }
        )
    }

    /// Returns `true` if a card-scoped call was made without a card.
    #[must_use]
    pub fn is_scope(&self) -> bool {
        matches!(self, Self::Scope { .. })
    }
}

/// A specialized Result type for effort storage.
pub type Result<T> = std::result::Result<T, StoreError>;
