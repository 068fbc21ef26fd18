//! Effort storage for tempo.
//!
//! This crate wraps the host's scoped key-value service with a typed,
//! card-scoped effort store.
//!
//! # Overview
//!
//! - [`KeyValueService`]: the seam to the host's scoped get/set storage
//! - [`MemoryService`]: in-process implementation, with quota and failure
//!   injection for tests
//! - [`FileService`]: JSON files in the platform data directory, for running
//!   without a host
//! - [`EffortStore`]: reads and writes card effort values, enforcing card
//!   scope, value validity and the payload quota
//! - [`StoreError`] and [`ServiceError`]: error types
//!
//! # Scope Discipline
//!
//! Effort values are card data. Calling [`EffortStore::get`] or
//! [`EffortStore::set`] with a context that has no card fails fast with
//! [`StoreError::Scope`] instead of silently doing nothing.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tempo_protocol::{CardContext, HostContext};
//! use tempo_store::{EffortStore, MemoryService};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> tempo_store::Result<()> {
//! let service = Arc::new(MemoryService::new());
//! let store = EffortStore::new(service.clone());
//!
//! let context = HostContext::for_card(CardContext::new("c1", "Deploy"), Vec::new());
//! store.set(&context, 2.5).await?;
//! assert_eq!(store.get(&context).await?, 2.5);
//! assert_eq!(service.write_calls(), 1);
//! # Ok(())
//! # }
//! ```

pub mod effort;
pub mod error;
pub mod file;
pub mod service;

pub use effort::{EFFORT_VISIBILITY, EffortRecord, EffortStore, normalize_hours};
pub use error::{Result, ServiceError, StoreError};
pub use file::FileService;
pub use service::{Blob, KeyValueService, MemoryService, serialized_chars};
