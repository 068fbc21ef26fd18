//! Shared protocol types for the tempo power-up.
//!
//! This crate defines the data exchanged between tempo and the host board:
//! card context, badges, popup requests and results, and storage scopes.
//! Nothing here performs I/O.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`card`]: Card identifiers, card summaries, and the host context
//! - [`badge`]: Badge descriptors, icons, and badge actions
//! - [`popup`]: Popup requests, user selections, and follow-up effects
//! - [`storage`]: Scopes and visibilities of the host key-value service
//! - [`dummy`]: A sample board for demos and tests
//!
//! # Examples
//!
//! Describing a badge that opens the effort editor:
//!
//! ```
//! use tempo_protocol::{BadgeAction, BadgeDescriptor, CardId, Icon};
//!
//! let card_id = CardId::new("5f1a2b");
//! let badge = BadgeDescriptor::new("Hours effort", "4 h", Icon::Gray).with_action(
//!     BadgeAction::EditEffort {
//!         card_id: card_id.clone(),
//!         key: "effort_hours".to_string(),
//!     },
//! );
//!
//! assert!(matches!(badge.action, Some(BadgeAction::EditEffort { .. })));
//! ```

pub mod badge;
pub mod card;
pub mod dummy;
pub mod popup;
pub mod storage;

// Re-export primary types at crate root for convenience
pub use badge::{BadgeAction, BadgeDescriptor, BoardButton, Icon};
pub use card::{Attachment, CardContext, CardId, CardSummary, HostContext, SortResult};
pub use popup::{AttachmentSection, Effect, FormSpec, PopupItem, PopupRequest, SearchOptions, Selection};
pub use storage::{DEFAULT_SCOPE_QUOTA_CHARS, Scope, StorageTarget, Visibility};
