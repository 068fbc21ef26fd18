//! Per-card effort estimates on top of a [`KeyValueService`].
//!
//! The effort value of a card lives at scope `card`, visibility `shared`:
//! estimates are collaborative data, so they are never stored privately.
//! A card without a stored value has an effort of zero.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempo_config::StoreConfig;
use tempo_protocol::{CardId, HostContext, StorageTarget, Visibility};
use tracing::{debug, error, instrument, warn};

use crate::error::{Result, StoreError};
use crate::service::{KeyValueService, serialized_chars};

/// Visibility every effort value is stored with.
pub const EFFORT_VISIBILITY: Visibility = Visibility::Shared;

/// The effort estimate of one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortRecord {
    /// Card the estimate belongs to.
    pub card_id: CardId,
    /// Estimated hours, never negative.
    pub hours: f64,
}

/// Turns whatever is stored under the effort key into hours.
///
/// Older clients stored the raw form field, so numeric strings are accepted
/// alongside numbers. Anything missing, unparsable, negative or non-finite
/// becomes `0.0`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tempo_store::normalize_hours;
///
/// assert_eq!(normalize_hours(None), 0.0);
/// assert_eq!(normalize_hours(Some(&json!(4.5))), 4.5);
/// assert_eq!(normalize_hours(Some(&json!("3"))), 3.0);
/// assert_eq!(normalize_hours(Some(&json!("lots"))), 0.0);
/// assert_eq!(normalize_hours(Some(&json!(-2))), 0.0);
/// ```
#[must_use]
pub fn normalize_hours(value: Option<&Value>) -> f64 {
    let parsed = match value {
        None | Some(Value::Null) => return 0.0,
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) if text.trim().is_empty() => return 0.0,
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(hours) if hours.is_finite() && hours >= 0.0 => hours,
        _ => {
            warn!(?value, "ignoring malformed effort value");
            0.0
        }
    }
}

/// Typed access to card effort values.
///
/// Both operations need a card in context and fail with
/// [`StoreError::Scope`] otherwise, without touching the service.
///
/// Only one write per card should be in flight at a time; callers keep
/// their save trigger disabled until the previous `set` resolved.
///
/// # Examples
///
/// ```
/// use tempo_protocol::{CardContext, HostContext};
/// use tempo_store::{EffortStore, MemoryService};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> tempo_store::Result<()> {
/// let store = EffortStore::new(MemoryService::new());
/// let context = HostContext::for_card(CardContext::new("c1", "Ship it"), Vec::new());
///
/// assert_eq!(store.get(&context).await?, 0.0);
/// store.set(&context, 5.0).await?;
/// assert_eq!(store.get(&context).await?, 5.0);
///
/// // Board-level contexts cannot hold card data
/// let board = HostContext::for_board(Vec::new());
/// assert!(store.get(&board).await.unwrap_err().is_scope());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EffortStore<S> {
    service: S,
    key: String,
    quota: usize,
}

impl<S: KeyValueService> EffortStore<S> {
    /// Creates a store with the default key and quota.
    #[must_use]
    pub fn new(service: S) -> Self {
        Self::from_config(service, &StoreConfig::default())
    }

    /// Creates a store using the configured key and quota.
    #[must_use]
    pub fn from_config(service: S, config: &StoreConfig) -> Self {
        Self {
            service,
            key: config.effort_key.clone(),
            quota: config.quota_chars,
        }
    }

    /// Returns the storage key of the effort value.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the underlying service.
    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Returns the effort of the card in context, `0.0` if none is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Scope`] without a card in context, and
    /// [`StoreError::Read`] if the service fails.
    pub async fn get(&self, context: &HostContext) -> Result<f64> {
        let card_id = self.require_card(context, "get")?;
        self.get_card(card_id).await
    }

    /// Returns the effort record of the card in context.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn record(&self, context: &HostContext) -> Result<EffortRecord> {
        let card_id = self.require_card(context, "get")?;
        let hours = self.get_card(card_id).await?;
        Ok(EffortRecord {
            card_id: card_id.clone(),
            hours,
        })
    }

    /// Stores the effort of the card in context.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Scope`] without a card in context
    /// - [`StoreError::InvalidHours`] for negative or non-finite hours
    /// - [`StoreError::QuotaExceeded`] if the payload is too large; the
    ///   service is not called in that case
    /// - [`StoreError::Write`] if the service rejects the write
    pub async fn set(&self, context: &HostContext, hours: f64) -> Result<()> {
        let card_id = self.require_card(context, "set")?;
        self.set_card(card_id, hours).await
    }

    /// Reads the effort of an explicitly named card.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the service fails.
    pub async fn get_card(&self, card_id: &CardId) -> Result<f64> {
        self.get_card_at(card_id, &self.key).await
    }

    /// Reads the effort of a card stored under `key` instead of the
    /// configured key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the service fails.
    #[instrument(skip(self))]
    pub async fn get_card_at(&self, card_id: &CardId, key: &str) -> Result<f64> {
        let target = StorageTarget::card(card_id);
        let value = self
            .service
            .read(&target, EFFORT_VISIBILITY, key)
            .await
            .map_err(|source| StoreError::Read {
                target: target.clone(),
                source,
            })?;

        let hours = normalize_hours(value.as_ref());
        debug!(hours, "loaded effort");
        Ok(hours)
    }

    /// Writes the effort of an explicitly named card.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set), minus the scope check.
    pub async fn set_card(&self, card_id: &CardId, hours: f64) -> Result<()> {
        self.set_card_at(card_id, &self.key, hours).await
    }

    /// Writes the effort of a card under `key` instead of the configured
    /// key. The quota applies the same way.
    ///
    /// # Errors
    ///
    /// Same as [`set_card`](Self::set_card).
    #[instrument(skip(self))]
    pub async fn set_card_at(&self, card_id: &CardId, key: &str, hours: f64) -> Result<()> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(StoreError::InvalidHours(hours));
        }

        let target = StorageTarget::card(card_id);
        let value = serde_json::to_value(hours)?;

        let mut payload = serde_json::Map::new();
        payload.insert(key.to_string(), value.clone());
        let size = serialized_chars(&payload);
        if size > self.quota {
            warn!(size, quota = self.quota, "effort payload over quota");
            return Err(StoreError::QuotaExceeded {
                target,
                size,
                quota: self.quota,
            });
        }

        self.service
            .write(&target, EFFORT_VISIBILITY, key, value)
            .await
            .map_err(|source| {
                warn!(error = %source, "effort write failed");
                StoreError::Write {
                    target: target.clone(),
                    source,
                }
            })?;

        debug!("saved effort");
        Ok(())
    }

    fn require_card<'c>(
        &self,
        context: &'c HostContext,
        operation: &'static str,
    ) -> Result<&'c CardId> {
        context.card_id().ok_or_else(|| {
            error!(operation, key = %self.key, "card-scoped call without a card in context");
            StoreError::Scope {
                operation,
                key: self.key.clone(),
            }
        })
    }
}
