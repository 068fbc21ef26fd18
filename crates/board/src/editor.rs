//! The effort edit form behind the "Hours effort" badge.
//!
//! The editor holds the raw text of the numeric field. Saving parses it,
//! writes it through the [`EffortStore`] and tells the host whether to close
//! the popup or show an error. A failed save leaves both the stored value and
//! the field untouched so the user can retry.

use tempo_protocol::{CardId, Effect, FormSpec, HostContext, Selection};
use tempo_store::{EffortStore, KeyValueService, StoreError};
use tracing::{info, instrument, warn};

/// State of an open effort form.
///
/// `save` takes `&mut self`, so a second save cannot start while the first
/// is still pending.
///
/// # Examples
///
/// ```
/// use tempo_board::EffortEditor;
/// use tempo_protocol::{CardContext, Effect, HostContext, Selection};
/// use tempo_store::{EffortStore, MemoryService};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> tempo_store::Result<()> {
/// let store = EffortStore::new(MemoryService::new());
/// let context = HostContext::for_card(CardContext::new("c1", "Review"), Vec::new());
///
/// let mut editor = EffortEditor::open(&store, &context).await?;
/// assert_eq!(editor.input(), "0");
///
/// let effect = editor.handle(Selection::Submitted("6".to_string())).await;
/// assert_eq!(effect, Effect::ClosePopup);
/// assert_eq!(store.get(&context).await?, 6.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EffortEditor<'s, S> {
    store: &'s EffortStore<S>,
    card_id: CardId,
    key: String,
    input: String,
}

impl<'s, S: KeyValueService> EffortEditor<'s, S> {
    /// Opens the form for the card in context, prefilled with its effort.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Scope`] without a card in context, or the read
    /// error of the store.
    pub async fn open(store: &'s EffortStore<S>, context: &HostContext) -> Result<Self, StoreError> {
        let record = store.record(context).await?;
        Ok(Self {
            store,
            card_id: record.card_id,
            key: store.key().to_string(),
            input: record.hours.to_string(),
        })
    }

    /// Opens the editor behind a form popup.
    ///
    /// The form names its card and storage key, and the editor reads and
    /// writes exactly that key.
    ///
    /// # Errors
    ///
    /// Returns the read error of the store.
    pub async fn for_form(store: &'s EffortStore<S>, form: &FormSpec) -> Result<Self, StoreError> {
        let hours = store.get_card_at(&form.card_id, &form.key).await?;
        Ok(Self {
            store,
            card_id: form.card_id.clone(),
            key: form.key.clone(),
            input: hours.to_string(),
        })
    }

    /// Returns the card being edited.
    #[must_use]
    pub fn card_id(&self) -> &CardId {
        &self.card_id
    }

    /// Returns the storage key being edited.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the current field text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the field text.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Saves the field.
    ///
    /// Returns [`Effect::ClosePopup`] once the value is stored, and
    /// [`Effect::Alert`] if the field is not a valid number of hours or the
    /// store rejected the write.
    #[instrument(skip(self), fields(card = %self.card_id, key = %self.key))]
    pub async fn save(&mut self) -> Effect {
        let hours = match parse_hours(&self.input) {
            Some(hours) => hours,
            None => {
                warn!(input = %self.input, "rejecting effort input");
                return Effect::Alert {
                    message: format!("'{}' is not a valid number of hours", self.input.trim()),
                };
            }
        };

        match self.store.set_card_at(&self.card_id, &self.key, hours).await {
            Ok(()) => {
                info!(hours, "effort saved");
                Effect::ClosePopup
            }
            Err(err) => {
                warn!(error = %err, "effort save failed");
                Effect::Alert {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Applies what the user did in the popup.
    pub async fn handle(&mut self, selection: Selection) -> Effect {
        match selection {
            Selection::Submitted(input) => {
                self.input = input;
                self.save().await
            }
            Selection::Closed => Effect::None,
            Selection::Item(_) => Effect::None,
        }
    }
}

fn parse_hours(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite() && *hours >= 0.0)
}
