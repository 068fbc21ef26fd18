//! Entry point bundling every capability the host can invoke.

use chrono::{DateTime, TimeZone};
use tempo_config::{Config, ConfigError, TimeWindowConfig};
use tempo_protocol::{
    AttachmentSection, BadgeAction, BadgeDescriptor, BoardButton, CardSummary, FormSpec,
    HostContext, PopupRequest, SortResult,
};
use tempo_store::{EffortStore, KeyValueService, StoreError};
use tracing::{debug, instrument};

use crate::actions;
use crate::badges::BadgeComposer;
use crate::buttons;
use crate::editor::EffortEditor;
use crate::related;
use crate::sort::{self, ListSorter, SortStrategy};
use crate::worktime;

/// The power-up as seen by the host.
///
/// Each method answers one host capability request. Requests are
/// independent: nothing is cached between them.
#[derive(Debug)]
pub struct PowerUp<S> {
    store: EffortStore<S>,
    composer: BadgeComposer,
    window: TimeWindowConfig,
}

impl<S: KeyValueService> PowerUp<S> {
    /// Builds the power-up over a key-value service.
    #[must_use]
    pub fn new(service: S, config: &Config) -> Self {
        let store = EffortStore::from_config(service, &config.store);
        let composer = BadgeComposer::new(store.key());
        Self {
            store,
            composer,
            window: config.work_window,
        }
    }

    /// Returns the effort store.
    #[must_use]
    pub fn store(&self) -> &EffortStore<S> {
        &self.store
    }

    /// Returns the configured work window.
    #[must_use]
    pub fn window(&self) -> &TimeWindowConfig {
        &self.window
    }

    /// Badges on the card front.
    ///
    /// # Errors
    ///
    /// Fails if there is no card in context or the effort cannot be read.
    pub async fn card_badges(&self, context: &HostContext) -> Result<Vec<BadgeDescriptor>, StoreError> {
        self.badges(context, false).await
    }

    /// Badges on the card back; the effort badge is always shown.
    ///
    /// # Errors
    ///
    /// Same as [`card_badges`](Self::card_badges).
    pub async fn card_detail_badges(
        &self,
        context: &HostContext,
    ) -> Result<Vec<BadgeDescriptor>, StoreError> {
        self.badges(context, true).await
    }

    #[instrument(skip(self, context), fields(card = ?context.card_id()))]
    async fn badges(
        &self,
        context: &HostContext,
        detailed: bool,
    ) -> Result<Vec<BadgeDescriptor>, StoreError> {
        let record = self.store.record(context).await?;
        let badges = self
            .composer
            .compose(&record.card_id, Some(record.hours), detailed);
        debug!(count = badges.len(), "composed badges");
        Ok(badges)
    }

    /// Entries of the list sort menu.
    #[must_use]
    pub fn list_sorters(&self) -> Vec<ListSorter> {
        sort::list_sorters()
    }

    /// Orders the cards of a list.
    #[must_use]
    pub fn sort(&self, strategy: SortStrategy, cards: &[CardSummary]) -> SortResult {
        strategy.sort(cards)
    }

    /// Buttons on the board header.
    #[must_use]
    pub fn board_buttons(&self) -> Vec<BoardButton> {
        buttons::board_buttons()
    }

    /// Attachment sections of the card in context.
    #[must_use]
    pub fn attachment_sections(&self, context: &HostContext) -> Vec<AttachmentSection> {
        context
            .card
            .as_ref()
            .map(|card| related::claim_card_attachments(&card.attachments))
            .unwrap_or_default()
    }

    /// Popup to open for a clicked badge or button.
    #[must_use]
    pub fn on_action(&self, action: &BadgeAction, context: &HostContext) -> PopupRequest {
        actions::resolve(action, context)
    }

    /// Opens the effort form of the card in context.
    ///
    /// # Errors
    ///
    /// Same as [`EffortEditor::open`].
    pub async fn edit_effort(&self, context: &HostContext) -> Result<EffortEditor<'_, S>, StoreError> {
        EffortEditor::open(&self.store, context).await
    }

    /// Opens the editor behind a form popup returned by
    /// [`on_action`](Self::on_action). Values are saved under the form's key.
    ///
    /// # Errors
    ///
    /// Same as [`EffortEditor::for_form`].
    pub async fn open_form(&self, form: &FormSpec) -> Result<EffortEditor<'_, S>, StoreError> {
        EffortEditor::for_form(&self.store, form).await
    }

    /// Business hours left until the due date of the card in context.
    ///
    /// Zero when there is no card, no due date, or the date has passed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeWindow`] if the work window is
    /// malformed.
    pub fn remaining_hours<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        context: &HostContext,
    ) -> Result<f64, ConfigError> {
        let due = context.card.as_ref().and_then(|card| card.due);
        worktime::remaining_business_hours(now, due, &self.window)
    }
}
