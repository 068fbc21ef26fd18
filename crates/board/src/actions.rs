//! Turns badge and button actions into popup requests.
//!
//! Resolving an action is pure. The host opens the returned popup, reports
//! what the user did as a [`Selection`], and the matching handler answers
//! with an [`Effect`].

use tempo_protocol::popup::VIEW_BASE;
use tempo_protocol::{
    BadgeAction, CardId, Effect, FormSpec, HostContext, PopupItem, PopupRequest, SearchOptions,
    Selection,
};
use tracing::debug;

/// Title of the effort edit popup.
pub const EFFORT_FORM_TITLE: &str = "Hours effort settings";

/// Height of the effort edit popup, in pixels.
pub const EFFORT_FORM_HEIGHT: u32 = 184;

/// Label of the effort form field.
pub const EFFORT_FIELD_DESCRIPTION: &str = "Expected number of hours";

/// Title of the related-card search popup.
pub const RELATED_SEARCH_TITLE: &str = "Add related card";

/// Title of the settings modal.
pub const SETTINGS_TITLE: &str = "Plugin settings";

const SETTINGS_URL: &str = "./settings";
const SETTINGS_HEIGHT: u32 = 500;
const SETTINGS_ACCENT: &str = "#ffffff";

/// Returns the popup an action opens.
///
/// The related-card search lists every board card except the one the
/// selection would be attached to.
///
/// # Examples
///
/// ```
/// use tempo_board::actions::resolve;
/// use tempo_protocol::{BadgeAction, CardId, CardSummary, HostContext, PopupRequest};
///
/// let board = vec![CardSummary::new("a", "Alpha"), CardSummary::new("b", "Beta")];
/// let context = HostContext::for_board(board);
/// let action = BadgeAction::SearchRelatedCards { card_id: CardId::new("a") };
///
/// match resolve(&action, &context) {
///     PopupRequest::Search { items, .. } => {
///         assert_eq!(items.len(), 1);
///         assert_eq!(items[0].text, "Beta");
///     }
///     other => panic!("unexpected popup {other:?}"),
/// }
/// ```
#[must_use]
pub fn resolve(action: &BadgeAction, context: &HostContext) -> PopupRequest {
    debug!(?action, "resolving action");
    match action {
        BadgeAction::EditEffort { card_id, key } => PopupRequest::Form {
            title: EFFORT_FORM_TITLE.to_string(),
            form: FormSpec {
                url: format!("{VIEW_BASE}numeric_form.html"),
                card_id: card_id.clone(),
                key: key.clone(),
                description: EFFORT_FIELD_DESCRIPTION.to_string(),
            },
            height: EFFORT_FORM_HEIGHT,
        },
        BadgeAction::SearchRelatedCards { card_id } => PopupRequest::Search {
            title: RELATED_SEARCH_TITLE.to_string(),
            items: context
                .board_cards
                .iter()
                .filter(|card| &card.id != card_id)
                .map(|card| PopupItem {
                    id: card.id.clone(),
                    text: card.name.clone(),
                })
                .collect(),
            search: SearchOptions::new("Board cards", "No cards found"),
        },
        BadgeAction::OpenSettings => PopupRequest::Modal {
            title: SETTINGS_TITLE.to_string(),
            url: SETTINGS_URL.to_string(),
            height: SETTINGS_HEIGHT,
            fullscreen: false,
            accent_color: SETTINGS_ACCENT.to_string(),
        },
    }
}

/// Handles the user's choice in the related-card search of `card_id`.
///
/// Picking the card itself is ignored; closing the popup does nothing.
#[must_use]
pub fn handle_related_selection(card_id: &CardId, selection: &Selection) -> Effect {
    match selection {
        Selection::Item(related_id) if related_id != card_id => Effect::AttachRelatedCard {
            card_id: card_id.clone(),
            related_id: related_id.clone(),
        },
        Selection::Item(_) | Selection::Submitted(_) | Selection::Closed => Effect::None,
    }
}
