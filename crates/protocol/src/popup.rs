//! Popup requests, popup results, and follow-up effects.
//!
//! The host never calls back into tempo through closures. Instead tempo
//! returns a [`PopupRequest`] describing what to show, the host reports the
//! user's [`Selection`], and tempo answers with an [`Effect`] for the host to
//! carry out.

use serde::{Deserialize, Serialize};

use crate::badge::Icon;
use crate::card::{Attachment, CardId};

/// Base path of the views served next to the power-up.
pub const VIEW_BASE: &str = "./views/";

/// Display options for a searchable popup list.
///
/// # Examples
///
/// ```
/// use tempo_protocol::SearchOptions;
///
/// let search = SearchOptions::new("Board cards", "No cards found");
/// assert_eq!(search.count, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// How many items are shown at a time.
    pub count: usize,
    /// Placeholder of the search field.
    pub placeholder: String,
    /// Text shown when nothing matches.
    pub empty: String,
}

impl SearchOptions {
    /// Items displayed at a time unless stated otherwise.
    pub const DEFAULT_COUNT: usize = 5;

    /// Creates search options with the default item count.
    #[must_use]
    pub fn new(placeholder: impl Into<String>, empty: impl Into<String>) -> Self {
        Self {
            count: Self::DEFAULT_COUNT,
            placeholder: placeholder.into(),
            empty: empty.into(),
        }
    }
}

/// One selectable entry of a search popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupItem {
    /// Card the item stands for.
    pub id: CardId,
    /// Text the host searches and displays.
    pub text: String,
}

/// The numeric form used to edit a card value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    /// View rendering the form.
    pub url: String,
    /// Card the form edits.
    pub card_id: CardId,
    /// Storage key the form reads and writes.
    pub key: String,
    /// Label of the numeric field.
    pub description: String,
}

/// A popup or modal tempo asks the host to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopupRequest {
    /// An iframe popup hosting a form.
    Form {
        /// Popup title.
        title: String,
        /// The form to render.
        form: FormSpec,
        /// Initial height in pixels.
        height: u32,
    },
    /// A host-rendered list searchable on the client side.
    Search {
        /// Popup title.
        title: String,
        /// Items to choose from.
        items: Vec<PopupItem>,
        /// Search display options.
        search: SearchOptions,
    },
    /// A modal iframe over the board.
    Modal {
        /// Modal header title.
        title: String,
        /// View to load.
        url: String,
        /// Initial height in pixels; ignored when fullscreen.
        height: u32,
        /// Whether the modal covers the whole screen.
        fullscreen: bool,
        /// Header color.
        accent_color: String,
    },
}

impl PopupRequest {
    /// Returns the popup title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Form { title, .. } | Self::Search { title, .. } | Self::Modal { title, .. } => {
                title
            }
        }
    }
}

/// What the user did in a popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Selection {
    /// An item of a search popup was picked.
    Item(CardId),
    /// A form was submitted with the given raw field value.
    Submitted(String),
    /// The popup was dismissed.
    Closed,
}

/// What the host should do after tempo handled a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Close the current popup.
    ClosePopup,
    /// Attach `related_id` to `card_id`.
    AttachRelatedCard {
        /// Card receiving the attachment.
        card_id: CardId,
        /// Card being linked.
        related_id: CardId,
    },
    /// Show an error message to the user; the popup stays open.
    Alert {
        /// Message to show.
        message: String,
    },
}

/// An attachment section claimed on the card back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSection {
    /// Section identifier.
    pub id: String,
    /// Section title.
    pub title: String,
    /// Section icon.
    pub icon: Icon,
    /// Attachments rendered by the section instead of the default list.
    pub claimed: Vec<Attachment>,
    /// View rendering the section.
    pub url: String,
    /// Initial height in pixels.
    pub height: u32,
}
