//! Card-related types handed to tempo by the host board.
//!
//! The host only exposes the handful of card fields tempo actually reads
//! (`id`, `name`, `due`), plus the attachments of the card in context.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a card on the host board.
///
/// The host owns the format; tempo treats it as an opaque string.
///
/// # Examples
///
/// ```
/// use tempo_protocol::CardId;
///
/// let id = CardId::new("5f1a2b");
/// assert_eq!(id.as_str(), "5f1a2b");
/// assert_eq!(id.to_string(), "5f1a2b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wraps a host card identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A card as listed on the board (one entry of `board_cards`).
///
/// # Examples
///
/// ```
/// use tempo_protocol::CardSummary;
///
/// let card = CardSummary::new("c1", "Write release notes");
/// assert_eq!(card.id.as_str(), "c1");
/// assert!(card.due.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    /// Host identifier of the card.
    pub id: CardId,
    /// Card title.
    pub name: String,
    /// Due date, if one is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
}

impl CardSummary {
    /// Creates a card summary without a due date.
    #[must_use]
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            due: None,
        }
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }
}

/// An attachment on the card in context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Display name of the attachment.
    pub name: String,
    /// Target URL.
    pub url: String,
}

impl Attachment {
    /// Creates an attachment.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The card a capability was invoked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContext {
    /// Host identifier of the card.
    pub id: CardId,
    /// Card title.
    pub name: String,
    /// Due date, if one is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    /// Attachments currently on the card.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl CardContext {
    /// Creates a card context with no due date and no attachments.
    #[must_use]
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            due: None,
            attachments: Vec::new(),
        }
    }
}

impl From<&CardSummary> for CardContext {
    fn from(card: &CardSummary) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            due: card.due,
            attachments: Vec::new(),
        }
    }
}

/// Everything the host passes along with a capability invocation.
///
/// `card` is only present when a specific card is in context (card badges,
/// attachment sections); board-level capabilities such as board buttons get
/// `None`.
///
/// # Examples
///
/// ```
/// use tempo_protocol::{CardContext, CardSummary, HostContext};
///
/// let board = vec![CardSummary::new("a", "First"), CardSummary::new("b", "Second")];
/// let context = HostContext::for_card(CardContext::new("a", "First"), board);
/// assert_eq!(context.card_id().map(|id| id.as_str()), Some("a"));
///
/// let board_only = HostContext::for_board(Vec::new());
/// assert!(board_only.card_id().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    /// The card in context, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardContext>,
    /// All open cards on the board.
    #[serde(default)]
    pub board_cards: Vec<CardSummary>,
}

impl HostContext {
    /// Creates a context with a card in scope.
    #[must_use]
    pub fn for_card(card: CardContext, board_cards: Vec<CardSummary>) -> Self {
        Self {
            card: Some(card),
            board_cards,
        }
    }

    /// Creates a board-level context with no card in scope.
    #[must_use]
    pub fn for_board(board_cards: Vec<CardSummary>) -> Self {
        Self {
            card: None,
            board_cards,
        }
    }

    /// Returns the identifier of the card in context.
    #[must_use]
    pub fn card_id(&self) -> Option<&CardId> {
        self.card.as_ref().map(|card| &card.id)
    }

    /// Returns a copy of this context focused on another card of the board.
    ///
    /// Returns `None` if no board card has the given id.
    #[must_use]
    pub fn focus(&self, id: &CardId) -> Option<Self> {
        let card = self.board_cards.iter().find(|card| &card.id == id)?;
        Some(Self::for_card(card.into(), self.board_cards.clone()))
    }
}

/// Card order produced by a list sorter, consumed once by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortResult {
    /// Card ids in display order.
    pub sorted_ids: Vec<CardId>,
}
