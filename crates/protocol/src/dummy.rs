//! Dummy data generation for testing and demonstration.
//!
//! This module provides a sample board with realistic cards so the binary
//! and the tests have something to work against without a live host.
//!
//! # Examples
//!
//! ```
//! use tempo_protocol::dummy::dummy_board;
//!
//! let cards = dummy_board();
//! assert_eq!(cards.len(), 6);
//! ```

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::card::{CardId, CardSummary, HostContext};

/// A builder for demo cards.
struct CardBuilder {
    name: String,
    due_in_days: Option<i64>,
}

impl CardBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            due_in_days: None,
        }
    }

    /// Sets the due date relative to `now`.
    fn due_in(mut self, days: i64) -> Self {
        self.due_in_days = Some(days);
        self
    }

    fn build(self, now: DateTime<Utc>) -> CardSummary {
        // Host ids are 24 hex characters; a trimmed v4 UUID looks the part.
        let id = Uuid::new_v4().simple().to_string()[..24].to_string();
        CardSummary {
            id: CardId::new(id),
            name: self.name,
            due: self.due_in_days.map(|days| now + Duration::days(days)),
        }
    }
}

/// Generates the cards of a sample board.
///
/// Four of the six cards carry a due date between two days ago and ten days
/// ahead of the current time; two have none. Names are deliberately out of
/// alphabetical order and contain one duplicate so sorting has something to
/// do.
#[must_use]
pub fn dummy_board() -> Vec<CardSummary> {
    dummy_board_at(Utc::now())
}

/// Generates the sample board with due dates relative to `now`.
#[must_use]
pub fn dummy_board_at(now: DateTime<Utc>) -> Vec<CardSummary> {
    vec![
        CardBuilder::new("Write onboarding guide").due_in(10),
        CardBuilder::new("Fix login redirect").due_in(2),
        CardBuilder::new("Audit dependencies"),
        CardBuilder::new("Prepare sprint demo").due_in(-2),
        CardBuilder::new("Fix login redirect").due_in(5),
        CardBuilder::new("Backup rotation"),
    ]
    .into_iter()
    .map(|builder| builder.build(now))
    .collect()
}

/// Returns a host context focused on the first card of the sample board.
#[must_use]
pub fn dummy_context() -> HostContext {
    let cards = dummy_board();
    let mut context = HostContext::for_board(cards);
    if let Some(first) = context.board_cards.first() {
        context.card = Some(first.into());
    }
    context
}
