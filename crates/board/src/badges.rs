//! Card badges derived from effort state.

use tempo_config::DEFAULT_EFFORT_KEY;
use tempo_protocol::{BadgeAction, BadgeDescriptor, CardId, Icon};

/// Title of the effort badge.
pub const HOURS_EFFORT_TITLE: &str = "Hours effort";

/// Title of the related-cards badge.
pub const RELATED_CARDS_TITLE: &str = "Related cards";

/// Builds the badges shown on a card.
///
/// Composition is pure: it reads nothing but its arguments, and clicking a
/// badge is expressed as a [`BadgeAction`] the host hands back later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeComposer {
    effort_key: String,
}

impl Default for BadgeComposer {
    fn default() -> Self {
        Self::new(DEFAULT_EFFORT_KEY)
    }
}

impl BadgeComposer {
    /// Creates a composer whose edit actions target `effort_key`.
    #[must_use]
    pub fn new(effort_key: impl Into<String>) -> Self {
        Self {
            effort_key: effort_key.into(),
        }
    }

    /// Returns the storage key the effort badge edits.
    #[must_use]
    pub fn effort_key(&self) -> &str {
        &self.effort_key
    }

    /// Composes the badges of `card_id`.
    ///
    /// The effort badge comes first and is only present when `detailed` is
    /// set or the card has a non-zero effort. The related-cards badge is
    /// always present and always last.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempo_board::BadgeComposer;
    /// use tempo_protocol::CardId;
    ///
    /// let composer = BadgeComposer::default();
    /// let card = CardId::new("c1");
    ///
    /// assert_eq!(composer.compose(&card, None, false).len(), 1);
    /// assert_eq!(composer.compose(&card, Some(0.0), true).len(), 2);
    ///
    /// let badges = composer.compose(&card, Some(5.0), false);
    /// assert_eq!(badges[0].text, "5 h");
    /// assert_eq!(badges[1].title, "Related cards");
    /// ```
    #[must_use]
    pub fn compose(
        &self,
        card_id: &CardId,
        hours: Option<f64>,
        detailed: bool,
    ) -> Vec<BadgeDescriptor> {
        let mut badges = Vec::with_capacity(2);

        if detailed || is_set(hours) {
            badges.push(self.effort_badge(card_id, hours.unwrap_or(0.0)));
        }
        badges.push(related_badge(card_id));

        badges
    }

    fn effort_badge(&self, card_id: &CardId, hours: f64) -> BadgeDescriptor {
        BadgeDescriptor::new(HOURS_EFFORT_TITLE, format!("{hours} h"), Icon::Gray).with_action(
            BadgeAction::EditEffort {
                card_id: card_id.clone(),
                key: self.effort_key.clone(),
            },
        )
    }
}

// Zero and NaN are treated like a missing value.
fn is_set(hours: Option<f64>) -> bool {
    hours.is_some_and(|hours| hours != 0.0 && !hours.is_nan())
}

fn related_badge(card_id: &CardId) -> BadgeDescriptor {
    BadgeDescriptor::new(RELATED_CARDS_TITLE, "related", Icon::Gray).with_action(
        BadgeAction::SearchRelatedCards {
            card_id: card_id.clone(),
        },
    )
}
