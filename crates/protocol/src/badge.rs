//! Badge descriptors and the actions they can trigger.
//!
//! Badges are recomputed on every host request and never persisted. The
//! action attached to a badge is plain data; the host hands it back when the
//! user clicks the badge and the action layer turns it into a popup request.

use serde::{Deserialize, Serialize};

use crate::card::CardId;

/// Base path of the static assets served next to the power-up.
pub const ASSET_BASE: &str = "./public/";

/// Icons tempo can attach to badges and buttons.
///
/// # Examples
///
/// ```
/// use tempo_protocol::Icon;
///
/// assert_eq!(Icon::Gray.url(), "./public/images/icon-gray.svg");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    /// Neutral icon used on card badges.
    Gray,
    /// Light icon used on the dark board header.
    White,
    /// Icon of the attachment section.
    Glitch,
}

impl Icon {
    /// Returns the asset URL of the icon, relative to the power-up root.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::Gray => "./public/images/icon-gray.svg",
            Self::White => "./public/images/icon-white.svg",
            Self::Glitch => "./public/images/glitch.svg",
        }
    }
}

/// What happens when the user clicks a badge or button.
///
/// Every variant carries the identifiers it needs, so resolving an action
/// never depends on ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BadgeAction {
    /// Open the effort edit form for a card.
    EditEffort {
        /// Card whose effort is edited.
        card_id: CardId,
        /// Storage key holding the effort value.
        key: String,
    },
    /// Open a search over the board cards to pick a related card.
    SearchRelatedCards {
        /// Card the selection will be attached to.
        card_id: CardId,
    },
    /// Open the settings modal.
    OpenSettings,
}

/// A badge ready to be rendered by the host.
///
/// # Examples
///
/// ```
/// use tempo_protocol::{BadgeDescriptor, Icon};
///
/// let badge = BadgeDescriptor::new("Hours effort", "3 h", Icon::Gray);
/// assert!(badge.action.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDescriptor {
    /// Tooltip title.
    pub title: String,
    /// Text shown on the badge.
    pub text: String,
    /// Badge icon.
    pub icon: Icon,
    /// Click action, if the badge is interactive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<BadgeAction>,
}

impl BadgeDescriptor {
    /// Creates a badge without an action.
    #[must_use]
    pub fn new(title: impl Into<String>, text: impl Into<String>, icon: Icon) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            icon,
            action: None,
        }
    }

    /// Attaches a click action.
    #[must_use]
    pub fn with_action(mut self, action: BadgeAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// A button on the board header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardButton {
    /// Button icon.
    pub icon: Icon,
    /// Button label.
    pub text: String,
    /// Click action.
    pub action: BadgeAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_urls_live_under_asset_base() {
        for icon in [Icon::Gray, Icon::White, Icon::Glitch] {
            assert!(icon.url().starts_with(ASSET_BASE));
        }
    }

    #[test]
    fn action_json_is_tagged() {
        let action = BadgeAction::EditEffort {
            card_id: CardId::new("c1"),
            key: "effort_hours".to_string(),
        };
        let json = serde_json::to_value(&action).expect("serialize");
        assert_eq!(json["type"], "edit_effort");
        assert_eq!(json["card_id"], "c1");
        assert_eq!(json["key"], "effort_hours");
    }

    #[test]
    fn descriptor_without_action_omits_it() {
        let badge = BadgeDescriptor::new("Related cards", "related", Icon::Gray);
        let json = serde_json::to_string(&badge).expect("serialize");
        assert!(!json.contains("action"));
    }
}
