use tempo_protocol::{BadgeAction, BoardButton, Icon};

/// Buttons tempo adds to the board header.
#[must_use]
pub fn board_buttons() -> Vec<BoardButton> {
    vec![BoardButton {
        icon: Icon::White,
        text: "Task Prioritizer".to_string(),
        action: BadgeAction::OpenSettings,
    }]
}
