//! Attachment section grouping links to other cards.

use tempo_protocol::popup::VIEW_BASE;
use tempo_protocol::{Attachment, AttachmentSection, Icon};

/// URL prefix of links to cards on the host board.
pub const CARD_URL_PREFIX: &str = "https://trello.com/c/";

/// Identifier of the related-cards section.
pub const RELATED_SECTION_ID: &str = "RelatedCards";

/// Claims the attachments that link to other cards.
///
/// Returns a single "Related cards" section holding every card link, or
/// nothing when the card has none.
///
/// # Examples
///
/// ```
/// use tempo_board::related::claim_card_attachments;
/// use tempo_protocol::Attachment;
///
/// let attachments = vec![
///     Attachment::new("Spec", "https://example.com/spec.pdf"),
///     Attachment::new("Login bug", "https://trello.com/c/abc123"),
/// ];
/// let sections = claim_card_attachments(&attachments);
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].claimed.len(), 1);
///
/// assert!(claim_card_attachments(&attachments[..1]).is_empty());
/// ```
#[must_use]
pub fn claim_card_attachments(attachments: &[Attachment]) -> Vec<AttachmentSection> {
    let claimed: Vec<Attachment> = attachments
        .iter()
        .filter(|attachment| attachment.url.starts_with(CARD_URL_PREFIX))
        .cloned()
        .collect();

    if claimed.is_empty() {
        return Vec::new();
    }

    vec![AttachmentSection {
        id: RELATED_SECTION_ID.to_string(),
        title: "Related cards".to_string(),
        icon: Icon::Glitch,
        claimed,
        url: format!("{VIEW_BASE}section.html"),
        height: 230,
    }]
}
