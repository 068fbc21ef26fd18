//! Board capabilities of the tempo power-up.
//!
//! Everything the host board asks tempo for is answered here: card badges,
//! list sorters, board buttons, attachment sections, and the popups behind
//! them. Business-hours arithmetic for due dates lives in [`worktime`].
//!
//! # Overview
//!
//! - [`worktime`]: Business minutes and hours between two instants
//! - [`badges`]: Badge composition from effort state
//! - [`sort`]: List sort strategies
//! - [`actions`]: Popup requests for badge and button actions
//! - [`editor`]: The effort edit form
//! - [`related`]: Attachment section for links to other cards
//! - [`buttons`]: Board header buttons
//! - [`power_up`]: A facade bundling all of the above
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use tempo_board::worktime::business_hours;
//! use tempo_config::TimeWindowConfig;
//!
//! let window = TimeWindowConfig::default();
//! // Monday 2024-03-04, a full working day
//! let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2024, 3, 4, 17, 0, 0).unwrap();
//!
//! assert_eq!(business_hours(&start, &end, &window).unwrap(), 8.0);
//! ```

pub mod actions;
pub mod badges;
pub mod buttons;
pub mod editor;
pub mod power_up;
pub mod related;
pub mod sort;
pub mod worktime;

pub use actions::{handle_related_selection, resolve};
pub use badges::BadgeComposer;
pub use buttons::board_buttons;
pub use editor::EffortEditor;
pub use power_up::PowerUp;
pub use related::claim_card_attachments;
pub use sort::{ListSorter, SortStrategy, list_sorters};
pub use worktime::{business_hours, business_minutes, remaining_business_hours};
