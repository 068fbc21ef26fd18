//! Storage scopes and visibilities of the host key-value service.
//!
//! Every stored value lives under a `(scope, entity, visibility, key)`
//! tuple. The host enforces a fixed character quota per
//! `(scope, entity, visibility)` blob.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::CardId;

/// Character quota the host allows per scope/visibility blob.
pub const DEFAULT_SCOPE_QUOTA_CHARS: usize = 4096;

/// The entity kind a value is attached to.
///
/// # Examples
///
/// ```
/// use tempo_protocol::Scope;
///
/// assert_eq!(Scope::Card.as_str(), "card");
/// assert_eq!(Scope::all().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The team owning the board.
    Organization,
    /// The current board.
    Board,
    /// A single card; only usable with a card in context.
    Card,
    /// The current member.
    Member,
}

impl Scope {
    /// Returns all scopes.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Organization, Self::Board, Self::Card, Self::Member]
    }

    /// Returns the host's name for this scope.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Board => "board",
            Self::Card => "card",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who can see a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only the current member.
    Private,
    /// Every collaborator on the board.
    Shared,
}

impl Visibility {
    /// Returns the host's name for this visibility.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Shared => "shared",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete scope instance: the scope kind plus the entity it refers to.
///
/// # Examples
///
/// ```
/// use tempo_protocol::{CardId, Scope, StorageTarget};
///
/// let target = StorageTarget::card(&CardId::new("c42"));
/// assert_eq!(target.scope, Scope::Card);
/// assert_eq!(target.to_string(), "card:c42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageTarget {
    /// Scope kind.
    pub scope: Scope,
    /// Identifier of the entity within the scope.
    pub entity_id: String,
}

impl StorageTarget {
    /// Creates a target for an arbitrary scope.
    #[must_use]
    pub fn new(scope: Scope, entity_id: impl Into<String>) -> Self {
        Self {
            scope,
            entity_id: entity_id.into(),
        }
    }

    /// Creates a card-scoped target.
    #[must_use]
    pub fn card(id: &CardId) -> Self {
        Self::new(Scope::Card, id.as_str())
    }
}

impl fmt::Display for StorageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope, self.entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_json_format() {
        let json = serde_json::to_string(&Scope::Organization).expect("serialize");
        assert_eq!(json, r#""organization""#);
    }

    #[test]
    fn visibility_json_format() {
        let json = serde_json::to_string(&Visibility::Shared).expect("serialize");
        assert_eq!(json, r#""shared""#);
    }

    #[test]
    fn scope_names_match_serialization() {
        for scope in Scope::all() {
            let json = serde_json::to_string(&scope).expect("serialize");
            assert_eq!(json, format!("\"{}\"", scope.as_str()));
        }
    }
}
