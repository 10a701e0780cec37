//! Identifiers for decks and their owners.
//!
//! Both are opaque to the engine. Decks are allocated by the store that
//! persists them; owner identifiers come from the caller's authentication
//! layer, which this crate trusts and only compares for equality.
//!
//! ```
//! use ccg_decks::core::{DeckId, OwnerId};
//!
//! let deck = DeckId::new(7);
//! let owner = OwnerId::new(3);
//!
//! assert_eq!(deck.raw(), 7);
//! assert_eq!(format!("{} of {}", deck, owner), "Deck(7) of Owner(3)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeckId(pub u64);

impl DeckId {
    /// Create a new deck ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deck({})", self.0)
    }
}

/// Identifier of the user that owns a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(pub u64);

impl OwnerId {
    /// Create a new owner ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Owner({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_id() {
        let id = DeckId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Deck(42)");
    }

    #[test]
    fn test_owner_id_ordering() {
        assert!(OwnerId::new(1) < OwnerId::new(2));
        assert_eq!(OwnerId::new(5), OwnerId(5));
    }

    #[test]
    fn test_ids_serialize_transparently_as_tuples() {
        let json = serde_json::to_string(&DeckId::new(9)).unwrap();
        assert_eq!(json, "9");

        let back: OwnerId = serde_json::from_str("12").unwrap();
        assert_eq!(back, OwnerId::new(12));
    }
}
