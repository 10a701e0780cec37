//! Card references - the minimal card view the deck engine needs.
//!
//! Card metadata lives in an external catalog. The engine only borrows
//! what it needs to place and validate a card: the catalog identifier,
//! the display name and the frame type that decides its zone.

use serde::{Deserialize, Serialize};

/// Catalog identifier for a card.
///
/// This is the identifier written to and read from deck lists, so it is
/// stable across installations of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Minimal external view of a card.
///
/// ## Example
///
/// ```
/// use ccg_decks::cards::{CardId, CardRef};
///
/// let magician = CardRef::new(CardId::new(46986414), "Dark Magician", "normal");
///
/// assert_eq!(magician.frame_type, "normal");
/// assert_eq!(magician.id.raw(), 46986414);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    /// Catalog identifier.
    pub id: CardId,

    /// Card name (for display and name lookups).
    pub name: String,

    /// Frame type as reported by the catalog ("normal", "effect",
    /// "fusion", "link", "spell", ...).
    pub frame_type: String,
}

impl CardRef {
    /// Create a new card reference.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, frame_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            frame_type: frame_type.into(),
        }
    }
}
