//! Records kept by deck stores.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{DeckId, OwnerId};
use crate::zones::Zone;

/// A user-built deck.
///
/// Decks are never modified after creation except through their ledger
/// entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub owner: OwnerId,
    /// Unique per owner.
    pub name: String,
    pub description: String,
}

/// One ledger row: how many copies of a card a deck holds, and where.
///
/// Invariant: `quantity > 0`. Entries that would drop to zero are deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckCardEntry {
    pub deck: DeckId,
    pub card: CardId,
    pub quantity: u32,
    pub zone: Zone,
}

/// Per-zone card totals of a deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub main: u32,
    pub extra: u32,
    pub side: u32,
}

impl DeckSummary {
    /// Total in one zone.
    #[must_use]
    pub fn get(&self, zone: Zone) -> u32 {
        match zone {
            Zone::Main => self.main,
            Zone::Extra => self.extra,
            Zone::Side => self.side,
        }
    }

    /// Total across all zones.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.main + self.extra + self.side
    }

    /// Build from a deck's entries.
    #[must_use]
    pub fn from_entries(entries: &[DeckCardEntry]) -> Self {
        let mut summary = DeckSummary::default();
        for entry in entries {
            let slot = match entry.zone {
                Zone::Main => &mut summary.main,
                Zone::Extra => &mut summary.extra,
                Zone::Side => &mut summary.side,
            };
            *slot += entry.quantity;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_entries() {
        let deck = DeckId::new(1);
        let entries = [
            DeckCardEntry { deck, card: CardId::new(1), quantity: 3, zone: Zone::Main },
            DeckCardEntry { deck, card: CardId::new(2), quantity: 2, zone: Zone::Main },
            DeckCardEntry { deck, card: CardId::new(3), quantity: 1, zone: Zone::Extra },
            DeckCardEntry { deck, card: CardId::new(4), quantity: 2, zone: Zone::Side },
        ];

        let summary = DeckSummary::from_entries(&entries);
        assert_eq!(summary.get(Zone::Main), 5);
        assert_eq!(summary.get(Zone::Extra), 1);
        assert_eq!(summary.get(Zone::Side), 2);
        assert_eq!(summary.total(), 8);
    }

    #[test]
    fn test_entry_serialization() {
        let entry = DeckCardEntry {
            deck: DeckId::new(2),
            card: CardId::new(46986414),
            quantity: 3,
            zone: Zone::Main,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"deck":2,"card":46986414,"quantity":3,"zone":"main"}"#);
    }
}
