//! Storage traits consumed by the deck service.
//!
//! Stores implement `DeckStore` for deck records and `DeckLedger` for the
//! (deck, card) -> (quantity, zone) mapping.
//!
//! ## Atomicity
//!
//! Legality checks read aggregates and must not race with the write they
//! guard. `DeckLedger::checked_add` and `DeckStore::insert_deck` therefore
//! take a guard closure that runs *inside* the store's atomic unit, against
//! a view of the locked state. A store must not commit unless the guard
//! returns `Ok`.

use crate::cards::CardId;
use crate::core::error::{DeckError, Result, StorageError};
use crate::core::{DeckId, OwnerId};
use crate::zones::Zone;

use super::records::{Deck, DeckCardEntry};

/// Guard run inside `checked_add`. Receives the locked view and the zone
/// the card will actually occupy.
pub type AddGuard<'a> = dyn Fn(&dyn LedgerView, Zone) -> Result<()> + 'a;

/// Guard run inside `insert_deck`. Receives the owner's existing decks.
pub type DeckGuard<'a> = dyn Fn(&[Deck]) -> Result<()> + 'a;

/// Read-only ledger queries.
pub trait LedgerView {
    /// Get the entry for a (deck, card) pair.
    fn get_entry(&self, deck: DeckId, card: CardId) -> Result<Option<DeckCardEntry>>;

    /// Sum of quantities in one zone of a deck.
    fn sum_by_zone(&self, deck: DeckId, zone: Zone) -> Result<u32>;

    /// Sum of quantities of one card across all zones of a deck.
    fn sum_by_card(&self, deck: DeckId, card: CardId) -> Result<u32>;

    /// All entries of a deck, in insertion order.
    fn list_entries(&self, deck: DeckId) -> Result<Vec<DeckCardEntry>>;
}

/// Mutable ledger operations. Each call is one atomic read-modify-write.
pub trait DeckLedger: LedgerView {
    /// Create the entry with `delta` copies in `zone`, or add `delta` to an
    /// existing entry. An existing entry keeps its zone.
    fn upsert_add(
        &self,
        deck: DeckId,
        card: CardId,
        zone: Zone,
        delta: u32,
    ) -> Result<DeckCardEntry>;

    /// Remove `delta` copies. Deletes the entry when `quantity <= delta`.
    ///
    /// Returns the remaining entry, or `None` if it was deleted.
    /// Fails with `CardNotFound` if the deck does not hold the card.
    fn decrement_or_delete(
        &self,
        deck: DeckId,
        card: CardId,
        delta: u32,
    ) -> Result<Option<DeckCardEntry>>;

    /// `upsert_add` that first runs `guard` in the same atomic unit.
    ///
    /// The zone passed to `guard` is the existing entry's zone when there is
    /// one, otherwise `zone`.
    fn checked_add(
        &self,
        deck: DeckId,
        card: CardId,
        zone: Zone,
        delta: u32,
        guard: &AddGuard<'_>,
    ) -> Result<DeckCardEntry>;
}

/// Deck record persistence.
pub trait DeckStore {
    /// Persist a new deck after `guard` accepts the owner's existing decks.
    fn insert_deck(
        &self,
        owner: OwnerId,
        name: &str,
        description: &str,
        guard: &DeckGuard<'_>,
    ) -> Result<Deck>;

    /// Find a deck owned by `owner`.
    fn find_deck(&self, deck: DeckId, owner: OwnerId) -> Result<Option<Deck>>;

    /// All decks of an owner, in creation order.
    fn decks_by_owner(&self, owner: OwnerId) -> Result<Vec<Deck>>;

    /// Delete a deck and its entries. Returns `false` if `owner` has no
    /// such deck.
    fn delete_deck(&self, deck: DeckId, owner: OwnerId) -> Result<bool>;
}

/// Quantity of an entry holding `current` copies after adding `delta`.
///
/// Shared by the stores so both reject a zero delta and an overflowing
/// total the same way.
pub(crate) fn added_quantity(deck: DeckId, card: CardId, current: u32, delta: u32) -> Result<u32> {
    if delta == 0 {
        return Err(DeckError::InvalidQuantity);
    }
    current.checked_add(delta).ok_or_else(|| {
        StorageError::Corrupt(format!("quantity of {} in {} overflows", card, deck)).into()
    })
}
