//! In-memory deck store.
//!
//! State lives in `im` persistent collections behind a single mutex. Every
//! trait call holds the lock for its whole read-modify-write, which makes
//! `checked_add` atomic with respect to all other calls. Snapshots are O(1)
//! clones of the state and never block writers after they are taken.

use std::sync::{Mutex, MutexGuard};

use im::{OrdMap, Vector};
use tracing::debug;

use crate::cards::CardId;
use crate::core::error::{DeckError, Result, StorageError};
use crate::core::{DeckId, OwnerId};
use crate::zones::Zone;

use super::records::{Deck, DeckCardEntry};
use super::store::{added_quantity, AddGuard, DeckGuard, DeckLedger, DeckStore, LedgerView};

#[derive(Clone, Debug, Default)]
struct LedgerState {
    decks: OrdMap<DeckId, Deck>,
    /// Per-deck entries in insertion order.
    entries: OrdMap<DeckId, Vector<DeckCardEntry>>,
    last_deck_id: u64,
}

impl LedgerState {
    fn entry(&self, deck: DeckId, card: CardId) -> Option<DeckCardEntry> {
        self.entries
            .get(&deck)?
            .iter()
            .find(|e| e.card == card)
            .copied()
    }

    /// Zone the copies will land in. Fails if the deck is gone or the new
    /// quantity is out of range.
    fn plan_add(&self, deck: DeckId, card: CardId, zone: Zone, delta: u32) -> Result<Zone> {
        if !self.decks.contains_key(&deck) {
            return Err(DeckError::DeckNotFound);
        }
        let existing = self.entry(deck, card);
        added_quantity(deck, card, existing.map_or(0, |e| e.quantity), delta)?;
        Ok(existing.map_or(zone, |e| e.zone))
    }

    /// Apply an add accepted by `plan_add`.
    fn add(&mut self, deck: DeckId, card: CardId, zone: Zone, delta: u32) -> DeckCardEntry {
        let mut rows = self.entries.get(&deck).cloned().unwrap_or_default();

        let entry = match rows.iter().position(|e| e.card == card) {
            Some(index) => {
                let mut row = rows[index];
                row.quantity += delta;
                rows.set(index, row);
                row
            }
            None => {
                let row = DeckCardEntry { deck, card, quantity: delta, zone };
                rows.push_back(row);
                row
            }
        };

        self.entries.insert(deck, rows);
        entry
    }

    fn remove(&mut self, deck: DeckId, card: CardId, delta: u32) -> Result<Option<DeckCardEntry>> {
        if delta == 0 {
            return Err(DeckError::InvalidQuantity);
        }
        let mut rows = self.entries.get(&deck).cloned().unwrap_or_default();
        let index = rows
            .iter()
            .position(|e| e.card == card)
            .ok_or_else(|| DeckError::CardNotFound(card.to_string()))?;

        let mut row = rows[index];
        let remaining = if row.quantity <= delta {
            rows.remove(index);
            None
        } else {
            row.quantity -= delta;
            rows.set(index, row);
            Some(row)
        };

        self.entries.insert(deck, rows);
        Ok(remaining)
    }

    fn owner_decks(&self, owner: OwnerId) -> Vec<Deck> {
        self.decks
            .values()
            .filter(|d| d.owner == owner)
            .cloned()
            .collect()
    }
}

impl LedgerView for LedgerState {
    fn get_entry(&self, deck: DeckId, card: CardId) -> Result<Option<DeckCardEntry>> {
        Ok(self.entry(deck, card))
    }

    fn sum_by_zone(&self, deck: DeckId, zone: Zone) -> Result<u32> {
        Ok(self
            .entries
            .get(&deck)
            .map_or(0, |rows| {
                rows.iter()
                    .filter(|e| e.zone == zone)
                    .map(|e| e.quantity)
                    .sum()
            }))
    }

    fn sum_by_card(&self, deck: DeckId, card: CardId) -> Result<u32> {
        Ok(self
            .entries
            .get(&deck)
            .map_or(0, |rows| {
                rows.iter()
                    .filter(|e| e.card == card)
                    .map(|e| e.quantity)
                    .sum()
            }))
    }

    fn list_entries(&self, deck: DeckId) -> Result<Vec<DeckCardEntry>> {
        Ok(self
            .entries
            .get(&deck)
            .map(|rows| rows.iter().copied().collect())
            .unwrap_or_default())
    }
}

/// Frozen copy of an `InMemoryStore`.
#[derive(Clone, Debug)]
pub struct LedgerSnapshot {
    state: LedgerState,
}

impl LedgerSnapshot {
    /// Number of decks at the time of the snapshot.
    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.state.decks.len()
    }

    /// Decks of an owner at the time of the snapshot.
    #[must_use]
    pub fn decks_by_owner(&self, owner: OwnerId) -> Vec<Deck> {
        self.state.owner_decks(owner)
    }
}

impl LedgerView for LedgerSnapshot {
    fn get_entry(&self, deck: DeckId, card: CardId) -> Result<Option<DeckCardEntry>> {
        self.state.get_entry(deck, card)
    }

    fn sum_by_zone(&self, deck: DeckId, zone: Zone) -> Result<u32> {
        self.state.sum_by_zone(deck, zone)
    }

    fn sum_by_card(&self, deck: DeckId, card: CardId) -> Result<u32> {
        self.state.sum_by_card(deck, card)
    }

    fn list_entries(&self, deck: DeckId) -> Result<Vec<DeckCardEntry>> {
        self.state.list_entries(deck)
    }
}

/// Deck store kept entirely in memory.
///
/// ## Usage
///
/// ```
/// use ccg_decks::cards::CardId;
/// use ccg_decks::core::OwnerId;
/// use ccg_decks::ledger::{DeckLedger, DeckStore, InMemoryStore, LedgerView};
/// use ccg_decks::zones::Zone;
///
/// let store = InMemoryStore::new();
/// let deck = store.insert_deck(OwnerId::new(1), "Dragons", "", &|_| Ok(())).unwrap();
///
/// store.upsert_add(deck.id, CardId::new(89631139), Zone::Main, 2).unwrap();
/// assert_eq!(store.sum_by_zone(deck.id, Zone::Main).unwrap(), 2);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<LedgerState>,
}

impl InMemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a consistent, independent copy of the current state.
    pub fn snapshot(&self) -> Result<LedgerSnapshot> {
        let state = self.lock()?;
        Ok(LedgerSnapshot { state: state.clone() })
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerState>> {
        self.state
            .lock()
            .map_err(|_| DeckError::Storage(StorageError::Poisoned))
    }
}

impl LedgerView for InMemoryStore {
    fn get_entry(&self, deck: DeckId, card: CardId) -> Result<Option<DeckCardEntry>> {
        self.lock()?.get_entry(deck, card)
    }

    fn sum_by_zone(&self, deck: DeckId, zone: Zone) -> Result<u32> {
        self.lock()?.sum_by_zone(deck, zone)
    }

    fn sum_by_card(&self, deck: DeckId, card: CardId) -> Result<u32> {
        self.lock()?.sum_by_card(deck, card)
    }

    fn list_entries(&self, deck: DeckId) -> Result<Vec<DeckCardEntry>> {
        self.lock()?.list_entries(deck)
    }
}

impl DeckLedger for InMemoryStore {
    fn upsert_add(
        &self,
        deck: DeckId,
        card: CardId,
        zone: Zone,
        delta: u32,
    ) -> Result<DeckCardEntry> {
        let mut state = self.lock()?;
        let zone = state.plan_add(deck, card, zone, delta)?;
        Ok(state.add(deck, card, zone, delta))
    }

    fn decrement_or_delete(
        &self,
        deck: DeckId,
        card: CardId,
        delta: u32,
    ) -> Result<Option<DeckCardEntry>> {
        self.lock()?.remove(deck, card, delta)
    }

    fn checked_add(
        &self,
        deck: DeckId,
        card: CardId,
        zone: Zone,
        delta: u32,
        guard: &AddGuard<'_>,
    ) -> Result<DeckCardEntry> {
        let mut state = self.lock()?;
        let zone = state.plan_add(deck, card, zone, delta)?;
        guard(&*state, zone)?;
        Ok(state.add(deck, card, zone, delta))
    }
}

impl DeckStore for InMemoryStore {
    fn insert_deck(
        &self,
        owner: OwnerId,
        name: &str,
        description: &str,
        guard: &DeckGuard<'_>,
    ) -> Result<Deck> {
        let mut state = self.lock()?;
        guard(&state.owner_decks(owner))?;

        state.last_deck_id += 1;
        let deck = Deck {
            id: DeckId::new(state.last_deck_id),
            owner,
            name: name.to_string(),
            description: description.to_string(),
        };
        state.decks.insert(deck.id, deck.clone());
        Ok(deck)
    }

    fn find_deck(&self, deck: DeckId, owner: OwnerId) -> Result<Option<Deck>> {
        let state = self.lock()?;
        Ok(state.decks.get(&deck).filter(|d| d.owner == owner).cloned())
    }

    fn decks_by_owner(&self, owner: OwnerId) -> Result<Vec<Deck>> {
        Ok(self.lock()?.owner_decks(owner))
    }

    fn delete_deck(&self, deck: DeckId, owner: OwnerId) -> Result<bool> {
        let mut state = self.lock()?;
        let owned = state.decks.get(&deck).is_some_and(|d| d.owner == owner);
        if !owned {
            return Ok(false);
        }

        state.decks.remove(&deck);
        let removed = state.entries.remove(&deck).map_or(0, |rows| rows.len());
        debug!(%deck, entries = removed, "deleted deck from memory store");
        Ok(true)
    }
}
