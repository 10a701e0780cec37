//! Deck orchestrator.
//!
//! `DeckService` owns a store, a card resolver and a legality validator, and
//! runs every request through the same pipeline:
//!
//! 1. Check ownership of the deck
//! 2. Resolve the card reference
//! 3. Classify the card into a zone (imports trust the section instead)
//! 4. Validate and commit in one atomic store call
//!
//! Validation never happens outside the store's atomic unit, so concurrent
//! requests against one deck cannot jointly exceed a limit.

use std::io::{BufReader, Read};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::{CardId, CardLookup, CardRef, CardResolver};
use crate::codec::{self, DecodedDeck};
use crate::core::config::{DeckRules, ImportPolicy};
use crate::core::error::{DeckError, Result};
use crate::core::{DeckId, OwnerId};
use crate::ledger::{Deck, DeckCardEntry, DeckLedger, DeckStore, DeckSummary, LedgerView};
use crate::rules::LegalityValidator;
use crate::zones::{classify, Zone};

/// Copies committed by an import, per zone they landed in.
///
/// A copy listed under one section can land in another zone when the deck
/// already holds that card there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub main: u32,
    pub extra: u32,
    pub side: u32,
}

impl ImportReport {
    /// Total copies committed.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.main + self.extra + self.side
    }

    fn record(&mut self, zone: Zone) {
        match zone {
            Zone::Main => self.main += 1,
            Zone::Extra => self.extra += 1,
            Zone::Side => self.side += 1,
        }
    }
}

/// Coordinates deck lifecycle, card additions and import/export.
///
/// ## Usage
///
/// ```
/// use ccg_decks::cards::{CardCatalog, CardId, CardRef};
/// use ccg_decks::core::OwnerId;
/// use ccg_decks::ledger::InMemoryStore;
/// use ccg_decks::service::DeckService;
/// use ccg_decks::zones::Zone;
///
/// let catalog: CardCatalog = [CardRef::new(CardId::new(1), "Blue-Eyes", "normal")]
///     .into_iter()
///     .collect();
/// let service = DeckService::new(InMemoryStore::new(), catalog);
///
/// let owner = OwnerId::new(1);
/// let deck = service.create_deck(owner, "Dragons", "").unwrap();
/// let entry = service.add_card(owner, deck.id, CardId::new(1), 2).unwrap();
/// assert_eq!(entry.zone, Zone::Main);
///
/// let text = service.export_deck(owner, deck.id).unwrap();
/// assert_eq!(text, "#main\n1\n1\n#extra\n\n#side\n");
/// ```
#[derive(Debug)]
pub struct DeckService<S, R> {
    store: S,
    resolver: R,
    validator: LegalityValidator,
}

impl<S, R> DeckService<S, R>
where
    S: DeckStore + DeckLedger,
    R: CardResolver,
{
    /// Create a service enforcing the default rules.
    pub fn new(store: S, resolver: R) -> Self {
        Self {
            store,
            resolver,
            validator: LegalityValidator::default(),
        }
    }

    /// Create a service enforcing `rules`.
    pub fn with_rules(store: S, resolver: R, rules: DeckRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            store,
            resolver,
            validator: LegalityValidator::new(rules),
        })
    }

    /// The rules being enforced.
    pub fn rules(&self) -> &DeckRules {
        self.validator.rules()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The card resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    // =========================================================================
    // Deck lifecycle
    // =========================================================================

    /// Create a deck. Fails if the owner is at the deck limit or already
    /// has a deck named `name`.
    pub fn create_deck(&self, owner: OwnerId, name: &str, description: &str) -> Result<Deck> {
        let guard = |existing: &[Deck]| self.validator.validate_new_deck(existing, name);
        let deck = self.store.insert_deck(owner, name, description, &guard)?;
        info!(%owner, deck = %deck.id, name, "created deck");
        Ok(deck)
    }

    /// Delete a deck and all of its entries.
    ///
    /// A second delete of the same deck fails with `DeckNotFound`.
    pub fn delete_deck(&self, owner: OwnerId, deck: DeckId) -> Result<()> {
        if !self.store.delete_deck(deck, owner)? {
            return Err(DeckError::DeckNotFound);
        }
        info!(%owner, %deck, "deleted deck");
        Ok(())
    }

    /// All decks of an owner, in creation order.
    pub fn list_decks(&self, owner: OwnerId) -> Result<Vec<Deck>> {
        self.store.decks_by_owner(owner)
    }

    /// Entries of an owned deck, in insertion order.
    pub fn deck_entries(&self, owner: OwnerId, deck: DeckId) -> Result<Vec<DeckCardEntry>> {
        self.require_deck(owner, deck)?;
        self.store.list_entries(deck)
    }

    /// Per-zone totals of an owned deck.
    pub fn deck_summary(&self, owner: OwnerId, deck: DeckId) -> Result<DeckSummary> {
        let entries = self.deck_entries(owner, deck)?;
        Ok(DeckSummary::from_entries(&entries))
    }

    // =========================================================================
    // Card mutations
    // =========================================================================

    /// Add `quantity` copies of a card, classified into its zone.
    ///
    /// Capacity is checked before the copy limit. Nothing is written when
    /// either check fails.
    pub fn add_card(
        &self,
        owner: OwnerId,
        deck: DeckId,
        card: CardId,
        quantity: u32,
    ) -> Result<DeckCardEntry> {
        if quantity == 0 {
            return Err(DeckError::InvalidQuantity);
        }
        self.require_deck(owner, deck)?;

        let card = self.resolve(&CardLookup::Id(card))?;
        let zone = classify(&card);
        debug!(%deck, card = %card.id, %zone, "classified card");

        let entry = self.commit(deck, card.id, zone, quantity)?;
        debug!(%deck, card = %entry.card, quantity = entry.quantity, zone = %entry.zone, "committed card");
        Ok(entry)
    }

    /// Remove `quantity` copies of a card.
    ///
    /// Returns the remaining entry, or `None` when the last copy was removed.
    pub fn remove_card(
        &self,
        owner: OwnerId,
        deck: DeckId,
        card: CardId,
        quantity: u32,
    ) -> Result<Option<DeckCardEntry>> {
        if quantity == 0 {
            return Err(DeckError::InvalidQuantity);
        }
        self.require_deck(owner, deck)?;

        let remaining = self.store.decrement_or_delete(deck, card, quantity)?;
        debug!(%deck, %card, removed = quantity, left = remaining.map_or(0, |e| e.quantity), "removed card");
        Ok(remaining)
    }

    // =========================================================================
    // Interchange
    // =========================================================================

    /// Export an owned deck as a deck list.
    pub fn export_deck(&self, owner: OwnerId, deck: DeckId) -> Result<String> {
        let entries = self.deck_entries(owner, deck)?;
        Ok(codec::encode(&entries))
    }

    /// Import a deck list from a reader into an owned deck.
    pub fn import_deck<Rd: Read>(
        &self,
        owner: OwnerId,
        deck: DeckId,
        reader: Rd,
    ) -> Result<ImportReport> {
        let decoded = codec::decode(BufReader::new(reader))?;
        self.import_decoded(owner, deck, &decoded)
    }

    /// Import a deck list held in memory into an owned deck.
    pub fn import_deck_str(&self, owner: OwnerId, deck: DeckId, text: &str) -> Result<ImportReport> {
        self.import_decoded(owner, deck, &codec::decode_str(text))
    }

    /// Commit one copy per identifier, in section order, into the zone of
    /// the section it was read from.
    ///
    /// The first failure stops the import. Under `BestEffort` earlier copies
    /// stay committed; under `AllOrNothing` they are removed again before
    /// the error is returned.
    fn import_decoded(
        &self,
        owner: OwnerId,
        deck: DeckId,
        decoded: &DecodedDeck,
    ) -> Result<ImportReport> {
        self.require_deck(owner, deck)?;

        let mut report = ImportReport::default();
        let mut committed: Vec<CardId> = Vec::with_capacity(decoded.len());

        for (zone, identifier) in decoded.iter() {
            let outcome = self
                .resolve(&CardLookup::parse(identifier))
                .and_then(|card| self.commit(deck, card.id, zone, 1));

            match outcome {
                Ok(entry) => {
                    committed.push(entry.card);
                    report.record(entry.zone);
                }
                Err(err) => {
                    warn!(%deck, identifier, section = %zone, error = %err, committed = committed.len(), "import aborted");
                    if self.rules().import_policy == ImportPolicy::AllOrNothing {
                        self.compensate(deck, &committed);
                    }
                    return Err(err);
                }
            }
        }

        info!(%owner, %deck, cards = report.total(), "imported deck");
        Ok(report)
    }

    /// Undo committed single copies, newest first.
    ///
    /// A copy that cannot be removed is logged and skipped so the rest of
    /// the rollback still runs.
    fn compensate(&self, deck: DeckId, committed: &[CardId]) {
        warn!(%deck, copies = committed.len(), "rolling back partial import");
        for &card in committed.iter().rev() {
            if let Err(err) = self.store.decrement_or_delete(deck, card, 1) {
                warn!(%deck, %card, error = %err, "failed to roll back imported copy");
            }
        }
    }

    // =========================================================================
    // Pipeline stages
    // =========================================================================

    fn require_deck(&self, owner: OwnerId, deck: DeckId) -> Result<Deck> {
        self.store
            .find_deck(deck, owner)?
            .ok_or(DeckError::DeckNotFound)
    }

    fn resolve(&self, lookup: &CardLookup) -> Result<CardRef> {
        let card = self
            .resolver
            .resolve(lookup)?
            .ok_or_else(|| DeckError::CardNotFound(lookup.to_string()))?;
        debug!(%lookup, card = %card.id, frame_type = %card.frame_type, "resolved card");
        Ok(card)
    }

    fn commit(&self, deck: DeckId, card: CardId, zone: Zone, quantity: u32) -> Result<DeckCardEntry> {
        let guard = |view: &dyn LedgerView, zone: Zone| {
            self.validator.validate_add(view, deck, card, zone, quantity)
        };
        self.store.checked_add(deck, card, zone, quantity, &guard)
    }
}
