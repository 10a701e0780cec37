//! Legality validator.
//!
//! All limit math lives here. The validator is stateless apart from its
//! `DeckRules`; it reads current aggregates through a `LedgerView`, which
//! lets stores run the same checks inside their atomic unit.
//!
//! ## Evaluation Order
//!
//! `validate_add` checks zone capacity before copy limits, so a request
//! that breaks both always reports `CapacityExceeded`.

use crate::cards::CardId;
use crate::core::config::DeckRules;
use crate::core::error::{DeckError, Result};
use crate::core::DeckId;
use crate::ledger::{Deck, LedgerView};
use crate::zones::Zone;

/// Stateless rule engine for deck limits.
#[derive(Clone, Debug, Default)]
pub struct LegalityValidator {
    rules: DeckRules,
}

impl LegalityValidator {
    /// Create a validator for a rule set.
    #[must_use]
    pub fn new(rules: DeckRules) -> Self {
        Self { rules }
    }

    /// The rules being enforced.
    #[must_use]
    pub fn rules(&self) -> &DeckRules {
        &self.rules
    }

    /// Check that `zone` can take `additional` more cards.
    pub fn validate_capacity(
        &self,
        view: &dyn LedgerView,
        deck: DeckId,
        zone: Zone,
        additional: u32,
    ) -> Result<()> {
        let Some(cap) = self.rules.cap(zone) else {
            return Ok(());
        };

        let current = view.sum_by_zone(deck, zone)?;
        if exceeds(current, additional, cap) {
            return Err(DeckError::CapacityExceeded { zone, cap });
        }
        Ok(())
    }

    /// Check that the deck can hold `additional` more copies of `card`,
    /// counting every zone.
    pub fn validate_copy_limit(
        &self,
        view: &dyn LedgerView,
        deck: DeckId,
        card: CardId,
        additional: u32,
    ) -> Result<()> {
        let limit = self.rules.max_copies;
        let current = view.sum_by_card(deck, card)?;
        if exceeds(current, additional, limit) {
            return Err(DeckError::CopyLimitExceeded { card, limit });
        }
        Ok(())
    }

    /// Run every add-time check: capacity first, then copies.
    pub fn validate_add(
        &self,
        view: &dyn LedgerView,
        deck: DeckId,
        card: CardId,
        zone: Zone,
        additional: u32,
    ) -> Result<()> {
        self.validate_capacity(view, deck, zone, additional)?;
        self.validate_copy_limit(view, deck, card, additional)
    }

    /// Check that an owner with `existing` decks may create one named `name`.
    ///
    /// The deck-count limit is checked before name uniqueness.
    pub fn validate_new_deck(&self, existing: &[Deck], name: &str) -> Result<()> {
        let limit = self.rules.max_decks_per_owner;
        if existing.len() >= limit {
            return Err(DeckError::MaxDecksReached { limit });
        }
        if existing.iter().any(|d| d.name == name) {
            return Err(DeckError::DeckAlreadyExists);
        }
        Ok(())
    }
}

fn exceeds(current: u32, additional: u32, limit: u32) -> bool {
    current.checked_add(additional).map_or(true, |total| total > limit)
}
