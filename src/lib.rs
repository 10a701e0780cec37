//! # ccg-decks
//!
//! Deck-building engine for a collectible card game.
//!
//! ## Design Principles
//!
//! 1. **Validate Where You Write**: Legality checks run inside the store's
//!    atomic unit, so concurrent requests can never jointly break a limit.
//!
//! 2. **Rules As Data**: Zone caps, copy limits and deck counts come from
//!    `DeckRules`, loadable from TOML. Nothing downstream hardcodes them.
//!
//! 3. **Stored Zone Wins**: Cards are classified once, on add. Export writes
//!    the zone the ledger holds, so side-deck cards survive a round trip.
//!
//! ## Modules
//!
//! - `core`: Identifiers, rules configuration, errors
//! - `cards`: Card references, the resolver seam, an in-memory catalog
//! - `zones`: Deck zones and frame-type classification
//! - `rules`: Legality validator
//! - `ledger`: Deck records and card quantities (memory and SQLite stores)
//! - `codec`: Deck list text format
//! - `service`: Deck orchestrator

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod ledger;
pub mod codec;
pub mod service;

// Re-export commonly used types
pub use crate::core::{
    DeckError, DeckId, DeckRules, ImportPolicy, OwnerId, Result, StorageError,
};

pub use crate::cards::{CardCatalog, CardId, CardLookup, CardRef, CardResolver};

pub use crate::zones::{classify, Zone};

pub use crate::rules::LegalityValidator;

pub use crate::ledger::{
    Deck, DeckCardEntry, DeckLedger, DeckStore, DeckSummary, InMemoryStore, LedgerView,
    SqliteStore,
};

pub use crate::codec::DecodedDeck;

pub use crate::service::{DeckService, ImportReport};
