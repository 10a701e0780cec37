//! Core engine types: identifiers, rules configuration, errors.
//!
//! This module contains the building blocks every other module shares.
//! Limits are configured via `DeckRules` rather than hardcoded in the
//! validator or the stores.

pub mod ids;
pub mod config;
pub mod error;

pub use ids::{DeckId, OwnerId};
pub use config::{
    DeckRules, ImportPolicy, EXTRA_DECK_MAX, MAIN_DECK_MAX, MAX_COPIES_PER_CARD,
    MAX_DECKS_PER_OWNER,
};
pub use error::{DeckError, Result, StorageError};
