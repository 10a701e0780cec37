//! Deck orchestration.
//!
//! `DeckService` ties the resolver, classifier, validator, ledger and codec
//! together into the public deck operations.

pub mod deck_service;

pub use deck_service::{DeckService, ImportReport};
