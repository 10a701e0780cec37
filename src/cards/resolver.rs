//! Card resolution seam.
//!
//! The engine never talks to the card catalog directly. Embedders implement
//! `CardResolver` over whatever fetches and caches cards (a remote API, a
//! database, an in-memory `CardCatalog`). Returning `Ok(None)` means the card
//! does not exist; returning `Err` means the lookup itself failed.

use std::sync::Arc;

use crate::core::error::Result;

use super::definition::{CardId, CardRef};

/// What to look a card up by.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CardLookup {
    /// Catalog identifier.
    Id(CardId),
    /// Exact card name (resolvers may match case-insensitively).
    Name(String),
}

impl CardLookup {
    /// Interpret a deck-list line.
    ///
    /// A decimal that fits a `CardId` becomes an id lookup, anything else
    /// is looked up by name.
    ///
    /// ```
    /// use ccg_decks::cards::{CardId, CardLookup};
    ///
    /// assert_eq!(CardLookup::parse(" 46986414 "), CardLookup::Id(CardId::new(46986414)));
    /// assert_eq!(CardLookup::parse("Dark Magician"), CardLookup::Name("Dark Magician".into()));
    /// ```
    #[must_use]
    pub fn parse(reference: &str) -> Self {
        let reference = reference.trim();
        match reference.parse::<u32>() {
            Ok(id) => CardLookup::Id(CardId::new(id)),
            Err(_) => CardLookup::Name(reference.to_string()),
        }
    }
}

impl From<CardId> for CardLookup {
    fn from(id: CardId) -> Self {
        CardLookup::Id(id)
    }
}

impl std::fmt::Display for CardLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardLookup::Id(id) => write!(f, "{}", id),
            CardLookup::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

/// Turns a card identifier or name into a `CardRef`.
pub trait CardResolver {
    /// Resolve a card. `Ok(None)` when the catalog has no such card.
    fn resolve(&self, lookup: &CardLookup) -> Result<Option<CardRef>>;
}

impl<R: CardResolver + ?Sized> CardResolver for &R {
    fn resolve(&self, lookup: &CardLookup) -> Result<Option<CardRef>> {
        (**self).resolve(lookup)
    }
}

impl<R: CardResolver + ?Sized> CardResolver for Arc<R> {
    fn resolve(&self, lookup: &CardLookup) -> Result<Option<CardRef>> {
        (**self).resolve(lookup)
    }
}
