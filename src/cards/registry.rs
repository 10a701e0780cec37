//! In-memory card catalog.
//!
//! The `CardCatalog` stores card references and resolves them by id or by
//! name. It is the resolver tests use and a reasonable cache layer for
//! embedders that preload their card pool.

use rustc_hash::FxHashMap;

use crate::core::error::Result;

use super::definition::{CardId, CardRef};
use super::resolver::{CardLookup, CardResolver};

/// Catalog of known cards.
///
/// ## Example
///
/// ```
/// use ccg_decks::cards::{CardCatalog, CardId, CardLookup, CardRef, CardResolver};
///
/// let mut catalog = CardCatalog::new();
/// catalog.insert(CardRef::new(CardId::new(46986414), "Dark Magician", "normal"));
///
/// let found = catalog.resolve(&CardLookup::Name("dark magician".into())).unwrap();
/// assert_eq!(found.unwrap().id, CardId::new(46986414));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardRef>,
    /// Lowercased name -> id.
    names: FxHashMap<String, CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a card, replacing any card with the same id.
    ///
    /// Returns the replaced card, if any.
    pub fn insert(&mut self, card: CardRef) -> Option<CardRef> {
        let previous = self.cards.insert(card.id, card.clone());
        if let Some(old) = &previous {
            self.names.remove(&old.name.to_lowercase());
        }
        self.names.insert(card.name.to_lowercase(), card.id);
        previous
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardRef> {
        self.cards.get(&id)
    }

    /// Find a card by name, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CardRef> {
        let id = self.names.get(&name.trim().to_lowercase())?;
        self.cards.get(id)
    }

    /// Check if a card ID is known.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards.
    pub fn iter(&self) -> impl Iterator<Item = &CardRef> {
        self.cards.values()
    }

    /// Find cards with a given frame type (case-insensitive).
    pub fn find_by_frame_type<'a>(
        &'a self,
        frame_type: &'a str,
    ) -> impl Iterator<Item = &'a CardRef> + 'a {
        self.cards
            .values()
            .filter(move |c| c.frame_type.eq_ignore_ascii_case(frame_type))
    }
}

impl FromIterator<CardRef> for CardCatalog {
    fn from_iter<I: IntoIterator<Item = CardRef>>(iter: I) -> Self {
        let mut catalog = CardCatalog::new();
        for card in iter {
            catalog.insert(card);
        }
        catalog
    }
}

impl CardResolver for CardCatalog {
    fn resolve(&self, lookup: &CardLookup) -> Result<Option<CardRef>> {
        let card = match lookup {
            CardLookup::Id(id) => self.get(*id),
            CardLookup::Name(name) => self.find_by_name(name),
        };
        Ok(card.cloned())
    }
}
