//! Error types for deck operations.
//!
//! `DeckError` is what every public operation returns. Legality and
//! ownership failures are client errors and carry enough detail to report
//! deterministically. Storage failures are wrapped in `StorageError` and are
//! opaque to callers; the engine never retries them.

use thiserror::Error;

use crate::cards::CardId;
use crate::zones::Zone;

/// Result type for deck operations.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors surfaced by the deck engine.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The owner already has a deck with this name.
    #[error("deck with the same name already exists")]
    DeckAlreadyExists,

    /// The owner already owns the maximum number of decks.
    #[error("maximum number of decks reached ({limit})")]
    MaxDecksReached { limit: usize },

    /// No deck with that id is owned by the requesting owner.
    #[error("deck not found")]
    DeckNotFound,

    /// The resolver produced no card, or the card is not in the deck.
    #[error("card not found: {0}")]
    CardNotFound(String),

    /// Adding would push a zone past its cap.
    #[error("{zone} deck size limit reached ({cap})")]
    CapacityExceeded { zone: Zone, cap: u32 },

    /// Adding would exceed the per-card copy limit.
    #[error("too many copies of {card} in the deck (limit {limit})")]
    CopyLimitExceeded { card: CardId, limit: u32 },

    /// Quantities must be strictly positive.
    #[error("quantity must be greater than 0")]
    InvalidQuantity,

    /// The interchange input could not be read.
    #[error("failed to read deck list: {0}")]
    Parse(#[source] std::io::Error),

    /// Rules configuration rejected.
    #[error("invalid deck rules: {0}")]
    InvalidRules(String),

    /// The card resolver failed for a reason other than a missing card.
    #[error("card resolver failed: {0}")]
    Resolver(String),

    /// Persistence-layer failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DeckError {
    /// Whether this error is the caller's fault (bad input, limits,
    /// ownership) rather than an internal failure.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DeckError::Storage(_) | DeckError::Resolver(_))
    }

    /// Shorthand for a legality violation in `zone`.
    #[must_use]
    pub fn capacity(zone: Zone, cap: u32) -> Self {
        DeckError::CapacityExceeded { zone, cap }
    }
}

impl From<rusqlite::Error> for DeckError {
    fn from(err: rusqlite::Error) -> Self {
        DeckError::Storage(StorageError::Database(err))
    }
}

/// Failures inside a ledger backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite reported an error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A thread panicked while holding the ledger lock.
    #[error("ledger lock poisoned")]
    Poisoned,

    /// A stored row could not be interpreted.
    #[error("corrupt ledger row: {0}")]
    Corrupt(String),

    /// The database was written by an incompatible schema.
    #[error("database schema version {found} is not supported (expected {expected})")]
    SchemaMismatch { found: i32, expected: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(DeckError::DeckNotFound.is_client_error());
        assert!(DeckError::capacity(Zone::Main, 60).is_client_error());
        assert!(DeckError::InvalidQuantity.is_client_error());
        assert!(!DeckError::Storage(StorageError::Poisoned).is_client_error());
        assert!(!DeckError::Resolver("timeout".to_string()).is_client_error());
    }

    #[test]
    fn test_error_messages() {
        let err = DeckError::capacity(Zone::Extra, 20);
        assert_eq!(err.to_string(), "extra deck size limit reached (20)");

        let err = DeckError::CopyLimitExceeded { card: CardId::new(46986414), limit: 3 };
        assert_eq!(
            err.to_string(),
            "too many copies of Card(46986414) in the deck (limit 3)"
        );
    }

    #[test]
    fn test_sqlite_errors_are_storage_errors() {
        let err: DeckError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, DeckError::Storage(StorageError::Database(_))));
    }
}
