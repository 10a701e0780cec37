//! Deck ledger: durable deck records and (deck, card) -> (quantity, zone).
//!
//! ## Key Types
//!
//! - `Deck`, `DeckCardEntry`: Stored records
//! - `LedgerView`: Aggregate queries used by legality checks
//! - `DeckLedger`: Atomic upsert/decrement and guarded adds
//! - `DeckStore`: Deck record persistence
//! - `InMemoryStore`: Mutex + persistent collections, cheap snapshots
//! - `SqliteStore`: SQLite backend with immediate transactions
//!
//! The ledger is the only mutable shared state of the engine.

pub mod memory;
pub mod records;
pub mod sqlite;
pub mod store;

pub use memory::{InMemoryStore, LedgerSnapshot};
pub use records::{Deck, DeckCardEntry, DeckSummary};
pub use sqlite::SqliteStore;
pub use store::{AddGuard, DeckGuard, DeckLedger, DeckStore, LedgerView};
