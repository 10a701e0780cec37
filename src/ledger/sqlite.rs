//! SQLite deck store.
//!
//! Every mutation runs in a `BEGIN IMMEDIATE` transaction, so the guard of
//! `checked_add`/`insert_deck` and the write it protects see the same data
//! even when several processes share the database file. Within a process
//! the connection is additionally serialized by a mutex.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use tracing::debug;

use crate::cards::CardId;
use crate::core::error::{DeckError, Result, StorageError};
use crate::core::{DeckId, OwnerId};
use crate::zones::{UnknownZone, Zone};

use super::records::{Deck, DeckCardEntry};
use super::store::{added_quantity, AddGuard, DeckGuard, DeckLedger, DeckStore, LedgerView};

/// Schema version (increment when changing table definitions).
pub const SCHEMA_VERSION: i32 = 1;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let found: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if found != 0 && found != SCHEMA_VERSION {
        return Err(StorageError::SchemaMismatch { found, expected: SCHEMA_VERSION }.into());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS decks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            UNIQUE (owner_id, name)
        );

        CREATE TABLE IF NOT EXISTS deck_cards (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            deck_id INTEGER NOT NULL REFERENCES decks(id) ON DELETE CASCADE,
            card_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            zone TEXT NOT NULL CHECK (zone IN ('main', 'extra', 'side')),
            UNIQUE (deck_id, card_id)
        );

        CREATE INDEX IF NOT EXISTS idx_decks_owner ON decks(owner_id);
        CREATE INDEX IF NOT EXISTS idx_deck_cards_zone ON deck_cards(deck_id, zone);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
    Ok(())
}

impl ToSql for Zone {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Zone {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: UnknownZone| FromSqlError::Other(Box::new(e)))
    }
}

// SQLite integers are signed; ids are stored by bit pattern.
fn sql_id(id: u64) -> i64 {
    id as i64
}

fn to_count(total: i64) -> Result<u32> {
    u32::try_from(total)
        .map_err(|_| StorageError::Corrupt(format!("quantity total out of range: {}", total)).into())
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<DeckCardEntry> {
    Ok(DeckCardEntry {
        deck: DeckId::new(row.get::<_, i64>(0)? as u64),
        card: CardId::new(row.get(1)?),
        quantity: row.get(2)?,
        zone: row.get(3)?,
    })
}

fn deck_from_row(row: &Row<'_>) -> rusqlite::Result<Deck> {
    Ok(Deck {
        id: DeckId::new(row.get::<_, i64>(0)? as u64),
        owner: OwnerId::new(row.get::<_, i64>(1)? as u64),
        name: row.get(2)?,
        description: row.get(3)?,
    })
}

fn query_entry(conn: &Connection, deck: DeckId, card: CardId) -> Result<Option<DeckCardEntry>> {
    let entry = conn
        .query_row(
            "SELECT deck_id, card_id, quantity, zone FROM deck_cards
             WHERE deck_id = ?1 AND card_id = ?2",
            params![sql_id(deck.raw()), card.raw()],
            entry_from_row,
        )
        .optional()?;
    Ok(entry)
}

fn query_entries(conn: &Connection, deck: DeckId) -> Result<Vec<DeckCardEntry>> {
    let mut stmt = conn.prepare(
        "SELECT deck_id, card_id, quantity, zone FROM deck_cards
         WHERE deck_id = ?1 ORDER BY seq",
    )?;
    let entries = stmt
        .query_map(params![sql_id(deck.raw())], entry_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}

fn query_owner_decks(conn: &Connection, owner: OwnerId) -> Result<Vec<Deck>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, name, description FROM decks
         WHERE owner_id = ?1 ORDER BY id",
    )?;
    let decks = stmt
        .query_map(params![sql_id(owner.raw())], deck_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(decks)
}

fn deck_exists(conn: &Connection, deck: DeckId) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM decks WHERE id = ?1)",
        params![sql_id(deck.raw())],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Zone the copies will land in. Fails if the deck is gone or the new
/// quantity is out of range.
fn plan_add(conn: &Connection, deck: DeckId, card: CardId, zone: Zone, delta: u32) -> Result<Zone> {
    if !deck_exists(conn, deck)? {
        return Err(DeckError::DeckNotFound);
    }
    let existing = query_entry(conn, deck, card)?;
    added_quantity(deck, card, existing.map_or(0, |e| e.quantity), delta)?;
    Ok(existing.map_or(zone, |e| e.zone))
}

fn upsert(conn: &Connection, deck: DeckId, card: CardId, zone: Zone, delta: u32) -> Result<DeckCardEntry> {
    conn.execute(
        "INSERT INTO deck_cards (deck_id, card_id, quantity, zone) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(deck_id, card_id) DO UPDATE SET quantity = quantity + excluded.quantity",
        params![sql_id(deck.raw()), card.raw(), delta, zone],
    )?;
    query_entry(conn, deck, card)?.ok_or_else(|| {
        StorageError::Corrupt(format!("{} missing from {} after upsert", card, deck)).into()
    })
}

/// Ledger queries over a connection or an open transaction.
struct SqlView<'c>(&'c Connection);

impl LedgerView for SqlView<'_> {
    fn get_entry(&self, deck: DeckId, card: CardId) -> Result<Option<DeckCardEntry>> {
        query_entry(self.0, deck, card)
    }

    fn sum_by_zone(&self, deck: DeckId, zone: Zone) -> Result<u32> {
        let total: i64 = self.0.query_row(
            "SELECT COALESCE(SUM(quantity), 0) FROM deck_cards WHERE deck_id = ?1 AND zone = ?2",
            params![sql_id(deck.raw()), zone],
            |row| row.get(0),
        )?;
        to_count(total)
    }

    fn sum_by_card(&self, deck: DeckId, card: CardId) -> Result<u32> {
        let total: i64 = self.0.query_row(
            "SELECT COALESCE(SUM(quantity), 0) FROM deck_cards WHERE deck_id = ?1 AND card_id = ?2",
            params![sql_id(deck.raw()), card.raw()],
            |row| row.get(0),
        )?;
        to_count(total)
    }

    fn list_entries(&self, deck: DeckId) -> Result<Vec<DeckCardEntry>> {
        query_entries(self.0, deck)
    }
}

/// Deck store backed by a SQLite database.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "opening deck database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        init_schema(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DeckError::Storage(StorageError::Poisoned))
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl LedgerView for SqliteStore {
    fn get_entry(&self, deck: DeckId, card: CardId) -> Result<Option<DeckCardEntry>> {
        SqlView(&*self.lock()?).get_entry(deck, card)
    }

    fn sum_by_zone(&self, deck: DeckId, zone: Zone) -> Result<u32> {
        SqlView(&*self.lock()?).sum_by_zone(deck, zone)
    }

    fn sum_by_card(&self, deck: DeckId, card: CardId) -> Result<u32> {
        SqlView(&*self.lock()?).sum_by_card(deck, card)
    }

    fn list_entries(&self, deck: DeckId) -> Result<Vec<DeckCardEntry>> {
        SqlView(&*self.lock()?).list_entries(deck)
    }
}

impl DeckLedger for SqliteStore {
    fn upsert_add(
        &self,
        deck: DeckId,
        card: CardId,
        zone: Zone,
        delta: u32,
    ) -> Result<DeckCardEntry> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let zone = plan_add(&tx, deck, card, zone, delta)?;
        let entry = upsert(&tx, deck, card, zone, delta)?;
        tx.commit()?;
        Ok(entry)
    }

    fn decrement_or_delete(
        &self,
        deck: DeckId,
        card: CardId,
        delta: u32,
    ) -> Result<Option<DeckCardEntry>> {
        if delta == 0 {
            return Err(DeckError::InvalidQuantity);
        }
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut entry = query_entry(&tx, deck, card)?
            .ok_or_else(|| DeckError::CardNotFound(card.to_string()))?;

        let remaining = if entry.quantity <= delta {
            tx.execute(
                "DELETE FROM deck_cards WHERE deck_id = ?1 AND card_id = ?2",
                params![sql_id(deck.raw()), card.raw()],
            )?;
            None
        } else {
            tx.execute(
                "UPDATE deck_cards SET quantity = quantity - ?3 WHERE deck_id = ?1 AND card_id = ?2",
                params![sql_id(deck.raw()), card.raw(), delta],
            )?;
            entry.quantity -= delta;
            Some(entry)
        };

        tx.commit()?;
        Ok(remaining)
    }

    fn checked_add(
        &self,
        deck: DeckId,
        card: CardId,
        zone: Zone,
        delta: u32,
        guard: &AddGuard<'_>,
    ) -> Result<DeckCardEntry> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let zone = plan_add(&tx, deck, card, zone, delta)?;
        guard(&SqlView(&tx), zone)?;

        let entry = upsert(&tx, deck, card, zone, delta)?;
        tx.commit()?;
        Ok(entry)
    }
}

impl DeckStore for SqliteStore {
    fn insert_deck(
        &self,
        owner: OwnerId,
        name: &str,
        description: &str,
        guard: &DeckGuard<'_>,
    ) -> Result<Deck> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        guard(&query_owner_decks(&tx, owner)?)?;

        tx.execute(
            "INSERT INTO decks (owner_id, name, description) VALUES (?1, ?2, ?3)",
            params![sql_id(owner.raw()), name, description],
        )?;
        let id = DeckId::new(tx.last_insert_rowid() as u64);
        tx.commit()?;

        Ok(Deck {
            id,
            owner,
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    fn find_deck(&self, deck: DeckId, owner: OwnerId) -> Result<Option<Deck>> {
        let conn = self.lock()?;
        let deck = conn
            .query_row(
                "SELECT id, owner_id, name, description FROM decks WHERE id = ?1 AND owner_id = ?2",
                params![sql_id(deck.raw()), sql_id(owner.raw())],
                deck_from_row,
            )
            .optional()?;
        Ok(deck)
    }

    fn decks_by_owner(&self, owner: OwnerId) -> Result<Vec<Deck>> {
        query_owner_decks(&*self.lock()?, owner)
    }

    fn delete_deck(&self, deck: DeckId, owner: OwnerId) -> Result<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let owned: bool = tx.query_row(
            "SELECT EXISTS (SELECT 1 FROM decks WHERE id = ?1 AND owner_id = ?2)",
            params![sql_id(deck.raw()), sql_id(owner.raw())],
            |row| row.get(0),
        )?;
        if !owned {
            return Ok(false);
        }

        // Entries go first: connections opened elsewhere may not enforce the cascade.
        let entries = tx.execute(
            "DELETE FROM deck_cards WHERE deck_id = ?1",
            params![sql_id(deck.raw())],
        )?;
        tx.execute("DELETE FROM decks WHERE id = ?1", params![sql_id(deck.raw())])?;
        tx.commit()?;

        debug!(%deck, entries, "deleted deck from database");
        Ok(true)
    }
}
