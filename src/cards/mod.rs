//! Card system: references, resolution and an in-memory catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Catalog identifier, the one deck lists carry
//! - `CardRef`: Minimal card view (id, name, frame type)
//! - `CardLookup`: Resolve by id or by name
//! - `CardResolver`: Seam to the external card catalog
//! - `CardCatalog`: In-memory resolver
//!
//! ## Borrowed Cards
//!
//! Card ownership lies outside the deck engine. Ledger rows keep only the
//! `CardId`; everything else is resolved when a card is added.

pub mod definition;
pub mod registry;
pub mod resolver;

pub use definition::{CardId, CardRef};
pub use registry::CardCatalog;
pub use resolver::{CardLookup, CardResolver};
