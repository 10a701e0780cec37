//! Deck legality rules.
//!
//! `LegalityValidator` checks:
//! - Per-zone capacity
//! - Per-card copy limits across all zones
//! - Deck count and name uniqueness per owner
//!
//! Limits come from `DeckRules`; the validator never hardcodes them.

pub mod validator;

pub use validator::LegalityValidator;
