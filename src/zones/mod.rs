//! Deck zones and zone classification.
//!
//! ## Key Types
//!
//! - `Zone`: Main, extra or side compartment
//! - `classify`: Frame type -> starting zone
//!
//! The side zone is only reachable through imports, which trust the
//! section a card was listed under.

pub mod classifier;
pub mod zone;

pub use classifier::{classify, is_extra_deck_frame, EXTRA_DECK_FRAME_TYPES};
pub use zone::{UnknownZone, Zone};
