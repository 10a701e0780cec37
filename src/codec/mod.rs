//! Deck list interchange codec.
//!
//! Reads and writes the section-delimited text format used by external
//! simulators (`#main`, `#extra`, `#side`, one identifier per line).

pub mod ydk;

pub use ydk::{decode, decode_str, encode, DecodedDeck, CREATED_MARKER};
