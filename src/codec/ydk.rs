//! Plain-text deck list format.
//!
//! ```text
//! #created by ...
//! #main
//! 46986414
//! 46986414
//! #extra
//! 1861629
//! #side
//! 55144522
//! ```
//!
//! One card identifier per line; repetition encodes quantity. Decoding is
//! lenient: blank lines, `#created` metadata and content before the first
//! section header are skipped, and identifiers are kept verbatim (resolution
//! validates them later). Only an unreadable input is an error.

use std::io::BufRead;

use crate::core::error::{DeckError, Result};
use crate::ledger::DeckCardEntry;
use crate::zones::Zone;

/// Metadata line prefix written by simulators (creation comment).
pub const CREATED_MARKER: &str = "#created";

/// Identifiers read from a deck list, per section, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedDeck {
    pub main: Vec<String>,
    pub extra: Vec<String>,
    pub side: Vec<String>,
}

impl DecodedDeck {
    /// Identifiers of one section.
    #[must_use]
    pub fn section(&self, zone: Zone) -> &[String] {
        match zone {
            Zone::Main => &self.main,
            Zone::Extra => &self.extra,
            Zone::Side => &self.side,
        }
    }

    fn section_mut(&mut self, zone: Zone) -> &mut Vec<String> {
        match zone {
            Zone::Main => &mut self.main,
            Zone::Extra => &mut self.extra,
            Zone::Side => &mut self.side,
        }
    }

    /// All identifiers tagged with their section, main first, then extra,
    /// then side.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &str)> + '_ {
        Zone::ALL.into_iter().flat_map(move |zone| {
            self.section(zone).iter().map(move |id| (zone, id.as_str()))
        })
    }

    /// Total identifiers across sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.main.len() + self.extra.len() + self.side.len()
    }

    /// True if no section has identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode a deck list from a reader.
///
/// Fails with `DeckError::Parse` only when reading fails.
pub fn decode<R: BufRead>(reader: R) -> Result<DecodedDeck> {
    let mut deck = DecodedDeck::default();
    let mut current: Option<Zone> = None;

    for line in reader.lines() {
        let line = line.map_err(DeckError::Parse)?;
        accept_line(&mut deck, &mut current, &line);
    }

    Ok(deck)
}

/// Decode a deck list held in memory.
#[must_use]
pub fn decode_str(text: &str) -> DecodedDeck {
    let mut deck = DecodedDeck::default();
    let mut current: Option<Zone> = None;

    for line in text.lines() {
        accept_line(&mut deck, &mut current, line);
    }

    deck
}

fn accept_line(deck: &mut DecodedDeck, current: &mut Option<Zone>, line: &str) {
    let line = line.trim();
    if line.is_empty() || line.starts_with(CREATED_MARKER) {
        return;
    }

    if let Some(zone) = Zone::from_header(line) {
        *current = Some(zone);
        return;
    }

    // Content before any header is ignored.
    if let Some(zone) = *current {
        deck.section_mut(zone).push(line.to_string());
    }
}

/// Encode ledger entries as a deck list.
///
/// Each entry expands to `quantity` lines under its stored zone, in entry
/// order. Every section header is written even when the section is empty.
///
/// ```
/// use ccg_decks::cards::CardId;
/// use ccg_decks::codec::encode;
/// use ccg_decks::core::DeckId;
/// use ccg_decks::ledger::DeckCardEntry;
/// use ccg_decks::zones::Zone;
///
/// let entry = DeckCardEntry { deck: DeckId::new(1), card: CardId::new(1), quantity: 2, zone: Zone::Main };
/// assert_eq!(encode(&[entry]), "#main\n1\n1\n#extra\n\n#side\n");
/// ```
#[must_use]
pub fn encode(entries: &[DeckCardEntry]) -> String {
    let mut sections: [Vec<String>; 3] = Default::default();

    for entry in entries {
        let lines = &mut sections[section_index(entry.zone)];
        let id = entry.card.raw().to_string();
        lines.extend(std::iter::repeat(id).take(entry.quantity as usize));
    }

    let mut out = String::new();
    for (i, zone) in Zone::ALL.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(zone.header());
        out.push('\n');
        out.push_str(&sections[i].join("\n"));
    }
    out
}

fn section_index(zone: Zone) -> usize {
    match zone {
        Zone::Main => 0,
        Zone::Extra => 1,
        Zone::Side => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::DeckId;

    fn entry(card: u32, quantity: u32, zone: Zone) -> DeckCardEntry {
        DeckCardEntry { deck: DeckId::new(1), card: CardId::new(card), quantity, zone }
    }

    #[test]
    fn test_decode_sections() {
        let deck = decode_str("#created by tester\n#main\n1\n2\n#extra\n3\n#side\n4\n4\n");

        assert_eq!(deck.main, vec!["1", "2"]);
        assert_eq!(deck.extra, vec!["3"]);
        assert_eq!(deck.side, vec!["4", "4"]);
        assert_eq!(deck.len(), 5);
    }

    #[test]
    fn test_decode_ignores_content_before_header() {
        let deck = decode_str("garbage\n42\n\n#main\n1\n");
        assert_eq!(deck.main, vec!["1"]);
        assert!(deck.extra.is_empty());
        assert!(deck.side.is_empty());
    }

    #[test]
    fn test_decode_keeps_identifiers_verbatim() {
        let deck = decode_str("#main\nDark Magician\n  007  \n#comment\n");
        assert_eq!(deck.main, vec!["Dark Magician", "007", "#comment"]);
    }

    #[test]
    fn test_decode_headers_are_case_sensitive() {
        let deck = decode_str("#MAIN\n1\n#main\n2\n#Extra\n3\n");
        assert_eq!(deck.main, vec!["2", "#Extra", "3"]);
    }

    #[test]
    fn test_decode_switches_back_and_forth() {
        let deck = decode_str("#main\n1\n#side\n2\n#main\n3\n");
        assert_eq!(deck.main, vec!["1", "3"]);
        assert_eq!(deck.side, vec!["2"]);
    }

    #[test]
    fn test_decode_accepts_bang_side_and_crlf() {
        let deck = decode_str("#main\r\n1\r\n#extra\r\n!side\r\n9\r\n");
        assert_eq!(deck.main, vec!["1"]);
        assert_eq!(deck.side, vec!["9"]);
    }

    #[test]
    fn test_decode_reader_matches_decode_str() {
        let text = "#main\n1\n1\n#extra\n#side\n";
        let from_reader = decode(text.as_bytes()).unwrap();
        assert_eq!(from_reader, decode_str(text));
    }

    #[test]
    fn test_decode_reports_read_failure() {
        // Invalid UTF-8 cannot be read as lines.
        let bytes: &[u8] = b"#main\n\xff\xfe\n";
        let err = decode(bytes).unwrap_err();
        assert!(matches!(err, DeckError::Parse(_)));
    }

    #[test]
    fn test_iter_is_in_section_order() {
        let deck = decode_str("#side\n3\n#extra\n2\n#main\n1\n");
        let order: Vec<_> = deck.iter().collect();
        assert_eq!(
            order,
            vec![(Zone::Main, "1"), (Zone::Extra, "2"), (Zone::Side, "3")]
        );
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]), "#main\n\n#extra\n\n#side\n");
    }

    #[test]
    fn test_encode_expands_quantity_in_entry_order() {
        let text = encode(&[
            entry(20, 1, Zone::Main),
            entry(30, 2, Zone::Extra),
            entry(10, 2, Zone::Main),
            entry(40, 1, Zone::Side),
        ]);
        assert_eq!(text, "#main\n20\n10\n10\n#extra\n30\n30\n#side\n40");
    }

    #[test]
    fn test_encode_then_decode() {
        let entries = [entry(5, 3, Zone::Main), entry(6, 1, Zone::Side)];
        let deck = decode_str(&encode(&entries));
        assert_eq!(deck.main, vec!["5", "5", "5"]);
        assert!(deck.extra.is_empty());
        assert_eq!(deck.side, vec!["6"]);
    }
}
