//! Zone classification.
//!
//! A card's frame type alone decides whether it starts in the main or the
//! extra deck. Classification only runs when a ledger entry is created;
//! stored entries keep their zone, so side-deck cards are never moved back.

use crate::cards::CardRef;

use super::zone::Zone;

/// Frame types that belong in the extra deck.
pub const EXTRA_DECK_FRAME_TYPES: [&str; 4] = ["link", "xyz", "fusion", "synchro"];

/// Check whether a frame type is an extra-deck frame (case-insensitive).
#[must_use]
pub fn is_extra_deck_frame(frame_type: &str) -> bool {
    EXTRA_DECK_FRAME_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(frame_type))
}

/// Decide the zone a card is placed in when it is first added.
///
/// ```
/// use ccg_decks::cards::{CardId, CardRef};
/// use ccg_decks::zones::{classify, Zone};
///
/// let link = CardRef::new(CardId::new(1861629), "Decode Talker", "Link");
/// let spell = CardRef::new(CardId::new(55144522), "Pot of Greed", "spell");
///
/// assert_eq!(classify(&link), Zone::Extra);
/// assert_eq!(classify(&spell), Zone::Main);
/// ```
#[must_use]
pub fn classify(card: &CardRef) -> Zone {
    if is_extra_deck_frame(&card.frame_type) {
        Zone::Extra
    } else {
        Zone::Main
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn card(frame: &str) -> CardRef {
        CardRef::new(CardId::new(1), "Test", frame)
    }

    #[test]
    fn test_extra_frames() {
        for frame in ["link", "xyz", "fusion", "synchro", "LINK", "Xyz", "FuSiOn", "SYNCHRO"] {
            assert_eq!(classify(&card(frame)), Zone::Extra, "{}", frame);
        }
    }

    #[test]
    fn test_main_frames() {
        for frame in ["normal", "effect", "ritual", "spell", "trap", "token", ""] {
            assert_eq!(classify(&card(frame)), Zone::Main, "{}", frame);
        }
    }

    #[test]
    fn test_only_exact_frame_names_match() {
        // Pendulum hybrids and padded values are not treated as extra frames.
        assert_eq!(classify(&card("fusion_pendulum")), Zone::Main);
        assert_eq!(classify(&card(" xyz")), Zone::Main);
    }

    #[test]
    fn test_never_classifies_side() {
        for frame in ["side", "#side", "normal", "link"] {
            assert_ne!(classify(&card(frame)), Zone::Side);
        }
    }
}
