//! Property-based tests.
//!
//! These tests verify:
//! - Classification is deterministic and never yields the side zone
//! - Export, import into an empty deck, export again is the identity
//! - Random add/remove/import sequences never break zone caps, copy limits
//!   or the positive-quantity invariant

use proptest::prelude::*;

use ccg_decks::cards::{CardCatalog, CardId, CardRef};
use ccg_decks::core::{DeckRules, ImportPolicy, OwnerId};
use ccg_decks::ledger::{InMemoryStore, LedgerView};
use ccg_decks::service::DeckService;
use ccg_decks::zones::{classify, Zone, EXTRA_DECK_FRAME_TYPES};

const OWNER: OwnerId = OwnerId(1);
const CARDS: u32 = 12;

/// Cards 1..=12; every third card is an extra-deck frame.
fn catalog() -> CardCatalog {
    (1..=CARDS)
        .map(|id| {
            let frame = if id % 3 == 0 { "fusion" } else { "effect" };
            CardRef::new(CardId::new(id), format!("Card {}", id), frame)
        })
        .collect()
}

fn small_rules(policy: ImportPolicy) -> DeckRules {
    DeckRules::new()
        .with_main_max(10)
        .with_extra_max(4)
        .with_side_max(5)
        .with_import_policy(policy)
}

#[derive(Clone, Debug)]
enum Op {
    Add { card: u32, quantity: u32 },
    Remove { card: u32, quantity: u32 },
    Import { zone: Zone, cards: Vec<u32> },
}

fn zone_strategy() -> impl Strategy<Value = Zone> {
    prop_oneof![Just(Zone::Main), Just(Zone::Extra), Just(Zone::Side)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Card ids past the catalog exercise the not-found path.
    prop_oneof![
        (1..=CARDS + 2, 1u32..5).prop_map(|(card, quantity)| Op::Add { card, quantity }),
        (1..=CARDS, 1u32..5).prop_map(|(card, quantity)| Op::Remove { card, quantity }),
        (zone_strategy(), prop::collection::vec(1..=CARDS + 1, 0..6))
            .prop_map(|(zone, cards)| Op::Import { zone, cards }),
    ]
}

fn import_text(zone: Zone, cards: &[u32]) -> String {
    let mut text = format!("{}\n", zone.header());
    for card in cards {
        text.push_str(&format!("{}\n", card));
    }
    text
}

// =============================================================================
// Classification
// =============================================================================

proptest! {
    #[test]
    fn test_classification_is_deterministic(frame in "[A-Za-z_]{0,12}") {
        let card = CardRef::new(CardId::new(1), "Any", frame.clone());
        let zone = classify(&card);

        prop_assert_eq!(zone, classify(&card));
        prop_assert_ne!(zone, Zone::Side);

        let is_extra = EXTRA_DECK_FRAME_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&frame));
        prop_assert_eq!(zone == Zone::Extra, is_extra);
    }

    #[test]
    fn test_extra_frames_any_case(index in 0usize..4, upper in prop::collection::vec(any::<bool>(), 8)) {
        let frame: String = EXTRA_DECK_FRAME_TYPES[index]
            .chars()
            .zip(upper.iter().cycle())
            .map(|(c, &u)| if u { c.to_ascii_uppercase() } else { c })
            .collect();
        let card = CardRef::new(CardId::new(1), "Any", frame);
        prop_assert_eq!(classify(&card), Zone::Extra);
    }
}

// =============================================================================
// Round Trip
// =============================================================================

proptest! {
    #[test]
    fn test_export_import_export_is_identity(
        adds in prop::collection::vec((1..=CARDS, 1u32..4), 0..20),
        side in prop::collection::vec(1..=CARDS, 0..4),
    ) {
        let svc = DeckService::new(InMemoryStore::new(), catalog());
        let source = svc.create_deck(OWNER, "Source", "").unwrap();

        // Rejections are fine; whatever got committed must round-trip.
        let _ = svc.import_deck_str(OWNER, source.id, &import_text(Zone::Side, &side));
        for (card, quantity) in adds {
            let _ = svc.add_card(OWNER, source.id, CardId::new(card), quantity);
        }

        let exported = svc.export_deck(OWNER, source.id).unwrap();

        let copy = svc.create_deck(OWNER, "Copy", "").unwrap();
        svc.import_deck_str(OWNER, copy.id, &exported).unwrap();

        prop_assert_eq!(svc.export_deck(OWNER, copy.id).unwrap(), exported);
        prop_assert_eq!(
            svc.deck_summary(OWNER, copy.id).unwrap(),
            svc.deck_summary(OWNER, source.id).unwrap()
        );
    }
}

// =============================================================================
// Limits Under Random Operations
// =============================================================================

proptest! {
    #[test]
    fn test_limits_hold_for_any_sequence(
        ops in prop::collection::vec(op_strategy(), 1..40),
        all_or_nothing in any::<bool>(),
    ) {
        let policy = if all_or_nothing { ImportPolicy::AllOrNothing } else { ImportPolicy::BestEffort };
        let rules = small_rules(policy);
        let svc = DeckService::with_rules(InMemoryStore::new(), catalog(), rules.clone()).unwrap();
        let deck = svc.create_deck(OWNER, "Random", "").unwrap();

        for op in ops {
            let before = svc.deck_entries(OWNER, deck.id).unwrap();
            match op {
                Op::Add { card, quantity } => {
                    let _ = svc.add_card(OWNER, deck.id, CardId::new(card), quantity);
                }
                Op::Remove { card, quantity } => {
                    let _ = svc.remove_card(OWNER, deck.id, CardId::new(card), quantity);
                }
                Op::Import { zone, cards } => {
                    let result = svc.import_deck_str(OWNER, deck.id, &import_text(zone, &cards));
                    if result.is_err() && all_or_nothing {
                        prop_assert_eq!(&svc.deck_entries(OWNER, deck.id).unwrap(), &before);
                    }
                }
            }

            let entries = svc.deck_entries(OWNER, deck.id).unwrap();
            let summary = svc.deck_summary(OWNER, deck.id).unwrap();
            for zone in Zone::ALL {
                if let Some(cap) = rules.cap(zone) {
                    prop_assert!(summary.get(zone) <= cap, "{} over cap: {:?}", zone, summary);
                }
            }
            for entry in &entries {
                prop_assert!(entry.quantity > 0);
                prop_assert!(entry.quantity <= rules.max_copies);
                prop_assert_eq!(
                    svc.store().sum_by_card(deck.id, entry.card).unwrap(),
                    entry.quantity
                );
            }
        }
    }
}
