//! Catalog and deck construction for the fixed 60-card troop deck and
//! 10-card tactics deck.

use bl_types::{Deck, TacticIdentity, TroopCard, ALL_COLORS, ALL_TACTICS};

/// The full troop catalog: 6 colors times values 1..=10, 60 cards total.
pub fn all_troop_cards() -> Vec<TroopCard> {
    let mut cards = Vec::with_capacity(ALL_COLORS.len() * 10);
    for &color in ALL_COLORS.iter() {
        for value in 1..=10 {
            cards.push(TroopCard::new(color, value));
        }
    }
    cards
}

/// The full tactics catalog: one copy of each of the 10 identities.
pub fn all_tactic_identities() -> Vec<TacticIdentity> {
    ALL_TACTICS.to_vec()
}

/// A fresh, unshuffled troop deck — shuffling is the caller's job (see
/// `bl-engine::setup`), so this stays deterministic and testable on its own.
pub fn new_troop_deck() -> Deck<TroopCard> {
    Deck::new(all_troop_cards())
}

/// A fresh, unshuffled tactics deck.
pub fn new_tactic_deck() -> Deck<TacticIdentity> {
    Deck::new(all_tactic_identities())
}
