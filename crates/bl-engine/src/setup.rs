//! Game construction: shuffle both decks and deal starting hands.

use bl_types::{Card, Deck, GameState, Side, STARTING_HAND_SIZE};
use rand::Rng;

/// Build a fresh game: both decks shuffled, each side dealt
/// [`STARTING_HAND_SIZE`] troop cards, `A` to move first.
pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> GameState {
    let mut troops_deck = bl_data::new_troop_deck();
    let mut tactics_deck = bl_data::new_tactic_deck();
    troops_deck.shuffle(rng);
    tactics_deck.shuffle(rng);

    let mut state = GameState::new(troops_deck, tactics_deck);
    for side in [Side::A, Side::B] {
        deal_to_hand(&mut state, side, STARTING_HAND_SIZE);
    }
    state
}

/// Draw troop cards from the deck into `side`'s hand until it holds
/// `target` cards or the troop deck runs dry.
fn deal_to_hand(state: &mut GameState, side: Side, target: usize) {
    while state.hand(side).len() < target {
        let Ok(card) = state.troops_deck.draw() else {
            break;
        };
        state.hand_mut(side).push(Card::Troop(card));
    }
}
