//! The full game state: both decks, both hands, all nine flags, and the
//! guile log each side has accrued.

use serde::{Deserialize, Serialize};

use crate::card::{Card, GuileIdentity, TacticIdentity, TroopCard, TroopOrMoraleCard};
use crate::deck::Deck;
use crate::flag::Flag;
use crate::ids::Side;

/// Flags on the battle line, left to right.
pub const NUM_FLAGS: usize = 9;
/// Cards dealt to each hand at the start of the game, and the target size a
/// player refills to at the end of a normal turn.
pub const STARTING_HAND_SIZE: usize = 7;

/// A player's hand is unordered from the engine's point of view and can
/// shrink to zero once both decks run dry, so it's a plain `Vec` rather than
/// a fixed-capacity container.
pub type Hand = Vec<Card>;

/// A record of one guile tactic played: which one, and — for Deserter and
/// Redeploy, which discard a troop or morale card from a flag — what was
/// discarded. Scout and Traitor never discard, so this is `None` for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuileOperation {
    pub guile_card: GuileIdentity,
    pub discarded: Option<TroopOrMoraleCard>,
}

/// The complete, self-contained state of one game in progress.
///
/// `GameState` owns every card it references — no shared or reference-
/// counted state anywhere in the graph — so `#[derive(Clone)]` already gives
/// a full deep copy. That matters because scouting/undo-style "try a move,
/// inspect the result, discard it" flows (and the resolver's analysis of
/// hypothetical formations) depend on a clone never aliasing the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub troops_deck: Deck<TroopCard>,
    pub tactics_deck: Deck<TacticIdentity>,
    pub hands: [Hand; 2],
    pub flags: [Flag; NUM_FLAGS],
    pub guile_log: [Vec<GuileOperation>; 2],
    pub turn: Side,
}

impl GameState {
    /// Build a state from already-shuffled decks, empty hands and flags,
    /// with `A` to move first. Dealing and shuffling are engine concerns —
    /// see `bl-engine::setup`.
    pub fn new(troops_deck: Deck<TroopCard>, tactics_deck: Deck<TacticIdentity>) -> Self {
        Self {
            troops_deck,
            tactics_deck,
            hands: [Vec::new(), Vec::new()],
            flags: std::array::from_fn(|_| Flag::new()),
            guile_log: [Vec::new(), Vec::new()],
            turn: Side::A,
        }
    }

    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side_index(side)]
    }

    pub fn hand_mut(&mut self, side: Side) -> &mut Hand {
        &mut self.hands[side_index(side)]
    }

    pub fn guile_log(&self, side: Side) -> &[GuileOperation] {
        &self.guile_log[side_index(side)]
    }

    pub fn push_guile_log(&mut self, side: Side, op: GuileOperation) {
        self.guile_log[side_index(side)].push(op);
    }

    pub fn flag(&self, index: usize) -> &Flag {
        &self.flags[index]
    }

    pub fn flag_mut(&mut self, index: usize) -> &mut Flag {
        &mut self.flags[index]
    }

    /// Both decks are empty — no more cards can ever be drawn.
    pub fn decks_exhausted(&self) -> bool {
        self.troops_deck.is_empty() && self.tactics_deck.is_empty()
    }
}

fn side_index(side: Side) -> usize {
    match side {
        Side::A => 0,
        Side::B => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;

    fn sample_state() -> GameState {
        GameState::new(
            Deck::new(vec![TroopCard::new(Color::Red, 1)]),
            Deck::new(vec![TacticIdentity::Fog]),
        )
    }

    #[test]
    fn new_state_has_nine_empty_flags() {
        let state = sample_state();
        assert_eq!(state.flags.len(), NUM_FLAGS);
        assert!(state.flags.iter().all(|f| !f.is_resolved()));
    }

    #[test]
    fn new_state_starts_with_side_a() {
        assert_eq!(sample_state().turn, Side::A);
    }

    #[test]
    fn clone_is_a_true_deep_copy() {
        let mut original = sample_state();
        original.hand_mut(Side::A).push(Card::Tactic(TacticIdentity::Scout));
        let mut cloned = original.clone();
        cloned.hand_mut(Side::A).push(Card::Tactic(TacticIdentity::Traitor));

        assert_eq!(original.hand(Side::A).len(), 1);
        assert_eq!(cloned.hand(Side::A).len(), 2);
    }

    #[test]
    fn guile_log_records_in_order() {
        let mut state = sample_state();
        state.push_guile_log(
            Side::A,
            GuileOperation { guile_card: GuileIdentity::Scout, discarded: None },
        );
        assert_eq!(state.guile_log(Side::A).len(), 1);
        assert_eq!(state.guile_log(Side::B).len(), 0);
    }

    #[test]
    fn serde_roundtrip_game_state() {
        let mut state = sample_state();
        state.hand_mut(Side::A).push(Card::Tactic(TacticIdentity::Scout));
        state.flag_mut(0).add_stack(Side::B, TroopOrMoraleCard::Troop(TroopCard::new(Color::Green, 3)));

        let json = serde_json::to_string(&state).unwrap();
        let parsed: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
