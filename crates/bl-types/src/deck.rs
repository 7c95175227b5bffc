//! A generic draw pile: shuffle once, then draw and (occasionally) return
//! cards to the back one at a time.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("cannot draw from an empty deck")]
    Empty,
}

/// Cards live in `cards` with the top of the deck at the end of the `Vec`,
/// so draw is an O(1) pop and deal-time shuffling is a single Fisher-Yates
/// pass over the whole pile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck<T> {
    cards: Vec<T>,
}

impl<T> Deck<T> {
    pub fn new(cards: Vec<T>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw the top card, if any.
    pub fn draw(&mut self) -> Result<T, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }

    /// Return a card to the top of the deck (used by Redeploy/Deserter to
    /// discard a troop back onto its deck).
    pub fn put_back(&mut self, card: T) {
        self.cards.push(card);
    }

    /// The top `n` cards without removing them, nearest-to-draw last.
    pub fn peek(&self, n: usize) -> &[T] {
        let len = self.cards.len();
        &self.cards[len.saturating_sub(n)..]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cards
    }
}
