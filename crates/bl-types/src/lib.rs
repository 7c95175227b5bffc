//! Core types for the battle line engine: cards, flags, decks, and the
//! aggregate game state. No game rules live here — just the shapes the
//! rules are built out of.

mod card;
mod deck;
mod flag;
mod ids;
mod state;

pub use card::{
    Card, Color, EnvironmentIdentity, GuileIdentity, Kind, MoraleIdentity, PlayedCard,
    TacticIdentity, TroopCard, TroopOrMoraleCard, ALL_COLORS, ALL_TACTICS,
};
pub use deck::{Deck, DeckError};
pub use flag::{Flag, MAX_ENVS, MAX_STACK};
pub use ids::Side;
pub use state::{GameState, GuileOperation, Hand, NUM_FLAGS, STARTING_HAND_SIZE};
