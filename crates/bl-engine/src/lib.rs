//! Game logic for the battle line engine — setup, flag resolution, the win
//! condition, and the player contract that is the only legal way to mutate
//! a game in progress.

pub mod player_contract;
pub mod resolver;
pub mod setup;
pub mod win_condition;

pub use player_contract::{apply_move, DeckKind, MoveError, PlayerMove};
pub use resolver::resolve;
pub use setup::new_game;
pub use win_condition::winner;
