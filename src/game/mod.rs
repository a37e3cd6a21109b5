//! Core n-in-a-row game logic: grid representation, player identity, and a
//! game state machine with immutable transitions.

mod grid;
mod player;
mod state;

pub use grid::{Cell, GameOutcome, Grid};
pub use player::Player;
pub use state::{GameState, MoveError};
