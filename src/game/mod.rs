//! Core Kalah rules: pit topology, player types, and the mutable game state
//! with sowing, capture and end-of-game sweep.

mod pit;
mod player;
mod state;

pub use pit::{
    ParsePitError, Pit, INITIAL_SEEDS, PIT_COUNT, PLAYER_ONE_PITS, PLAYER_TWO_PITS, RING,
    TOTAL_SEEDS,
};
pub use player::Player;
pub use state::{BoardError, GameOutcome, GameState, MoveError, MoveOutcome};
