use tracing::debug;

use crate::ai::Agent;
use crate::error::PlayError;
use crate::game::{GameOutcome, GameState, MoveOutcome, Pit, Player};

/// Summary of one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub first_player: Player,
    pub outcome: GameOutcome,
    pub store_one: u32,
    pub store_two: u32,
    pub plies: usize,
    pub extra_turns: usize,
    pub captured: u32,
}

/// One ply as seen by an observer, with the position after it.
pub struct PlyEvent<'a> {
    pub pit: Pit,
    pub outcome: MoveOutcome,
    pub state: &'a GameState,
}

/// Play `state` to the end with `one` and `two` choosing moves for their
/// players.
pub fn play_game(
    state: GameState,
    one: &mut dyn Agent,
    two: &mut dyn Agent,
) -> Result<GameRecord, PlayError> {
    play_game_with(state, one, two, |_| {})
}

/// Like [`play_game`], calling `on_ply` after every move.
pub fn play_game_with<F>(
    mut state: GameState,
    one: &mut dyn Agent,
    two: &mut dyn Agent,
    mut on_ply: F,
) -> Result<GameRecord, PlayError>
where
    F: FnMut(&PlyEvent<'_>),
{
    let first_player = state.turn();
    let mut plies = 0;
    let mut extra_turns = 0;
    let mut captured = 0;

    while !state.check_game_over() {
        let agent: &mut dyn Agent = match state.turn() {
            Player::One => &mut *one,
            Player::Two => &mut *two,
        };
        let pit = agent.make_move(&state)?;
        let outcome = state.play(pit)?;
        debug!(
            ply = plies,
            player = outcome.mover.name(),
            agent = agent.name(),
            pit = %pit,
            last = %outcome.last_pit,
            captured = outcome.captured,
            extra_turn = outcome.extra_turn,
            "move played"
        );

        plies += 1;
        extra_turns += usize::from(outcome.extra_turn);
        captured += outcome.captured;
        on_ply(&PlyEvent {
            pit,
            outcome,
            state: &state,
        });
    }

    let store_one = state.store(Player::One);
    let store_two = state.store(Player::Two);
    Ok(GameRecord {
        first_player,
        outcome: GameOutcome::from_stores(store_one, store_two),
        store_one,
        store_two,
        plies,
        extra_turns,
        captured,
    })
}
