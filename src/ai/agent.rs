use crate::error::AgentError;
use crate::game::{GameState, Pit, Player};

/// Universal interface for all computer opponents.
///
/// Agents are built unbound and assigned a side with [`Agent::bind`], so a
/// roster can be configured before seats are handed out.
pub trait Agent {
    /// Choose a pit to sow for the bound player.
    ///
    /// The bound player must be the one to move in `state` and must have at
    /// least one legal move.
    fn make_move(&mut self, state: &GameState) -> Result<Pit, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Assign the side this agent plays.
    fn bind(&mut self, player: Player);

    /// The side this agent plays, if assigned.
    fn player(&self) -> Option<Player>;
}

/// Resolve the bound player and its legal moves, or the contract violation
/// that prevents moving.
pub(crate) fn legal_moves_for(
    agent: &dyn Agent,
    state: &GameState,
) -> Result<(Player, Vec<Pit>), AgentError> {
    let player = agent.player().ok_or_else(|| AgentError::Unbound {
        agent: agent.name().to_string(),
    })?;
    if state.turn() != player {
        return Err(AgentError::NotYourTurn {
            agent: agent.name().to_string(),
            player,
            turn: state.turn(),
        });
    }
    let moves = state.valid_moves(player);
    if moves.is_empty() {
        return Err(AgentError::NoLegalMove(player));
    }
    Ok((player, moves))
}
