use std::path::PathBuf;

use crate::game::{MoveError, Player};

/// Errors an agent raises instead of choosing a move. Each one is a bug in
/// the caller and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("{agent} agent has no player assigned")]
    Unbound { agent: String },

    #[error("{agent} agent plays for {} but it is {}'s turn", .player.name(), .turn.name())]
    NotYourTurn {
        agent: String,
        player: Player,
        turn: Player,
    },

    #[error("{} has no legal move", .0.name())]
    NoLegalMove(Player),
}

/// Errors raised while driving a game between two agents.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("agent chose an invalid move: {0}")]
    Move(#[from] MoveError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Pit;

    #[test]
    fn test_agent_error_display() {
        let err = AgentError::NotYourTurn {
            agent: "Minimax".to_string(),
            player: Player::Two,
            turn: Player::One,
        };
        assert_eq!(
            err.to_string(),
            "Minimax agent plays for Player 2 but it is Player 1's turn"
        );
        assert_eq!(
            AgentError::NoLegalMove(Player::One).to_string(),
            "Player 1 has no legal move"
        );
    }

    #[test]
    fn test_play_error_wraps_move_error() {
        let err: PlayError = MoveError::EmptyPit(Pit::C).into();
        assert_eq!(err.to_string(), "agent chose an invalid move: pit C is empty");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.depth must be >= 1"
        );
    }
}
