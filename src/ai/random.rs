use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::{legal_moves_for, Agent};
use crate::error::AgentError;
use crate::game::{GameState, Pit, Player};

/// An agent that selects uniformly at random from legal moves.
pub struct RandomAgent {
    player: Option<Player>,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            player: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// A reproducible agent for tests and seeded batch runs.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            player: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn for_player(mut self, player: Player) -> Self {
        self.player = Some(player);
        self
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform pick from a non-empty move list.
pub(crate) fn pick_uniform(rng: &mut StdRng, moves: &[Pit]) -> Pit {
    moves[rng.random_range(0..moves.len())]
}

impl Agent for RandomAgent {
    fn make_move(&mut self, state: &GameState) -> Result<Pit, AgentError> {
        let (_, moves) = legal_moves_for(&*self, state)?;
        Ok(pick_uniform(&mut self.rng, &moves))
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn bind(&mut self, player: Player) {
        self.player = Some(player);
    }

    fn player(&self) -> Option<Player> {
        self.player
    }
}
