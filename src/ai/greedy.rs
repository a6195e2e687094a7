use rand::rngs::StdRng;
use rand::SeedableRng;

use super::agent::{legal_moves_for, Agent};
use super::random::pick_uniform;
use crate::error::AgentError;
use crate::game::{GameState, Pit, Player};

/// Takes the first move (in pit order) that ends in its own store, otherwise
/// plays randomly.
pub struct GreedyAgent {
    player: Option<Player>,
    rng: StdRng,
}

impl GreedyAgent {
    pub fn new() -> Self {
        GreedyAgent {
            player: None,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        GreedyAgent {
            player: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn for_player(mut self, player: Player) -> Self {
        self.player = Some(player);
        self
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for GreedyAgent {
    fn make_move(&mut self, state: &GameState) -> Result<Pit, AgentError> {
        let (player, moves) = legal_moves_for(&*self, state)?;
        let extra_turn = moves
            .iter()
            .copied()
            .find(|&pit| state.simulate_move(pit) == Ok(player.store()));
        Ok(extra_turn.unwrap_or_else(|| pick_uniform(&mut self.rng, &moves)))
    }

    fn name(&self) -> &str {
        "Greedy"
    }

    fn bind(&mut self, player: Player) {
        self.player = Some(player);
    }

    fn player(&self) -> Option<Player> {
        self.player
    }
}
