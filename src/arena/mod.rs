//! Game driver and batch simulation: plays agents against each other under
//! the standard turn protocol and tallies the results.

mod game;
mod stats;

pub use game::{play_game, play_game_with, GameRecord, PlyEvent};
pub use stats::MatchStats;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::ai::{AgentKind, SearchConfig};
use crate::error::PlayError;
use crate::game::{GameState, Player};

/// Batch simulation settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub games: usize,
    /// Seed for the starting player and the random policies. Unset means
    /// OS entropy.
    pub seed: Option<u64>,
    pub player_one: AgentKind,
    pub player_two: AgentKind,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            games: 100,
            seed: None,
            player_one: AgentKind::Minimax,
            player_two: AgentKind::Random,
        }
    }
}

/// Play `config.games` games between the configured agents, each starting
/// from a fresh board with a random first player.
pub fn run_match(config: &ArenaConfig, search: &SearchConfig) -> Result<MatchStats, PlayError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut one = config.player_one.build(search, Some(rng.random()));
    let mut two = config.player_two.build(search, Some(rng.random()));
    one.bind(Player::One);
    two.bind(Player::Two);

    info!(
        games = config.games,
        player_one = one.name(),
        player_two = two.name(),
        depth = search.depth,
        "starting match"
    );

    let progress_every = (config.games / 10).max(1);
    let mut stats = MatchStats::new();
    for game in 1..=config.games {
        let state = GameState::new_game_with_rng(&mut rng);
        let record = play_game(state, one.as_mut(), two.as_mut())?;
        debug!(
            game,
            first = record.first_player.name(),
            store_one = record.store_one,
            store_two = record.store_two,
            plies = record.plies,
            "game finished"
        );
        stats.record(&record);

        if game % progress_every == 0 {
            info!(
                game,
                total = config.games,
                player_one_wins = stats.player_one_wins,
                player_two_wins = stats.player_two_wins,
                draws = stats.draws,
                "match progress"
            );
        }
    }

    Ok(stats)
}
