//! Computer opponents: the [`Agent`] trait, two baseline policies and the
//! minimax searcher with its pluggable evaluations.

mod agent;
mod greedy;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use greedy::GreedyAgent;
pub use minimax::{
    search, search_with_budget, CaptureWeighted, Heuristic, HeuristicKind, MinimaxAgent,
    Pruning, SearchConfig, SearchResult, StoreDifference,
};
pub use random::RandomAgent;

/// Selects which policy occupies a seat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Random,
    Greedy,
    Minimax,
}

impl AgentKind {
    /// Build an unbound agent. `seed` makes the random policies reproducible.
    pub fn build(self, search: &SearchConfig, seed: Option<u64>) -> Box<dyn Agent> {
        match (self, seed) {
            (AgentKind::Random, Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
            (AgentKind::Random, None) => Box::new(RandomAgent::new()),
            (AgentKind::Greedy, Some(seed)) => Box::new(GreedyAgent::with_seed(seed)),
            (AgentKind::Greedy, None) => Box::new(GreedyAgent::new()),
            (AgentKind::Minimax, _) => Box::new(MinimaxAgent::from_config(search.clone())),
        }
    }
}
