use tracing::debug;

use super::agent::{legal_moves_for, Agent};
use crate::error::AgentError;
use crate::game::{GameState, Pit, Player};

/// Score of a position from one player's point of view. Higher is better.
pub type Evaluation = i32;

/// Bound that every real evaluation lies within.
pub const BEST_EVAL: Evaluation = i32::MAX;
pub const WORST_EVAL: Evaluation = -BEST_EVAL;

/// Trait for evaluating a position from a player's perspective.
pub trait Heuristic: Send {
    /// Static score of `state` for `player`.
    fn evaluate(&self, state: &GameState, player: Player) -> Evaluation;

    /// Score credited to the player who just moved for a ply that captured
    /// `captured` seeds, on top of the static evaluation at the leaves.
    fn ply_bonus(&self, _captured: u32) -> Evaluation {
        0
    }

    fn name(&self) -> &str;
}

/// Store differential: own store minus opponent store.
pub struct StoreDifference;

impl Heuristic for StoreDifference {
    fn evaluate(&self, state: &GameState, player: Player) -> Evaluation {
        state.store(player) as Evaluation - state.store(player.other()) as Evaluation
    }

    fn name(&self) -> &str {
        "store_difference"
    }
}

/// Store differential plus the seeds captured along the way.
///
/// A capture counts once more on top of the leaf differential: added on the
/// searching player's plies and subtracted on the opponent's. Seeds sown
/// straight into a store earn nothing extra.
pub struct CaptureWeighted;

impl Heuristic for CaptureWeighted {
    fn evaluate(&self, state: &GameState, player: Player) -> Evaluation {
        StoreDifference.evaluate(state, player)
    }

    fn ply_bonus(&self, captured: u32) -> Evaluation {
        captured as Evaluation
    }

    fn name(&self) -> &str {
        "capture_weighted"
    }
}

/// Selects one of the built-in heuristics by name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    #[default]
    StoreDifference,
    CaptureWeighted,
}

impl HeuristicKind {
    pub fn build(self) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::StoreDifference => Box::new(StoreDifference),
            HeuristicKind::CaptureWeighted => Box::new(CaptureWeighted),
        }
    }
}

/// Search settings for [`MinimaxAgent`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Horizon in plies.
    pub depth: u32,
    pub heuristic: HeuristicKind,
    /// Maximum number of expanded nodes per move. When set, the agent deepens
    /// one ply at a time and keeps the deepest finished iteration.
    pub node_budget: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 3,
            heuristic: HeuristicKind::StoreDifference,
            node_budget: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pruning {
    AlphaBeta,
    /// Visit every node. Used to check that pruning never changes the result.
    Exhaustive,
}

/// What a search found at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: Evaluation,
    /// `None` only when the root had nothing to search.
    pub best_move: Option<Pit>,
    /// Number of moves expanded.
    pub nodes: u64,
    /// Deepest horizon that finished.
    pub depth: u32,
}

struct Search<'a> {
    player: Player,
    heuristic: &'a dyn Heuristic,
    pruning: Pruning,
    nodes: u64,
    budget: Option<u64>,
}

impl Search<'_> {
    /// Returns `None` when the node budget ran out mid-search.
    fn minimax(
        &mut self,
        mut state: GameState,
        depth: u32,
        mut alpha: Evaluation,
        mut beta: Evaluation,
        maximizing: bool,
    ) -> Option<(Evaluation, Option<Pit>)> {
        // Sweep first so finished games are scored on their final stores.
        if state.check_game_over() || depth == 0 {
            return Some((self.heuristic.evaluate(&state, self.player), None));
        }

        let active = if maximizing {
            self.player
        } else {
            self.player.other()
        };
        debug_assert_eq!(state.turn(), active);
        let moves = state.valid_moves(active);
        if moves.is_empty() {
            return Some((self.heuristic.evaluate(&state, self.player), None));
        }

        let mut best_score = if maximizing { WORST_EVAL } else { BEST_EVAL };
        let mut best_move = None;

        for pit in moves {
            if self.budget.is_some_and(|budget| self.nodes >= budget) {
                return None;
            }
            self.nodes += 1;

            let mut child = state;
            let last_pit = child.sow(pit);
            let captured = child.resolve_capture(last_pit);
            let extra_turn = last_pit == active.store();
            if !extra_turn {
                child.switch_turn();
            }
            let bonus = self.heuristic.ply_bonus(captured);
            let next_maximizing = if extra_turn { maximizing } else { !maximizing };

            // The bonus is folded into the child's score, so shift the window
            // by the same amount to keep cutoffs exact.
            let score = if maximizing {
                let (child_score, _) = self.minimax(
                    child,
                    depth - 1,
                    alpha.saturating_sub(bonus),
                    beta.saturating_sub(bonus),
                    next_maximizing,
                )?;
                child_score.saturating_add(bonus)
            } else {
                let (child_score, _) = self.minimax(
                    child,
                    depth - 1,
                    alpha.saturating_add(bonus),
                    beta.saturating_add(bonus),
                    next_maximizing,
                )?;
                child_score.saturating_sub(bonus)
            };

            if maximizing {
                if best_move.is_none() || score > best_score {
                    best_score = score;
                    best_move = Some(pit);
                }
                alpha = alpha.max(score);
            } else {
                if best_move.is_none() || score < best_score {
                    best_score = score;
                    best_move = Some(pit);
                }
                beta = beta.min(score);
            }

            if self.pruning == Pruning::AlphaBeta && beta <= alpha {
                break;
            }
        }

        Some((best_score, best_move))
    }
}

/// Search `depth` plies ahead for `player`, who must be the player to move.
pub fn search(
    state: &GameState,
    player: Player,
    depth: u32,
    heuristic: &dyn Heuristic,
    pruning: Pruning,
) -> SearchResult {
    let mut search = Search {
        player,
        heuristic,
        pruning,
        nodes: 0,
        budget: None,
    };
    let (score, best_move) = search
        .minimax(*state, depth, WORST_EVAL, BEST_EVAL, state.turn() == player)
        .unwrap_or((heuristic.evaluate(state, player), None));
    SearchResult {
        score,
        best_move,
        nodes: search.nodes,
        depth,
    }
}

/// Iterative deepening up to `max_depth` within `budget` expanded nodes.
///
/// Returns the result of the deepest iteration that finished. If not even the
/// one-ply search fits, `best_move` falls back to the first legal move.
pub fn search_with_budget(
    state: &GameState,
    player: Player,
    max_depth: u32,
    heuristic: &dyn Heuristic,
    budget: u64,
) -> SearchResult {
    let mut search = Search {
        player,
        heuristic,
        pruning: Pruning::AlphaBeta,
        nodes: 0,
        budget: Some(budget),
    };
    let mut completed = SearchResult {
        score: heuristic.evaluate(state, player),
        best_move: state.valid_moves(player).first().copied(),
        nodes: 0,
        depth: 0,
    };

    for depth in 1..=max_depth {
        let maximizing = state.turn() == player;
        match search.minimax(*state, depth, WORST_EVAL, BEST_EVAL, maximizing) {
            Some((score, best_move)) => {
                completed = SearchResult {
                    score,
                    best_move: best_move.or(completed.best_move),
                    nodes: search.nodes,
                    depth,
                };
            }
            None => {
                debug!(depth, budget, "node budget exhausted");
                break;
            }
        }
    }

    completed.nodes = search.nodes;
    completed
}

/// Minimax agent with alpha-beta pruning and extra-turn aware recursion.
pub struct MinimaxAgent {
    player: Option<Player>,
    config: SearchConfig,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new(depth: u32) -> Self {
        Self::from_config(SearchConfig {
            depth,
            ..SearchConfig::default()
        })
    }

    pub fn from_config(config: SearchConfig) -> Self {
        MinimaxAgent {
            player: None,
            heuristic: config.heuristic.build(),
            config,
        }
    }

    pub fn with_heuristic(depth: u32, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            player: None,
            config: SearchConfig {
                depth,
                ..SearchConfig::default()
            },
            heuristic,
        }
    }

    pub fn for_player(mut self, player: Player) -> Self {
        self.player = Some(player);
        self
    }

    pub fn depth(&self) -> u32 {
        self.config.depth
    }
}

impl Agent for MinimaxAgent {
    fn make_move(&mut self, state: &GameState) -> Result<Pit, AgentError> {
        let (player, moves) = legal_moves_for(&*self, state)?;
        let heuristic = self.heuristic.as_ref();

        let result = match self.config.node_budget {
            Some(budget) => search_with_budget(state, player, self.config.depth, heuristic, budget),
            None => search(state, player, self.config.depth, heuristic, Pruning::AlphaBeta),
        };
        debug!(
            player = player.name(),
            score = result.score,
            nodes = result.nodes,
            depth = result.depth,
            best = ?result.best_move,
            heuristic = heuristic.name(),
            "minimax search finished"
        );

        Ok(result.best_move.unwrap_or(moves[0]))
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn bind(&mut self, player: Player) {
        self.player = Some(player);
    }

    fn player(&self) -> Option<Player> {
        self.player
    }
}
