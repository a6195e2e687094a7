use std::fmt;

use rand::Rng;

use super::pit::{Pit, INITIAL_SEEDS, PIT_COUNT, TOTAL_SEEDS};
use super::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

impl GameOutcome {
    /// Classify a finished game by its final store counts.
    pub fn from_stores(store_one: u32, store_two: u32) -> Self {
        match store_one.cmp(&store_two) {
            std::cmp::Ordering::Greater => GameOutcome::Winner(Player::One),
            std::cmp::Ordering::Less => GameOutcome::Winner(Player::Two),
            std::cmp::Ordering::Equal => GameOutcome::Draw,
        }
    }
}

/// A rejected move. The state is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("store {0} cannot be sown from")]
    StorePit(Pit),
    #[error("pit {pit} does not belong to {}", .player.name())]
    NotOwned { pit: Pit, player: Player },
    #[error("pit {0} is empty")]
    EmptyPit(Pit),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board holds {found} seeds, expected {expected}")]
    SeedCount { expected: u32, found: u32 },
}

/// Everything that happened during one full ply played through [`GameState::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mover: Player,
    pub last_pit: Pit,
    pub captured: u32,
    pub extra_turn: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    seeds: [u8; PIT_COUNT],
    turn: Player,
}

impl GameState {
    /// Create the opening position with a fixed player to move.
    pub fn initial(turn: Player) -> Self {
        let mut seeds = [INITIAL_SEEDS; PIT_COUNT];
        seeds[Pit::StoreOne.index()] = 0;
        seeds[Pit::StoreTwo.index()] = 0;
        GameState { seeds, turn }
    }

    /// Create the opening position with the first player drawn from OS entropy.
    pub fn new_game() -> Self {
        Self::new_game_with_rng(&mut rand::rng())
    }

    /// Create the opening position with the first player drawn from `rng`.
    pub fn new_game_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let turn = if rng.random_bool(0.5) {
            Player::One
        } else {
            Player::Two
        };
        Self::initial(turn)
    }

    /// Build an arbitrary position. Seeds are indexed by [`Pit::index`].
    pub fn from_parts(seeds: [u8; PIT_COUNT], turn: Player) -> Result<Self, BoardError> {
        let found: u32 = seeds.iter().map(|&n| u32::from(n)).sum();
        if found != TOTAL_SEEDS {
            return Err(BoardError::SeedCount {
                expected: TOTAL_SEEDS,
                found,
            });
        }
        Ok(GameState { seeds, turn })
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn seeds(&self, pit: Pit) -> u8 {
        self.seeds[pit.index()]
    }

    /// Seeds banked in `player`'s store.
    pub fn store(&self, player: Player) -> u32 {
        u32::from(self.seeds(player.store()))
    }

    /// Seeds still in play on `player`'s side.
    pub fn side_total(&self, player: Player) -> u32 {
        player.pits().iter().map(|&pit| u32::from(self.seeds(pit))).sum()
    }

    pub fn total_seeds(&self) -> u32 {
        self.seeds.iter().map(|&n| u32::from(n)).sum()
    }

    /// Check that `pit` can be sown by the player to move.
    pub fn validate_move(&self, pit: Pit) -> Result<(), MoveError> {
        match pit.owner() {
            None => Err(MoveError::StorePit(pit)),
            Some(owner) if owner != self.turn => Err(MoveError::NotOwned {
                pit,
                player: self.turn,
            }),
            Some(_) if self.seeds(pit) == 0 => Err(MoveError::EmptyPit(pit)),
            Some(_) => Ok(()),
        }
    }

    /// Sow the seeds of `pit` and return the pit that received the last seed.
    pub fn apply_move(&mut self, pit: Pit) -> Result<Pit, MoveError> {
        self.validate_move(pit)?;
        Ok(self.sow(pit))
    }

    /// Distribute without validation. Callers must have checked the move.
    pub(crate) fn sow(&mut self, pit: Pit) -> Pit {
        let mut remaining = self.seeds[pit.index()];
        self.seeds[pit.index()] = 0;
        let skipped = self.turn.other().store();

        let mut current = pit;
        while remaining > 0 {
            current = current.successor();
            if current == skipped {
                continue;
            }
            self.seeds[current.index()] += 1;
            remaining -= 1;
        }
        current
    }

    /// Capture across the board if the last seed landed in a previously
    /// empty pit of the player to move. Returns the number of seeds banked.
    pub fn resolve_capture(&mut self, last_pit: Pit) -> u32 {
        if last_pit.owner() != Some(self.turn) || self.seeds(last_pit) != 1 {
            return 0;
        }
        let Some(opposite) = last_pit.opposite() else {
            return 0;
        };
        if self.seeds(opposite) == 0 {
            return 0;
        }

        let captured = self.seeds(last_pit) + self.seeds(opposite);
        self.seeds[last_pit.index()] = 0;
        self.seeds[opposite.index()] = 0;
        self.seeds[self.turn.store().index()] += captured;
        u32::from(captured)
    }

    /// True once either side has run out of seeds. Does not sweep.
    pub fn is_game_over(&self) -> bool {
        self.side_total(Player::One) == 0 || self.side_total(Player::Two) == 0
    }

    /// Report whether the game is over, sweeping every remaining seed into
    /// its owner's store when it is. Safe to call repeatedly.
    pub fn check_game_over(&mut self) -> bool {
        if !self.is_game_over() {
            return false;
        }
        for player in [Player::One, Player::Two] {
            let remaining = self.side_total(player) as u8;
            for &pit in player.pits() {
                self.seeds[pit.index()] = 0;
            }
            self.seeds[player.store().index()] += remaining;
        }
        true
    }

    pub fn switch_turn(&mut self) {
        self.turn = self.turn.other();
    }

    /// Non-empty pits of `player`, in canonical left-to-right order.
    pub fn valid_moves(&self, player: Player) -> Vec<Pit> {
        player
            .pits()
            .iter()
            .copied()
            .filter(|&pit| self.seeds(pit) > 0)
            .collect()
    }

    /// Landing pit of `pit` (sowing plus capture) without touching `self`.
    pub fn simulate_move(&self, pit: Pit) -> Result<Pit, MoveError> {
        let mut scratch = *self;
        let last_pit = scratch.apply_move(pit)?;
        scratch.resolve_capture(last_pit);
        Ok(last_pit)
    }

    /// Play one full ply: sow, capture, check for the end of the game, and
    /// pass the turn unless the last seed landed in the mover's store.
    pub fn play(&mut self, pit: Pit) -> Result<MoveOutcome, MoveError> {
        let mover = self.turn;
        let last_pit = self.apply_move(pit)?;
        let captured = self.resolve_capture(last_pit);
        let extra_turn = last_pit == mover.store();
        let game_over = self.check_game_over();
        if !game_over && !extra_turn {
            self.switch_turn();
        }
        Ok(MoveOutcome {
            mover,
            last_pit,
            captured,
            extra_turn,
            game_over,
        })
    }

    /// Result of the game if it is over, counting unswept seeds toward their
    /// owner's store.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.is_game_over() {
            return None;
        }
        let one = self.store(Player::One) + self.side_total(Player::One);
        let two = self.store(Player::Two) + self.side_total(Player::Two);
        Some(GameOutcome::from_stores(one, two))
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |pits: &[Pit; 6]| -> String {
            pits.iter()
                .map(|&pit| format!("[{:>2}]", self.seeds(pit)))
                .collect()
        };
        let labels = |pits: &[Pit; 6]| -> String {
            pits.iter().map(|pit| format!("  {} ", pit)).collect()
        };

        let top = Player::Two.pits();
        let bottom = Player::One.pits();
        writeln!(f, "    {}", labels(top))?;
        writeln!(f, "    {}", row(top))?;
        writeln!(
            f,
            "[{:>2}]{:24}[{:>2}]",
            self.store(Player::Two),
            "",
            self.store(Player::One)
        )?;
        writeln!(f, "    {}", row(bottom))?;
        writeln!(f, "    {}", labels(bottom))?;
        write!(f, "{} to move", self.turn.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn position(pits: &[(Pit, u8)], turn: Player) -> GameState {
        let mut seeds = [0u8; PIT_COUNT];
        for &(pit, n) in pits {
            seeds[pit.index()] = n;
        }
        GameState::from_parts(seeds, turn).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::initial(Player::One);
        assert_eq!(state.turn(), Player::One);
        assert_eq!(state.total_seeds(), TOTAL_SEEDS);
        assert_eq!(state.store(Player::One), 0);
        assert_eq!(state.store(Player::Two), 0);
        assert_eq!(state.seeds(Pit::K), 4);
        assert!(!state.is_game_over());
        assert_eq!(state.valid_moves(Player::One).len(), 6);
    }

    #[test]
    fn test_new_game_picks_either_player() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false, false];
        for _ in 0..64 {
            let state = GameState::new_game_with_rng(&mut rng);
            assert_eq!(state.total_seeds(), TOTAL_SEEDS);
            match state.turn() {
                Player::One => seen[0] = true,
                Player::Two => seen[1] = true,
            }
        }
        assert!(seen[0] && seen[1]);
    }

    #[test]
    fn test_from_parts_rejects_wrong_total() {
        let err = GameState::from_parts([1; PIT_COUNT], Player::One).unwrap_err();
        assert_eq!(
            err,
            BoardError::SeedCount {
                expected: 48,
                found: 14
            }
        );
    }

    #[test]
    fn test_valid_moves_canonical_order() {
        let state = GameState::initial(Player::Two);
        assert_eq!(
            state.valid_moves(Player::Two),
            vec![Pit::G, Pit::H, Pit::I, Pit::J, Pit::K, Pit::L]
        );

        let state = position(
            &[(Pit::B, 3), (Pit::E, 1), (Pit::H, 4), (Pit::StoreOne, 40)],
            Player::One,
        );
        assert_eq!(state.valid_moves(Player::One), vec![Pit::B, Pit::E]);
        assert_eq!(state.valid_moves(Player::Two), vec![Pit::H]);
    }

    #[test]
    fn test_opening_move_into_own_store() {
        let mut state = GameState::initial(Player::One);
        let last = state.apply_move(Pit::C).unwrap();
        assert_eq!(last, Pit::StoreOne);
        assert_eq!(state.seeds(Pit::C), 0);
        assert_eq!(state.seeds(Pit::D), 5);
        assert_eq!(state.seeds(Pit::F), 5);
        assert_eq!(state.store(Player::One), 1);
        assert_eq!(state.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_opening_move_crosses_to_opponent_side() {
        let mut state = GameState::initial(Player::One);
        let last = state.apply_move(Pit::F).unwrap();
        assert_eq!(last, Pit::J);
        assert_eq!(state.store(Player::One), 1);
        assert_eq!(state.seeds(Pit::L), 5);
        assert_eq!(state.seeds(Pit::K), 5);
        assert_eq!(state.seeds(Pit::J), 5);
        assert_eq!(state.seeds(Pit::I), 4);
    }

    #[test]
    fn test_sowing_skips_opponent_store() {
        let mut state = position(
            &[
                (Pit::F, 13),
                (Pit::G, 4),
                (Pit::H, 4),
                (Pit::I, 4),
                (Pit::J, 4),
                (Pit::K, 4),
                (Pit::L, 4),
                (Pit::StoreOne, 5),
                (Pit::StoreTwo, 6),
            ],
            Player::One,
        );
        let last = state.apply_move(Pit::F).unwrap();
        assert_eq!(last, Pit::F);
        assert_eq!(state.store(Player::Two), 6);
        assert_eq!(state.store(Player::One), 6);
        assert_eq!(state.seeds(Pit::A), 1);
        assert_eq!(state.seeds(Pit::G), 5);
        assert_eq!(state.seeds(Pit::F), 1);
        assert_eq!(state.total_seeds(), TOTAL_SEEDS);

        // F was emptied by the move itself, so the lap back into it captures.
        assert_eq!(state.resolve_capture(last), 6);
        assert_eq!(state.seeds(Pit::F), 0);
        assert_eq!(state.seeds(Pit::L), 0);
        assert_eq!(state.store(Player::One), 12);
        assert_eq!(state.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_player_two_skips_store_one() {
        let mut state = position(
            &[
                (Pit::L, 1),
                (Pit::G, 8),
                (Pit::A, 4),
                (Pit::StoreOne, 20),
                (Pit::StoreTwo, 15),
            ],
            Player::Two,
        );
        let last = state.apply_move(Pit::G).unwrap();
        // G -> 2, A..F, (skip 1), L
        assert_eq!(last, Pit::L);
        assert_eq!(state.store(Player::One), 20);
        assert_eq!(state.store(Player::Two), 16);
        assert_eq!(state.seeds(Pit::L), 2);
    }

    #[test]
    fn test_sowing_laps_the_ring() {
        let mut state = position(
            &[
                (Pit::A, 30),
                (Pit::G, 1),
                (Pit::H, 1),
                (Pit::I, 1),
                (Pit::J, 1),
                (Pit::K, 1),
                (Pit::L, 1),
                (Pit::StoreOne, 6),
                (Pit::StoreTwo, 6),
            ],
            Player::One,
        );
        let last = state.apply_move(Pit::A).unwrap();
        assert_eq!(last, Pit::E);
        assert_eq!(state.seeds(Pit::A), 2);
        assert_eq!(state.seeds(Pit::B), 3);
        assert_eq!(state.seeds(Pit::E), 3);
        assert_eq!(state.seeds(Pit::F), 2);
        assert_eq!(state.seeds(Pit::G), 3);
        assert_eq!(state.store(Player::One), 8);
        assert_eq!(state.store(Player::Two), 6);
        assert_eq!(state.resolve_capture(last), 0);
        assert_eq!(state.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_capture_into_emptied_pit() {
        let mut state = position(
            &[
                (Pit::A, 4),
                (Pit::B, 4),
                (Pit::C, 4),
                (Pit::E, 1),
                (Pit::G, 4),
                (Pit::H, 4),
                (Pit::I, 4),
                (Pit::J, 4),
                (Pit::K, 4),
                (Pit::L, 4),
                (Pit::StoreOne, 5),
                (Pit::StoreTwo, 6),
            ],
            Player::One,
        );
        let last = state.apply_move(Pit::E).unwrap();
        assert_eq!(last, Pit::F);
        assert_eq!(state.resolve_capture(last), 5);
        assert_eq!(state.seeds(Pit::F), 0);
        assert_eq!(state.seeds(Pit::L), 0);
        assert_eq!(state.store(Player::One), 10);
        assert_eq!(state.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_player_two_capture() {
        let mut state = position(
            &[
                (Pit::A, 5),
                (Pit::B, 4),
                (Pit::C, 4),
                (Pit::H, 1),
                (Pit::I, 4),
                (Pit::J, 4),
                (Pit::K, 4),
                (Pit::L, 4),
                (Pit::StoreOne, 8),
                (Pit::StoreTwo, 10),
            ],
            Player::Two,
        );
        let outcome = state.play(Pit::H).unwrap();
        assert_eq!(outcome.mover, Player::Two);
        assert_eq!(outcome.last_pit, Pit::G);
        assert_eq!(outcome.captured, 6);
        assert!(!outcome.extra_turn);
        assert!(!outcome.game_over);
        assert_eq!(state.seeds(Pit::G), 0);
        assert_eq!(state.seeds(Pit::A), 0);
        assert_eq!(state.store(Player::Two), 16);
        assert_eq!(state.store(Player::One), 8);
        assert_eq!(state.turn(), Player::One);
        assert_eq!(state.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_no_capture_when_opposite_empty() {
        let mut state = position(
            &[
                (Pit::A, 4),
                (Pit::E, 1),
                (Pit::G, 4),
                (Pit::K, 4),
                (Pit::StoreOne, 20),
                (Pit::StoreTwo, 15),
            ],
            Player::One,
        );
        let last = state.apply_move(Pit::E).unwrap();
        assert_eq!(last, Pit::F);
        assert_eq!(state.resolve_capture(last), 0);
        assert_eq!(state.seeds(Pit::F), 1);
        assert_eq!(state.seeds(Pit::L), 0);
        assert_eq!(state.store(Player::One), 20);
    }

    #[test]
    fn test_no_capture_when_pit_already_had_seeds() {
        let mut state = position(
            &[
                (Pit::E, 1),
                (Pit::F, 2),
                (Pit::L, 5),
                (Pit::StoreOne, 20),
                (Pit::StoreTwo, 20),
            ],
            Player::One,
        );
        let last = state.apply_move(Pit::E).unwrap();
        assert_eq!(last, Pit::F);
        assert_eq!(state.resolve_capture(last), 0);
        assert_eq!(state.seeds(Pit::F), 3);
        assert_eq!(state.seeds(Pit::L), 5);
    }

    #[test]
    fn test_no_capture_on_opponent_side() {
        let mut state = position(
            &[
                (Pit::F, 2),
                (Pit::A, 3),
                (Pit::G, 3),
                (Pit::StoreOne, 20),
                (Pit::StoreTwo, 20),
            ],
            Player::One,
        );
        // F -> 1, L. L was empty but belongs to player 2.
        let last = state.apply_move(Pit::F).unwrap();
        assert_eq!(last, Pit::L);
        assert_eq!(state.resolve_capture(last), 0);
        assert_eq!(state.seeds(Pit::L), 1);
    }

    #[test]
    fn test_invalid_moves_leave_state_untouched() {
        let mut state = position(
            &[
                (Pit::A, 4),
                (Pit::G, 4),
                (Pit::StoreOne, 20),
                (Pit::StoreTwo, 20),
            ],
            Player::One,
        );
        let before = state;
        assert_eq!(state.apply_move(Pit::B), Err(MoveError::EmptyPit(Pit::B)));
        assert_eq!(
            state.apply_move(Pit::G),
            Err(MoveError::NotOwned {
                pit: Pit::G,
                player: Player::One
            })
        );
        assert_eq!(
            state.apply_move(Pit::StoreOne),
            Err(MoveError::StorePit(Pit::StoreOne))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_extra_turn_keeps_turn() {
        let mut state = GameState::initial(Player::One);
        let outcome = state.play(Pit::C).unwrap();
        assert!(outcome.extra_turn);
        assert!(!outcome.game_over);
        assert_eq!(state.turn(), Player::One);

        let outcome = state.play(Pit::A).unwrap();
        assert!(!outcome.extra_turn);
        assert_eq!(state.turn(), Player::Two);
    }

    #[test]
    fn test_game_over_sweep_is_idempotent() {
        let mut state = position(
            &[
                (Pit::G, 2),
                (Pit::H, 3),
                (Pit::StoreOne, 20),
                (Pit::StoreTwo, 23),
            ],
            Player::One,
        );
        assert!(state.check_game_over());
        assert_eq!(state.store(Player::One), 20);
        assert_eq!(state.store(Player::Two), 28);
        assert_eq!(state.side_total(Player::Two), 0);

        let swept = state;
        assert!(state.check_game_over());
        assert_eq!(state, swept);
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::Two)));
        assert_eq!(state.total_seeds(), TOTAL_SEEDS);
    }

    #[test]
    fn test_emptying_move_ends_game_before_turn_switch() {
        let mut state = position(
            &[
                (Pit::F, 1),
                (Pit::G, 4),
                (Pit::StoreOne, 20),
                (Pit::StoreTwo, 23),
            ],
            Player::One,
        );
        let outcome = state.play(Pit::F).unwrap();
        assert!(outcome.game_over);
        assert_eq!(state.store(Player::One), 21);
        assert_eq!(state.store(Player::Two), 27);
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::Two)));
    }

    #[test]
    fn test_outcome_draw_and_unfinished() {
        assert_eq!(GameState::initial(Player::One).outcome(), None);
        assert_eq!(GameOutcome::from_stores(24, 24), GameOutcome::Draw);
        assert_eq!(
            GameOutcome::from_stores(25, 23),
            GameOutcome::Winner(Player::One)
        );
    }

    #[test]
    fn test_simulate_move_is_read_only() {
        let state = GameState::initial(Player::Two);
        assert_eq!(state.simulate_move(Pit::J), Ok(Pit::StoreTwo));
        assert_eq!(state.simulate_move(Pit::G), Ok(Pit::C));
        assert_eq!(state, GameState::initial(Player::Two));
        assert!(state.simulate_move(Pit::A).is_err());
    }

    #[test]
    fn test_random_playouts_conserve_seeds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut state = GameState::new_game_with_rng(&mut rng);
            let mut plies = 0;
            while !state.check_game_over() {
                let moves = state.valid_moves(state.turn());
                let pit = moves[rng.random_range(0..moves.len())];
                let before_store = state.store(state.turn());
                let mover = state.turn();
                state.play(pit).unwrap();
                assert_eq!(state.total_seeds(), TOTAL_SEEDS);
                assert!(state.store(mover) >= before_store);
                plies += 1;
                assert!(plies < 500, "game did not terminate");
            }
            assert!(state.outcome().is_some());
            assert_eq!(
                state.store(Player::One) + state.store(Player::Two),
                TOTAL_SEEDS
            );
        }
    }

    #[test]
    fn test_display_shows_both_rows() {
        let text = GameState::initial(Player::One).to_string();
        assert!(text.contains("[ 4][ 4][ 4][ 4][ 4][ 4]"));
        assert!(text.contains("  G "));
        assert!(text.ends_with("Player 1 to move"));
    }
}
