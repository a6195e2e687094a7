use std::fmt;

use serde::Serialize;

use super::game::GameRecord;
use crate::game::{GameOutcome, Player};

/// Win/loss/draw tally over a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchStats {
    pub games: usize,
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub draws: usize,
    pub total_plies: usize,
    pub total_extra_turns: usize,
    pub total_captured: u64,
    store_one_total: u64,
    store_two_total: u64,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: &GameRecord) {
        self.games += 1;
        match record.outcome {
            GameOutcome::Winner(Player::One) => self.player_one_wins += 1,
            GameOutcome::Winner(Player::Two) => self.player_two_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.total_plies += record.plies;
        self.total_extra_turns += record.extra_turns;
        self.total_captured += u64::from(record.captured);
        self.store_one_total += u64::from(record.store_one);
        self.store_two_total += u64::from(record.store_two);
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::One => self.player_one_wins,
            Player::Two => self.player_two_wins,
        }
    }

    /// Fraction of games won by `player`.
    pub fn win_rate(&self, player: Player) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins(player) as f32 / self.games as f32
    }

    pub fn draw_rate(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.draws as f32 / self.games as f32
    }

    /// Average number of plies per game.
    pub fn average_game_length(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_plies as f32 / self.games as f32
    }

    /// Average final store of `player`.
    pub fn average_store(&self, player: Player) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        let total = match player {
            Player::One => self.store_one_total,
            Player::Two => self.store_two_total,
        };
        total as f32 / self.games as f32
    }
}

impl fmt::Display for MatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games played: {}", self.games)?;
        for player in [Player::One, Player::Two] {
            writeln!(
                f,
                "{} wins: {} ({:.1}%), average store {:.1}",
                player.name(),
                self.wins(player),
                self.win_rate(player) * 100.0,
                self.average_store(player)
            )?;
        }
        writeln!(f, "Draws: {} ({:.1}%)", self.draws, self.draw_rate() * 100.0)?;
        write!(f, "Average length: {:.1} plies", self.average_game_length())
    }
}
