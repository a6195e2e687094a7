use std::fmt;
use std::str::FromStr;

use super::Player;

/// Number of pits on the board, stores included.
pub const PIT_COUNT: usize = 14;
/// Seeds placed in every player-owned pit at the start of a game.
pub const INITIAL_SEEDS: u8 = 4;
/// Seeds on the board at all times.
pub const TOTAL_SEEDS: u32 = 2 * 6 * INITIAL_SEEDS as u32;

/// One of the fourteen board cells.
///
/// Discriminants follow the sowing order, so `pit as usize` is the pit's
/// position on the ring: player 1's side runs A..F into store 1, player 2's
/// side runs L..G into store 2, and store 2 wraps back to A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Pit {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    StoreOne,
    L,
    K,
    J,
    I,
    H,
    G,
    StoreTwo,
}

/// All pits in sowing order.
pub const RING: [Pit; PIT_COUNT] = [
    Pit::A,
    Pit::B,
    Pit::C,
    Pit::D,
    Pit::E,
    Pit::F,
    Pit::StoreOne,
    Pit::L,
    Pit::K,
    Pit::J,
    Pit::I,
    Pit::H,
    Pit::G,
    Pit::StoreTwo,
];

pub const PLAYER_ONE_PITS: [Pit; 6] = [Pit::A, Pit::B, Pit::C, Pit::D, Pit::E, Pit::F];
pub const PLAYER_TWO_PITS: [Pit; 6] = [Pit::G, Pit::H, Pit::I, Pit::J, Pit::K, Pit::L];

const SUCCESSOR: [Pit; PIT_COUNT] = [
    Pit::B,
    Pit::C,
    Pit::D,
    Pit::E,
    Pit::F,
    Pit::StoreOne,
    Pit::L,
    Pit::K,
    Pit::J,
    Pit::I,
    Pit::H,
    Pit::G,
    Pit::StoreTwo,
    Pit::A,
];

const OPPOSITE: [Option<Pit>; PIT_COUNT] = [
    Some(Pit::G),
    Some(Pit::H),
    Some(Pit::I),
    Some(Pit::J),
    Some(Pit::K),
    Some(Pit::L),
    None,
    Some(Pit::F),
    Some(Pit::E),
    Some(Pit::D),
    Some(Pit::C),
    Some(Pit::B),
    Some(Pit::A),
    None,
];

const OWNER: [Option<Player>; PIT_COUNT] = [
    Some(Player::One),
    Some(Player::One),
    Some(Player::One),
    Some(Player::One),
    Some(Player::One),
    Some(Player::One),
    None,
    Some(Player::Two),
    Some(Player::Two),
    Some(Player::Two),
    Some(Player::Two),
    Some(Player::Two),
    Some(Player::Two),
    None,
];

const LABELS: [char; PIT_COUNT] = [
    'A', 'B', 'C', 'D', 'E', 'F', '1', 'L', 'K', 'J', 'I', 'H', 'G', '2',
];

impl Pit {
    /// Position on the sowing ring, used to index seed arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next pit in sowing order.
    pub fn successor(self) -> Pit {
        SUCCESSOR[self.index()]
    }

    /// The pit across the board, `None` for stores.
    pub fn opposite(self) -> Option<Pit> {
        OPPOSITE[self.index()]
    }

    /// The player whose side this pit is on, `None` for stores.
    pub fn owner(self) -> Option<Player> {
        OWNER[self.index()]
    }

    pub fn is_store(self) -> bool {
        matches!(self, Pit::StoreOne | Pit::StoreTwo)
    }

    /// Single-character label: `A`..`L` for pits, `1`/`2` for stores.
    pub fn label(self) -> char {
        LABELS[self.index()]
    }
}

impl fmt::Display for Pit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a pit (expected a letter A-L)")]
pub struct ParsePitError(pub String);

impl FromStr for Pit {
    type Err = ParsePitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(ParsePitError(trimmed.to_string()));
        };
        let c = c.to_ascii_uppercase();
        PLAYER_ONE_PITS
            .iter()
            .chain(PLAYER_TWO_PITS.iter())
            .copied()
            .find(|pit| pit.label() == c)
            .ok_or_else(|| ParsePitError(trimmed.to_string()))
    }
}
