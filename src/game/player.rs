use super::pit::{Pit, PLAYER_ONE_PITS, PLAYER_TWO_PITS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The store this player scores into.
    pub fn store(self) -> Pit {
        match self {
            Player::One => Pit::StoreOne,
            Player::Two => Pit::StoreTwo,
        }
    }

    /// The six pits on this player's side, in canonical left-to-right order.
    pub fn pits(self) -> &'static [Pit; 6] {
        match self {
            Player::One => &PLAYER_ONE_PITS,
            Player::Two => &PLAYER_TWO_PITS,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
    }

    #[test]
    fn test_store_is_a_bijection() {
        assert_eq!(Player::One.store(), Pit::StoreOne);
        assert_eq!(Player::Two.store(), Pit::StoreTwo);
        assert_ne!(Player::One.store(), Player::Two.store());
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::One.name(), "Player 1");
        assert_eq!(Player::Two.name(), "Player 2");
    }
}
