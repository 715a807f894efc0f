use crate::cell::CellValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Player {
    Red = 0,
    Blue = 1,
}

impl Player {
    pub fn opposite(&self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// The cell value a tile of this colour carries on the board.
    pub fn tile(&self) -> CellValue {
        match self {
            Player::Red => CellValue::Red,
            Player::Blue => CellValue::Blue,
        }
    }

    /// Permalink / save-state digit: `0` for Red, `1` for Blue.
    pub fn to_digit(&self) -> char {
        match self {
            Player::Red => '0',
            Player::Blue => '1',
        }
    }

    pub fn from_digit(c: char) -> Option<Player> {
        match c {
            '0' => Some(Player::Red),
            '1' => Some(Player::Blue),
            _ => None,
        }
    }

    pub fn from_int(i: u8) -> Option<Player> {
        match i {
            0 => Some(Player::Red),
            1 => Some(Player::Blue),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let player_str = match self {
            Player::Red => "Red",
            Player::Blue => "Blue",
        };
        write!(f, "{}", player_str)
    }
}
