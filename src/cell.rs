use crate::player::Player;

/// Authoritative value of a single board cell.
///
/// The discriminants are the digits used by layout strings, permalinks and
/// save states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellValue {
    #[default]
    Empty = 0,
    Red = 1,
    Blocked = 4,
    Blue = 5,
}

impl CellValue {
    pub fn from_digit(c: char) -> Option<CellValue> {
        match c {
            '0' => Some(CellValue::Empty),
            '1' => Some(CellValue::Red),
            '4' => Some(CellValue::Blocked),
            '5' => Some(CellValue::Blue),
            _ => None,
        }
    }

    pub fn to_digit(&self) -> char {
        match self {
            CellValue::Empty => '0',
            CellValue::Red => '1',
            CellValue::Blocked => '4',
            CellValue::Blue => '5',
        }
    }

    /// The owning player, if the cell holds a tile.
    pub fn owner(&self) -> Option<Player> {
        match self {
            CellValue::Red => Some(Player::Red),
            CellValue::Blue => Some(Player::Blue),
            CellValue::Empty | CellValue::Blocked => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn to_char(&self) -> char {
        match self {
            CellValue::Empty => '.',
            CellValue::Red => 'R',
            CellValue::Blocked => '#',
            CellValue::Blue => 'B',
        }
    }
}
