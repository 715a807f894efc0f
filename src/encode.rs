use crate::board::Snapshot;
use crate::cell::CellValue;
use crate::error::LayoutError;
use crate::player::Player;

/// Four-corner opening: Red on the main diagonal corners, Blue on the others.
pub fn default_layout(size: usize) -> Snapshot {
    let cell_count = size * size;
    let mut values = vec![CellValue::Empty; cell_count];
    if size >= 2 {
        values[size - 1] = CellValue::Blue;
        values[cell_count - size] = CellValue::Blue;
        values[0] = CellValue::Red;
        values[cell_count - 1] = CellValue::Red;
    }
    Snapshot::new(values)
}

/// Board value string followed by the digit of the player to move.
pub fn encode_permalink(board: &Snapshot, turn: Player) -> String {
    let mut link = board.to_string();
    link.push(turn.to_digit());
    link
}

/// Inverse of [`encode_permalink`]. A leading `#` (URL fragment) is ignored.
pub fn decode_permalink(link: &str, cell_count: usize) -> Result<(Snapshot, Player), LayoutError> {
    let link = link.strip_prefix('#').unwrap_or(link);
    let mut chars = link.chars();
    let last = chars.next_back().ok_or(LayoutError::WrongLength {
        expected: cell_count + 1,
        found: 0,
    })?;
    let board = chars.as_str();

    let found = link.chars().count();
    if found != cell_count + 1 {
        return Err(LayoutError::WrongLength {
            expected: cell_count + 1,
            found,
        });
    }

    let snapshot = Snapshot::parse(board, cell_count)?;
    let turn = Player::from_digit(last).ok_or(LayoutError::InvalidPlayer(last))?;
    Ok((snapshot, turn))
}
