#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn from_index(index: usize, size: usize) -> Self {
        Position {
            row: index / size,
            col: index % size,
        }
    }

    pub fn to_index(&self, size: usize) -> usize {
        self.row * size + self.col
    }

    pub fn is_valid(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// The position `(d_row, d_col)` steps away, if it stays on a `size × size` board.
    pub fn offset(&self, d_row: isize, d_col: isize, size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let pos = Position { row, col };
        pos.is_valid(size).then_some(pos)
    }
}
