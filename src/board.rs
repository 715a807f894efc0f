use std::fmt;
use std::sync::Arc;

use crate::cell::CellValue;
use crate::error::LayoutError;
use crate::outcome::Counts;
use crate::player::Player;
use crate::position::Position;
use crate::topology::Topology;

pub const STANDARD_SIZE: usize = 8;

/// A full copy of every cell value at one instant, without any topology.
///
/// Its string form is the board value string: one digit per cell in id order
/// (`0` Empty, `1` Red, `4` Blocked, `5` Blue).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot(Box<[CellValue]>);

impl Snapshot {
    pub fn new(values: Vec<CellValue>) -> Self {
        Snapshot(values.into_boxed_slice())
    }

    /// Parse a board value string for a board of `cell_count` cells. Nothing is
    /// produced unless the whole string is valid.
    pub fn parse(s: &str, cell_count: usize) -> Result<Self, LayoutError> {
        let found = s.chars().count();
        if found != cell_count {
            return Err(LayoutError::WrongLength {
                expected: cell_count,
                found,
            });
        }

        s.chars()
            .enumerate()
            .map(|(index, c)| {
                CellValue::from_digit(c).ok_or(LayoutError::InvalidDigit { index, found: c })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Snapshot::new)
    }

    pub fn values(&self) -> &[CellValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn counts(&self) -> Counts {
        count_values(&self.0)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.0.iter() {
            write!(f, "{}", value.to_digit())?;
        }
        Ok(())
    }
}

fn count_values(values: &[CellValue]) -> Counts {
    let mut counts = Counts::default();
    for value in values {
        match value {
            CellValue::Empty => counts.free += 1,
            CellValue::Red => counts.red += 1,
            CellValue::Blue => counts.blue += 1,
            CellValue::Blocked => counts.blocked += 1,
        }
    }
    counts
}

/// Cell values of an `N × N` board plus counters that are kept in step with
/// every write.
#[derive(Clone, Debug)]
pub struct Board {
    topology: Arc<Topology>,
    cells: Vec<CellValue>,
    counts: Counts,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl Board {
    pub fn new(size: usize) -> Self {
        Self::with_topology(Arc::new(Topology::new(size)))
    }

    pub fn with_topology(topology: Arc<Topology>) -> Self {
        let cell_count = topology.cell_count();
        Board {
            topology,
            cells: vec![CellValue::Empty; cell_count],
            counts: Counts {
                free: cell_count,
                ..Counts::default()
            },
        }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_SIZE)
    }

    pub fn size(&self) -> usize {
        self.topology.size()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// A handle to the neighbor tables, for building more boards of this size.
    pub fn shared_topology(&self) -> Arc<Topology> {
        Arc::clone(&self.topology)
    }

    pub fn get(&self, id: usize) -> Option<CellValue> {
        self.cells.get(id).copied()
    }

    pub fn get_at(&self, pos: &Position) -> Option<CellValue> {
        if pos.is_valid(self.size()) {
            self.get(pos.to_index(self.size()))
        } else {
            None
        }
    }

    pub fn values(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    pub fn free(&self) -> usize {
        self.counts.free
    }

    pub fn tiles(&self, player: Player) -> usize {
        self.counts.tiles(player)
    }

    /// Write one cell, keeping the counters in step. Returns the old value.
    /// Ids outside the board are ignored.
    pub(crate) fn set(&mut self, id: usize, value: CellValue) -> Option<CellValue> {
        let slot = self.cells.get_mut(id)?;
        let previous = *slot;
        if previous == value {
            return Some(previous);
        }
        *slot = value;

        match previous {
            CellValue::Empty => self.counts.free -= 1,
            CellValue::Red => self.counts.red -= 1,
            CellValue::Blue => self.counts.blue -= 1,
            CellValue::Blocked => self.counts.blocked -= 1,
        }
        match value {
            CellValue::Empty => self.counts.free += 1,
            CellValue::Red => self.counts.red += 1,
            CellValue::Blue => self.counts.blue += 1,
            CellValue::Blocked => self.counts.blocked += 1,
        }

        Some(previous)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.cells.clone())
    }

    /// Overwrite every cell from `snapshot` and recount from scratch.
    ///
    /// Callers guarantee the snapshot was taken from, or validated against, a
    /// board of this size.
    pub(crate) fn restore(&mut self, snapshot: &Snapshot) {
        debug_assert_eq!(snapshot.len(), self.cell_count());
        self.cells.clear();
        self.cells.extend_from_slice(snapshot.values());
        self.counts = count_values(&self.cells);
    }

    /// Counters computed directly from the cell values.
    pub fn recount(&self) -> Counts {
        count_values(&self.cells)
    }

    pub fn is_empty_cell(&self, id: usize) -> bool {
        self.get(id).is_some_and(|v| v.is_empty())
    }

    /// Empty cells adjacent to `id`, in ascending id order.
    pub fn empty_adjacent(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.topology
            .adjacent(id)
            .iter()
            .copied()
            .filter(move |&n| self.cells[n].is_empty())
    }

    /// Empty remote neighbors of `id`, in ascending id order.
    pub fn empty_remote(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.topology
            .remote(id)
            .iter()
            .copied()
            .filter(move |&n| self.cells[n].is_empty())
    }

    /// Whether the tile on `id` has any empty adjacent or remote neighbor.
    pub fn can_move(&self, id: usize) -> bool {
        self.contains(id)
            && (self.empty_adjacent(id).next().is_some()
                || self.empty_remote(id).next().is_some())
    }

    /// Number of cells adjacent to `id` holding `value`.
    pub fn count_adjacent(&self, id: usize, value: CellValue) -> usize {
        self.topology
            .adjacent(id)
            .iter()
            .filter(|&&n| self.cells[n] == value)
            .count()
    }

    pub fn contains(&self, id: usize) -> bool {
        id < self.cells.len()
    }

    /// Ids of every cell currently holding `value`, ascending.
    pub fn cells_with(&self, value: CellValue) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, &v)| v == value)
            .map(|(id, _)| id)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for row in 0..size {
            write!(f, "|")?;

            for col in 0..size {
                let c = self
                    .get_at(&Position::new(row, col))
                    .map(|v| v.to_char())
                    .unwrap_or(' ');

                write!(f, "{}", c)?;
                write!(f, "|")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
