use crate::position::Position;

/// King-move offsets, in row-major order so neighbor lists come out ascending.
const ADJACENT_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Two steps along a row or column, also in ascending id order.
const REMOTE_OFFSETS: [(isize, isize); 4] = [(-2, 0), (0, -2), (0, 2), (2, 0)];

/// Precomputed neighbor relations for an `size × size` board. Created once per
/// board size and shared by every board of that size.
///
/// Relations are stored as cell ids into the board's row-major cell array, so
/// nothing here refers back to the cells themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    size: usize,
    adjacent: Vec<Vec<usize>>,
    remote: Vec<Vec<usize>>,
}

impl Topology {
    /// Build the adjacency tables for a `size × size` board.
    pub fn new(size: usize) -> Self {
        let cell_count = size * size;
        let neighbors = |offsets: &[(isize, isize)], id: usize| -> Vec<usize> {
            let pos = Position::from_index(id, size);
            offsets
                .iter()
                .filter_map(|&(dr, dc)| pos.offset(dr, dc, size))
                .map(|p| p.to_index(size))
                .collect()
        };

        let adjacent = (0..cell_count)
            .map(|id| neighbors(&ADJACENT_OFFSETS, id))
            .collect();
        let remote = (0..cell_count)
            .map(|id| neighbors(&REMOTE_OFFSETS, id))
            .collect();

        Topology {
            size,
            adjacent,
            remote,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    pub fn contains(&self, id: usize) -> bool {
        id < self.cell_count()
    }

    /// Cells sharing an edge or a corner with `id` (up to 8).
    #[inline]
    pub fn adjacent(&self, id: usize) -> &[usize] {
        self.adjacent.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cells exactly two steps away from `id` along its row or column (up to 4).
    #[inline]
    pub fn remote(&self, id: usize) -> &[usize] {
        self.remote.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacent(a).contains(&b)
    }

    pub fn is_remote(&self, a: usize, b: usize) -> bool {
        self.remote(a).contains(&b)
    }
}
