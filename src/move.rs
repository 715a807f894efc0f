use crate::topology::Topology;

/// How a destination relates to its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// The origin keeps its tile and a copy lands next to it.
    Adjacent,
    /// The tile jumps two cells, vacating the origin.
    Remote,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: usize,
    pub dest: usize,
}

impl Move {
    pub fn new(origin: usize, dest: usize) -> Self {
        Move { origin, dest }
    }

    /// Classify the move against `topology`, or `None` if `dest` is in neither
    /// neighbor set of `origin`.
    pub fn kind(&self, topology: &Topology) -> Option<MoveKind> {
        if topology.is_adjacent(self.origin, self.dest) {
            Some(MoveKind::Adjacent)
        } else if topology.is_remote(self.origin, self.dest) {
            Some(MoveKind::Remote)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.origin, self.dest)
    }
}

/// Empty cells reachable from a selected origin, for presentation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Destinations {
    pub adjacent: Vec<usize>,
    pub remote: Vec<usize>,
}

impl Destinations {
    pub fn is_empty(&self) -> bool {
        self.adjacent.is_empty() && self.remote.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let topo = Topology::new(8);
        assert_eq!(Move::new(0, 9).kind(&topo), Some(MoveKind::Adjacent));
        assert_eq!(Move::new(0, 16).kind(&topo), Some(MoveKind::Remote));
        assert_eq!(Move::new(0, 18).kind(&topo), None);
        assert_eq!(Move::new(0, 0).kind(&topo), None);
        assert_eq!(Move::new(64, 0).kind(&topo), None);
    }
}
