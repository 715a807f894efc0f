//! Board-level move rules: reachable destinations, contamination, and the
//! forced claim that ends a game once one side can no longer play.
//!
//! These functions only look at a [`Board`]; turn order, selection and history
//! live in [`crate::game::Game`].

use crate::board::Board;
use crate::cell::CellValue;
use crate::player::Player;
use crate::r#move::{Destinations, Move, MoveKind};

/// Free cells handed to one colour by the forced-claim rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Claim {
    pub player: Player,
    pub cells: usize,
}

/// What the forced-claim pass did after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Both colours can still move.
    Open,
    Claimed(Claim),
    /// Free cells remain but neither colour can reach one.
    Stalemate,
}

/// Which colours have at least one tile with an empty neighbor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mobility {
    pub red: bool,
    pub blue: bool,
}

impl Mobility {
    pub fn of(&self, player: Player) -> bool {
        match player {
            Player::Red => self.red,
            Player::Blue => self.blue,
        }
    }
}

/// Empty cells reachable from `origin`.
pub fn destinations(board: &Board, origin: usize) -> Destinations {
    if !board.contains(origin) {
        return Destinations::default();
    }
    Destinations {
        adjacent: board.empty_adjacent(origin).collect(),
        remote: board.empty_remote(origin).collect(),
    }
}

/// Whether `player` may pick `origin` as the start of a move.
pub fn is_selectable(board: &Board, origin: usize, player: Player) -> bool {
    board.get(origin) == Some(player.tile()) && board.can_move(origin)
}

/// Classify `mv` for `player`, or `None` if it is not a legal move.
pub fn classify(board: &Board, mv: &Move, player: Player) -> Option<MoveKind> {
    if !is_selectable(board, mv.origin, player) || !board.is_empty_cell(mv.dest) {
        return None;
    }
    mv.kind(board.topology())
}

/// Every legal move of `player`: origins ascending, adjacent destinations
/// before remote ones.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for origin in board.cells_with(player.tile()) {
        moves.extend(board.empty_adjacent(origin).map(|dest| Move::new(origin, dest)));
        moves.extend(board.empty_remote(origin).map(|dest| Move::new(origin, dest)));
    }
    moves
}

/// Scan every tile until both colours are known to be mobile.
#[hotpath::measure]
pub fn mobility(board: &Board) -> Mobility {
    let mut mobility = Mobility {
        red: false,
        blue: false,
    };

    for (id, value) in board.values().iter().enumerate() {
        if mobility.red && mobility.blue {
            break;
        }
        let player = match value.owner() {
            Some(player) => player,
            None => continue,
        };
        if mobility.of(player) {
            continue;
        }
        if board.can_move(id) {
            match player {
                Player::Red => mobility.red = true,
                Player::Blue => mobility.blue = true,
            }
        }
    }

    mobility
}

/// Turn every opponent tile adjacent to `dest` into `player`'s colour. One
/// pass, no cascade. Returns the flipped ids.
pub fn contaminate(board: &mut Board, dest: usize, player: Player) -> Vec<usize> {
    let enemy = player.opposite().tile();
    let flipped: Vec<usize> = board
        .topology()
        .adjacent(dest)
        .iter()
        .copied()
        .filter(|&n| board.get(n) == Some(enemy))
        .collect();

    for &id in &flipped {
        board.set(id, player.tile());
    }
    flipped
}

/// Give every empty cell to `player`. Returns how many were claimed.
pub fn claim_free(board: &mut Board, player: Player) -> usize {
    let free: Vec<usize> = board.cells_with(CellValue::Empty).collect();
    for &id in &free {
        board.set(id, player.tile());
    }
    free.len()
}

/// Forced claim: a colour without tiles, or without any tile that can move,
/// forfeits every free cell to the other colour. A claim that takes no cell
/// is reported as `Open`.
pub fn resolve(board: &mut Board) -> Resolution {
    let claim = |board: &mut Board, player: Player| match claim_free(board, player) {
        0 => Resolution::Open,
        cells => Resolution::Claimed(Claim { player, cells }),
    };

    if board.tiles(Player::Red) == 0 {
        return claim(board, Player::Blue);
    }
    if board.tiles(Player::Blue) == 0 {
        return claim(board, Player::Red);
    }
    if board.free() == 0 {
        return Resolution::Open;
    }

    let mobility = mobility(board);
    match (mobility.red, mobility.blue) {
        (true, true) => Resolution::Open,
        (false, false) => Resolution::Stalemate,
        (false, true) => claim(board, Player::Blue),
        (true, false) => claim(board, Player::Red),
    }
}

/// The effects of one committed move on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Effects {
    pub kind: MoveKind,
    pub flipped: Vec<usize>,
    pub resolution: Resolution,
}

/// Apply an already validated move of `player`: vacate the origin on a remote
/// jump, occupy the destination, contaminate, then resolve forced claims.
#[hotpath::measure]
pub fn play(board: &mut Board, mv: Move, kind: MoveKind, player: Player) -> Effects {
    if kind == MoveKind::Remote {
        board.set(mv.origin, CellValue::Empty);
    }
    board.set(mv.dest, player.tile());
    let flipped = contaminate(board, mv.dest, player);
    let resolution = resolve(board);

    Effects {
        kind,
        flipped,
        resolution,
    }
}
