//! One-ply greedy auto-player.
//!
//! Every legal move is scored by the number of enemy tiles it would flip, with
//! a bonus of one point for adjacent moves since they keep the origin tile.
//! The best-scoring moves are collected in scan order and one is picked
//! uniformly at random.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::board::Board;
use crate::player::Player;
use crate::r#move::Move;

/// Extra points for a move that does not vacate its origin.
pub const ADJACENT_BONUS: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoPlayer {
    pub enabled: bool,
    pub player: Player,
}

impl AutoPlayer {
    pub fn new(player: Player, enabled: bool) -> Self {
        AutoPlayer { enabled, player }
    }

    /// Whether the auto-player should move now.
    pub fn is_due(&self, turn: Player) -> bool {
        self.enabled && self.player == turn
    }
}

impl Default for AutoPlayer {
    fn default() -> Self {
        AutoPlayer::new(Player::Red, false)
    }
}

/// Every move sharing the top score, in discovery order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidates {
    pub score: usize,
    pub moves: Vec<Move>,
}

impl Candidates {
    fn offer(best: &mut Option<Candidates>, mv: Move, score: usize) {
        match best {
            Some(top) if score < top.score => {}
            Some(top) if score == top.score => top.moves.push(mv),
            _ => {
                *best = Some(Candidates {
                    score,
                    moves: vec![mv],
                })
            }
        }
    }
}

/// Score of moving a tile of `player` to the empty cell `dest`.
pub fn score(board: &Board, dest: usize, player: Player, adjacent: bool) -> usize {
    let captures = board.count_adjacent(dest, player.opposite().tile());
    if adjacent {
        captures + ADJACENT_BONUS
    } else {
        captures
    }
}

/// The top-scoring moves of `player`. Tiles are scanned in ascending id order,
/// adjacent destinations before remote ones. `None` if `player` cannot move.
#[hotpath::measure]
pub fn best_moves(board: &Board, player: Player) -> Option<Candidates> {
    let mut best = None;

    for origin in board.cells_with(player.tile()) {
        for dest in board.empty_adjacent(origin) {
            Candidates::offer(
                &mut best,
                Move::new(origin, dest),
                score(board, dest, player, true),
            );
        }
        for dest in board.empty_remote(origin) {
            Candidates::offer(
                &mut best,
                Move::new(origin, dest),
                score(board, dest, player, false),
            );
        }
    }

    best
}

/// Pick one of the top-scoring moves of `player` uniformly at random.
pub fn choose_move<R: Rng + ?Sized>(board: &Board, player: Player, rng: &mut R) -> Option<Move> {
    let candidates = best_moves(board, player)?;
    candidates.moves.choose(rng).copied()
}
