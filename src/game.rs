use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::ai::{self, AutoPlayer};
use crate::board::{Board, Snapshot, STANDARD_SIZE};
use crate::cell::CellValue;
use crate::encode;
use crate::error::{GameError, HistoryAction};
use crate::history::History;
use crate::outcome::{Counts, GameOutcome};
use crate::player::Player;
use crate::r#move::{Destinations, Move, MoveKind};
use crate::rules::{self, Claim, Resolution};

/// Everything a committed move did, for the caller to present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub player: Player,
    pub mv: Move,
    pub kind: MoveKind,
    pub flipped: Vec<usize>,
    pub claim: Option<Claim>,
    /// Free cells remain that neither colour can reach.
    pub stalemate: bool,
    pub counts: Counts,
    pub outcome: Option<GameOutcome>,
    /// The auto-player's answer, if it moved straight after this one.
    pub reply: Option<Box<MoveReport>>,
}

/// A single game session: the board, whose turn it is, the pending selection,
/// undo/redo history and the auto-player seat.
#[derive(Debug)]
pub struct Game {
    board: Board,
    current_player: Player,
    active_origin: Option<usize>,
    history: History,
    auto_player: AutoPlayer,
    seed: u64,
    rng: StdRng,
}

/// The copy gets its own random stream, restarted from the game's seed.
impl Clone for Game {
    fn clone(&self) -> Self {
        Game {
            board: self.board.clone(),
            current_player: self.current_player,
            active_origin: self.active_origin,
            history: self.history.clone(),
            auto_player: self.auto_player,
            seed: self.seed,
            rng: StdRng::seed_from_u64(self.seed),
        }
    }
}

impl Game {
    pub fn new(size: usize) -> Self {
        Self::with_options(size, None)
    }

    /// `seed` fixes the random starting player of [`Game::new_game`] and the
    /// auto-player's tie-breaks.
    pub fn with_options(size: usize, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut board = Board::new(size);
        board.restore(&encode::default_layout(size));

        Game {
            board,
            current_player: Player::Red,
            active_origin: None,
            history: History::new(),
            auto_player: AutoPlayer::new(Player::Blue, false),
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_SIZE)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn cell_count(&self) -> usize {
        self.board.cell_count()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn get_cell(&self, id: usize) -> Option<CellValue> {
        self.board.get(id)
    }

    pub fn counts(&self) -> Counts {
        self.board.counts()
    }

    pub fn turn(&self) -> Player {
        self.current_player
    }

    pub fn active_origin(&self) -> Option<usize> {
        self.active_origin
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn auto_player(&self) -> AutoPlayer {
        self.auto_player
    }

    pub fn set_auto_player(&mut self, enabled: bool) {
        self.auto_player.enabled = enabled;
    }

    pub fn set_auto_player_seat(&mut self, player: Player) {
        self.auto_player.player = player;
    }

    /// Over when no free cell is left, or when free cells remain that no tile
    /// of either colour can reach.
    pub fn is_over(&self) -> bool {
        if self.board.free() == 0 {
            return true;
        }
        let mobility = rules::mobility(&self.board);
        !mobility.red && !mobility.blue
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.is_over().then(|| self.board.counts().leader())
    }

    pub fn permalink(&self) -> String {
        encode::encode_permalink(&self.board.snapshot(), self.current_player)
    }

    // ---------------------------------------------------------------------
    // Starting positions
    // ---------------------------------------------------------------------

    /// Start over from `layout` (a board value string) or the default opening.
    /// A missing `starting` player is drawn at random. The auto-player takes
    /// the colour that does not move first.
    pub fn new_game(
        &mut self,
        layout: Option<&str>,
        starting: Option<Player>,
    ) -> Result<(), GameError> {
        let snapshot = match layout {
            Some(s) => Snapshot::parse(s, self.cell_count())?,
            None => encode::default_layout(self.size()),
        };
        let starting = match starting {
            Some(player) => player,
            None => [Player::Red, Player::Blue]
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(Player::Red),
        };

        self.start(&snapshot, starting);
        Ok(())
    }

    /// Start over from a permalink (board value string plus turn digit).
    pub fn load_permalink(&mut self, link: &str) -> Result<(), GameError> {
        let (snapshot, starting) = encode::decode_permalink(link, self.cell_count())?;
        self.start(&snapshot, starting);
        Ok(())
    }

    fn start(&mut self, snapshot: &Snapshot, starting: Player) {
        self.board.restore(snapshot);
        self.history.clear();
        self.active_origin = None;
        self.current_player = starting;
        self.auto_player.player = starting.opposite();
        debug!(
            layout = %snapshot,
            player = %starting,
            "new game"
        );
    }

    /// Replace the whole session state. Inputs were validated by the caller.
    pub(crate) fn restore_session(&mut self, board: &Snapshot, history: History, turn: Player) {
        self.board.restore(board);
        self.history = history;
        self.active_origin = None;
        self.current_player = turn;
    }

    // ---------------------------------------------------------------------
    // Moves
    // ---------------------------------------------------------------------

    /// Empty cells reachable from `origin`, whoever owns it.
    pub fn destinations(&self, origin: usize) -> Destinations {
        rules::destinations(&self.board, origin)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        rules::legal_moves(&self.board, self.current_player)
    }

    /// Whether `mv` is legal for the player in turn, whatever is selected.
    pub fn is_legal_move(&self, mv: &Move) -> bool {
        self.check_legal(mv).is_ok()
    }

    /// Pick `cell` as the origin of the next move. Only a tile of the player in
    /// turn with at least one empty neighbor qualifies; otherwise nothing
    /// changes.
    pub fn select_origin(&mut self, cell: usize) -> Result<Destinations, GameError> {
        if !rules::is_selectable(&self.board, cell, self.current_player) {
            trace!(cell, player = %self.current_player, "rejected selection");
            return Err(GameError::IllegalSelection {
                cell,
                player: self.current_player,
            });
        }
        self.active_origin = Some(cell);
        Ok(self.destinations(cell))
    }

    pub fn clear_selection(&mut self) {
        self.active_origin = None;
    }

    /// A move must start from the selected origin.
    fn check_move(&self, mv: &Move) -> Result<MoveKind, GameError> {
        if self.active_origin != Some(mv.origin) {
            return Err(GameError::IllegalSelection {
                cell: mv.origin,
                player: self.current_player,
            });
        }
        self.check_legal(mv)
    }

    fn check_legal(&self, mv: &Move) -> Result<MoveKind, GameError> {
        let player = self.current_player;
        if !rules::is_selectable(&self.board, mv.origin, player) {
            return Err(GameError::IllegalSelection {
                cell: mv.origin,
                player,
            });
        }
        rules::classify(&self.board, mv, player).ok_or(GameError::IllegalDestination {
            origin: mv.origin,
            dest: mv.dest,
        })
    }

    /// Move from the selected `origin` to `dest` for the player in turn, then
    /// let the auto-player answer if it holds the next turn.
    pub fn apply_move(&mut self, origin: usize, dest: usize) -> Result<MoveReport, GameError> {
        let mut report = self.commit(Move::new(origin, dest))?;
        if self.auto_player.is_due(self.current_player) {
            report.reply = self.auto_play().map(Box::new);
        }
        Ok(report)
    }

    /// Select `origin` and move it to `dest` in one call. On error the previous
    /// selection is kept.
    pub fn play_move(&mut self, origin: usize, dest: usize) -> Result<MoveReport, GameError> {
        let previous = self.active_origin;
        self.select_origin(origin)?;
        let result = self.apply_move(origin, dest);
        if result.is_err() {
            self.active_origin = previous;
        }
        result
    }

    /// Move from the selected origin to `dest`.
    pub fn apply_selected(&mut self, dest: usize) -> Result<MoveReport, GameError> {
        match self.active_origin {
            Some(origin) => self.apply_move(origin, dest),
            None => Err(GameError::NoSelection),
        }
    }

    fn commit(&mut self, mv: Move) -> Result<MoveReport, GameError> {
        let kind = match self.check_move(&mv) {
            Ok(kind) => kind,
            Err(err) => {
                trace!(%mv, error = %err, "rejected move");
                return Err(err);
            }
        };
        let player = self.current_player;

        self.history.record(self.board.snapshot());
        let effects = rules::play(&mut self.board, mv, kind, player);
        self.active_origin = None;
        self.current_player = player.opposite();

        let (claim, stalemate) = match effects.resolution {
            Resolution::Open => (None, false),
            Resolution::Claimed(claim) => (Some(claim), false),
            Resolution::Stalemate => (None, true),
        };
        let counts = self.board.counts();
        let over = counts.free == 0 || stalemate;

        debug!(
            player = %player,
            origin = mv.origin,
            dest = mv.dest,
            kind = ?kind,
            flipped = effects.flipped.len(),
            claimed = ?claim,
            free = counts.free,
            red = counts.red,
            blue = counts.blue,
            "move applied"
        );

        Ok(MoveReport {
            player,
            mv,
            kind,
            flipped: effects.flipped,
            claim,
            stalemate,
            counts,
            outcome: over.then(|| counts.leader()),
            reply: None,
        })
    }

    /// Let the auto-player move if it is enabled and holds the turn. Returns
    /// `None` when it is not its turn or it has no move.
    pub fn auto_play(&mut self) -> Option<MoveReport> {
        let player = self.current_player;
        if !self.auto_player.is_due(player) {
            return None;
        }

        let candidates = match ai::best_moves(&self.board, player) {
            Some(candidates) => candidates,
            None => {
                debug!(player = %player, "auto-player has no move");
                return None;
            }
        };
        let mv = *candidates.moves.choose(&mut self.rng)?;
        debug!(
            player = %player,
            %mv,
            score = candidates.score,
            candidates = candidates.moves.len(),
            "auto-player move"
        );

        self.select_origin(mv.origin).ok()?;
        self.commit(mv).ok()
    }

    /// Hand the turn to the other player without moving. Refused once the
    /// game is over.
    pub fn pass_turn(&mut self) -> Result<Player, GameError> {
        if self.is_over() {
            trace!(player = %self.current_player, "rejected pass");
            return Err(GameError::GameOver);
        }
        self.active_origin = None;
        self.current_player = self.current_player.opposite();
        debug!(player = %self.current_player, "turn passed");
        Ok(self.current_player)
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    pub fn undo(&mut self) -> Result<(), GameError> {
        let previous = self
            .history
            .step_back(self.board.snapshot())
            .ok_or(GameError::EmptyHistory(HistoryAction::Undo))?;
        self.rewind_to(&previous, HistoryAction::Undo);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), GameError> {
        let next = self
            .history
            .step_forward(self.board.snapshot())
            .ok_or(GameError::EmptyHistory(HistoryAction::Redo))?;
        self.rewind_to(&next, HistoryAction::Redo);
        Ok(())
    }

    fn rewind_to(&mut self, snapshot: &Snapshot, action: HistoryAction) {
        self.board.restore(snapshot);
        self.active_origin = None;
        self.current_player = self.current_player.opposite();
        debug!(
            %action,
            player = %self.current_player,
            undo = self.history.undo_stack().len(),
            redo = self.history.redo_stack().len(),
            "history step"
        );
    }

    // ---------------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------------

    /// Overwrite a single cell outside of normal play. History and turn are
    /// left alone. Returns the previous value.
    pub fn set_cell(&mut self, cell: usize, value: CellValue) -> Result<CellValue, GameError> {
        let previous = self
            .board
            .set(cell, value)
            .ok_or(GameError::CellOutOfRange {
                cell,
                cell_count: self.cell_count(),
            })?;
        self.active_origin = None;
        debug!(cell, ?previous, ?value, "cell edited");
        Ok(previous)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts = self.board.counts();
        write!(
            f,
            "Game(turn: {}, red: {}, blue: {}, free: {}, outcome: {:?})\n{}",
            self.current_player,
            counts.red,
            counts.blue,
            counts.free,
            self.outcome(),
            self.board
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn game_from(layout: &str, size: usize, starting: Player) -> Game {
        let mut game = Game::with_options(size, Some(7));
        game.new_game(Some(layout), Some(starting))
            .expect("valid layout");
        game
    }

    fn corners_8x8() -> String {
        let mut layout = vec!['0'; 64];
        layout[0] = '1';
        layout[63] = '5';
        layout.into_iter().collect()
    }

    #[test]
    fn test_new_game_defaults() {
        let game = Game::standard();
        assert_eq!(game.turn(), Player::Red);
        assert_eq!(game.cell_count(), 64);
        assert_eq!(game.counts().red, 2);
        assert_eq!(game.counts().blue, 2);
        assert!(!game.is_over());
        assert!(game.outcome().is_none());
        assert!(!game.can_undo());
    }

    #[test]
    fn test_layout_round_trip() {
        let layout = "1400004544000044000000000000000000000000000000004400004414000045";
        let game = game_from(layout, 8, Player::Blue);
        assert_eq!(game.board().snapshot().to_string(), layout);
        assert_eq!(game.turn(), Player::Blue);
        assert_eq!(game.permalink(), format!("{}1", layout));
        assert_eq!(game.counts().total(), 64);
    }

    #[test]
    fn test_invalid_layout_changes_nothing() {
        let mut game = Game::with_options(8, Some(1));
        let before = game.board().snapshot();

        let err = game.new_game(Some("1020"), Some(Player::Blue));
        assert!(matches!(err, Err(GameError::InvalidLayout(_))));
        let bad_digit = "3".repeat(64);
        assert!(game.new_game(Some(&bad_digit), None).is_err());

        assert_eq!(game.board().snapshot(), before);
        assert_eq!(game.turn(), Player::Red);
    }

    #[test]
    fn test_permalink_restarts_game() {
        let mut game = Game::with_options(8, Some(1));
        game.play_move(0, 1).expect("legal move");
        let link = game.permalink();

        let mut other = Game::with_options(8, Some(2));
        other.load_permalink(&format!("#{}", link)).expect("valid link");
        assert_eq!(other.board(), game.board());
        assert_eq!(other.turn(), game.turn());
        assert!(!other.can_undo());
    }

    #[test]
    fn test_random_starting_player_uses_both_colours() {
        let mut game = Game::with_options(8, Some(3));
        let mut seen = [false, false];
        for _ in 0..64 {
            game.new_game(None, None).expect("default layout");
            seen[game.turn() as usize] = true;
            assert_eq!(game.auto_player().player, game.turn().opposite());
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_scenario_adjacent_move_without_flips() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        let before = game.counts();

        let report = game.play_move(0, 1).expect("legal move");
        assert_eq!(report.kind, MoveKind::Adjacent);
        assert!(report.flipped.is_empty());
        assert_eq!(report.claim, None);
        assert_eq!(game.get_cell(1), Some(CellValue::Red));
        assert_eq!(game.get_cell(0), Some(CellValue::Red));
        assert_eq!(game.counts().red, before.red + 1);
        assert_eq!(game.counts().free, before.free - 1);
        assert_eq!(game.turn(), Player::Blue);
    }

    #[test]
    fn test_scenario_single_flip() {
        let mut layout: Vec<char> = corners_8x8().chars().collect();
        layout[2] = '5';
        let layout: String = layout.into_iter().collect();
        let mut game = game_from(&layout, 8, Player::Red);
        let before = game.counts();

        let report = game.play_move(0, 1).expect("legal move");
        assert_eq!(report.flipped, vec![2]);
        let after = game.counts();
        assert_eq!(after.red, before.red + 2);
        assert_eq!(after.blue, before.blue - 1);
        assert_eq!(after.free, before.free - 1);
    }

    #[test]
    fn test_scenario_wipe_out_claims_everything() {
        let mut layout = vec!['0'; 64];
        layout[0] = '1';
        layout[1] = '5';
        let layout: String = layout.into_iter().collect();
        let mut game = game_from(&layout, 8, Player::Red);

        let report = game.play_move(0, 8).expect("legal move");
        assert_eq!(report.flipped, vec![1]);
        assert_eq!(
            report.claim,
            Some(Claim {
                player: Player::Red,
                cells: 61
            })
        );
        assert_eq!(game.counts().free, 0);
        assert_eq!(report.outcome, Some(GameOutcome::RedWin));
        assert_eq!(game.outcome(), Some(GameOutcome::RedWin));
        assert!(game.is_over());
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_scenario_immobile_side_forfeits_free_cells() {
        // Red's only move walls itself in; Blue gets the rest without moving.
        let mut game = game_from("1044444044000005", 4, Player::Red);
        let report = game.play_move(0, 1).expect("legal move");
        assert_eq!(
            report.claim,
            Some(Claim {
                player: Player::Blue,
                cells: 6
            })
        );
        assert_eq!(game.counts().free, 0);
        assert_eq!(game.outcome(), Some(GameOutcome::BlueWin));
    }

    #[test]
    fn test_stalemate_ends_game() {
        // Red walls itself in next to an unreachable free cell; Blue is stuck.
        let mut cells = vec!['4'; 25];
        cells[0] = '1';
        cells[1] = '0';
        cells[12] = '0';
        cells[24] = '5';
        let layout: String = cells.into_iter().collect();
        let mut game = game_from(&layout, 5, Player::Red);
        assert!(!game.is_over());

        let report = game.play_move(0, 1).expect("legal move");
        assert!(report.stalemate);
        assert_eq!(report.claim, None);
        assert_eq!(game.counts().free, 1);
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(GameOutcome::RedWin));
    }

    #[test]
    fn test_select_origin() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);

        let dest = game.select_origin(0).expect("own tile");
        assert_eq!(dest.adjacent, vec![1, 8, 9]);
        assert_eq!(dest.remote, vec![2, 16]);
        assert_eq!(game.active_origin(), Some(0));

        // Blue's tile: refused, selection untouched.
        assert_eq!(
            game.select_origin(63),
            Err(GameError::IllegalSelection {
                cell: 63,
                player: Player::Red
            })
        );
        assert_eq!(game.active_origin(), Some(0));
        assert!(game.select_origin(5).is_err());
        assert!(game.select_origin(1000).is_err());

        game.clear_selection();
        game.clear_selection();
        assert_eq!(game.active_origin(), None);
    }

    #[test]
    fn test_apply_selected() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        assert_eq!(game.apply_selected(1), Err(GameError::NoSelection));

        game.select_origin(0).expect("own tile");
        let report = game.apply_selected(16).expect("remote jump");
        assert_eq!(report.kind, MoveKind::Remote);
        assert_eq!(game.get_cell(0), Some(CellValue::Empty));
        assert_eq!(game.get_cell(16), Some(CellValue::Red));
        assert_eq!(game.active_origin(), None);
    }

    #[test]
    fn test_illegal_moves_are_no_ops() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        let before = game.board().snapshot();
        let cases = [
            (0, 18, GameError::IllegalDestination { origin: 0, dest: 18 }),
            (0, 64, GameError::IllegalDestination { origin: 0, dest: 64 }),
            (0, 0, GameError::IllegalDestination { origin: 0, dest: 0 }),
            (
                63,
                62,
                GameError::IllegalSelection {
                    cell: 63,
                    player: Player::Red,
                },
            ),
            (
                5,
                6,
                GameError::IllegalSelection {
                    cell: 5,
                    player: Player::Red,
                },
            ),
        ];

        for (origin, dest, expected) in cases {
            assert!(!game.is_legal_move(&Move::new(origin, dest)));
            assert_eq!(game.play_move(origin, dest), Err(expected));
        }

        assert_eq!(game.board().snapshot(), before);
        assert_eq!(game.counts(), game.board().recount());
        assert_eq!(game.turn(), Player::Red);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_occupied_destination_rejected() {
        let mut layout: Vec<char> = corners_8x8().chars().collect();
        layout[1] = '4';
        layout[9] = '5';
        let layout: String = layout.into_iter().collect();
        let mut game = game_from(&layout, 8, Player::Red);

        assert!(matches!(
            game.play_move(0, 1),
            Err(GameError::IllegalDestination { .. })
        ));
        assert!(matches!(
            game.play_move(0, 9),
            Err(GameError::IllegalDestination { .. })
        ));
        assert!(game.play_move(0, 8).is_ok());
    }

    #[test]
    fn test_selection_pins_origin() {
        let mut layout: Vec<char> = corners_8x8().chars().collect();
        layout[27] = '1';
        let layout: String = layout.into_iter().collect();
        let mut game = game_from(&layout, 8, Player::Red);

        game.select_origin(27).expect("own tile");
        assert_eq!(
            game.apply_move(0, 1),
            Err(GameError::IllegalSelection {
                cell: 0,
                player: Player::Red
            })
        );
        assert!(game.apply_move(27, 28).is_ok());
    }

    #[test]
    fn test_move_requires_selection() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        let before = game.board().snapshot();
        assert_eq!(game.active_origin(), None);

        assert_eq!(
            game.apply_move(0, 1),
            Err(GameError::IllegalSelection {
                cell: 0,
                player: Player::Red
            })
        );
        assert!(game.is_legal_move(&Move::new(0, 1)));
        assert_eq!(game.board().snapshot(), before);
        assert_eq!(game.turn(), Player::Red);
        assert!(!game.can_undo());

        game.select_origin(0).expect("own tile");
        assert!(game.apply_move(0, 1).is_ok());
        assert_eq!(game.active_origin(), None);
        assert_eq!(game.turn(), Player::Blue);
    }

    #[test]
    fn test_play_move_keeps_selection_on_error() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        game.select_origin(0).expect("own tile");
        assert!(game.play_move(0, 18).is_err());
        assert_eq!(game.active_origin(), Some(0));
        assert!(game.play_move(63, 62).is_err());
        assert_eq!(game.active_origin(), Some(0));
    }

    #[test]
    fn test_clone_plays_on_independently() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        game.play_move(0, 1).expect("legal move");

        let mut copy = game.clone();
        assert_eq!(copy.seed(), game.seed());
        copy.play_move(63, 62).expect("legal move");
        assert_eq!(game.get_cell(62), Some(CellValue::Empty));
        assert_eq!(game.turn(), Player::Blue);
        assert_eq!(game.history().undo_stack().len(), 1);
        assert_eq!(copy.history().undo_stack().len(), 2);

        // Copies restart from the same seed, so their tie-breaks agree.
        let mut first = game.clone();
        let mut second = game.clone();
        first.set_auto_player(true);
        second.set_auto_player(true);
        let a = first.auto_play().map(|report| report.mv);
        let b = second.auto_play().map(|report| report.mv);
        assert!(a.is_some());
        assert_eq!(a, b);
        assert_eq!(game.turn(), Player::Blue);
    }

    #[test]
    fn test_undo_redo_restore_exact_state() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        let before = game.board().snapshot();
        let before_counts = game.counts();

        game.play_move(0, 16).expect("legal move");
        let after = game.board().snapshot();
        let after_counts = game.counts();

        game.undo().expect("one move to undo");
        assert_eq!(game.board().snapshot(), before);
        assert_eq!(game.counts(), before_counts);
        assert_eq!(game.turn(), Player::Red);
        assert!(game.can_redo());

        game.redo().expect("one move to redo");
        assert_eq!(game.board().snapshot(), after);
        assert_eq!(game.counts(), after_counts);
        assert_eq!(game.turn(), Player::Blue);

        assert_eq!(game.redo(), Err(GameError::EmptyHistory(HistoryAction::Redo)));
        game.undo().expect("undo again");
        assert_eq!(game.undo(), Err(GameError::EmptyHistory(HistoryAction::Undo)));
        assert_eq!(game.board().snapshot(), before);
    }

    #[test]
    fn test_new_move_discards_redo() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        game.play_move(0, 1).expect("legal move");
        game.undo().expect("undo");
        assert!(game.can_redo());

        game.play_move(0, 8).expect("legal move");
        assert!(!game.can_redo());
        assert_eq!(game.history().undo_stack().len(), 1);
    }

    #[test]
    fn test_new_game_clears_history() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        game.play_move(0, 1).expect("legal move");
        game.play_move(63, 62).expect("legal move");
        game.undo().expect("undo");
        game.new_game(None, Some(Player::Red)).expect("default layout");
        assert!(!game.can_undo());
        assert!(!game.can_redo());
    }

    #[test]
    fn test_pass_turn() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        game.select_origin(0).expect("own tile");
        let before = game.board().snapshot();

        assert_eq!(game.pass_turn(), Ok(Player::Blue));
        assert_eq!(game.active_origin(), None);
        assert_eq!(game.board().snapshot(), before);
        assert!(!game.can_undo());
        assert_eq!(game.pass_turn(), Ok(Player::Red));
    }

    #[test]
    fn test_auto_player_answers_move() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        assert_eq!(game.auto_player().player, Player::Blue);
        game.set_auto_player(true);

        let report = game.play_move(0, 1).expect("legal move");
        let reply = report.reply.expect("auto-player answered");
        assert_eq!(reply.player, Player::Blue);
        assert_eq!(reply.kind, MoveKind::Adjacent);
        assert_eq!(reply.mv.origin, 63);
        assert!([54, 55, 62].contains(&reply.mv.dest));
        assert_eq!(game.turn(), Player::Red);
        assert_eq!(game.history().undo_stack().len(), 2);
    }

    #[test]
    fn test_auto_player_waits_for_its_turn() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        game.set_auto_player(true);
        game.set_auto_player_seat(Player::Red);
        assert!(game.auto_play().is_some());
        assert_eq!(game.turn(), Player::Blue);
        assert!(game.auto_play().is_none());

        game.set_auto_player(false);
        game.pass_turn().expect("game in progress");
        assert!(game.auto_play().is_none());
    }

    #[test]
    fn test_auto_player_takes_best_capture() {
        // Blue at 2 touches both 1 and 9, so each scores 2.
        let mut layout = vec!['0'; 64];
        layout[0] = '1';
        layout[2] = '5';
        layout[63] = '5';
        let layout: String = layout.into_iter().collect();
        let mut game = game_from(&layout, 8, Player::Blue);
        game.set_auto_player(true);
        assert_eq!(game.auto_player().player, Player::Red);

        let report = game.play_move(63, 62).expect("legal move");
        let reply = report.reply.expect("auto-player answered");
        assert!([Move::new(0, 1), Move::new(0, 9)].contains(&reply.mv));
        assert_eq!(reply.flipped, vec![2]);
    }

    #[test]
    fn test_set_cell() {
        let mut game = game_from(&corners_8x8(), 8, Player::Red);
        game.select_origin(0).expect("own tile");

        assert_eq!(game.set_cell(10, CellValue::Blue), Ok(CellValue::Empty));
        assert_eq!(game.set_cell(0, CellValue::Blocked), Ok(CellValue::Red));
        assert_eq!(game.active_origin(), None);
        assert_eq!(game.counts().blue, 2);
        assert_eq!(game.counts().red, 0);
        assert_eq!(game.counts().blocked, 1);
        assert_eq!(game.counts(), game.board().recount());
        assert!(!game.can_undo());

        assert_eq!(
            game.set_cell(64, CellValue::Red),
            Err(GameError::CellOutOfRange {
                cell: 64,
                cell_count: 64
            })
        );
    }

    #[test]
    fn test_full_board_draw() {
        // Red fills the last free cell without touching either Blue tile.
        let layout = format!("1045{}5", "4".repeat(11));
        let mut game = game_from(&layout, 4, Player::Red);
        let report = game.play_move(0, 1).expect("legal move");
        assert!(report.flipped.is_empty());
        assert_eq!(report.claim, None);
        assert_eq!(report.counts.free, 0);
        assert_eq!(report.outcome, Some(GameOutcome::Draw));
        assert_eq!(game.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_wipe_out_on_tiny_board() {
        let mut game = game_from("1055", 2, Player::Red);
        let report = game.play_move(0, 1).expect("legal move");
        assert_eq!(report.flipped, vec![2, 3]);
        assert_eq!(report.claim, None);
        assert_eq!(report.outcome, Some(GameOutcome::RedWin));
        assert_eq!(game.pass_turn(), Err(GameError::GameOver));
        assert_eq!(game.turn(), Player::Blue);
    }

    proptest! {
        #[test]
        fn prop_counts_match_cells(picks in prop::collection::vec(any::<u16>(), 0..80)) {
            let mut game = Game::with_options(6, Some(11));
            let start = game.board().snapshot();
            let mut played = 0;

            for pick in picks {
                let moves = game.legal_moves();
                if moves.is_empty() {
                    if game.pass_turn().is_err() {
                        break;
                    }
                    continue;
                }
                let mv = moves[pick as usize % moves.len()];
                game.play_move(mv.origin, mv.dest).expect("enumerated move is legal");
                played += 1;

                let counts = game.counts();
                prop_assert_eq!(counts, game.board().recount());
                prop_assert_eq!(counts.total(), game.cell_count());
            }

            for _ in 0..played {
                prop_assert!(game.undo().is_ok());
                prop_assert_eq!(game.counts(), game.board().recount());
            }
            prop_assert_eq!(game.board().snapshot(), start);
            prop_assert!(!game.can_undo());
        }
    }
}
