pub mod ai;
pub mod board;
pub mod cell;
pub mod encode;
pub mod error;
pub mod game;
pub mod history;
pub mod r#move;
pub mod outcome;
pub mod player;
pub mod position;
pub mod rules;
pub mod savestate;
pub mod topology;

#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn contagion(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use cell::CellValue;
    use player::Player;
    use python_bindings::*;
    m.add_class::<PyGame>()?;
    m.add_class::<PyGameOutcome>()?;
    m.add("RED", Player::Red as u8)?;
    m.add("BLUE", Player::Blue as u8)?;
    m.add("EMPTY", CellValue::Empty as u8)?;
    m.add("BLOCKED", CellValue::Blocked as u8)?;
    m.add("STANDARD_SIZE", board::STANDARD_SIZE)?;
    m.add("SAVESTATE_VERSION", savestate::SAVESTATE_VERSION)?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use crate::cell::CellValue;
    use crate::error::GameError;
    use crate::game::{Game, MoveReport};
    use crate::outcome::GameOutcome;
    use crate::player::Player;
    use crate::position::Position;
    use crate::r#move::MoveKind;
    use crate::savestate::SaveState;

    fn value_error(err: GameError) -> PyErr {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
    }

    fn check_size(size: usize) -> PyResult<()> {
        if !(2..=32).contains(&size) {
            return Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(
                "Board size must be between 2 and 32",
            ));
        }
        Ok(())
    }

    fn player_from(value: u8) -> PyResult<Player> {
        Player::from_int(value).ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>("Invalid player value")
        })
    }

    fn cell_from(value: u8) -> PyResult<CellValue> {
        char::from_digit(value as u32, 10)
            .and_then(CellValue::from_digit)
            .ok_or_else(|| PyErr::new::<pyo3::exceptions::PyValueError, _>("Invalid cell value"))
    }

    /// `(origin, dest, remote, flipped)` for the move and its auto-player reply.
    fn report_tuples(report: &MoveReport) -> Vec<(usize, usize, bool, Vec<usize>)> {
        let mut out = vec![(
            report.mv.origin,
            report.mv.dest,
            report.kind == MoveKind::Remote,
            report.flipped.clone(),
        )];
        if let Some(reply) = &report.reply {
            out.extend(report_tuples(reply));
        }
        out
    }

    #[pyclass(name = "Game")]
    pub struct PyGame {
        game: Game,
    }

    #[pymethods]
    impl PyGame {
        #[new]
        pub fn new(size: usize) -> PyResult<Self> {
            check_size(size)?;
            Ok(PyGame {
                game: Game::new(size),
            })
        }

        #[staticmethod]
        pub fn with_seed(size: usize, seed: u64) -> PyResult<Self> {
            check_size(size)?;
            Ok(PyGame {
                game: Game::with_options(size, Some(seed)),
            })
        }

        #[staticmethod]
        pub fn standard() -> Self {
            PyGame {
                game: Game::standard(),
            }
        }

        pub fn size(&self) -> usize {
            self.game.size()
        }

        pub fn get_cell(&self, cell: usize) -> Option<u8> {
            self.game.get_cell(cell).map(|v| v as u8)
        }

        pub fn get_at(&self, row: usize, col: usize) -> Option<u8> {
            self.game
                .board()
                .get_at(&Position::new(row, col))
                .map(|v| v as u8)
        }

        pub fn set_cell(&mut self, cell: usize, value: u8) -> PyResult<u8> {
            let value = cell_from(value)?;
            self.game
                .set_cell(cell, value)
                .map(|previous| previous as u8)
                .map_err(value_error)
        }

        pub fn counts(&self) -> (usize, usize, usize, usize) {
            let c = self.game.counts();
            (c.free, c.red, c.blue, c.blocked)
        }

        pub fn turn(&self) -> u8 {
            self.game.turn() as u8
        }

        pub fn is_over(&self) -> bool {
            self.game.is_over()
        }

        pub fn outcome(&self) -> Option<PyGameOutcome> {
            self.game.outcome().map(|o| PyGameOutcome { outcome: o })
        }

        pub fn reward_from_perspective(&self, perspective: u8) -> PyResult<f32> {
            let perspective = player_from(perspective)?;
            Ok(self
                .game
                .outcome()
                .map(|o| o.encode_winner_from_perspective(perspective))
                .unwrap_or(0.0))
        }

        pub fn new_game(&mut self, layout: Option<&str>, starting: Option<u8>) -> PyResult<()> {
            let starting = starting.map(player_from).transpose()?;
            self.game.new_game(layout, starting).map_err(value_error)
        }

        pub fn permalink(&self) -> String {
            self.game.permalink()
        }

        pub fn load_permalink(&mut self, link: &str) -> PyResult<()> {
            self.game.load_permalink(link).map_err(value_error)
        }

        pub fn legal_moves(&self) -> Vec<(usize, usize)> {
            self.game
                .legal_moves()
                .into_iter()
                .map(|m| (m.origin, m.dest))
                .collect()
        }

        pub fn destinations(&self, origin: usize) -> (Vec<usize>, Vec<usize>) {
            let d = self.game.destinations(origin);
            (d.adjacent, d.remote)
        }

        pub fn select_origin(&mut self, cell: usize) -> PyResult<(Vec<usize>, Vec<usize>)> {
            let d = self.game.select_origin(cell).map_err(value_error)?;
            Ok((d.adjacent, d.remote))
        }

        pub fn clear_selection(&mut self) {
            self.game.clear_selection()
        }

        pub fn active_origin(&self) -> Option<usize> {
            self.game.active_origin()
        }

        /// Returns every move played, the auto-player's reply included.
        pub fn apply_move(
            &mut self,
            origin: usize,
            dest: usize,
        ) -> PyResult<Vec<(usize, usize, bool, Vec<usize>)>> {
            let report = self.game.apply_move(origin, dest).map_err(value_error)?;
            Ok(report_tuples(&report))
        }

        pub fn play_move(
            &mut self,
            origin: usize,
            dest: usize,
        ) -> PyResult<Vec<(usize, usize, bool, Vec<usize>)>> {
            let report = self.game.play_move(origin, dest).map_err(value_error)?;
            Ok(report_tuples(&report))
        }

        pub fn apply_selected(&mut self, dest: usize) -> PyResult<Vec<(usize, usize, bool, Vec<usize>)>> {
            let report = self.game.apply_selected(dest).map_err(value_error)?;
            Ok(report_tuples(&report))
        }

        pub fn auto_play(&mut self) -> Option<(usize, usize)> {
            self.game
                .auto_play()
                .map(|report| (report.mv.origin, report.mv.dest))
        }

        pub fn set_auto_player(&mut self, enabled: bool) {
            self.game.set_auto_player(enabled)
        }

        pub fn auto_player(&self) -> (bool, u8) {
            let auto = self.game.auto_player();
            (auto.enabled, auto.player as u8)
        }

        pub fn pass_turn(&mut self) -> PyResult<u8> {
            self.game
                .pass_turn()
                .map(|player| player as u8)
                .map_err(value_error)
        }

        pub fn undo(&mut self) -> bool {
            self.game.undo().is_ok()
        }

        pub fn redo(&mut self) -> bool {
            self.game.redo().is_ok()
        }

        pub fn can_undo(&self) -> bool {
            self.game.can_undo()
        }

        pub fn can_redo(&self) -> bool {
            self.game.can_redo()
        }

        pub fn save_state(&self) -> PyResult<String> {
            self.game.save_state().to_json().map_err(value_error)
        }

        pub fn load_state(&mut self, json: &str) -> PyResult<()> {
            let state = SaveState::from_json(json).map_err(value_error)?;
            self.game.load_state(&state).map_err(value_error)
        }

        pub fn clone(&self) -> PyGame {
            PyGame {
                game: self.game.clone(),
            }
        }

        pub fn __hash__(&self) -> u64 {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();

            self.game.board().values().hash(&mut hasher);
            (self.game.turn() as u8).hash(&mut hasher);

            hasher.finish()
        }

        pub fn __str__(&self) -> String {
            self.game.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Game(size={}, turn={}, over={})",
                self.game.size(),
                self.game.turn(),
                self.game.is_over()
            )
        }
    }

    #[pyclass(name = "GameOutcome")]
    #[derive(Clone, Copy, Debug)]
    pub struct PyGameOutcome {
        outcome: GameOutcome,
    }

    #[pymethods]
    impl PyGameOutcome {
        pub fn winner(&self) -> Option<u8> {
            self.outcome.winner().map(|player| player as u8)
        }

        pub fn encode_winner_from_perspective(&self, perspective: u8) -> PyResult<f32> {
            Ok(self
                .outcome
                .encode_winner_from_perspective(player_from(perspective)?))
        }

        pub fn is_draw(&self) -> bool {
            self.outcome.is_draw()
        }

        pub fn __str__(&self) -> String {
            self.outcome.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!("GameOutcome({})", self.outcome)
        }

        pub fn __eq__(&self, other: &PyGameOutcome) -> bool {
            self.outcome == other.outcome
        }
    }
}
