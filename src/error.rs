use thiserror::Error;

use crate::player::Player;

/// Which way a history step was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryAction::Undo => write!(f, "undo"),
            HistoryAction::Redo => write!(f, "redo"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("expected {expected} cells, found {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("invalid cell digit {found:?} at index {index}")]
    InvalidDigit { index: usize, found: char },
    #[error("invalid player digit {0:?}")]
    InvalidPlayer(char),
}

/// Every way an engine operation can be refused. A refused operation never
/// changes the engine state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell {cell} cannot be selected by {player}")]
    IllegalSelection { cell: usize, player: Player },
    #[error("no origin cell is selected")]
    NoSelection,
    #[error("cell {dest} is not a legal destination from cell {origin}")]
    IllegalDestination { origin: usize, dest: usize },
    #[error("invalid layout: {0}")]
    InvalidLayout(#[from] LayoutError),
    #[error("save state version {found} does not match expected version {expected}")]
    InvalidSaveVersion { found: u32, expected: u32 },
    #[error("nothing to {0}")]
    EmptyHistory(HistoryAction),
    #[error("malformed save state: {0}")]
    MalformedSave(String),
    #[error("the game is over")]
    GameOver,
    #[error("save slot {0} is empty or does not exist")]
    EmptySlot(usize),
    #[error("cell {cell} is outside a board of {cell_count} cells")]
    CellOutOfRange { cell: usize, cell_count: usize },
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::MalformedSave(err.to_string())
    }
}
