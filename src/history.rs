use crate::board::Snapshot;

/// Undo and redo stacks of full board snapshots.
///
/// Snapshots are owned copies and never change once pushed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stacks(undo: Vec<Snapshot>, redo: Vec<Snapshot>) -> Self {
        History { undo, redo }
    }

    /// Record the state before a new move. Any redo branch is discarded.
    pub fn record(&mut self, before: Snapshot) {
        self.undo.push(before);
        self.redo.clear();
    }

    /// Swap `current` for the most recent undo snapshot. Returns `None`, and
    /// leaves both stacks alone, when there is nothing to undo.
    pub fn step_back(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Swap `current` for the most recent redo snapshot.
    pub fn step_forward(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_stack(&self) -> &[Snapshot] {
        &self.undo
    }

    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
