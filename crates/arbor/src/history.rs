//! Undo and redo stacks.
//!
//! [`History`] keeps applied [`Command`]s on an undo stack and undone ones on
//! a redo stack, most recent last. Applying a new command clears the redo
//! stack. A failed apply, undo or redo leaves both the tree and the stacks
//! as they were.

use log::{debug, warn};

use arbor_core::{
    error::{EditError, HistoryDirection},
    tree::Tree,
};

use crate::command::Command;

/// Linear undo history of [`Command`]s.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    /// Maximum undo depth, `None` for unbounded.
    max_depth: Option<usize>,
}

impl History {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history keeping at most `max_depth` undoable commands.
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Changes the depth limit, dropping the oldest entries if needed.
    pub fn set_max_depth(&mut self, max_depth: Option<usize>) {
        self.max_depth = max_depth;
        self.enforce_depth();
    }

    /// Applies `command` to `tree` and records it.
    ///
    /// # Errors
    ///
    /// Returns the command's error. Nothing is recorded and the redo stack
    /// is kept.
    pub fn apply(&mut self, tree: &mut Tree, mut command: Command) -> Result<(), EditError> {
        command.apply(tree)?;
        debug!(command = command.name(), undo_len = self.undo_stack.len() + 1; "Command recorded");
        self.undo_stack.push(command);
        self.redo_stack.clear();
        self.enforce_depth();
        Ok(())
    }

    /// Reverts the most recent command.
    ///
    /// # Errors
    ///
    /// [`EditError::Empty`] when there is nothing to undo.
    pub fn undo(&mut self, tree: &mut Tree) -> Result<(), EditError> {
        let Some(command) = self.undo_stack.pop() else {
            return Err(EditError::Empty(HistoryDirection::Undo));
        };
        if let Err(err) = command.revert(tree) {
            self.undo_stack.push(command);
            return Err(err);
        }
        debug!(command = command.name(), undo_len = self.undo_stack.len(); "Undone");
        self.redo_stack.push(command);
        Ok(())
    }

    /// Re-applies the most recently undone command.
    ///
    /// # Errors
    ///
    /// [`EditError::Empty`] when there is nothing to redo.
    pub fn redo(&mut self, tree: &mut Tree) -> Result<(), EditError> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Err(EditError::Empty(HistoryDirection::Redo));
        };
        if let Err(err) = command.apply(tree) {
            self.redo_stack.push(command);
            return Err(err);
        }
        debug!(command = command.name(), redo_len = self.redo_stack.len(); "Redone");
        self.undo_stack.push(command);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Applied commands, oldest first.
    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    /// Undone commands, the next one to redo last.
    pub fn redo_stack(&self) -> &[Command] {
        &self.redo_stack
    }

    /// Forgets every recorded command.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn enforce_depth(&mut self) {
        let Some(max_depth) = self.max_depth else {
            return;
        };
        if self.undo_stack.len() > max_depth {
            let excess = self.undo_stack.len() - max_depth;
            warn!(dropped = excess, max_depth; "Undo history full, dropping oldest entries");
            self.undo_stack.drain(..excess);
        }
    }
}
