//! Error type for diagram edits.
//!
//! Every fallible operation on a [`Tree`](crate::tree::Tree) or on the command
//! history reports an [`EditError`]. A failed operation leaves the diagram
//! exactly as it was.

use std::fmt;

use thiserror::Error;

use crate::identifier::NodeId;

/// The stack an undo or redo request was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => write!(f, "undo"),
            Self::Redo => write!(f, "redo"),
        }
    }
}

/// Errors reported by tree mutations and history navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The referenced node id does not exist.
    #[error("node {0} not found")]
    NotFound(NodeId),

    /// The edit is structurally disallowed, e.g. deleting the root.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// An attribute value lies outside its allowed domain.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Undo or redo was requested with nothing to undo or redo.
    #[error("nothing to {0}")]
    Empty(HistoryDirection),
}

impl EditError {
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }
}
