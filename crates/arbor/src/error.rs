//! Error types for Arbor operations.
//!
//! This module provides the main error type [`ArborError`] which wraps the
//! failures that can occur while editing, loading, saving or exporting a
//! diagram.

use std::io;

use thiserror::Error;

use arbor_core::error::EditError;

/// The main error type for Arbor operations.
///
/// Edit failures keep their [`EditError`] so callers can tell a missing node
/// from a rejected value or an exhausted history.
#[derive(Debug, Error)]
pub enum ArborError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for ArborError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ArborError {
    /// Returns the underlying edit error, if this is one.
    pub fn as_edit(&self) -> Option<&EditError> {
        match self {
            Self::Edit(err) => Some(err),
            _ => None,
        }
    }
}
