//! Error adapter for converting ArborError to miette diagnostics.
//!
//! The library reports plain [`ArborError`] values; the CLI wraps them in
//! [`ErrorAdapter`] so miette can render them with a code and a hint.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use arbor::{ArborError, EditError};

/// Adapter giving an [`ArborError`] a miette diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a ArborError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ArborError::Io(_) => "arbor::io",
            ArborError::Edit(EditError::NotFound(_)) => "arbor::not_found",
            ArborError::Edit(EditError::InvalidOperation(_)) => "arbor::invalid_operation",
            ArborError::Edit(EditError::InvalidValue(_)) => "arbor::invalid_value",
            ArborError::Edit(EditError::Empty(_)) => "arbor::empty_history",
            ArborError::Document(_) => "arbor::document",
            ArborError::Config(_) => "arbor::config",
            ArborError::Export(_) => "arbor::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ArborError::Edit(EditError::InvalidValue(_)) => {
                "orientations are TB, LR or RL; colors are CSS names or hex values"
            }
            ArborError::Document(_) => "check that the file was written by `arbor --save`",
            ArborError::Config(_) => {
                "see the [layout], [history] and [style] tables of the configuration file"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor::{HistoryDirection, identifier::NodeId};

    fn code(err: &ArborError) -> String {
        ErrorAdapter(err).code().map(|c| c.to_string()).unwrap()
    }

    #[test]
    fn test_codes_per_variant() {
        let io = ArborError::Io(std::io::Error::other("boom"));
        assert_eq!(code(&io), "arbor::io");

        let not_found = ArborError::Edit(EditError::NotFound(NodeId::new(4)));
        assert_eq!(code(&not_found), "arbor::not_found");

        let empty = ArborError::Edit(EditError::Empty(HistoryDirection::Undo));
        assert_eq!(code(&empty), "arbor::empty_history");

        let document = ArborError::Document("bad".to_string());
        assert_eq!(code(&document), "arbor::document");
    }

    #[test]
    fn test_display_and_help() {
        let err = ArborError::Edit(EditError::invalid_value("unknown orientation `UP`"));
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.to_string(), err.to_string());
        assert!(adapter.help().is_some());

        let io = ArborError::Io(std::io::Error::other("boom"));
        assert!(ErrorAdapter(&io).help().is_none());
    }
}
