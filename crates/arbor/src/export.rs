//! Output backends.
//!
//! An [`Exporter`] turns a laid-out [`Scene`] into a file. [`svg::Svg`] is
//! the only backend; build one with [`svg::SvgBuilder`].
//!
//! Backend failures are reported as [`Error`] and become
//! [`ArborError::Export`] once they leave this module.
//!
//! [`ArborError::Export`]: crate::ArborError::Export

pub mod svg;

use std::io;

use thiserror::Error;

use crate::scene::Scene;

/// A backend that writes scenes somewhere.
pub trait Exporter {
    /// Writes `scene` in the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] for an unusable scene or style, and
    /// [`Error::Io`] when the output cannot be written.
    fn export_scene(&mut self, scene: &Scene) -> Result<(), Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}
