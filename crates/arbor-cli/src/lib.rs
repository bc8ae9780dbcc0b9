//! CLI logic for the Arbor diagram tool.
//!
//! The CLI opens a `.diagram` file, optionally applies an orientation
//! change through the editing controller, and exports the laid-out tree as
//! SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use arbor::{
    Action, ArborError, Controller,
    export::{Exporter, svg::SvgBuilder},
};

/// Run the Arbor CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ArborError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or invalid diagram files
/// - Rejected edits, such as an unknown orientation
/// - Export errors
pub fn run(args: &Args) -> Result<(), ArborError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let mut controller = Controller::new(&app_config);
    controller.load_document(&args.input)?;

    if let Some(value) = &args.orientation {
        controller.handle_action(Action::SetOrientation {
            value: value.clone(),
        })?;
    }

    if let Some(path) = &args.save {
        controller.save_document(path)?;
    }

    let mut exporter = SvgBuilder::new(&args.output)
        .with_style(app_config.style())
        .build()?;
    exporter.export_scene(&controller.scene())?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
