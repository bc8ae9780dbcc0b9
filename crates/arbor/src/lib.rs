//! Arbor - Editing, layout and export for hierarchical node diagrams.
//!
//! A diagram is a single rooted [`Tree`](tree::Tree) of labeled, styled
//! nodes. This crate adds everything around it: reversible
//! [`Command`](command::Command)s with an undo/redo [`History`](history::History),
//! a deterministic tree [`layout`], the renderer-facing [`Scene`](scene::Scene),
//! `.diagram` persistence and SVG export.
//!
//! All editing goes through the [`Controller`]:
//!
//! ```
//! use arbor::{Controller, config::AppConfig, style::Shape};
//!
//! let mut controller = Controller::new(&AppConfig::default());
//! let root = controller.tree().root_id();
//!
//! let child = controller.add_child(root, "Child").unwrap();
//! controller.set_shape(child, Shape::Box).unwrap();
//!
//! controller.undo().unwrap();
//! assert_eq!(controller.tree().node(child).unwrap().shape(), Shape::Ellipse);
//!
//! let scene = controller.scene();
//! assert_eq!(scene.nodes().len(), 2);
//! ```

pub mod command;
pub mod config;
pub mod controller;
pub mod document;
pub mod export;
pub mod history;
pub mod layout;
pub mod scene;

mod error;

pub use arbor_core::{color, geometry, identifier, node, style, tree};

pub use controller::{Action, Controller};
pub use arbor_core::error::{EditError, HistoryDirection};
pub use error::ArborError;
