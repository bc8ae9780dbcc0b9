//! Configuration types for Arbor diagrams.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out, how much history is kept and how exports are styled. All
//! types implement [`serde::Deserialize`] for loading from external sources,
//! and every section and field falls back to its default when missing.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Spacing used by the layout engine.
//! - [`HistoryConfig`] - Undo depth limit.
//! - [`StyleConfig`] - Visual options for exported diagrams.
//!
//! # Example
//!
//! ```
//! # use arbor::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().horizontal_spacing(), 40.0);
//! assert_eq!(config.history().max_depth(), Some(100));
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use arbor_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// History configuration section.
    #[serde(default)]
    history: HistoryConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, history: HistoryConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            history,
            style,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the history configuration.
    pub fn history(&self) -> &HistoryConfig {
        &self.history
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Spacing used by the layout engine.
///
/// Horizontal spacing separates columns and vertical spacing separates rows.
/// Which of the two separates siblings depends on the tree orientation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    horizontal_spacing: f32,
    vertical_spacing: f32,
    /// Distance an edge travels along the main axis before its elbow.
    edge_offset: f32,
}

impl LayoutConfig {
    pub fn new(horizontal_spacing: f32, vertical_spacing: f32, edge_offset: f32) -> Self {
        Self {
            horizontal_spacing,
            vertical_spacing,
            edge_offset,
        }
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    pub fn edge_offset(&self) -> f32 {
        self.edge_offset
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 40.0,
            vertical_spacing: 60.0,
            edge_offset: 20.0,
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of undoable commands; `0` keeps everything.
    max_depth: usize,
}

impl HistoryConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Returns the depth limit, or `None` when history is unbounded.
    pub fn max_depth(&self) -> Option<usize> {
        (self.max_depth > 0).then_some(self.max_depth)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Visual styling configuration for exported diagrams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background [`Color`] for diagrams, as a color string.
    background_color: Option<String>,
    /// Blank space around the diagram bounds.
    margin: f32,
    /// Stroke width of node outlines and edges.
    outline_width: f32,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>, margin: f32, outline_width: f32) -> Self {
        Self {
            background_color,
            margin,
            outline_width,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the configured background color string as written.
    pub fn background_color_name(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn outline_width(&self) -> f32 {
        self.outline_width
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            margin: 30.0,
            outline_width: 1.0,
        }
    }
}
