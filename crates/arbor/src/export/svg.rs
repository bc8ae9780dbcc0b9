//! SVG exporter.
//!
//! [`Svg`] draws a [`Scene`] as a standalone SVG document: a background
//! rectangle, the elbow edges with arrowheads, then every node outline and
//! its centered label. The diagram bounds are surrounded by a margin.

mod edge;
mod shape;

use std::{fs::File, io::Write, path::PathBuf};

use log::{debug, error, info};
use svg::{self, Document, node::element as svg_element};

use arbor_core::{
    color::Color,
    geometry::{Point, Size},
};

use crate::{config::StyleConfig, export, scene::Scene};

/// Builder for [`Svg`] exporters.
///
/// # Examples
///
/// ```rust,no_run
/// use arbor::export::svg::SvgBuilder;
///
/// let exporter = SvgBuilder::new("out.svg")
///     .with_margin(10.0)
///     .build()
///     .expect("Failed to build exporter");
/// ```
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    file_name: PathBuf,
    background_color: Option<String>,
    margin: f32,
    outline_width: f32,
}

impl SvgBuilder {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        let style = StyleConfig::default();
        Self {
            file_name: file_name.into(),
            background_color: None,
            margin: style.margin(),
            outline_width: style.outline_width(),
        }
    }

    /// Use the background, margin and outline width of `style`.
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.background_color = style.background_color_name().map(str::to_string);
        self.margin = style.margin();
        self.outline_width = style.outline_width();
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Validates the style and creates the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] for an unparsable background color
    /// or a negative margin or outline width.
    pub fn build(self) -> Result<Svg, export::Error> {
        let background = match &self.background_color {
            Some(name) => Color::new(name).map_err(|err| {
                export::Error::Render(format!("Invalid background color: {err}"))
            })?,
            None => Color::default(),
        };
        let margin = self.margin;
        let outline_width = self.outline_width;
        if !(margin.is_finite() && margin >= 0.0) {
            return Err(export::Error::Render(format!("invalid margin {margin}")));
        }
        if !(outline_width.is_finite() && outline_width >= 0.0) {
            return Err(export::Error::Render(format!(
                "invalid outline width {outline_width}"
            )));
        }

        Ok(Svg {
            file_name: self.file_name,
            background,
            margin,
            outline_width,
        })
    }
}

/// Writes scenes as SVG files.
#[derive(Debug, Clone)]
pub struct Svg {
    file_name: PathBuf,
    background: Color,
    margin: f32,
    outline_width: f32,
}

impl Svg {
    pub const FONT_FAMILY: &'static str = "Arial";

    /// Renders `scene` to an in-memory SVG document.
    pub fn render_scene(&self, scene: &Scene) -> Document {
        let bounds = scene.bounds();
        let content_size = bounds.to_size();
        let svg_size = self.calculate_svg_dimensions(content_size);

        let doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        let doc = doc
            .add(self.background(svg_size))
            .add(edge::marker_definitions());

        let offset = Point::new(self.margin - bounds.min_x(), self.margin - bounds.min_y());
        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!("translate({}, {})", offset.x(), offset.y()),
        );

        for edge_view in scene.edges() {
            main_group = main_group.add(edge::render_edge(edge_view, self.outline_width));
        }
        for node in scene.nodes() {
            main_group = main_group.add(shape::render_node(node, self.outline_width));
        }

        doc.add(main_group)
    }

    /// Renders `scene` to SVG markup.
    pub fn render_to_string(&self, scene: &Scene) -> String {
        self.render_scene(scene).to_string()
    }

    fn background(&self, size: Size) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", self.background.to_string())
    }

    /// Content size plus the margin on every side
    fn calculate_svg_dimensions(&self, content_size: Size) -> Size {
        let width = self.margin.mul_add(2.0, content_size.width());
        let height = self.margin.mul_add(2.0, content_size.height());
        debug!(width, height; "Final SVG dimensions");
        Size::new(width, height)
    }

    /// Writes an SVG document to the configured file
    fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        info!(file_name:? = self.file_name; "Creating SVG file");
        let mut f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name:? = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name:? = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        info!(file_name:? = self.file_name; "SVG exported successfully");
        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), export::Error> {
        let doc = self.render_scene(scene);
        debug!(nodes = scene.nodes().len(); "SVG document rendered");
        self.write_document(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{export::Exporter, layout::Engine};
    use arbor_core::{node::AttributeValue, style::Shape, tree::Tree};

    fn scene() -> Scene {
        let mut tree = Tree::default();
        let root = tree.root_id();
        let child = tree.add_child(root, "Child").unwrap();
        tree.set_attribute(child, AttributeValue::Shape(Shape::Record))
            .unwrap();
        let layout = Engine::new().calculate_layout(&tree);
        Scene::new(&tree, &layout)
    }

    #[test]
    fn test_document_includes_margin() {
        let svg = SvgBuilder::new("unused.svg").build().unwrap();
        let markup = svg.render_to_string(&scene());
        // 100x140 content plus 30 on each side
        assert!(markup.contains(r#"viewBox="0 0 160 200""#), "{markup}");
        assert!(markup.contains("translate(30, 30)"));
        assert!(markup.contains("marker-end"));
        assert!(markup.contains("Child"));
    }

    #[test]
    fn test_builder_rejects_bad_style() {
        let style = StyleConfig::new(Some("nonsense".to_string()), 30.0, 1.0);
        assert!(matches!(
            SvgBuilder::new("x.svg").with_style(&style).build(),
            Err(export::Error::Render(_))
        ));
        assert!(SvgBuilder::new("x.svg").with_margin(-1.0).build().is_err());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.svg");
        let mut svg = SvgBuilder::new(&path).build().unwrap();

        svg.export_scene(&scene()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("Arial"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("diagram.svg");
        let mut svg = SvgBuilder::new(path).build().unwrap();
        assert!(matches!(svg.export_scene(&scene()), Err(export::Error::Io(_))));
    }
}
