//! Diagram nodes and their editable attributes.
//!
//! A [`Node`] is one labeled, styled element of the diagram tree. Its
//! structural links (`parent`, `children`) are ids into the owning
//! [`Tree`](crate::tree::Tree); only the tree changes them.
//!
//! Attribute edits travel as an [`AttributeValue`]. The property editor speaks
//! in `(node, attribute, raw string)` triples, which
//! [`AttributeValue::parse`] turns into a typed value.

use std::{fmt, str::FromStr};

use crate::{
    color::Color,
    error::EditError,
    geometry::Size,
    identifier::NodeId,
    style::{FontStyle, FontWeight, Shape},
};

/// A single diagram element.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    label: String,
    shape: Shape,
    color: Color,
    font: FontStyle,
    size: Size,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub const DEFAULT_LABEL: &'static str = "New Node";
    pub const DEFAULT_WIDTH: f32 = 100.0;
    pub const DEFAULT_HEIGHT: f32 = 40.0;

    /// Creates a detached node with default style and geometry.
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            shape: Shape::default(),
            color: Color::default(),
            font: FontStyle::default(),
            size: Size::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_font(mut self, font: FontStyle) -> Self {
        self.font = font;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Sets the structural links. They are checked when the node is handed
    /// to [`Tree::from_nodes`](crate::tree::Tree::from_nodes).
    pub fn with_links(mut self, parent: Option<NodeId>, children: Vec<NodeId>) -> Self {
        self.parent = parent;
        self.children = children;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn font(&self) -> FontStyle {
        self.font
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    /// Parent id, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in layout order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Checks the label, size and font against their domains.
    pub fn validate(&self) -> Result<(), EditError> {
        validate_label(&self.label)?;
        AttributeValue::Size(self.size).validate()?;
        AttributeValue::Font(self.font).validate()
    }

    /// Replaces one attribute, returning the previous value.
    ///
    /// The value must already be validated.
    pub(crate) fn replace_attribute(&mut self, value: AttributeValue) -> AttributeValue {
        match value {
            AttributeValue::Label(label) => {
                AttributeValue::Label(std::mem::replace(&mut self.label, label))
            }
            AttributeValue::Color(color) => {
                AttributeValue::Color(std::mem::replace(&mut self.color, color))
            }
            AttributeValue::Shape(shape) => {
                AttributeValue::Shape(std::mem::replace(&mut self.shape, shape))
            }
            AttributeValue::Font(font) => {
                AttributeValue::Font(std::mem::replace(&mut self.font, font))
            }
            AttributeValue::Size(size) => {
                AttributeValue::Size(std::mem::replace(&mut self.size, size))
            }
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }
}

/// Names of the attributes the property editor can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Label,
    Color,
    Shape,
    FontSize,
    FontWeight,
    Width,
    Height,
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "label" => Ok(Self::Label),
            "color" => Ok(Self::Color),
            "shape" => Ok(Self::Shape),
            "font_size" => Ok(Self::FontSize),
            "font_weight" => Ok(Self::FontWeight),
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            _ => Err(format!("unknown attribute `{s}`")),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Label => "label",
            Self::Color => "color",
            Self::Shape => "shape",
            Self::FontSize => "font_size",
            Self::FontWeight => "font_weight",
            Self::Width => "width",
            Self::Height => "height",
        };
        write!(f, "{name}")
    }
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Label(String),
    Color(Color),
    Shape(Shape),
    Font(FontStyle),
    Size(Size),
}

impl AttributeValue {
    /// Parses a raw property-editor value for `attribute` of `node`.
    ///
    /// Font size, font weight, width and height edit one half of a compound
    /// value; the other half is taken from `node`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidValue`] when `raw` is outside the
    /// attribute's domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_core::{
    ///     identifier::NodeId,
    ///     node::{Attribute, AttributeValue, Node},
    ///     style::Shape,
    /// };
    ///
    /// let node = Node::new(NodeId::new(0), "Root");
    /// let value = AttributeValue::parse(Attribute::Shape, "diamond", &node).unwrap();
    /// assert_eq!(value, AttributeValue::Shape(Shape::Diamond));
    ///
    /// assert!(AttributeValue::parse(Attribute::Shape, "blob", &node).is_err());
    /// ```
    pub fn parse(attribute: Attribute, raw: &str, node: &Node) -> Result<Self, EditError> {
        // Labels keep their whitespace; every other value is trimmed.
        let text = raw.trim();
        let value = match attribute {
            Attribute::Label => Self::Label(raw.to_string()),
            Attribute::Color => Self::Color(Color::new(text).map_err(EditError::InvalidValue)?),
            Attribute::Shape => Self::Shape(text.parse().map_err(EditError::InvalidValue)?),
            Attribute::FontSize => {
                let size = text
                    .parse::<u32>()
                    .map_err(|err| EditError::invalid_value(format!("font size `{text}`: {err}")))?;
                Self::Font(
                    node.font()
                        .with_size(size)
                        .map_err(EditError::InvalidValue)?,
                )
            }
            Attribute::FontWeight => {
                let weight: FontWeight = text.parse().map_err(EditError::InvalidValue)?;
                Self::Font(node.font().with_weight(weight))
            }
            Attribute::Width => Self::Size(Size::new(parse_dimension(text)?, node.height())),
            Attribute::Height => Self::Size(Size::new(node.width(), parse_dimension(text)?)),
        };
        value.validate()?;
        Ok(value)
    }

    /// Checks the value against its domain.
    pub fn validate(&self) -> Result<(), EditError> {
        match self {
            Self::Label(label) => validate_label(label),
            Self::Size(size) if !size.is_valid_extent() => Err(EditError::invalid_value(format!(
                "node size must be positive, got {}x{}",
                size.width(),
                size.height()
            ))),
            Self::Font(font) if font.size() == 0 => {
                Err(EditError::invalid_value("font size must be positive"))
            }
            _ => Ok(()),
        }
    }
}

/// Labels must contain at least one non-whitespace character.
pub fn validate_label(label: &str) -> Result<(), EditError> {
    if label.trim().is_empty() {
        return Err(EditError::invalid_value("label must not be empty"));
    }
    Ok(())
}

fn parse_dimension(raw: &str) -> Result<f32, EditError> {
    raw.parse::<f32>()
        .map_err(|err| EditError::invalid_value(format!("dimension `{raw}`: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Node {
        Node::new(NodeId::new(1), "A")
    }

    #[test]
    fn test_node_defaults() {
        let node = node();
        assert_eq!(node.shape(), Shape::Ellipse);
        assert_eq!(node.color(), Color::default());
        assert_eq!(node.size(), Size::new(100.0, 40.0));
        assert_eq!(node.font(), FontStyle::default());
        assert!(node.is_leaf());
        assert_eq!(node.parent(), None);
    }

    #[test]
    fn test_parse_width_keeps_height() {
        let value = AttributeValue::parse(Attribute::Width, "150", &node()).unwrap();
        assert_eq!(value, AttributeValue::Size(Size::new(150.0, 40.0)));
    }

    #[test]
    fn test_parse_rejects_out_of_domain() {
        let node = node();
        for (attribute, raw) in [
            (Attribute::Label, "   "),
            (Attribute::Width, "0"),
            (Attribute::Height, "-5"),
            (Attribute::Width, "wide"),
            (Attribute::FontSize, "0"),
            (Attribute::FontWeight, "heavy"),
            (Attribute::Color, "nope"),
            (Attribute::Shape, "star"),
        ] {
            let result = AttributeValue::parse(attribute, raw, &node);
            assert!(
                matches!(result, Err(EditError::InvalidValue(_))),
                "{attribute}={raw} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_parse_font_weight_keeps_size() {
        let node = node().with_font(FontStyle::new(14, FontWeight::Bold).unwrap());
        let value = AttributeValue::parse(Attribute::FontWeight, "italic", &node).unwrap();
        assert_eq!(
            value,
            AttributeValue::Font(FontStyle::new(14, FontWeight::Italic).unwrap())
        );
    }

    #[test]
    fn test_replace_attribute_returns_previous() {
        let mut node = node();
        let previous = node.replace_attribute(AttributeValue::Label("B".to_string()));
        assert_eq!(previous, AttributeValue::Label("A".to_string()));
        assert_eq!(node.label(), "B");
    }

    #[test]
    fn test_parse_label_keeps_surrounding_whitespace() {
        let value = AttributeValue::parse(Attribute::Label, "  padded  ", &node()).unwrap();
        assert_eq!(value, AttributeValue::Label("  padded  ".to_string()));

        let value = AttributeValue::parse(Attribute::Width, " 150 ", &node()).unwrap();
        assert_eq!(value, AttributeValue::Size(Size::new(150.0, 40.0)));
    }

    #[test]
    fn test_node_validate() {
        assert!(node().validate().is_ok());
        assert!(matches!(
            Node::new(NodeId::new(2), " ").validate(),
            Err(EditError::InvalidValue(_))
        ));
        assert!(matches!(
            node().with_size(Size::new(0.0, 10.0)).validate(),
            Err(EditError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_attribute_names() {
        assert_eq!("font_size".parse(), Ok(Attribute::FontSize));
        assert_eq!(Attribute::Height.to_string(), "height");
        assert!("position".parse::<Attribute>().is_err());
    }
}
