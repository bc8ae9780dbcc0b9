//! Closed style enumerations: node [`Shape`], [`FontWeight`], [`FontStyle`]
//! and the tree-wide [`Orientation`].
//!
//! Each enumeration parses from and prints as the lowercase names used by the
//! property editor and by `.diagram` files. Parsing an unknown name fails.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Outline drawn for a node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Ellipse,
    Box,
    /// A box split horizontally, label in the upper half.
    #[serde(alias = "class")]
    Record,
    Diamond,
    Parallelogram,
    Triangle,
    Hexagon,
    /// An actor drawn as a stick figure, label under its feet.
    StickFigure,
    Circle,
    #[serde(alias = "rbox")]
    RoundedBox,
    /// A component circle with a socket arc and connectors on both sides.
    Assembly,
    /// A provided interface drawn as a lollipop.
    Interface,
}

impl Shape {
    /// All shapes, in property-editor menu order.
    pub const ALL: [Shape; 12] = [
        Self::Ellipse,
        Self::Box,
        Self::Record,
        Self::Diamond,
        Self::Parallelogram,
        Self::Triangle,
        Self::Hexagon,
        Self::StickFigure,
        Self::Circle,
        Self::RoundedBox,
        Self::Assembly,
        Self::Interface,
    ];
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ellipse" => Ok(Self::Ellipse),
            "box" => Ok(Self::Box),
            "record" | "class" => Ok(Self::Record),
            "diamond" => Ok(Self::Diamond),
            "parallelogram" => Ok(Self::Parallelogram),
            "triangle" => Ok(Self::Triangle),
            "hexagon" => Ok(Self::Hexagon),
            "stick_figure" => Ok(Self::StickFigure),
            "circle" => Ok(Self::Circle),
            "rounded_box" | "rbox" => Ok(Self::RoundedBox),
            "assembly" => Ok(Self::Assembly),
            "interface" => Ok(Self::Interface),
            _ => Err(format!("unknown shape `{s}`")),
        }
    }
}

impl From<Shape> for &'static str {
    fn from(val: Shape) -> Self {
        match val {
            Shape::Ellipse => "ellipse",
            Shape::Box => "box",
            Shape::Record => "record",
            Shape::Diamond => "diamond",
            Shape::Parallelogram => "parallelogram",
            Shape::Triangle => "triangle",
            Shape::Hexagon => "hexagon",
            Shape::StickFigure => "stick_figure",
            Shape::Circle => "circle",
            Shape::RoundedBox => "rounded_box",
            Shape::Assembly => "assembly",
            Shape::Interface => "interface",
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Weight or slant of a label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    #[default]
    Bold,
    Italic,
}

impl FromStr for FontWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            _ => Err(format!("unknown font weight `{s}`")),
        }
    }
}

impl Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Bold => write!(f, "bold"),
            Self::Italic => write!(f, "italic"),
        }
    }
}

/// Label font: point size plus weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FontStyle {
    size: u32,
    weight: FontWeight,
}

impl FontStyle {
    pub const DEFAULT_SIZE: u32 = 10;

    /// Creates a font style. Returns an error for a zero point size.
    pub fn new(size: u32, weight: FontWeight) -> Result<Self, String> {
        if size == 0 {
            return Err("font size must be positive".to_string());
        }
        Ok(Self { size, weight })
    }

    pub fn size(self) -> u32 {
        self.size
    }

    pub fn weight(self) -> FontWeight {
        self.weight
    }

    /// Returns a copy with another point size.
    pub fn with_size(self, size: u32) -> Result<Self, String> {
        Self::new(size, self.weight)
    }

    /// Returns a copy with another weight.
    pub fn with_weight(self, weight: FontWeight) -> Self {
        Self { weight, ..self }
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            weight: FontWeight::default(),
        }
    }
}

impl Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt {}", self.size, self.weight)
    }
}

/// Growth direction of the tree layout.
///
/// This is a tree-wide setting; it never changes structure, only which axis
/// the layout engine grows along.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Orientation {
    /// Root on top, children below.
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    /// Root on the left, children to the right.
    #[serde(rename = "LR")]
    LeftRight,
    /// Root on the right, children to the left.
    #[serde(rename = "RL")]
    RightLeft,
}

impl Orientation {
    /// True when levels stack horizontally (LR and RL).
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftRight | Self::RightLeft)
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tb" | "top_bottom" => Ok(Self::TopBottom),
            "lr" | "left_right" => Ok(Self::LeftRight),
            "rl" | "right_left" => Ok(Self::RightLeft),
            _ => Err(format!("unknown orientation `{s}`")),
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopBottom => write!(f, "TB"),
            Self::LeftRight => write!(f, "LR"),
            Self::RightLeft => write!(f, "RL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_names_round_trip() {
        for shape in Shape::ALL {
            assert_eq!(shape.to_string().parse::<Shape>(), Ok(shape));
        }
    }

    #[test]
    fn test_shape_menu_aliases() {
        assert_eq!("class".parse(), Ok(Shape::Record));
        assert_eq!("rbox".parse(), Ok(Shape::RoundedBox));
        assert_eq!("stick_figure".parse(), Ok(Shape::StickFigure));
        assert_eq!(Shape::Interface.to_string(), "interface");
        assert_eq!(Shape::ALL.len(), 12);
    }

    #[test]
    fn test_shape_rejects_unknown() {
        assert!("blob".parse::<Shape>().is_err());
        assert!("Ellipse".parse::<Shape>().is_err());
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("TB".parse(), Ok(Orientation::TopBottom));
        assert_eq!("lr".parse(), Ok(Orientation::LeftRight));
        assert_eq!("right_left".parse(), Ok(Orientation::RightLeft));
        assert!("BT".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_font_style_rejects_zero_size() {
        assert!(FontStyle::new(0, FontWeight::Normal).is_err());
        let style = FontStyle::new(12, FontWeight::Italic).unwrap();
        assert_eq!(style.to_string(), "12pt italic");
        assert!(style.with_size(0).is_err());
    }

    #[test]
    fn test_font_style_default() {
        let style = FontStyle::default();
        assert_eq!(style.size(), 10);
        assert_eq!(style.weight(), FontWeight::Bold);
    }
}
