//! Color handling for Arbor diagrams
//!
//! This module provides the [`Color`] type. Any CSS color string understood by
//! the `color` crate is accepted as input; the value is stored as 8-bit sRGBA
//! so that a color survives a save/load cycle unchanged.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};
use serde::{Deserialize, Serialize};

/// An sRGBA color with 8 bits per channel.
///
/// Colors print as `#rrggbb`, or `#rrggbbaa` when not fully opaque. That
/// string form is also what gets persisted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    rgba: [u8; 4],
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let also_red = Color::new("red").unwrap();
    /// assert_eq!(red, also_red);
    /// assert_eq!(red.to_string(), "#ff0000");
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let color = DynamicColor::from_str(color_str.trim())
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))?;
        let rgba8 = color.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self {
            rgba: [rgba8.r, rgba8.g, rgba8.b, rgba8.a],
        })
    }

    /// Creates an opaque color from its red, green and blue channels.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgba: [r, g, b, u8::MAX],
        }
    }

    /// Returns the `[r, g, b, a]` channels.
    pub fn rgba(self) -> [u8; 4] {
        self.rgba
    }

    /// Returns the alpha (transparency) component of this color.
    ///
    /// The value is between 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(self) -> f32 {
        f32::from(self.rgba[3]) / 255.0
    }

    /// Creates a new color with the specified alpha value, clamped to `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.rgba;
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { rgba: [r, g, b, a] }
    }

    /// Returns `#rrggbb` for this color, ignoring alpha.
    pub fn to_hex_rgb(self) -> String {
        let [r, g, b, _] = self.rgba;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    /// Node fill color used when nothing else was chosen.
    fn default() -> Self {
        Self::from_rgb(0xff, 0xff, 0xff)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.rgba;
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_default_is_white() {
        assert_eq!(Color::default().to_string(), "#ffffff");
    }

    #[test]
    fn test_color_named_and_functional_forms_agree() {
        let named = Color::new("blue").unwrap();
        let hex = Color::new("#0000ff").unwrap();
        let functional = Color::new("rgb(0, 0, 255)").unwrap();
        assert_eq!(named, hex);
        assert_eq!(hex, functional);
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        let transparent = color.with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.01);
        assert_eq!(transparent.to_hex_rgb(), "#ff0000");
        assert_eq!(transparent.to_string().len(), 9);
    }

    #[test]
    fn test_color_display_round_trip() {
        let color = Color::from_rgb(0x12, 0xab, 0x7f);
        let printed = color.to_string();
        assert_eq!(printed, "#12ab7f");
        assert_eq!(Color::new(&printed).unwrap(), color);
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
