//! Color handling for Infograph scenes.
//!
//! Scene properties carry colors as plain strings, because a paint value may
//! be a CSS color, a `url(#gradient)` reference, or one of the "no color"
//! spellings. This module provides:
//!
//! - [`has_color`] - the exact predicate deciding whether a paint value is a
//!   real color (gates background rectangles and colored edges)
//! - [`Color`] - a parsed CSS color wrapping `DynamicColor` from the `color`
//!   crate, used where colors are derived (mixing, hex output)

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};
use thiserror::Error;

/// Error returned when a string is not a parsable CSS color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

/// Returns `true` when `value` names a real color.
///
/// `None`, `"none"`, `"transparent"`, and empty or whitespace-only strings are
/// "no color". Every other string is a color, including values that are not
/// parsable CSS (paint references like `url(#id)` must pass).
///
/// # Examples
///
/// ```
/// use infograph_core::color::has_color;
///
/// assert!(has_color(Some("red")));
/// assert!(has_color(Some("url(#gradient-0-0-1)")));
/// assert!(!has_color(Some("none")));
/// assert!(!has_color(Some("transparent")));
/// assert!(!has_color(Some("   ")));
/// assert!(!has_color(None));
/// ```
pub fn has_color(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(value) => {
            let trimmed = value.trim();
            !trimmed.is_empty() && value != "none" && value != "transparent"
        }
    }
}

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use infograph_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| ColorError {
                input: color_str.to_string(),
                reason: err.to_string(),
            })
    }

    /// Returns the alpha component, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Creates a new color with the specified alpha value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Mixes this color toward `other` in sRGB space.
    ///
    /// `amount` is the share of `other` in the result: `0.0` returns this
    /// color, `1.0` returns `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use infograph_core::color::Color;
    ///
    /// let black = Color::new("#000000").unwrap();
    /// let white = Color::new("#ffffff").unwrap();
    /// assert_eq!(black.mix(white, 1.0).to_hex(), "#ffffff");
    /// assert_ne!(black.mix(white, 0.5).to_hex(), "#000000");
    /// ```
    pub fn mix(self, other: Color, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let from = self.to_srgb().components;
        let to = other.to_srgb().components;
        let mut mixed = [0.0; 4];
        for (channel, slot) in mixed.iter_mut().enumerate() {
            *slot = from[channel] + (to[channel] - from[channel]) * amount;
        }
        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::new(mixed)),
        }
    }

    /// Formats the color as `#rrggbb`, ignoring alpha.
    pub fn to_hex(self) -> String {
        let rgba = self.to_srgb().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }

    /// Returns `true` when the relative luminance is below one half.
    ///
    /// # Examples
    ///
    /// ```
    /// use infograph_core::color::Color;
    ///
    /// assert!(Color::new("#333").unwrap().is_dark());
    /// assert!(!Color::new("white").unwrap().is_dark());
    /// ```
    pub fn is_dark(self) -> bool {
        let [r, g, b, _] = self.to_srgb().components;
        0.2126 * r + 0.7152 * g + 0.0722 * b < 0.5
    }

    fn to_srgb(self) -> AlphaColor<Srgb> {
        self.color.to_alpha_color::<Srgb>()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_color_rejects_no_color_spellings() {
        assert!(!has_color(None));
        assert!(!has_color(Some("none")));
        assert!(!has_color(Some("transparent")));
        assert!(!has_color(Some("")));
        assert!(!has_color(Some("   ")));
        assert!(!has_color(Some("\t\n")));
    }

    #[test]
    fn test_has_color_accepts_any_other_string() {
        assert!(has_color(Some("red")));
        assert!(has_color(Some("#ff0000")));
        assert!(has_color(Some("rgb(255, 0, 0)")));
        assert!(has_color(Some("url(#g)")));
    }

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::new("red").unwrap().to_hex(), "#ff0000");
        assert_eq!(Color::new("#1783FF").unwrap().to_hex(), "#1783ff");
    }

    #[test]
    fn test_color_mix_endpoints() {
        let red = Color::new("#ff0000").unwrap();
        let blue = Color::new("#0000ff").unwrap();
        assert_eq!(red.mix(blue, 0.0).to_hex(), "#ff0000");
        assert_eq!(red.mix(blue, 1.0).to_hex(), "#0000ff");
    }

    #[test]
    fn test_color_with_alpha() {
        let transparent = Color::new("red").unwrap().with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn padded_no_color_spellings_stay_colorless(pad in "[ \t]{0,4}") {
            prop_assert!(!has_color(Some(pad.as_str())));
        }

        #[test]
        fn alphabetic_names_other_than_keywords_are_colors(name in "[a-z]{1,12}") {
            prop_assume!(name != "none" && name != "transparent");
            prop_assert!(has_color(Some(name.as_str())));
        }
    }
}
