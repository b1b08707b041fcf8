//! Stroke and line-style definitions.
//!
//! # Overview
//!
//! - [`StrokeDefinition`]: paint, width, style and cap of a stroke
//! - [`StrokeStyle`]: solid or a dash pattern
//! - [`StrokeCap`]: how line endpoints are rendered
//!
//! The stroke paint is a plain string so gradients can be referenced with
//! `url(#id)`. A paint that fails [`has_color`](crate::color::has_color)
//! disables the stroke entirely.
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `paint` | `stroke` | `"#1783ff"`, `"url(#g)"` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"` |
//! | `cap` | `stroke-linecap` | `"butt"`, `"round"` |

use crate::{color::has_color, scene::SceneNode};

/// Defines the visual pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// SVG dasharray pattern, e.g. `"10,5"`
    Custom(String),
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Custom(pattern) if pattern.trim().is_empty() => None,
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// Defines how line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use infograph_core::draw::{StrokeCap, StrokeDefinition, StrokeStyle};
///
/// let stroke = StrokeDefinition::solid("#1783ff", 2.0);
/// assert_eq!(stroke.width(), 2.0);
///
/// let stroke = StrokeDefinition::new("url(#edge)", 3.0)
///     .with_style(StrokeStyle::Custom("10,5".to_string()))
///     .with_cap(StrokeCap::Round);
/// assert_eq!(stroke.style().to_svg_value().as_deref(), Some("10,5"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    paint: String,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given paint and width.
    pub fn new(paint: impl Into<String>, width: f32) -> Self {
        Self {
            paint: paint.into(),
            width,
            style: StrokeStyle::Solid,
            cap: StrokeCap::default(),
        }
    }

    /// Creates a solid stroke (same as [`StrokeDefinition::new`]).
    pub fn solid(paint: impl Into<String>, width: f32) -> Self {
        Self::new(paint, width)
    }

    pub fn paint(&self) -> &str {
        &self.paint
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    /// Writes the stroke attributes onto a shape node.
    ///
    /// The default cap is left implicit. A colorless paint writes
    /// nothing.
    pub(crate) fn apply(&self, node: SceneNode) -> SceneNode {
        if !has_color(Some(&self.paint)) {
            return node;
        }

        let mut node = node
            .with_property("stroke", self.paint.as_str())
            .with_property("stroke-width", self.width);
        if let Some(dasharray) = self.style.to_svg_value() {
            node = node.with_property("stroke-dasharray", dasharray);
        }
        if self.cap != StrokeCap::default() {
            node = node.with_property("stroke-linecap", self.cap.to_svg_value());
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Tag;

    #[test]
    fn test_stroke_style_svg_values() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(
            StrokeStyle::Custom("8,4".to_string()).to_svg_value().as_deref(),
            Some("8,4")
        );
        assert_eq!(StrokeStyle::Custom(String::new()).to_svg_value(), None);
    }

    #[test]
    fn test_apply_writes_attributes() {
        let node = StrokeDefinition::new("red", 2.0)
            .with_style(StrokeStyle::Custom("5,5".to_string()))
            .with_cap(StrokeCap::Round)
            .apply(SceneNode::new(Tag::Path));
        assert_eq!(node.text("stroke"), Some("red"));
        assert_eq!(node.number("stroke-width"), Some(2.0));
        assert_eq!(node.text("stroke-dasharray"), Some("5,5"));
        assert_eq!(node.text("stroke-linecap"), Some("round"));
    }

    #[test]
    fn test_apply_skips_colorless_paint() {
        let node = StrokeDefinition::solid("none", 2.0).apply(SceneNode::new(Tag::Path));
        assert!(node.property("stroke").is_none());
        assert!(node.property("stroke-width").is_none());
    }
}
