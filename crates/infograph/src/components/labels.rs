//! Item text components: label, description and value.
//!
//! Each role carries its own defaults and derives the text element id from
//! the item's index path (`item-<key>-label`, `item-<key>-desc`,
//! `item-<key>-value`). Unset heights are derived from the line box so the
//! measurement pass sees a stable size whatever the content.

use infograph_core::{
    draw::{self, HorizontalAlign, TextProps, VerticalAlign},
    scene::SceneNode,
};

use crate::data::IndexPath;

/// Which part of an item a text renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Label,
    Desc,
    Value,
}

impl TextRole {
    fn suffix(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Desc => "desc",
            Self::Value => "value",
        }
    }
}

/// A label, description or value text of an item.
///
/// # Examples
///
/// ```
/// use infograph::components::ItemText;
/// use infograph::data::IndexPath;
///
/// let node = ItemText::label("Engineering").render(&IndexPath::from(vec![0, 2]));
/// assert!(node.find_by_id("item-0-2-label").is_some());
/// assert_eq!(node.number("height"), Some(26.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ItemText {
    role: TextRole,
    content: String,
    value: Option<f64>,
    x: f32,
    y: f32,
    width: f32,
    height: Option<f32>,
    font_size: f32,
    font_weight: Option<String>,
    fill: String,
    line_height: f32,
    line_count: f32,
    word_wrap: bool,
    align_horizontal: HorizontalAlign,
    align_vertical: VerticalAlign,
    background: Option<String>,
}

impl ItemText {
    /// A bold 18px label.
    pub fn label(content: impl Into<String>) -> Self {
        Self {
            role: TextRole::Label,
            content: content.into(),
            value: None,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: None,
            font_size: 18.0,
            font_weight: Some("bold".to_string()),
            fill: "#252525".to_string(),
            line_height: 1.4,
            line_count: 1.0,
            word_wrap: false,
            align_horizontal: HorizontalAlign::Left,
            align_vertical: VerticalAlign::Top,
            background: None,
        }
    }

    /// A wrapping 14px description two lines tall.
    pub fn desc(content: impl Into<String>) -> Self {
        Self {
            role: TextRole::Desc,
            font_size: 14.0,
            font_weight: None,
            fill: "#666".to_string(),
            line_count: 2.0,
            word_wrap: true,
            ..Self::label(content)
        }
    }

    /// A 14px numeric value, tagged with `data-value`.
    pub fn value(value: f64) -> Self {
        Self {
            role: TextRole::Value,
            value: Some(value),
            font_size: 14.0,
            font_weight: None,
            fill: "#666".to_string(),
            word_wrap: true,
            ..Self::label(format_value(value))
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width.max(0.0);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height.max(0.0));
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_align(mut self, horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        self.align_horizontal = horizontal;
        self.align_vertical = vertical;
        self
    }

    /// Paints a background behind the text box.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Returns the height the text renders with.
    pub fn height(&self) -> f32 {
        self.height
            .unwrap_or_else(|| (self.line_count * self.line_height * self.font_size).ceil())
    }

    /// Renders the text for the item at `indexes`.
    pub fn render(&self, indexes: &IndexPath) -> SceneNode {
        let mut props = TextProps::new(self.content.as_str())
            .with_position(self.x, self.y)
            .with_size(self.width, self.height())
            .with_font_size(self.font_size)
            .with_line_height(self.line_height)
            .with_word_wrap(self.word_wrap)
            .with_fill(self.fill.as_str())
            .with_align_horizontal(self.align_horizontal)
            .with_align_vertical(self.align_vertical)
            .with_id(format!("item-{}-{}", indexes.key(), self.role.suffix()));
        if let Some(weight) = &self.font_weight {
            props = props.with_font_weight(weight.as_str());
        }
        if let Some(background) = &self.background {
            props = props.with_background(background.as_str());
        }

        let node = draw::text(&props);
        match self.value {
            Some(value) => node.with_data("value", format_value(value)),
            None => node,
        }
    }
}

/// Formats a number without a trailing `.0` for integral values.
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_defaults() {
        let label = ItemText::label("A");
        assert_eq!(label.height(), 26.0);
        let node = label.render(&IndexPath::top(1));
        let leaf = node.find_by_id("item-1-label-text").unwrap();
        assert_eq!(leaf.text("font-weight"), Some("bold"));
        assert_eq!(leaf.number("font-size"), Some(18.0));
        assert_eq!(leaf.text("fill"), Some("#252525"));
        assert!(node.find_by_id("item-1-label-bounds").is_none());
    }

    #[test]
    fn test_desc_is_two_lines_and_wraps() {
        let desc = ItemText::desc("Long text");
        assert_eq!(desc.height(), 40.0);
        let node = desc.render(&IndexPath::top(0));
        let leaf = node.find_by_id("item-0-desc-text").unwrap();
        assert_eq!(leaf.text("data-word-wrap"), Some("true"));
    }

    #[test]
    fn test_value_carries_data_marker() {
        let node = ItemText::value(42.0).render(&IndexPath::from(vec![0, 1]));
        assert_eq!(node.id(), Some("item-0-1-value"));
        assert_eq!(node.text("data-value"), Some("42"));
        assert_eq!(node.find_by_id("item-0-1-value-text").unwrap().content(), Some("42"));
    }

    #[test]
    fn test_explicit_height_wins() {
        let node = ItemText::label("A").with_height(10.0).render(&IndexPath::top(0));
        assert_eq!(node.number("height"), Some(10.0));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(-12.0), "-12");
        assert_eq!(format_value(0.25), "0.25");
    }
}
