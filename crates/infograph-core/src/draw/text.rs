//! Text renderer.
//!
//! [`text`] emits a group translated to the text box origin holding an
//! optional background rectangle and a single text leaf. Backgrounds and text
//! share one box but stay separate nodes.
//!
//! # Anchoring
//!
//! | Alignment | Anchor | SVG attribute |
//! |-----------|--------|---------------|
//! | `Left` | `0` | `text-anchor: start` |
//! | `Center` | `width / 2` | `text-anchor: middle` |
//! | `Right` | `width` | `text-anchor: end` |
//! | `Top` | `0.88 × font size` (+ half the extra line height) | `dominant-baseline: baseline` |
//! | `Center` | `height / 2` | `dominant-baseline: central` |
//! | `Bottom` | `height` | `dominant-baseline: baseline` |
//!
//! # Examples
//!
//! ```
//! # use infograph_core::draw::{self, HorizontalAlign, TextProps};
//! let node = draw::text(
//!     &TextProps::new("Revenue")
//!         .with_size(120.0, 24.0)
//!         .with_align_horizontal(HorizontalAlign::Center)
//!         .with_background("#f0f0f0")
//!         .with_id("title"),
//! );
//!
//! assert!(node.find_by_id("title-bounds").is_some());
//! assert_eq!(node.find_by_id("title-text").unwrap().content(), Some("Revenue"));
//! ```

use serde::Deserialize;

use crate::{
    color::has_color,
    draw::{RectProps, group::GroupProps, rect},
    scene::{SceneNode, Tag},
};

/// Distance from the top of the line box to the alphabetic baseline, as a
/// share of the font size.
const BASELINE_RATIO: f32 = 0.88;

/// Horizontal alignment of text within its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    fn text_anchor(self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Center => "CENTER",
            Self::Right => "RIGHT",
        }
    }
}

/// Vertical alignment of text within its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    fn dominant_baseline(self) -> &'static str {
        match self {
            Self::Center => "central",
            Self::Top | Self::Bottom => "baseline",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Top => "TOP",
            Self::Center => "CENTER",
            Self::Bottom => "BOTTOM",
        }
    }
}

/// Properties of a text element.
///
/// A width or height of `0` means "intrinsic": the measurement subsystem
/// derives the size from the content.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    content: String,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    align_horizontal: HorizontalAlign,
    align_vertical: VerticalAlign,
    font_size: f32,
    line_height: f32,
    word_wrap: bool,
    fill: String,
    font_weight: Option<String>,
    font_family: Option<String>,
    opacity: Option<f32>,
    background: Option<String>,
    background_opacity: f32,
    background_radius: f32,
    id: Option<String>,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: String::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            align_horizontal: HorizontalAlign::default(),
            align_vertical: VerticalAlign::default(),
            font_size: 14.0,
            line_height: 1.0,
            word_wrap: false,
            fill: "black".to_string(),
            font_weight: None,
            font_family: None,
            opacity: None,
            background: None,
            background_opacity: 1.0,
            background_radius: 0.0,
            id: None,
        }
    }
}

impl TextProps {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self
    }

    pub fn with_align_horizontal(mut self, align: HorizontalAlign) -> Self {
        self.align_horizontal = align;
        self
    }

    pub fn with_align_vertical(mut self, align: VerticalAlign) -> Self {
        self.align_vertical = align;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the line height as a multiple of the font size.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets the background paint. Colorless values (see
    /// [`has_color`](crate::color::has_color)) render no background.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn with_background_opacity(mut self, opacity: f32) -> Self {
        self.background_opacity = opacity;
        self
    }

    pub fn with_background_radius(mut self, radius: f32) -> Self {
        self.background_radius = radius;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    fn anchor_x(&self) -> f32 {
        match self.align_horizontal {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => self.width / 2.0,
            HorizontalAlign::Right => self.width,
        }
    }

    fn anchor_y(&self) -> f32 {
        match self.align_vertical {
            VerticalAlign::Center => self.height / 2.0,
            VerticalAlign::Bottom => self.height,
            VerticalAlign::Top if self.line_height > 1.0 => {
                let extra = self.font_size * self.line_height - self.font_size;
                extra / 2.0 + self.font_size * BASELINE_RATIO
            }
            VerticalAlign::Top => self.font_size * BASELINE_RATIO,
        }
    }
}

/// Renders a text element.
pub fn text(props: &TextProps) -> SceneNode {
    let mut container = GroupProps::at(props.x, props.y);
    if props.width > 0.0 {
        container = container.with_width(props.width);
    }
    if props.height > 0.0 {
        container = container.with_height(props.height);
    }
    if let Some(id) = &props.id {
        container = container.with_id(id.as_str());
    }

    let mut children = Vec::with_capacity(2);
    if let Some(background) = props
        .background
        .as_deref()
        .filter(|background| has_color(Some(*background)))
    {
        let mut bg = RectProps::new(props.width, props.height)
            .with_fill(background)
            .with_fill_opacity(props.background_opacity)
            .with_radius(props.background_radius);
        if let Some(id) = &props.id {
            bg = bg.with_id(format!("{id}-bounds"));
        }
        children.push(rect(&bg));
    }
    children.push(text_leaf(props));

    super::group(container, children)
}

fn text_leaf(props: &TextProps) -> SceneNode {
    let alignment = format!(
        "{} {}",
        props.align_horizontal.name(),
        props.align_vertical.name()
    );
    SceneNode::new(Tag::Text)
        .with_optional_property("id", props.id.as_ref().map(|id| format!("{id}-text")))
        .with_property("x", props.anchor_x())
        .with_property("y", props.anchor_y())
        .with_property("fill", props.fill.as_str())
        .with_property("font-size", props.font_size)
        .with_optional_property("font-family", props.font_family.clone())
        .with_optional_property("font-weight", props.font_weight.clone())
        .with_optional_property("opacity", props.opacity.filter(|opacity| *opacity != 1.0))
        .with_property("text-anchor", props.align_horizontal.text_anchor())
        .with_property("dominant-baseline", props.align_vertical.dominant_baseline())
        .with_property("data-text-alignment", alignment)
        .with_property("width", props.width)
        .with_property("height", props.height)
        .with_property("line-height", props.line_height)
        .with_property("data-word-wrap", props.word_wrap)
        .with_content(props.content.as_str())
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn leaf(node: &SceneNode) -> &SceneNode {
        node.children()
            .iter()
            .find(|child| child.tag() == Tag::Text)
            .expect("text leaf")
    }

    #[test]
    fn test_default_text_leaf() {
        let node = text(&TextProps::new("hello"));
        assert_eq!(node.tag(), Tag::Group);
        assert_eq!(node.children().len(), 1);

        let leaf = leaf(&node);
        assert_eq!(leaf.content(), Some("hello"));
        assert_eq!(leaf.number("font-size"), Some(14.0));
        assert_eq!(leaf.text("fill"), Some("black"));
        assert_eq!(leaf.text("text-anchor"), Some("start"));
        assert_eq!(leaf.text("dominant-baseline"), Some("baseline"));
        assert_approx_eq!(f32, leaf.number("y").unwrap(), 14.0 * 0.88);
    }

    #[test]
    fn test_horizontal_anchor() {
        let centered = text(
            &TextProps::new("a")
                .with_size(100.0, 20.0)
                .with_align_horizontal(HorizontalAlign::Center),
        );
        assert_eq!(leaf(&centered).number("x"), Some(50.0));
        assert_eq!(leaf(&centered).text("text-anchor"), Some("middle"));

        let right = text(
            &TextProps::new("a")
                .with_size(100.0, 20.0)
                .with_align_horizontal(HorizontalAlign::Right),
        );
        assert_eq!(leaf(&right).number("x"), Some(100.0));
        assert_eq!(leaf(&right).text("text-anchor"), Some("end"));
    }

    #[test]
    fn test_vertical_anchor() {
        let center = text(
            &TextProps::new("a")
                .with_size(100.0, 40.0)
                .with_align_vertical(VerticalAlign::Center),
        );
        assert_eq!(leaf(&center).number("y"), Some(20.0));
        assert_eq!(leaf(&center).text("dominant-baseline"), Some("central"));

        let bottom = text(
            &TextProps::new("a")
                .with_size(100.0, 40.0)
                .with_align_vertical(VerticalAlign::Bottom),
        );
        assert_eq!(leaf(&bottom).number("y"), Some(40.0));
    }

    #[test]
    fn test_top_anchor_with_line_height() {
        let node = text(&TextProps::new("a").with_font_size(20.0).with_line_height(1.5));
        // extra space 10px, half of it above the glyphs
        assert_approx_eq!(f32, leaf(&node).number("y").unwrap(), 5.0 + 17.6);
    }

    #[test]
    fn test_background_emitted_for_real_color() {
        let node = text(
            &TextProps::new("a")
                .with_size(80.0, 20.0)
                .with_background("#eee")
                .with_background_radius(4.0)
                .with_id("t"),
        );
        let bg = node.find_by_id("t-bounds").expect("background rect");
        assert_eq!(bg.tag(), Tag::Rect);
        assert_eq!(bg.number("width"), Some(80.0));
        assert_eq!(bg.number("rx"), Some(4.0));
        assert!(node.find_by_id("t-text").is_some());
        assert_eq!(node.id(), Some("t"));
    }

    #[test]
    fn test_background_skipped_for_no_color() {
        for background in ["none", "transparent", "", "  "] {
            let node = text(&TextProps::new("a").with_background(background));
            assert_eq!(node.count_where(|n| n.tag() == Tag::Rect), 0);
        }
    }

    #[test]
    fn test_intrinsic_size_leaves_group_unhinted() {
        let node = text(&TextProps::new("a").with_position(5.0, 6.0));
        assert_eq!(node.number("x"), Some(5.0));
        assert_eq!(node.number("y"), Some(6.0));
        assert!(node.property("width").is_none());
        assert!(node.property("height").is_none());
    }

    #[test]
    fn test_alignment_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Holder {
            align: HorizontalAlign,
        }
        let holder: Holder = serde_json::from_str(r#"{"align":"center"}"#).unwrap();
        assert_eq!(holder.align, HorizontalAlign::Center);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn background() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("none".to_string())),
            Just(Some("transparent".to_string())),
            "[ \t]{0,3}".prop_map(Some),
            "#[0-9a-f]{6}".prop_map(Some),
            "[a-z]{3,10}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn background_rect_present_iff_real_color(bg in background(), content in "[a-z ]{0,12}") {
            let mut props = TextProps::new(content).with_size(50.0, 20.0);
            if let Some(bg) = &bg {
                props = props.with_background(bg.as_str());
            }
            let node = text(&props);
            let has_rect = node.count_where(|n| n.tag() == Tag::Rect) == 1;
            prop_assert_eq!(has_rect, has_color(bg.as_deref()));
        }
    }
}
