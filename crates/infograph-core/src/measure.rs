//! The measurement subsystem.
//!
//! [`Measurer`] computes the smallest box enclosing every leaf of a scene
//! subtree without placing it anywhere. Structures use it to size items
//! before laying them out: render once at the origin, measure, then render
//! again at the final position.
//!
//! # Leaf rules
//!
//! - **text**: `(0, 0, w, h)` in its group's space. `w` is the explicit width
//!   when positive, else the widest line's intrinsic width. `h` is the
//!   explicit height when positive, else wrapped line count × line height ×
//!   font size (word wrap with an explicit width), else line count × line
//!   height × font size.
//! - **rect / ellipse**: the declared geometry.
//! - **polygon**: the min/max of its points.
//! - **path**: nothing by itself; the wrapping group's size hint counts.
//! - **group** with both `width` and `height`: `(x, y, width, height)`
//!   without descending.
//!
//! Definition subtrees (`defs`, gradients, filters) are skipped.
//!
//! Measurement is pure: the same node always yields the same bounds.

use std::fmt;

use log::trace;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    geometry::{Bounds, Point, Size},
    scene::{SceneNode, Tag},
};

/// Provides the intrinsic width of single lines of text.
pub trait TextMetrics: Send + Sync + fmt::Debug {
    /// Returns the advance width of `text` set on one line at `font_size`.
    fn line_width(&self, text: &str, font_size: f32) -> f32;
}

/// Approximates text width as an average glyph width times the display
/// width of the string.
///
/// Display width comes from `unicode-width`, so wide (CJK) glyphs count
/// double.
///
/// # Examples
///
/// ```
/// # use infograph_core::measure::{AverageCharMetrics, TextMetrics};
/// let metrics = AverageCharMetrics::default();
/// assert_eq!(metrics.line_width("abcd", 10.0), 4.0 * 0.55 * 10.0);
/// assert_eq!(metrics.line_width("中文", 10.0), 4.0 * 0.55 * 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageCharMetrics {
    ratio: f32,
}

impl AverageCharMetrics {
    pub fn new(ratio: f32) -> Self {
        Self { ratio }
    }
}

impl Default for AverageCharMetrics {
    fn default() -> Self {
        Self::new(0.55)
    }
}

impl TextMetrics for AverageCharMetrics {
    fn line_width(&self, text: &str, font_size: f32) -> f32 {
        text.width() as f32 * self.ratio * font_size
    }
}

/// Computes bounds of scene subtrees.
///
/// A `Measurer` holds no cache; structures keep their own per-call caches.
#[derive(Debug)]
pub struct Measurer {
    metrics: Box<dyn TextMetrics>,
}

impl Default for Measurer {
    fn default() -> Self {
        Self::new(AverageCharMetrics::default())
    }
}

impl Measurer {
    pub fn new(metrics: impl TextMetrics + 'static) -> Self {
        Self {
            metrics: Box::new(metrics),
        }
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    /// Measures a node in the coordinate space it is placed in.
    ///
    /// A node without measurable leaves measures as the empty box at the
    /// origin.
    pub fn measure(&self, node: &SceneNode) -> Bounds {
        let mut bounds = None;
        self.accumulate(node, Point::default(), &mut bounds);
        let bounds = bounds.unwrap_or_default();
        trace!(
            tag = node.tag().name(),
            x = bounds.x(),
            y = bounds.y(),
            width = bounds.width(),
            height = bounds.height();
            "Measured node"
        );
        bounds
    }

    /// Invokes `render` with `props` and measures the result.
    ///
    /// # Examples
    ///
    /// ```
    /// # use infograph_core::draw::{self, RectProps};
    /// # use infograph_core::measure::Measurer;
    /// let measurer = Measurer::default();
    /// let props = RectProps::new(120.0, 40.0);
    ///
    /// let bounds = measurer.measure_with(draw::rect, &props);
    /// assert_eq!(bounds.width(), 120.0);
    /// assert_eq!(bounds, measurer.measure_with(draw::rect, &props));
    /// ```
    pub fn measure_with<P: ?Sized>(&self, render: impl Fn(&P) -> SceneNode, props: &P) -> Bounds {
        self.measure(&render(props))
    }

    /// Computes the box of a text block.
    ///
    /// `width` of `0` means intrinsic. With `word_wrap` and a positive
    /// `width`, lines wrap at word boundaries; wide glyphs wrap individually.
    pub fn text_size(
        &self,
        content: &str,
        font_size: f32,
        line_height: f32,
        width: f32,
        word_wrap: bool,
    ) -> Size {
        let line_height = if line_height > 0.0 { line_height } else { 1.0 };
        let line_box = line_height * font_size;

        let intrinsic_width = content
            .split('\n')
            .map(|line| self.metrics.line_width(line, font_size))
            .fold(0.0, f32::max);

        let line_count = if word_wrap && width > 0.0 {
            content
                .split('\n')
                .map(|line| self.wrapped_line_count(line, font_size, width))
                .sum::<usize>()
        } else {
            content.split('\n').count()
        };

        let measured_width = if width > 0.0 { width } else { intrinsic_width };
        Size::new(measured_width, line_count as f32 * line_box)
    }

    fn wrapped_line_count(&self, line: &str, font_size: f32, max_width: f32) -> usize {
        let mut lines = 1;
        let mut current = 0.0;
        for token in wrap_tokens(line) {
            let token_width = self.metrics.line_width(token, font_size);
            if current > 0.0 && current + token_width > max_width {
                lines += 1;
                current = token_width;
            } else {
                current += token_width;
            }
        }
        lines
    }

    fn accumulate(&self, node: &SceneNode, offset: Point, bounds: &mut Option<Bounds>) {
        if node.tag().is_definition() {
            return;
        }

        let leaf = match node.tag() {
            Tag::Group => {
                let origin = offset.add_point(Point::new(
                    node.number("x").unwrap_or(0.0),
                    node.number("y").unwrap_or(0.0),
                ));
                if let (Some(width), Some(height)) = (node.number("width"), node.number("height"))
                {
                    Some(Bounds::new(origin.x(), origin.y(), width, height))
                } else {
                    for child in node.children() {
                        self.accumulate(child, origin, bounds);
                    }
                    None
                }
            }
            Tag::Text => {
                let size = self.text_size(
                    node.content().unwrap_or_default(),
                    node.number("font-size").unwrap_or(14.0),
                    node.number("line-height").unwrap_or(1.0),
                    node.number("width").unwrap_or(0.0),
                    node.text("data-word-wrap") == Some("true"),
                );
                let height = node
                    .number("height")
                    .filter(|height| *height > 0.0)
                    .unwrap_or(size.height());
                Some(Bounds::new(offset.x(), offset.y(), size.width(), height))
            }
            Tag::Rect => Some(
                Bounds::new(
                    node.number("x").unwrap_or(0.0),
                    node.number("y").unwrap_or(0.0),
                    node.number("width").unwrap_or(0.0),
                    node.number("height").unwrap_or(0.0),
                )
                .translate(offset),
            ),
            Tag::Ellipse => {
                let rx = node.number("rx").unwrap_or(0.0);
                let ry = node.number("ry").unwrap_or(0.0);
                Some(
                    Bounds::new(
                        node.number("cx").unwrap_or(0.0) - rx,
                        node.number("cy").unwrap_or(0.0) - ry,
                        rx * 2.0,
                        ry * 2.0,
                    )
                    .translate(offset),
                )
            }
            Tag::Polygon => polygon_bounds(node.text("points").unwrap_or_default())
                .map(|polygon| polygon.translate(offset)),
            _ => None,
        };

        if let Some(leaf) = leaf {
            *bounds = Some(match bounds {
                Some(existing) => existing.merge(&leaf),
                None => leaf,
            });
        }
    }
}

/// Splits a line into wrap units: words with their trailing whitespace, and
/// every wide glyph on its own.
fn wrap_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut previous_space = false;

    for (index, ch) in line.char_indices() {
        let wide = ch.width().unwrap_or(0) > 1;
        if wide || (previous_space && !ch.is_whitespace()) {
            if start < index {
                tokens.push(&line[start..index]);
            }
            start = index;
        }
        if wide {
            let end = index + ch.len_utf8();
            tokens.push(&line[start..end]);
            start = end;
        }
        previous_space = ch.is_whitespace();
    }
    if start < line.len() {
        tokens.push(&line[start..]);
    }
    tokens
}

fn polygon_bounds(points: &str) -> Option<Bounds> {
    points
        .split_whitespace()
        .filter_map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
        })
        .map(|point| Bounds::from_corners(point, point))
        .reduce(|acc, point| acc.merge(&point))
}

#[cfg(feature = "font-metrics")]
mod font_system {
    use std::sync::Mutex;

    use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
    use log::info;

    use super::{AverageCharMetrics, TextMetrics};

    /// Text metrics backed by real font shaping through `cosmic-text`.
    ///
    /// Loading the system font database is expensive; create one instance
    /// and share it.
    pub struct FontSystemMetrics {
        font_system: Mutex<FontSystem>,
        family: Option<String>,
        fallback: AverageCharMetrics,
    }

    impl std::fmt::Debug for FontSystemMetrics {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("FontSystemMetrics")
                .field("family", &self.family)
                .finish_non_exhaustive()
        }
    }

    impl Default for FontSystemMetrics {
        fn default() -> Self {
            Self::new(None)
        }
    }

    impl FontSystemMetrics {
        /// Loads the system fonts. `family` selects a named family; `None`
        /// uses the default sans-serif family.
        pub fn new(family: Option<String>) -> Self {
            info!("Initializing FontSystem");
            Self {
                font_system: Mutex::new(FontSystem::new()),
                family,
                fallback: AverageCharMetrics::default(),
            }
        }
    }

    impl TextMetrics for FontSystemMetrics {
        fn line_width(&self, text: &str, font_size: f32) -> f32 {
            if text.is_empty() {
                return 0.0;
            }
            let Ok(mut font_system) = self.font_system.lock() else {
                return self.fallback.line_width(text, font_size);
            };

            let metrics = Metrics::new(font_size, font_size);
            let mut buffer = Buffer::new(&mut font_system, metrics);
            let mut buffer = buffer.borrow_with(&mut font_system);

            let family = match &self.family {
                Some(name) => Family::Name(name.as_str()),
                None => Family::SansSerif,
            };
            let attrs = Attrs::new().family(family);

            buffer.set_size(None, None);
            buffer.set_text(text, &attrs, Shaping::Advanced, None);
            buffer.shape_until_scroll(true);

            let width = buffer
                .layout_runs()
                .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
                .fold(0.0, f32::max);

            if width > 0.0 {
                width
            } else {
                self.fallback.line_width(text, font_size)
            }
        }
    }
}

#[cfg(feature = "font-metrics")]
pub use font_system::FontSystemMetrics;

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::{
        self, EllipseProps, GroupProps, LinearGradientProps, PathProps, PolygonProps, RectProps,
        TextProps,
    };

    #[test]
    fn test_empty_group_measures_zero() {
        let bounds = Measurer::default().measure(&draw::group(GroupProps::new(), Vec::new()));
        assert_eq!(bounds, Bounds::default());
    }

    #[test]
    fn test_intrinsic_text_size() {
        let measurer = Measurer::default();
        let bounds = measurer.measure(&draw::text(&TextProps::new("abcd").with_font_size(10.0)));
        assert_approx_eq!(f32, bounds.width(), 22.0);
        assert_approx_eq!(f32, bounds.height(), 10.0);
    }

    #[test]
    fn test_text_with_explicit_size() {
        let measurer = Measurer::default();
        let bounds = measurer.measure(&draw::text(
            &TextProps::new("abcd").with_size(100.0, 30.0).with_position(5.0, 6.0),
        ));
        assert_eq!(bounds, Bounds::new(5.0, 6.0, 100.0, 30.0));
    }

    #[test]
    fn test_wrapped_text_height() {
        let measurer = Measurer::default();
        // each word is 5 chars + space = 6 × 0.55 × 10 = 33px; two fit per 70px line
        let props = TextProps::new("aaaaa bbbbb ccccc ddddd eeeee")
            .with_size(70.0, 0.0)
            .with_font_size(10.0)
            .with_line_height(1.5)
            .with_word_wrap(true);
        let bounds = measurer.measure(&draw::text(&props));
        assert_approx_eq!(f32, bounds.width(), 70.0);
        assert_approx_eq!(f32, bounds.height(), 3.0 * 15.0);
    }

    #[test]
    fn test_wide_glyphs_count_double() {
        let size = Measurer::default().text_size("中文", 10.0, 1.0, 0.0, false);
        assert_approx_eq!(f32, size.width(), 22.0);
    }

    #[test]
    fn test_multiline_text_without_wrap() {
        let size = Measurer::default().text_size("ab\nabcd", 10.0, 1.0, 0.0, false);
        assert_approx_eq!(f32, size.width(), 22.0);
        assert_approx_eq!(f32, size.height(), 20.0);
    }

    #[test]
    fn test_group_translation_accumulates() {
        let tree = draw::group(
            GroupProps::at(10.0, 20.0),
            vec![draw::group(
                GroupProps::at(5.0, 5.0),
                vec![draw::rect(&RectProps::new(10.0, 10.0).with_position(1.0, 1.0))],
            )],
        );
        assert_eq!(Measurer::default().measure(&tree), Bounds::new(16.0, 26.0, 10.0, 10.0));
    }

    #[test]
    fn test_shapes_merge() {
        let tree = draw::group(
            GroupProps::new(),
            vec![
                draw::ellipse(&EllipseProps::new(10.0, 10.0).with_position(-5.0, -5.0)),
                draw::polygon(&PolygonProps::new([Point::new(20.0, 0.0), Point::new(30.0, 15.0)])),
            ],
        );
        assert_eq!(Measurer::default().measure(&tree), Bounds::new(-5.0, -5.0, 35.0, 20.0));
    }

    #[test]
    fn test_path_uses_group_hint_only() {
        let measurer = Measurer::default();
        let bare = draw::path(&PathProps::new("M0 0 L100 100"));
        assert_eq!(measurer.measure(&bare), Bounds::default());

        let hinted = draw::path(
            &PathProps::new("M0 0 L100 100")
                .with_position(2.0, 3.0)
                .with_size(100.0, 100.0),
        );
        assert_eq!(measurer.measure(&hinted), Bounds::new(2.0, 3.0, 100.0, 100.0));
    }

    #[test]
    fn test_definitions_are_skipped() {
        let tree = draw::group(
            GroupProps::new(),
            vec![
                draw::defs(vec![draw::linear_gradient(&LinearGradientProps::new("g"))]),
                draw::rect(&RectProps::new(4.0, 4.0)),
            ],
        );
        assert_eq!(Measurer::default().measure(&tree), Bounds::new(0.0, 0.0, 4.0, 4.0));
    }

    #[test]
    fn test_wrap_tokens() {
        assert_eq!(wrap_tokens("ab cd  ef"), vec!["ab ", "cd  ", "ef"]);
        assert_eq!(wrap_tokens("a中b"), vec!["a", "中", "b"]);
        assert!(wrap_tokens("").is_empty());
    }

    #[test]
    fn test_custom_metrics() {
        #[derive(Debug)]
        struct Fixed;
        impl TextMetrics for Fixed {
            fn line_width(&self, _text: &str, _font_size: f32) -> f32 {
                42.0
            }
        }
        let size = Measurer::new(Fixed).text_size("anything", 12.0, 1.0, 0.0, false);
        assert_approx_eq!(f32, size.width(), 42.0);
    }
}
