//! Shape renderers: rectangle, ellipse, polygon and path.
//!
//! All shapes share the same paint properties (fill, stroke, opacity,
//! fill-opacity, id), generated onto each props struct by
//! `impl_shape_paint!`.

use crate::{
    draw::{StrokeDefinition, group::GroupProps},
    geometry::Point,
    scene::{SceneNode, Tag},
};

/// Paint properties common to every shape.
#[derive(Debug, Clone, Default, PartialEq)]
struct ShapePaint {
    fill: Option<String>,
    stroke: Option<StrokeDefinition>,
    opacity: Option<f32>,
    fill_opacity: Option<f32>,
    id: Option<String>,
}

impl ShapePaint {
    fn apply(&self, node: SceneNode) -> SceneNode {
        let node = node
            .with_optional_property("id", self.id.clone())
            .with_optional_property("fill", self.fill.clone());
        let node = match &self.stroke {
            Some(stroke) => stroke.apply(node),
            None => node,
        };
        node.with_optional_property("opacity", self.opacity)
            .with_optional_property("fill-opacity", self.fill_opacity)
    }
}

macro_rules! impl_shape_paint {
    ($props:ty) => {
        impl $props {
            /// Sets the fill paint (a CSS color or `url(#id)` reference).
            pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
                self.paint.fill = Some(fill.into());
                self
            }

            pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
                self.paint.stroke = Some(stroke);
                self
            }

            pub fn with_opacity(mut self, opacity: f32) -> Self {
                self.paint.opacity = Some(opacity);
                self
            }

            pub fn with_fill_opacity(mut self, fill_opacity: f32) -> Self {
                self.paint.fill_opacity = Some(fill_opacity);
                self
            }

            pub fn with_id(mut self, id: impl Into<String>) -> Self {
                self.paint.id = Some(id.into());
                self
            }
        }
    };
}

/// Rectangle geometry and paint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectProps {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rx: Option<f32>,
    ry: Option<f32>,
    paint: ShapePaint,
}

impl RectProps {
    /// Creates a rectangle of the given size at the origin.
    ///
    /// Negative sizes are clamped to zero.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets both corner radii.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.rx = Some(radius);
        self.ry = Some(radius);
        self
    }
}

impl_shape_paint!(RectProps);

/// Renders a `rect` node.
pub fn rect(props: &RectProps) -> SceneNode {
    let mut node = SceneNode::new(Tag::Rect);
    if props.x != 0.0 {
        node = node.with_property("x", props.x);
    }
    if props.y != 0.0 {
        node = node.with_property("y", props.y);
    }
    let node = node
        .with_property("width", props.width)
        .with_property("height", props.height)
        .with_optional_property("rx", props.rx)
        .with_optional_property("ry", props.ry);
    props.paint.apply(node)
}

/// Ellipse described by its top-left corner and size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EllipseProps {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    paint: ShapePaint,
}

impl EllipseProps {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            ..Self::default()
        }
    }

    /// Creates a circle of `radius` centered on `center`.
    pub fn circle(center: Point, radius: f32) -> Self {
        Self::new(radius * 2.0, radius * 2.0)
            .with_position(center.x() - radius, center.y() - radius)
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

impl_shape_paint!(EllipseProps);

/// Renders an `ellipse` node, converting the box to center and radii.
pub fn ellipse(props: &EllipseProps) -> SceneNode {
    let rx = props.width / 2.0;
    let ry = props.height / 2.0;
    let node = SceneNode::new(Tag::Ellipse)
        .with_property("cx", props.x + rx)
        .with_property("cy", props.y + ry)
        .with_property("rx", rx)
        .with_property("ry", ry);
    props.paint.apply(node)
}

/// Polygon through an ordered list of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonProps {
    points: Vec<Point>,
    paint: ShapePaint,
}

impl PolygonProps {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl_shape_paint!(PolygonProps);

/// Renders a `polygon` node with points written as `x,y x,y ...`.
pub fn polygon(props: &PolygonProps) -> SceneNode {
    let points = props
        .points
        .iter()
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(" ");
    props
        .paint
        .apply(SceneNode::new(Tag::Polygon).with_property("points", points))
}

/// Path data with an optional bounding-box hint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathProps {
    d: String,
    x: Option<f32>,
    y: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    paint: ShapePaint,
}

impl PathProps {
    pub fn new(d: impl Into<String>) -> Self {
        Self {
            d: d.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Sets the measurement hint for the wrapping group.
    ///
    /// The path geometry itself is never scaled to fit the hint.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

impl_shape_paint!(PathProps);

/// Renders a `path` node wrapped in a group carrying the position and size
/// hint.
pub fn path(props: &PathProps) -> SceneNode {
    let leaf = props
        .paint
        .apply(SceneNode::new(Tag::Path).with_property("d", props.d.as_str()));

    let mut wrapper = GroupProps::at(props.x.unwrap_or(0.0), props.y.unwrap_or(0.0));
    if let (Some(width), Some(height)) = (props.width, props.height) {
        wrapper = wrapper.with_size(width, height);
    }
    super::group(wrapper, vec![leaf])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_properties() {
        let node = rect(
            &RectProps::new(100.0, 40.0)
                .with_radius(20.0)
                .with_fill("#1783ff")
                .with_stroke(StrokeDefinition::solid("red", 1.0))
                .with_id("bg"),
        );
        assert_eq!(node.tag(), Tag::Rect);
        assert_eq!(node.number("width"), Some(100.0));
        assert_eq!(node.number("rx"), Some(20.0));
        assert_eq!(node.text("fill"), Some("#1783ff"));
        assert_eq!(node.text("stroke"), Some("red"));
        assert_eq!(node.id(), Some("bg"));
    }

    #[test]
    fn test_rect_clamps_negative_size() {
        let node = rect(&RectProps::new(-5.0, 10.0));
        assert_eq!(node.number("width"), Some(0.0));
    }

    #[test]
    fn test_ellipse_converts_box_to_center() {
        let node = ellipse(&EllipseProps::new(20.0, 10.0).with_position(5.0, 5.0));
        assert_eq!(node.number("cx"), Some(15.0));
        assert_eq!(node.number("cy"), Some(10.0));
        assert_eq!(node.number("rx"), Some(10.0));
        assert_eq!(node.number("ry"), Some(5.0));
    }

    #[test]
    fn test_circle_centered_on_point() {
        let node = ellipse(&EllipseProps::circle(Point::new(50.0, 60.0), 6.0));
        assert_eq!(node.number("cx"), Some(50.0));
        assert_eq!(node.number("cy"), Some(60.0));
        assert_eq!(node.number("rx"), Some(6.0));
    }

    #[test]
    fn test_polygon_points() {
        let node = polygon(&PolygonProps::new([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.5),
        ]));
        assert_eq!(node.text("points"), Some("0,0 10,0 5,8.5"));
    }

    #[test]
    fn test_path_wraps_in_hinted_group() {
        let node = path(
            &PathProps::new("M0 0 L10 10")
                .with_position(3.0, 4.0)
                .with_size(10.0, 10.0)
                .with_fill("none"),
        );
        assert_eq!(node.tag(), Tag::Group);
        assert_eq!(node.number("x"), Some(3.0));
        assert_eq!(node.number("width"), Some(10.0));
        let leaf = &node.children()[0];
        assert_eq!(leaf.tag(), Tag::Path);
        assert_eq!(leaf.text("d"), Some("M0 0 L10 10"));
    }

    #[test]
    fn test_path_without_hint_has_no_size() {
        let node = path(&PathProps::new("M0 0"));
        assert!(node.property("width").is_none());
        assert!(node.property("x").is_none());
    }
}
