//! Paint servers and filters.
//!
//! These nodes are referenced by id (`url(#id)`) from fills, strokes and
//! group filters. The measurement subsystem skips them entirely.

use crate::scene::{SceneNode, Tag};

/// Coordinate system of a gradient vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GradientUnits {
    /// Fractions of the painted element's bounding box
    #[default]
    ObjectBoundingBox,
    /// Absolute coordinates in the referencing element's user space
    UserSpaceOnUse,
}

impl GradientUnits {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::ObjectBoundingBox => "objectBoundingBox",
            Self::UserSpaceOnUse => "userSpaceOnUse",
        }
    }
}

/// A color stop of a gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    offset: f32,
    color: String,
    opacity: Option<f32>,
}

impl GradientStop {
    /// Creates a stop at `offset` (0.0 to 1.0).
    pub fn new(offset: f32, color: impl Into<String>) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color: color.into(),
            opacity: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    fn render(&self) -> SceneNode {
        SceneNode::new(Tag::Stop)
            .with_property("offset", self.offset)
            .with_property("stop-color", self.color.as_str())
            .with_optional_property("stop-opacity", self.opacity)
    }
}

/// Properties of a `linearGradient` paint server.
///
/// The default vector runs left to right across the bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradientProps {
    id: String,
    units: GradientUnits,
    vector: [f32; 4],
    stops: Vec<GradientStop>,
}

impl LinearGradientProps {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            units: GradientUnits::default(),
            vector: [0.0, 0.0, 1.0, 0.0],
            stops: Vec::new(),
        }
    }

    pub fn with_units(mut self, units: GradientUnits) -> Self {
        self.units = units;
        self
    }

    /// Sets the gradient vector `(x1, y1) -> (x2, y2)`.
    pub fn with_vector(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.vector = [x1, y1, x2, y2];
        self
    }

    pub fn with_stop(mut self, stop: GradientStop) -> Self {
        self.stops.push(stop);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Renders a `linearGradient` node with its stops.
pub fn linear_gradient(props: &LinearGradientProps) -> SceneNode {
    let [x1, y1, x2, y2] = props.vector;
    SceneNode::new(Tag::LinearGradient)
        .with_property("id", props.id.as_str())
        .with_property("x1", x1)
        .with_property("y1", y1)
        .with_property("x2", x2)
        .with_property("y2", y2)
        .with_property("gradientUnits", props.units.to_svg_value())
        .with_children(props.stops.iter().map(GradientStop::render).collect())
}

/// Renders a `defs` container.
pub fn defs(children: Vec<SceneNode>) -> SceneNode {
    SceneNode::new(Tag::Defs).with_children(children)
}

/// Parameters of an offset, blurred drop shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadow {
    pub dx: f32,
    pub dy: f32,
    pub blur: f32,
    pub opacity: f32,
}

impl Default for DropShadow {
    fn default() -> Self {
        Self {
            dx: -7.0,
            dy: 7.0,
            blur: 7.5,
            opacity: 0.3,
        }
    }
}

/// Renders a drop-shadow `filter` that keeps the source graphic on top of
/// its shadow.
pub fn drop_shadow_filter(id: &str, shadow: DropShadow) -> SceneNode {
    let alpha_matrix = "0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 127 0";
    let shadow_matrix = format!("0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 {} 0", shadow.opacity);

    SceneNode::new(Tag::Filter)
        .with_property("id", id)
        .with_property("x", "-50%")
        .with_property("y", "-50%")
        .with_property("width", "200%")
        .with_property("height", "200%")
        .with_property("filterUnits", "userSpaceOnUse")
        .with_property("color-interpolation-filters", "sRGB")
        .with_children(vec![
            SceneNode::new(Tag::FeFlood)
                .with_property("flood-opacity", 0.0)
                .with_property("result", "BackgroundImageFix"),
            SceneNode::new(Tag::FeColorMatrix)
                .with_property("in", "SourceAlpha")
                .with_property("type", "matrix")
                .with_property("values", alpha_matrix)
                .with_property("result", "hardAlpha"),
            SceneNode::new(Tag::FeOffset)
                .with_property("dx", shadow.dx)
                .with_property("dy", shadow.dy),
            SceneNode::new(Tag::FeGaussianBlur).with_property("stdDeviation", shadow.blur),
            SceneNode::new(Tag::FeComposite)
                .with_property("in2", "hardAlpha")
                .with_property("operator", "out"),
            SceneNode::new(Tag::FeColorMatrix)
                .with_property("type", "matrix")
                .with_property("values", shadow_matrix),
            SceneNode::new(Tag::FeBlend)
                .with_property("mode", "normal")
                .with_property("in2", "BackgroundImageFix")
                .with_property("result", "effect1_dropShadow"),
            SceneNode::new(Tag::FeBlend)
                .with_property("mode", "normal")
                .with_property("in", "SourceGraphic")
                .with_property("in2", "effect1_dropShadow")
                .with_property("result", "shape"),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_gradient_user_space() {
        let node = linear_gradient(
            &LinearGradientProps::new("gradient-0-0-1")
                .with_units(GradientUnits::UserSpaceOnUse)
                .with_vector(10.0, 20.0, 30.0, 120.0)
                .with_stop(GradientStop::new(0.0, "red"))
                .with_stop(GradientStop::new(1.0, "blue").with_opacity(0.6)),
        );
        assert_eq!(node.tag(), Tag::LinearGradient);
        assert_eq!(node.id(), Some("gradient-0-0-1"));
        assert_eq!(node.text("gradientUnits"), Some("userSpaceOnUse"));
        assert_eq!(node.number("y2"), Some(120.0));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[1].number("stop-opacity"), Some(0.6));
        assert!(node.children()[0].property("stop-opacity").is_none());
    }

    #[test]
    fn test_stop_offset_clamped() {
        let node = GradientStop::new(1.5, "red").render();
        assert_eq!(node.number("offset"), Some(1.0));
    }

    #[test]
    fn test_drop_shadow_filter_structure() {
        let filter = drop_shadow_filter("shadow", DropShadow::default());
        assert_eq!(filter.id(), Some("shadow"));
        assert_eq!(filter.children().len(), 8);
        assert!(filter.children().iter().all(|child| child.tag().is_definition()));

        let offset = &filter.children()[2];
        assert_eq!(offset.number("dx"), Some(-7.0));
        assert_eq!(offset.number("dy"), Some(7.0));
    }

    #[test]
    fn test_defs_wraps_children() {
        let node = defs(vec![linear_gradient(&LinearGradientProps::new("g"))]);
        assert_eq!(node.tag(), Tag::Defs);
        assert_eq!(node.children().len(), 1);
    }
}
