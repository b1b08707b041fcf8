//! Group container.

use crate::scene::{SceneNode, Tag};

/// Container-level properties of a group node.
///
/// A group establishes a local coordinate space translated by `x`/`y`. The
/// optional width/height pair is a measurement hint: when both are present
/// the group measures as the box `(0, 0, width, height)` regardless of its
/// children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupProps {
    x: f32,
    y: f32,
    width: Option<f32>,
    height: Option<f32>,
    id: Option<String>,
    filter: Option<String>,
}

impl GroupProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates group properties translated to the given position.
    pub fn at(x: f32, y: f32) -> Self {
        Self::default().with_position(x, y)
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets the measurement hint.
    pub fn with_size(self, width: f32, height: f32) -> Self {
        self.with_width(width).with_height(height)
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width.max(0.0));
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height.max(0.0));
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// References a filter by id; written as `url(#id)`.
    pub fn with_filter(mut self, filter_id: &str) -> Self {
        self.filter = Some(format!("url(#{filter_id})"));
        self
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

/// Renders a group containing `children`.
///
/// Zero translations are left implicit. An empty child list is a valid,
/// empty container.
pub fn group(props: GroupProps, children: Vec<SceneNode>) -> SceneNode {
    let mut node = SceneNode::new(Tag::Group).with_optional_property("id", props.id);
    if props.x != 0.0 {
        node = node.with_property("x", props.x);
    }
    if props.y != 0.0 {
        node = node.with_property("y", props.y);
    }
    node.with_optional_property("width", props.width)
        .with_optional_property("height", props.height)
        .with_optional_property("filter", props.filter)
        .with_children(children)
}
