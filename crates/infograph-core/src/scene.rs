//! The scene node model.
//!
//! Every renderer produces a [`SceneNode`] and every layout function consumes
//! one. A scene node is an immutable tagged tree: once a renderer returns it,
//! nothing mutates it in place; layouts wrap or rebuild nodes instead.
//!
//! Nodes are created through the primitive renderers in [`crate::draw`],
//! which are the only producers of structural properties. That keeps the
//! tag-specific property set legal (a text node always carries `font-size`,
//! a group never carries `fill`). Callers may still attach an `id` and
//! `data-*` markers to any node.

use std::fmt;

use indexmap::IndexMap;

/// The closed set of node kinds a scene may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Group,
    Rect,
    Ellipse,
    Path,
    Polygon,
    Text,
    Defs,
    LinearGradient,
    Stop,
    Filter,
    FeFlood,
    FeColorMatrix,
    FeOffset,
    FeGaussianBlur,
    FeComposite,
    FeBlend,
}

impl Tag {
    /// Returns the SVG element name for this tag.
    pub fn name(self) -> &'static str {
        match self {
            Self::Group => "g",
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Path => "path",
            Self::Polygon => "polygon",
            Self::Text => "text",
            Self::Defs => "defs",
            Self::LinearGradient => "linearGradient",
            Self::Stop => "stop",
            Self::Filter => "filter",
            Self::FeFlood => "feFlood",
            Self::FeColorMatrix => "feColorMatrix",
            Self::FeOffset => "feOffset",
            Self::FeGaussianBlur => "feGaussianBlur",
            Self::FeComposite => "feComposite",
            Self::FeBlend => "feBlend",
        }
    }

    /// Returns `true` for nodes that define paint servers or filters.
    ///
    /// These subtrees are referenced by id and never occupy space.
    pub fn is_definition(self) -> bool {
        matches!(
            self,
            Self::Defs
                | Self::LinearGradient
                | Self::Stop
                | Self::Filter
                | Self::FeFlood
                | Self::FeColorMatrix
                | Self::FeOffset
                | Self::FeGaussianBlur
                | Self::FeComposite
                | Self::FeBlend
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property value: either a number or a string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f32),
    Text(String),
}

impl Value {
    /// Returns the numeric value, parsing text values when possible.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Returns the string value for text properties.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Number(value as f32)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An immutable node of the rendered scene.
///
/// # Examples
///
/// ```
/// # use infograph_core::draw::{self, RectProps};
/// # use infograph_core::scene::Tag;
/// let rect = draw::rect(&RectProps::new(10.0, 20.0).with_fill("red"));
/// let group = draw::group(Default::default(), vec![rect]).with_id("card");
///
/// assert_eq!(group.tag(), Tag::Group);
/// assert_eq!(group.id(), Some("card"));
/// assert_eq!(group.children()[0].number("width"), Some(10.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    tag: Tag,
    properties: IndexMap<String, Value>,
    children: Vec<SceneNode>,
    content: Option<String>,
}

impl SceneNode {
    pub(crate) fn new(tag: Tag) -> Self {
        Self {
            tag,
            properties: IndexMap::new(),
            children: Vec::new(),
            content: None,
        }
    }

    pub(crate) fn with_property(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    pub(crate) fn with_optional_property(
        self,
        name: &str,
        value: Option<impl Into<Value>>,
    ) -> Self {
        match value {
            Some(value) => self.with_property(name, value),
            None => self,
        }
    }

    pub(crate) fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    pub(crate) fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Returns a copy of this node carrying the given `id`.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_property("id", id.into())
    }

    /// Returns a copy of this node carrying a `data-*` marker.
    ///
    /// Names without the `data-` prefix are prefixed, so the marker can
    /// never shadow a structural property.
    pub fn with_data(self, name: &str, value: impl Into<Value>) -> Self {
        if name.starts_with("data-") {
            self.with_property(name, value)
        } else {
            self.with_property(&format!("data-{name}"), value)
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.text("id")
    }

    /// Returns the raw property value, if set.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Returns the numeric value of a property, if set and numeric.
    pub fn number(&self, name: &str) -> Option<f32> {
        self.property(name).and_then(Value::as_number)
    }

    /// Returns the string value of a property, if set and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.property(name).and_then(Value::as_str)
    }

    /// Iterates properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Returns the character content of a text leaf.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Iterates this node and all of its descendants in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Finds the first node in this subtree carrying the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&SceneNode> {
        self.descendants().find(|node| node.id() == Some(id))
    }

    /// Counts nodes in this subtree matching `predicate`.
    pub fn count_where(&self, predicate: impl Fn(&SceneNode) -> bool) -> usize {
        self.descendants().filter(|node| predicate(node)).count()
    }
}

/// Pre-order iterator over a scene subtree.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a SceneNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SceneNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
