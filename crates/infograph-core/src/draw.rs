//! Primitive renderers.
//!
//! Every function in this module is a pure mapping from a property struct to
//! exactly one [`SceneNode`](crate::scene::SceneNode). They are the only
//! producers of structural node properties, which keeps each tag's property
//! set legal.
//!
//! # Overview
//!
//! - [`text`] - a text leaf with an optional background rectangle
//! - [`rect`], [`ellipse`], [`polygon`], [`path`] - shapes
//! - [`group`] - a container with optional translation and size hint
//! - [`defs`], [`linear_gradient`], [`drop_shadow_filter`] - paint servers
//! - [`StrokeDefinition`] - stroke configuration shared by all shapes

mod group;
mod paint;
mod shape;
mod stroke;
mod text;

pub use group::{GroupProps, group};
pub use paint::{
    DropShadow, GradientStop, GradientUnits, LinearGradientProps, defs, drop_shadow_filter,
    linear_gradient,
};
pub use shape::{EllipseProps, PathProps, PolygonProps, RectProps, ellipse, path, polygon, rect};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeStyle};
pub use text::{HorizontalAlign, TextProps, VerticalAlign, text};
