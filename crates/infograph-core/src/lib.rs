//! Infograph Core Types and Rendering Primitives
//!
//! This crate provides the scene-level foundation of Infograph. It includes:
//!
//! - **Scene**: the immutable scene node tree ([`scene::SceneNode`])
//! - **Draw**: pure primitive renderers for text, shapes, groups and paint
//!   servers ([`draw`] module)
//! - **Measure**: bounding boxes of scene subtrees ([`measure::Measurer`])
//! - **Flex**: single-line flex layout ([`flex::FlexLayout`])
//! - **Colors**: the color predicate and CSS color mixing ([`color`] module)
//! - **Geometry**: basic geometric types ([`geometry`] module)

pub mod color;
pub mod draw;
pub mod flex;
pub mod geometry;
pub mod measure;
pub mod scene;
