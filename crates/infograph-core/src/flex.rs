//! Flex-style layout container.
//!
//! [`FlexLayout`] stacks already-rendered children along one axis using
//! their measured bounds, the way a single-line CSS flexbox does. It never
//! wraps onto multiple lines; overflow along the main axis is the caller's
//! concern.
//!
//! # Examples
//!
//! ```
//! # use infograph_core::draw::{self, RectProps};
//! # use infograph_core::flex::{Align, FlexLayout};
//! # use infograph_core::measure::Measurer;
//! let measurer = Measurer::default();
//! let column = FlexLayout::column()
//!     .with_align(Align::Center)
//!     .with_gap(10.0)
//!     .render(
//!         &measurer,
//!         vec![
//!             draw::rect(&RectProps::new(100.0, 20.0)),
//!             draw::rect(&RectProps::new(50.0, 30.0)),
//!         ],
//!     );
//!
//! let bounds = measurer.measure(&column);
//! assert_eq!(bounds.width(), 100.0);
//! assert_eq!(bounds.height(), 60.0);
//! ```

use log::debug;
use serde::Deserialize;

use crate::{
    draw::{self, GroupProps},
    geometry::Bounds,
    measure::Measurer,
    scene::SceneNode,
};

/// The main axis of a flex container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
}

/// Distribution of leftover main-axis space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
}

/// Placement of children on the cross axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    fn offset(self, available: f32, used: f32) -> f32 {
        let free = (available - used).max(0.0);
        match self {
            Self::Start => 0.0,
            Self::Center => free / 2.0,
            Self::End => free,
        }
    }
}

impl Justify {
    fn offset(self, available: f32, used: f32) -> f32 {
        let free = (available - used).max(0.0);
        match self {
            Self::Start => 0.0,
            Self::Center => free / 2.0,
            Self::End => free,
        }
    }
}

/// A single-line flex container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlexLayout {
    direction: FlexDirection,
    justify: Justify,
    align: Align,
    gap: f32,
    width: Option<f32>,
    height: Option<f32>,
    id: Option<String>,
}

impl FlexLayout {
    pub fn new(direction: FlexDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn row() -> Self {
        Self::new(FlexDirection::Row)
    }

    pub fn column() -> Self {
        Self::new(FlexDirection::Column)
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    fn main_size(&self, bounds: Bounds) -> f32 {
        match self.direction {
            FlexDirection::Row => bounds.width(),
            FlexDirection::Column => bounds.height(),
        }
    }

    fn cross_size(&self, bounds: Bounds) -> f32 {
        match self.direction {
            FlexDirection::Row => bounds.height(),
            FlexDirection::Column => bounds.width(),
        }
    }

    /// Measures and positions `children`, returning one group.
    ///
    /// Each child is wrapped in a group translated so that its measured box
    /// lands on its slot, whatever the child's own bounds origin.
    pub fn render(&self, measurer: &Measurer, children: Vec<SceneNode>) -> SceneNode {
        let measured: Vec<Bounds> = children.iter().map(|child| measurer.measure(child)).collect();

        let gaps = self.gap * measured.len().saturating_sub(1) as f32;
        let content_main = measured.iter().map(|b| self.main_size(*b)).sum::<f32>() + gaps;
        let content_cross = measured
            .iter()
            .map(|b| self.cross_size(*b))
            .fold(0.0, f32::max);

        let (explicit_main, explicit_cross) = match self.direction {
            FlexDirection::Row => (self.width, self.height),
            FlexDirection::Column => (self.height, self.width),
        };
        let container_main = explicit_main.unwrap_or(content_main);
        let container_cross = explicit_cross.unwrap_or(content_cross);

        debug!(
            children = measured.len(),
            main = container_main,
            cross = container_cross;
            "Flex layout"
        );

        let mut cursor = self.justify.offset(container_main, content_main);
        let mut placed = Vec::with_capacity(children.len());
        for (child, bounds) in children.into_iter().zip(measured) {
            let cross = self.align.offset(container_cross, self.cross_size(bounds));
            let (target_x, target_y) = match self.direction {
                FlexDirection::Row => (cursor, cross),
                FlexDirection::Column => (cross, cursor),
            };
            placed.push(draw::group(
                GroupProps::at(target_x - bounds.x(), target_y - bounds.y()),
                vec![child],
            ));
            cursor += self.main_size(bounds) + self.gap;
        }

        let mut container = GroupProps::new();
        if let (Some(width), Some(height)) = (self.width, self.height) {
            container = container.with_size(width, height);
        }
        if let Some(id) = &self.id {
            container = container.with_id(id.as_str());
        }
        draw::group(container, placed)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::RectProps;

    fn rect(width: f32, height: f32) -> SceneNode {
        draw::rect(&RectProps::new(width, height))
    }

    fn offsets(node: &SceneNode) -> Vec<(f32, f32)> {
        node.children()
            .iter()
            .map(|slot| (slot.number("x").unwrap_or(0.0), slot.number("y").unwrap_or(0.0)))
            .collect()
    }

    #[test]
    fn test_row_with_gap() {
        let measurer = Measurer::default();
        let row = FlexLayout::row()
            .with_gap(5.0)
            .render(&measurer, vec![rect(10.0, 10.0), rect(20.0, 30.0)]);
        assert_eq!(offsets(&row), vec![(0.0, 0.0), (15.0, 0.0)]);
        assert_eq!(measurer.measure(&row), Bounds::new(0.0, 0.0, 35.0, 30.0));
    }

    #[test]
    fn test_column_center_alignment() {
        let measurer = Measurer::default();
        let column = FlexLayout::column()
            .with_align(Align::Center)
            .render(&measurer, vec![rect(100.0, 10.0), rect(40.0, 10.0)]);
        assert_eq!(offsets(&column), vec![(0.0, 0.0), (30.0, 10.0)]);
    }

    #[test]
    fn test_align_end() {
        let measurer = Measurer::default();
        let row = FlexLayout::row()
            .with_align(Align::End)
            .render(&measurer, vec![rect(10.0, 40.0), rect(10.0, 10.0)]);
        assert_eq!(offsets(&row), vec![(0.0, 0.0), (10.0, 30.0)]);
    }

    #[test]
    fn test_justify_distributes_leftover_space() {
        let measurer = Measurer::default();
        let centered = FlexLayout::row()
            .with_width(100.0)
            .with_justify(Justify::Center)
            .render(&measurer, vec![rect(20.0, 10.0), rect(20.0, 10.0)]);
        assert_eq!(offsets(&centered), vec![(30.0, 0.0), (50.0, 0.0)]);

        let end = FlexLayout::row()
            .with_width(100.0)
            .with_justify(Justify::End)
            .render(&measurer, vec![rect(20.0, 10.0)]);
        assert_eq!(offsets(&end), vec![(80.0, 0.0)]);
    }

    #[test]
    fn test_child_bounds_origin_is_compensated() {
        let measurer = Measurer::default();
        let shifted = draw::rect(&RectProps::new(10.0, 10.0).with_position(-20.0, 5.0));
        let row = FlexLayout::row().render(&measurer, vec![shifted]);
        let bounds = measurer.measure(&row);
        assert_approx_eq!(f32, bounds.x(), 0.0);
        assert_approx_eq!(f32, bounds.y(), 0.0);
    }

    #[test]
    fn test_empty_children() {
        let measurer = Measurer::default();
        let node = FlexLayout::column().with_id("c").render(&measurer, Vec::new());
        assert!(node.children().is_empty());
        assert_eq!(node.id(), Some("c"));
    }
}
