//! Structures: whole-infographic layouts.
//!
//! A structure receives the data, its own layout options and the renderers
//! wired for the slots it declares, and returns the finalized scene. Layout
//! is two-pass: items are rendered at the origin and measured, positions are
//! computed from those measurements, then items are rendered again at their
//! final coordinates.
//!
//! Built-in structures:
//!
//! - [`hierarchy_tree`] - a tidy tree with styled edges
//! - [`list_row`] - items in one row
//! - [`sequence_zigzag`] - numbered 3D pucks alternating up and down
//! - [`chart_combo`] - columns and a line on two value axes

mod chart_combo;
mod hierarchy_tree;
mod list_row;
mod sequence_zigzag;

pub use chart_combo::{ChartComboOptions, Padding, chart_combo};
pub use hierarchy_tree::{
    ColorMode, EdgeColorMode, EdgeMarker, EdgeOrigin, EdgeStyle, EdgeType, HierarchyTreeOptions,
    hierarchy_tree,
};
pub use list_row::{ListRowOptions, list_row};
pub use sequence_zigzag::{SequenceZigzagOptions, sequence_zigzag};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use infograph_core::{
    flex::{Align, FlexLayout},
    measure::Measurer,
    scene::SceneNode,
};

use crate::{
    components::{TitleFn, TitleProps},
    data::{Data, Datum, IndexPath},
    error::InfographicError,
    items::{ItemOptions, ItemProps, PositionH},
    registry::{ItemFn, Slot},
    theme::{Theme, ThemeColors},
};

/// Everything a structure render function receives.
///
/// The title and item renderers are present only when the structure
/// declares the matching slot.
#[derive(Debug, Clone)]
pub struct StructureProps<'a> {
    key: &'a str,
    data: &'a Data,
    options: &'a Map<String, Value>,
    theme: &'a Theme,
    measurer: &'a Measurer,
    item_options: &'a ItemOptions,
    title: Option<TitleFn>,
    item: Option<ItemFn>,
}

impl<'a> StructureProps<'a> {
    pub fn new(
        key: &'a str,
        data: &'a Data,
        options: &'a Map<String, Value>,
        theme: &'a Theme,
        measurer: &'a Measurer,
        item_options: &'a ItemOptions,
    ) -> Self {
        Self {
            key,
            data,
            options,
            theme,
            measurer,
            item_options,
            title: None,
            item: None,
        }
    }

    pub fn with_title(mut self, title: TitleFn) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_item(mut self, item: ItemFn) -> Self {
        self.item = Some(item);
        self
    }

    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn data(&self) -> &'a Data {
        self.data
    }

    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    pub fn measurer(&self) -> &'a Measurer {
        self.measurer
    }

    pub fn item_options(&self) -> &'a ItemOptions {
        self.item_options
    }

    /// Decodes the structure's layout options.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::InvalidOptions`] when an option has the
    /// wrong shape.
    pub fn layout_options<T: DeserializeOwned>(&self) -> Result<T, InfographicError> {
        T::deserialize(Value::Object(self.options.clone())).map_err(|source| {
            InfographicError::InvalidOptions {
                key: self.key.to_string(),
                source,
            }
        })
    }

    /// Returns the wired item renderer.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::MissingSlot`] when no item renderer was
    /// wired.
    pub fn item(&self) -> Result<ItemRenderer<'a>, InfographicError> {
        let render = self.item.ok_or_else(|| InfographicError::MissingSlot {
            structure: self.key.to_string(),
            slot: Slot::Item,
        })?;
        Ok(ItemRenderer {
            render,
            data: self.data,
            theme: self.theme,
            options: self.item_options,
            measurer: self.measurer,
        })
    }

    /// Renders the title block, or `None` without a wired title renderer or
    /// without a title and description to show.
    pub fn render_title(&self) -> Option<SceneNode> {
        let title = self.title?;
        let data = self.data;
        if data.title().is_none_or(str::is_empty) && data.desc().is_none_or(str::is_empty) {
            return None;
        }
        let colors = self.theme.theme_colors(None);
        Some(title(&TitleProps::new(
            data.title(),
            data.desc(),
            &colors,
            self.measurer,
        )))
    }

    /// Stacks the title (when present) over `body` in a centered column.
    pub(crate) fn compose(&self, body: SceneNode, gap: f32) -> SceneNode {
        let mut children = Vec::with_capacity(2);
        children.extend(self.render_title());
        children.push(body);
        FlexLayout::column()
            .with_align(Align::Center)
            .with_gap(gap)
            .with_id("infographic-container")
            .render(self.measurer, children)
    }
}

/// A bound item renderer.
#[derive(Debug, Clone, Copy)]
pub struct ItemRenderer<'a> {
    render: ItemFn,
    data: &'a Data,
    theme: &'a Theme,
    options: &'a ItemOptions,
    measurer: &'a Measurer,
}

impl<'a> ItemRenderer<'a> {
    /// Renders `datum` at `(x, y)` and tags the node with its index path.
    pub fn render(
        &self,
        indexes: &IndexPath,
        datum: &Datum,
        position: (f32, f32),
        position_h: PositionH,
        colors: ThemeColors,
    ) -> SceneNode {
        let props = ItemProps::new(
            indexes.clone(),
            datum,
            self.data,
            colors,
            self.options,
            self.measurer,
        )
        .with_position(position.0, position.1)
        .with_position_h(position_h);
        (self.render)(&props)
            .with_data("element-type", "item")
            .with_data("indexes", indexes.key())
    }

    /// Renders `datum` at the origin and measures it.
    pub fn measure(
        &self,
        indexes: &IndexPath,
        datum: &Datum,
        position_h: PositionH,
        colors: ThemeColors,
    ) -> infograph_core::geometry::Bounds {
        self.measurer
            .measure(&self.render(indexes, datum, (0.0, 0.0), position_h, colors))
    }

    /// Colors for an item without a palette override.
    pub fn default_colors(&self) -> ThemeColors {
        self.theme.theme_colors(None)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::{Map, Value};

    use infograph_core::{measure::Measurer, scene::SceneNode};

    use super::StructureProps;
    use crate::{
        components,
        data::Data,
        error::InfographicError,
        items::{self, ItemOptions},
        registry::{ItemFn, StructureFn},
        theme::Theme,
    };

    /// Renders `structure` with the plain-text item, title wired.
    pub(crate) fn render(
        structure: StructureFn,
        data: &Data,
        options: Value,
    ) -> Result<SceneNode, InfographicError> {
        render_with(structure, items::plain_text, data, options)
    }

    pub(crate) fn render_with(
        structure: StructureFn,
        item: ItemFn,
        data: &Data,
        options: Value,
    ) -> Result<SceneNode, InfographicError> {
        let options: Map<String, Value> = match options {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let theme = Theme::default();
        let measurer = Measurer::default();
        let item_options = ItemOptions::default();
        let props = StructureProps::new("test", data, &options, &theme, &measurer, &item_options)
            .with_title(components::title)
            .with_item(item);
        structure(&props)
    }

    pub(crate) fn count_type(node: &SceneNode, element_type: &str) -> usize {
        node.count_where(|n| n.text("data-element-type") == Some(element_type))
    }
}
