//! Items: the repeating unit of an infographic.
//!
//! An item renders one [`Datum`] at the position carried by its
//! [`ItemProps`]. Items must be pure: structures call them once to measure
//! and again to place the final node, and both calls must agree.
//!
//! Built-in items:
//!
//! - [`plain_text`] - a single centered text
//! - [`rounded_rect_node`] - a capsule with a label, used by trees
//! - [`label_desc`] - label, optional description and optional value stacked

mod label_desc;
mod plain_text;
mod rounded_rect_node;

pub use label_desc::label_desc;
pub use plain_text::plain_text;
pub use rounded_rect_node::rounded_rect_node;

use serde::Deserialize;

use infograph_core::{draw::HorizontalAlign, measure::Measurer};

use crate::{
    data::{Data, Datum, IndexPath},
    theme::ThemeColors,
};

/// Horizontal placement hint a structure gives an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PositionH {
    #[default]
    Normal,
    Center,
    /// Mirrored, for items on the left of a symmetric layout.
    Flipped,
}

impl PositionH {
    /// Text alignment matching this placement.
    pub fn text_align(self) -> HorizontalAlign {
        match self {
            Self::Normal => HorizontalAlign::Left,
            Self::Center => HorizontalAlign::Center,
            Self::Flipped => HorizontalAlign::Right,
        }
    }
}

/// Item settings from the render options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemOptions {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    use_palette_color: bool,
}

impl ItemOptions {
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_palette_color(mut self, use_palette_color: bool) -> Self {
        self.use_palette_color = use_palette_color;
        self
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    pub fn padding(&self) -> Option<f32> {
        self.padding
    }

    pub fn use_palette_color(&self) -> bool {
        self.use_palette_color
    }
}

/// Everything an item render function receives.
#[derive(Debug, Clone)]
pub struct ItemProps<'a> {
    indexes: IndexPath,
    datum: &'a Datum,
    data: &'a Data,
    x: f32,
    y: f32,
    position_h: PositionH,
    colors: ThemeColors,
    options: &'a ItemOptions,
    measurer: &'a Measurer,
}

impl<'a> ItemProps<'a> {
    pub fn new(
        indexes: IndexPath,
        datum: &'a Datum,
        data: &'a Data,
        colors: ThemeColors,
        options: &'a ItemOptions,
        measurer: &'a Measurer,
    ) -> Self {
        Self {
            indexes,
            datum,
            data,
            x: 0.0,
            y: 0.0,
            position_h: PositionH::default(),
            colors,
            options,
            measurer,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_position_h(mut self, position_h: PositionH) -> Self {
        self.position_h = position_h;
        self
    }

    pub fn indexes(&self) -> &IndexPath {
        &self.indexes
    }

    pub fn datum(&self) -> &'a Datum {
        self.datum
    }

    pub fn data(&self) -> &'a Data {
        self.data
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position_h(&self) -> PositionH {
        self.position_h
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn options(&self) -> &'a ItemOptions {
        self.options
    }

    pub fn measurer(&self) -> &'a Measurer {
        self.measurer
    }

    /// The fill an item uses for its main text.
    fn accent_fill(&self) -> &str {
        if self.options.use_palette_color {
            &self.colors.color_primary
        } else {
            &self.colors.color_text
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::theme::Theme;

    pub(crate) fn render(
        item: fn(&ItemProps<'_>) -> infograph_core::scene::SceneNode,
        datum: &Datum,
        options: &ItemOptions,
    ) -> infograph_core::scene::SceneNode {
        let data = Data::default();
        let measurer = Measurer::default();
        let colors = Theme::default().theme_colors(Some("#1783FF"));
        item(&ItemProps::new(IndexPath::top(0), datum, &data, colors, options, &measurer))
    }
}
