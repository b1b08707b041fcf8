use infograph_core::{
    draw::{self, GroupProps, RectProps, StrokeDefinition, VerticalAlign},
    scene::SceneNode,
};

use crate::{components::ItemText, items::ItemProps};

const DEFAULT_WIDTH: f32 = 300.0;
const DEFAULT_HEIGHT: f32 = 40.0;
const DEFAULT_PADDING: f32 = 16.0;

/// A capsule filled with the soft primary color, holding the label.
pub fn rounded_rect_node(props: &ItemProps<'_>) -> SceneNode {
    let options = props.options();
    let width = options.width().unwrap_or(DEFAULT_WIDTH);
    let height = options.height().unwrap_or(DEFAULT_HEIGHT);
    let padding = options.padding().unwrap_or(DEFAULT_PADDING);
    let colors = props.colors();

    let capsule = draw::rect(
        &RectProps::new(width, height)
            .with_radius(height / 2.0)
            .with_fill(colors.color_primary_bg.as_str())
            .with_stroke(StrokeDefinition::solid(colors.color_primary.as_str(), 1.0))
            .with_opacity(0.8),
    );

    let label = ItemText::label(props.datum().label().unwrap_or_default())
        .with_position(padding, padding)
        .with_width(width - padding * 2.0)
        .with_height(height - padding * 2.0)
        .with_font_size(14.0)
        .with_font_weight("500")
        .with_fill(colors.color_text.as_str())
        .with_align(props.position_h().text_align(), VerticalAlign::Center)
        .render(props.indexes());

    draw::group(GroupProps::at(props.x(), props.y()), vec![capsule, label])
}

#[cfg(test)]
mod tests {
    use infograph_core::{geometry::Bounds, measure::Measurer};

    use super::*;
    use crate::{
        data::Datum,
        items::{ItemOptions, test_support::render},
    };

    #[test]
    fn test_default_size() {
        let node = render(rounded_rect_node, &Datum::new("Root"), &ItemOptions::default());
        assert_eq!(
            Measurer::default().measure(&node),
            Bounds::new(0.0, 0.0, 300.0, 40.0)
        );
    }

    #[test]
    fn test_capsule_radius_and_colors() {
        let node = render(
            rounded_rect_node,
            &Datum::new("Root"),
            &ItemOptions::default().with_width(120.0).with_height(30.0),
        );
        let capsule = &node.children()[0];
        assert_eq!(capsule.number("rx"), Some(15.0));
        assert_eq!(capsule.text("stroke"), Some("#1783FF"));
        assert_eq!(capsule.number("opacity"), Some(0.8));
    }
}
