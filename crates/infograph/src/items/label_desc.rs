use infograph_core::{
    draw::{self, GroupProps, VerticalAlign},
    scene::SceneNode,
};

use crate::{components::ItemText, items::ItemProps};

const DEFAULT_WIDTH: f32 = 200.0;
const LINE_GAP: f32 = 4.0;

/// Label over an optional description and an optional value.
///
/// Absent parts take no space.
pub fn label_desc(props: &ItemProps<'_>) -> SceneNode {
    let datum = props.datum();
    let indexes = props.indexes();
    let width = props.options().width().unwrap_or(DEFAULT_WIDTH);
    let align = props.position_h().text_align();

    let label = ItemText::label(datum.label().unwrap_or_default())
        .with_width(width)
        .with_font_size(16.0)
        .with_fill(props.accent_fill())
        .with_align(align, VerticalAlign::Top);
    let mut cursor = label.height();
    let mut children = vec![label.render(indexes)];

    if let Some(desc) = datum.desc().filter(|desc| !desc.is_empty()) {
        let desc = ItemText::desc(desc)
            .with_position(0.0, cursor + LINE_GAP)
            .with_width(width)
            .with_fill(props.colors().color_text.as_str())
            .with_align(align, VerticalAlign::Top);
        cursor += LINE_GAP + desc.height();
        children.push(desc.render(indexes));
    }

    if let Some(value) = datum.value() {
        let value = ItemText::value(value)
            .with_position(0.0, cursor + LINE_GAP)
            .with_width(width)
            .with_font_weight("bold")
            .with_fill(props.colors().color_primary.as_str())
            .with_align(align, VerticalAlign::Top);
        children.push(value.render(indexes));
    }

    draw::group(GroupProps::at(props.x(), props.y()), children)
}
