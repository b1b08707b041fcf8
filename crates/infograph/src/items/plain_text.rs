use infograph_core::{draw::VerticalAlign, scene::SceneNode};

use crate::{components::ItemText, items::ItemProps};

const DEFAULT_WIDTH: f32 = 120.0;

/// A single text showing the label (or, failing that, the description).
pub fn plain_text(props: &ItemProps<'_>) -> SceneNode {
    let datum = props.datum();
    let content = datum.label().or(datum.desc()).unwrap_or_default();

    let mut text = ItemText::label(content)
        .with_position(props.x(), props.y())
        .with_width(props.options().width().unwrap_or(DEFAULT_WIDTH))
        .with_font_size(14.0)
        .with_font_weight("normal")
        .with_fill(props.accent_fill())
        .with_align(props.position_h().text_align(), VerticalAlign::Center);
    if let Some(height) = props.options().height() {
        text = text.with_height(height);
    }
    text.render(props.indexes())
}
