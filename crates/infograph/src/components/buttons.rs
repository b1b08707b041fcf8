//! Add and remove affordances.
//!
//! Buttons are plain scene nodes tagged for an external editing UI: the
//! group carries `data-element-type` (`btn-add` / `btn-remove`) and
//! `data-indexes` (the index path key the action applies to). Every button
//! has the same fixed size, so structures measure one and reuse the result.

use infograph_core::{
    draw::{self, EllipseProps, GroupProps, PathProps, StrokeCap, StrokeDefinition},
    geometry::{Point, Size},
    scene::SceneNode,
};

use crate::data::IndexPath;

/// Side length of every button.
pub const BUTTON_SIZE: f32 = 20.0;

const ADD_COLOR: &str = "#1783FF";
const REMOVE_COLOR: &str = "#F5222D";

/// Returns the size of a button.
pub fn button_size() -> Size {
    Size::new(BUTTON_SIZE, BUTTON_SIZE)
}

/// Renders an "insert here" button at `(x, y)`.
///
/// # Examples
///
/// ```
/// use infograph::components::btn_add;
/// use infograph::data::IndexPath;
///
/// let node = btn_add(&IndexPath::from(vec![0, 1]), 10.0, 20.0);
/// assert_eq!(node.id(), Some("btn-add-0-1"));
/// assert_eq!(node.text("data-element-type"), Some("btn-add"));
/// assert_eq!(node.text("data-indexes"), Some("0-1"));
/// ```
pub fn btn_add(indexes: &IndexPath, x: f32, y: f32) -> SceneNode {
    let half = BUTTON_SIZE / 2.0;
    button(
        "btn-add",
        indexes,
        x,
        y,
        ADD_COLOR,
        format!("M{} {half} H{} M{half} {} V{}", half - 5.0, half + 5.0, half - 5.0, half + 5.0),
    )
}

/// Renders a "remove this item" button at `(x, y)`.
pub fn btn_remove(indexes: &IndexPath, x: f32, y: f32) -> SceneNode {
    let half = BUTTON_SIZE / 2.0;
    button(
        "btn-remove",
        indexes,
        x,
        y,
        REMOVE_COLOR,
        format!("M{} {half} H{}", half - 5.0, half + 5.0),
    )
}

fn button(
    kind: &str,
    indexes: &IndexPath,
    x: f32,
    y: f32,
    color: &str,
    icon: String,
) -> SceneNode {
    let key = indexes.key();
    let circle = draw::ellipse(
        &EllipseProps::circle(Point::new(BUTTON_SIZE / 2.0, BUTTON_SIZE / 2.0), BUTTON_SIZE / 2.0)
            .with_fill("#ffffff")
            .with_stroke(StrokeDefinition::solid(color, 1.0)),
    );
    let glyph = draw::path(
        &PathProps::new(icon)
            .with_fill("none")
            .with_stroke(StrokeDefinition::solid(color, 2.0).with_cap(StrokeCap::Round)),
    );

    draw::group(
        GroupProps::at(x, y)
            .with_size(BUTTON_SIZE, BUTTON_SIZE)
            .with_id(format!("{kind}-{key}")),
        vec![circle, glyph],
    )
    .with_data("element-type", kind)
    .with_data("indexes", key)
}

/// Wraps buttons in the group the printer drops when affordances are off.
pub fn btns_group(buttons: Vec<SceneNode>) -> SceneNode {
    draw::group(GroupProps::new(), buttons).with_data("element-type", "btns-group")
}

/// Wraps rendered items.
pub fn items_group(items: Vec<SceneNode>) -> SceneNode {
    draw::group(GroupProps::new(), items).with_data("element-type", "items-group")
}

#[cfg(test)]
mod tests {
    use infograph_core::{geometry::Bounds, measure::Measurer};

    use super::*;

    #[test]
    fn test_buttons_have_fixed_size() {
        let measurer = Measurer::default();
        let add = btn_add(&IndexPath::top(0), 5.0, 6.0);
        let remove = btn_remove(&IndexPath::top(0), 0.0, 0.0);
        assert_eq!(measurer.measure(&add), Bounds::new(5.0, 6.0, 20.0, 20.0));
        assert_eq!(measurer.measure(&remove).to_size(), button_size());
    }

    #[test]
    fn test_remove_button_markers() {
        let node = btn_remove(&IndexPath::from(vec![1, 0]), 0.0, 0.0);
        assert_eq!(node.id(), Some("btn-remove-1-0"));
        assert_eq!(node.text("data-element-type"), Some("btn-remove"));
    }

    #[test]
    fn test_groups_are_tagged() {
        assert_eq!(
            btns_group(Vec::new()).text("data-element-type"),
            Some("btns-group")
        );
        assert_eq!(
            items_group(Vec::new()).text("data-element-type"),
            Some("items-group")
        );
    }
}
