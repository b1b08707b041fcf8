//! Zig-zag sequence of numbered 3D pucks.
//!
//! Pucks alternate between a top row (even steps) and a bottom row (odd
//! steps). The item of an even step hangs below its puck, the item of an
//! odd step stands above it, so both rows of items face the middle band.

use log::debug;
use serde::Deserialize;

use infograph_core::{
    draw::{
        self, DropShadow, GradientStop, GradientUnits, GroupProps, HorizontalAlign,
        LinearGradientProps, PathProps, TextProps, VerticalAlign,
    },
    scene::SceneNode,
};

use crate::{
    components::{btn_add, btn_remove, btns_group, button_size, items_group},
    data::IndexPath,
    error::InfographicError,
    items::PositionH,
    structures::StructureProps,
};

const TITLE_GAP: f32 = 30.0;

const PUCK_WIDTH: f32 = 120.0;
const PUCK_HEIGHT: f32 = 108.0;
const ITEM_TO_PUCK_GAP: f32 = 30.0;

const SHADOW_FILTER_ID: &str = "sequence-zigzag-pucks-3d-shadow-filter";

const PUCK_TOP_PATH: &str = "M0 34.4903C0 37.8781 0.849901 41.1522 2.43491 44.2451C4.23514 47.7639 6.98606 51.0482 10.5164 54.0008C21.3317 63.0477 39.4607 68.9799 59.9998 68.9799C80.5391 68.9799 98.6691 63.0477 109.483 54.0008C113.013 51.0482 115.765 47.7639 117.564 44.2451C119.149 41.1522 120 37.8781 120 34.4903C120 15.4417 93.1366 0 59.9998 0C26.8632 0 0 15.4417 0 34.4903Z";

const PUCK_MIDDLE_PATH: &str = "M0 34.4904V53.9996C0 57.3885 0.849901 60.6616 2.43491 63.7555C9.75384 78.0548 32.7566 88.4909 59.9998 88.4909C87.2438 88.4909 110.246 78.0548 117.564 63.7555C119.149 60.6616 120 57.3885 120 53.9996V34.4904C120 37.8781 119.149 41.1522 117.564 44.2451C115.765 47.7639 113.013 51.0482 109.483 54.0008C98.6691 63.0477 80.5391 68.9799 59.9998 68.9799C39.4607 68.9799 21.3317 63.0477 10.5164 54.0008C6.98606 51.0482 4.23514 47.7639 2.43491 44.2451C0.849901 41.1522 0 37.8781 0 34.4904Z";

const PUCK_BOTTOM_PATH: &str = "M0 53.9996V73.5106C0 92.5595 26.8632 108 59.9998 108C93.1366 108 120 92.5595 120 73.5106V53.9996C120 57.3885 119.149 60.6616 117.564 63.7555C110.246 78.0548 87.2438 88.4909 59.9998 88.4909C32.7566 88.4909 9.75384 78.0548 2.43491 63.7555C0.849901 60.6616 0 57.3885 0 53.9996Z";

/// Layout options of the zig-zag sequence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SequenceZigzagOptions {
    /// Horizontal gap between two pucks.
    gap: f32,
}

impl Default for SequenceZigzagOptions {
    fn default() -> Self {
        Self { gap: 80.0 }
    }
}

/// Renders one puck with its number, at `(x, y)`.
fn puck(index: usize, x: f32, y: f32, color: &str) -> SceneNode {
    let middle_id = format!("puck-gradient-middle-{index}");
    let bottom_id = format!("puck-gradient-bottom-{index}");

    let gradients = draw::defs(vec![
        draw::linear_gradient(
            &LinearGradientProps::new(middle_id.as_str())
                .with_units(GradientUnits::UserSpaceOnUse)
                .with_vector(115.0, 55.9991, 15.0002, 55.9991)
                .with_stop(GradientStop::new(0.0, color))
                .with_stop(GradientStop::new(1.0, color).with_opacity(0.6)),
        ),
        draw::linear_gradient(
            &LinearGradientProps::new(bottom_id.as_str())
                .with_units(GradientUnits::UserSpaceOnUse)
                .with_vector(115.0, 72.1803, 15.0002, 72.1803)
                .with_stop(GradientStop::new(0.0, "#F4F4FB"))
                .with_stop(GradientStop::new(1.0, "#8E8C90")),
        ),
    ]);

    let number = draw::text(
        &TextProps::new((index + 1).to_string())
            .with_position(40.0, 15.0)
            .with_size(50.0, 50.0)
            .with_font_size(40.0)
            .with_font_weight("bold")
            .with_fill("#FFFFFF")
            .with_align_horizontal(HorizontalAlign::Center)
            .with_align_vertical(VerticalAlign::Center),
    );

    let body = draw::group(
        GroupProps::new().with_size(PUCK_WIDTH, PUCK_HEIGHT),
        vec![
            draw::path(&PathProps::new(PUCK_TOP_PATH).with_fill(color)),
            draw::path(&PathProps::new(PUCK_MIDDLE_PATH).with_fill(format!("url(#{middle_id})"))),
            draw::path(&PathProps::new(PUCK_BOTTOM_PATH).with_fill(format!("url(#{bottom_id})"))),
            number,
        ],
    );

    draw::group(
        GroupProps::at(x, y)
            .with_size(PUCK_WIDTH, PUCK_HEIGHT)
            .with_id(format!("puck-{index}"))
            .with_filter(SHADOW_FILTER_ID),
        vec![gradients, body],
    )
}

/// Renders a numbered zig-zag sequence.
///
/// # Errors
///
/// Returns an error when the options cannot be decoded or no item renderer
/// is wired.
pub fn sequence_zigzag(props: &StructureProps<'_>) -> Result<SceneNode, InfographicError> {
    let options: SequenceZigzagOptions = props.layout_options()?;
    let item = props.item()?;
    let theme = props.theme();
    let button = button_size();
    let items = props.data().items();
    let gap = options.gap;

    let Some(first) = items.first() else {
        let body = btns_group(vec![btn_add(&IndexPath::top(0), 0.0, 0.0)]);
        return Ok(props.compose(body, TITLE_GAP));
    };

    let colors = item.default_colors();
    let size = item.measure(&IndexPath::top(0), first, PositionH::Center, colors.clone());
    let puck_y = |index: usize| {
        if index % 2 == 0 {
            0.0
        } else {
            size.height() + ITEM_TO_PUCK_GAP
        }
    };

    let mut pucks = Vec::with_capacity(items.len());
    let mut item_nodes = Vec::with_capacity(items.len());
    let mut buttons = Vec::with_capacity(items.len() * 2 + 1);

    for (index, datum) in items.iter().enumerate() {
        let indexes = IndexPath::top(index);
        let puck_x = index as f32 * (PUCK_WIDTH + gap);
        let y = puck_y(index);
        pucks.push(puck(index, puck_x, y, &theme.palette_color(&indexes)));

        let item_x = puck_x + (PUCK_WIDTH - size.width()) / 2.0;
        let item_y = if index % 2 == 0 {
            y + PUCK_HEIGHT + ITEM_TO_PUCK_GAP
        } else {
            y - ITEM_TO_PUCK_GAP - size.height()
        };
        item_nodes.push(item.render(
            &indexes,
            datum,
            (item_x, item_y),
            PositionH::Center,
            colors.clone(),
        ));
        buttons.push(btn_remove(
            &indexes,
            item_x + size.width() - button.width() / 2.0,
            item_y + size.height() - button.height() / 2.0,
        ));

        let center_y = y + PUCK_HEIGHT / 2.0;
        if index == 0 {
            buttons.push(btn_add(
                &indexes,
                puck_x + PUCK_WIDTH / 2.0 - button.width() / 2.0 - (gap + PUCK_WIDTH) / 2.0,
                center_y - button.height() / 2.0,
            ));
        }
        let after_x = puck_x + PUCK_WIDTH + gap / 2.0 - button.width() / 2.0;
        let after_y = if index + 1 < items.len() {
            let next_center_y = puck_y(index + 1) + PUCK_HEIGHT / 2.0;
            (center_y + next_center_y) / 2.0
        } else {
            center_y
        };
        buttons.push(btn_add(
            &IndexPath::top(index + 1),
            after_x,
            after_y - button.height() / 2.0,
        ));
    }

    debug!(
        items = items.len(),
        item_width = size.width(),
        item_height = size.height();
        "Sequence zigzag layout"
    );

    let body = draw::group(
        GroupProps::new(),
        vec![
            draw::defs(vec![draw::drop_shadow_filter(
                SHADOW_FILTER_ID,
                DropShadow::default(),
            )]),
            draw::group(GroupProps::new(), pucks),
            items_group(item_nodes),
            btns_group(buttons),
        ],
    );
    Ok(props.compose(body, TITLE_GAP))
}

#[cfg(test)]
mod tests {
    use infograph_core::scene::Tag;
    use serde_json::json;

    use super::*;
    use crate::{
        data::{Data, Datum},
        structures::test_support::{count_type, render},
    };

    fn steps(count: usize) -> Data {
        Data::new((0..count).map(|i| Datum::new(format!("Step {i}"))).collect())
    }

    #[test]
    fn test_pucks_alternate_rows() {
        let scene = render(sequence_zigzag, &steps(3), json!({})).unwrap();
        let y = |id: &str| scene.find_by_id(id).and_then(|n| n.number("y"));
        assert_eq!(y("puck-0"), None);
        assert_eq!(y("puck-1"), Some(20.0 + ITEM_TO_PUCK_GAP));
        assert_eq!(y("puck-2"), None);
        assert_eq!(scene.find_by_id("puck-2").unwrap().number("x"), Some(400.0));
    }

    #[test]
    fn test_items_face_the_middle_band() {
        let scene = render(sequence_zigzag, &steps(2), json!({})).unwrap();
        let even = scene.find_by_id("item-0-label").unwrap();
        let odd = scene.find_by_id("item-1-label").unwrap();
        assert_eq!(even.number("y"), Some(PUCK_HEIGHT + ITEM_TO_PUCK_GAP));
        assert_eq!(odd.number("y"), None);
        assert_eq!(even.number("x"), None);
    }

    #[test]
    fn test_buttons_and_shared_filter() {
        let scene = render(sequence_zigzag, &steps(3), json!({ "gap": 40 })).unwrap();
        assert_eq!(count_type(&scene, "btn-remove"), 3);
        assert_eq!(count_type(&scene, "btn-add"), 4);
        assert_eq!(scene.count_where(|n| n.tag() == Tag::Filter), 1);
        assert_eq!(scene.count_where(|n| n.tag() == Tag::LinearGradient), 6);

        let between = scene.find_by_id("btn-add-1").unwrap();
        assert_eq!(between.number("x"), Some(120.0 + 20.0 - 10.0));
        let center_0 = PUCK_HEIGHT / 2.0;
        let center_1 = 20.0 + ITEM_TO_PUCK_GAP + PUCK_HEIGHT / 2.0;
        assert_eq!(between.number("y"), Some((center_0 + center_1) / 2.0 - 10.0));
    }

    #[test]
    fn test_puck_colors_follow_palette() {
        let scene = render(sequence_zigzag, &steps(2), json!({})).unwrap();
        let gradient = scene.find_by_id("puck-gradient-middle-1").unwrap();
        let palette = crate::theme::Theme::default();
        assert_eq!(
            gradient.children()[0].text("stop-color"),
            Some(palette.palette()[1].as_str())
        );
    }

    #[test]
    fn test_empty_sequence() {
        let scene = render(sequence_zigzag, &Data::default(), json!({})).unwrap();
        assert_eq!(count_type(&scene, "btn-add"), 1);
        assert!(scene.find_by_id("puck-0").is_none());
    }
}
