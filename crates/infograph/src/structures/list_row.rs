use log::debug;
use serde::Deserialize;

use infograph_core::{
    draw::{self, GroupProps},
    scene::SceneNode,
};

use crate::{
    components::{btn_add, btn_remove, btns_group, button_size, items_group},
    data::IndexPath,
    error::InfographicError,
    items::PositionH,
    structures::StructureProps,
};

const TITLE_GAP: f32 = 20.0;

/// Layout options of the list row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListRowOptions {
    gap: f32,
}

impl Default for ListRowOptions {
    fn default() -> Self {
        Self { gap: 20.0 }
    }
}

/// Renders the items side by side in one row.
///
/// Every item takes the size of the first one. Remove buttons sit above the
/// items and add buttons sit in front of each item and after the last one.
///
/// # Errors
///
/// Returns an error when the options cannot be decoded or no item renderer
/// is wired.
pub fn list_row(props: &StructureProps<'_>) -> Result<SceneNode, InfographicError> {
    let options: ListRowOptions = props.layout_options()?;
    let item = props.item()?;
    let button = button_size();
    let items = props.data().items();

    let Some(first) = items.first() else {
        let body = draw::group(
            GroupProps::new(),
            vec![btns_group(vec![btn_add(&IndexPath::top(0), 0.0, 0.0)])],
        );
        return Ok(props.compose(body, TITLE_GAP));
    };

    let colors = item.default_colors();
    let size = item.measure(&IndexPath::top(0), first, PositionH::Center, colors.clone());
    let button_y = (size.height() - button.height()) / 2.0;

    let mut item_nodes = Vec::with_capacity(items.len());
    let mut buttons = Vec::with_capacity(items.len() * 2 + 1);
    for (index, datum) in items.iter().enumerate() {
        let indexes = IndexPath::top(index);
        let x = (size.width() + options.gap) * index as f32;

        item_nodes.push(item.render(&indexes, datum, (x, 0.0), PositionH::Center, colors.clone()));
        buttons.push(btn_remove(
            &indexes,
            x + (size.width() - button.width()) / 2.0,
            -button.height() - 10.0,
        ));
        buttons.push(btn_add(&indexes, x - button.width(), button_y));
    }
    let last_x = (size.width() + options.gap) * (items.len() - 1) as f32;
    buttons.push(btn_add(
        &IndexPath::top(items.len()),
        last_x + size.width(),
        button_y,
    ));

    debug!(
        items = items.len(),
        item_width = size.width(),
        item_height = size.height();
        "List row layout"
    );

    let body = draw::group(
        GroupProps::new(),
        vec![items_group(item_nodes), btns_group(buttons)],
    );
    Ok(props.compose(body, TITLE_GAP))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        data::{Data, Datum},
        structures::test_support::{count_type, render},
    };

    fn row(count: usize) -> Data {
        Data::new((0..count).map(|i| Datum::new(format!("Step {i}"))).collect())
    }

    #[test]
    fn test_items_are_spaced_by_gap() {
        let scene = render(list_row, &row(3), json!({ "gap": 10 })).unwrap();
        let second = scene.find_by_id("item-1-label").unwrap();
        let third = scene.find_by_id("item-2-label").unwrap();
        assert_eq!(second.number("x"), Some(130.0));
        assert_eq!(third.number("x"), Some(260.0));
    }

    #[test]
    fn test_buttons() {
        let scene = render(list_row, &row(3), json!({})).unwrap();
        assert_eq!(count_type(&scene, "btn-remove"), 3);
        assert_eq!(count_type(&scene, "btn-add"), 4);

        let trailing = scene.find_by_id("btn-add-3").unwrap();
        assert_eq!(trailing.number("x"), Some(140.0 * 2.0 + 120.0));
        let remove = scene.find_by_id("btn-remove-0").unwrap();
        assert_eq!(remove.number("y"), Some(-30.0));
    }

    #[test]
    fn test_empty_row_keeps_add_button() {
        let scene = render(list_row, &Data::default(), json!({})).unwrap();
        assert_eq!(count_type(&scene, "btn-add"), 1);
        assert_eq!(count_type(&scene, "item"), 0);
    }

    #[test]
    fn test_title_is_stacked_above() {
        let data = row(2).with_title("Roadmap");
        let scene = render(list_row, &data, json!({})).unwrap();
        let container = scene.find_by_id("infographic-container").unwrap();
        assert_eq!(container.children().len(), 2);
        assert!(scene.find_by_id("title").is_some());
    }
}
