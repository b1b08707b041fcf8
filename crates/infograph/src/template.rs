//! Built-in templates: named, pre-filled designs.
//!
//! Hierarchy-tree templates combine an edge preset with an item, named
//! `hierarchy-tree-<preset>-<item>`. The other structures get one template
//! per item (`list-row-<item>`, `sequence-zigzag-<item>`) and the combo
//! chart a single `chart-combo` template.

use std::sync::OnceLock;

use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::registry::Registry;

/// Edge presets of the hierarchy tree.
fn hierarchy_presets() -> [(&'static str, Value); 5] {
    [
        (
            "tech-style",
            json!({
                "edgeType": "straight",
                "edgeStyle": "solid",
                "edgeColorMode": "gradient",
                "edgeMarker": "arrow",
                "markerSize": 12,
                "edgeCornerRadius": 5
            }),
        ),
        (
            "dashed-line",
            json!({
                "edgeStyle": "dashed",
                "edgeCornerRadius": 10,
                "edgeDashPattern": "10,5",
                "edgeColorMode": "gradient",
                "edgeMarker": "dot",
                "markerSize": 6,
                "edgeOffset": 6
            }),
        ),
        (
            "distributed-origin",
            json!({
                "edgeOrigin": "distributed",
                "edgeOriginPadding": 30,
                "edgeMarker": "arrow",
                "edgeCornerRadius": 10,
                "markerSize": 12,
                "edgeColorMode": "gradient"
            }),
        ),
        (
            "curved-line",
            json!({
                "edgeType": "curved",
                "edgeColorMode": "gradient",
                "edgeMarker": "none"
            }),
        ),
        (
            "dashed-arrow",
            json!({
                "edgeType": "straight",
                "edgeStyle": "dashed",
                "edgeDashPattern": "8,4",
                "edgeMarker": "arrow",
                "markerSize": 10,
                "edgeCornerRadius": 0
            }),
        ),
    ]
}

fn design(structure: &str, mut options: Value, item: Option<&str>) -> Value {
    if let Value::Object(map) = &mut options {
        map.insert("type".to_string(), Value::from(structure));
    }
    match item {
        Some(item) => json!({ "structure": options, "item": { "type": item } }),
        None => json!({ "structure": options }),
    }
}

fn table() -> &'static IndexMap<String, Value> {
    static TEMPLATES: OnceLock<IndexMap<String, Value>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        let registry = Registry::builtin();
        let mut templates = IndexMap::new();
        for item in registry.item_keys() {
            for (preset, options) in hierarchy_presets() {
                templates.insert(
                    format!("hierarchy-tree-{preset}-{item}"),
                    design("hierarchy-tree", options, Some(item)),
                );
            }
        }
        for structure in ["list-row", "sequence-zigzag"] {
            for item in registry.item_keys() {
                templates.insert(
                    format!("{structure}-{item}"),
                    design(structure, json!({}), Some(item)),
                );
            }
        }
        templates.insert(
            "chart-combo".to_string(),
            design("chart-combo", json!({}), None),
        );
        templates
    })
}

/// Returns the design of the template called `name`.
///
/// # Examples
///
/// ```
/// use infograph::template;
///
/// let design = template::template("hierarchy-tree-dashed-arrow-label-desc").unwrap();
/// assert_eq!(design["structure"]["edgeDashPattern"], "8,4");
/// assert_eq!(design["item"]["type"], "label-desc");
/// assert!(template::template("pyramid").is_none());
/// ```
pub fn template(name: &str) -> Option<Value> {
    table().get(name).cloned()
}

/// Iterates template names in a stable order.
pub fn template_names() -> impl Iterator<Item = &'static str> {
    table().keys().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_item_has_every_preset() {
        let hierarchy = template_names()
            .filter(|name| name.starts_with("hierarchy-tree-"))
            .count();
        assert_eq!(hierarchy, 5 * Registry::builtin().item_keys().count());
    }

    #[test]
    fn test_templates_name_registered_variants() {
        let registry = Registry::builtin();
        for name in template_names() {
            let design = template(name).unwrap();
            let structure = design["structure"]["type"].as_str().unwrap();
            assert!(registry.resolve_structure(structure).is_ok(), "{name}");
            if let Some(item) = design["item"]["type"].as_str() {
                assert!(registry.resolve_item(item).is_ok(), "{name}");
            }
        }
    }

    #[test]
    fn test_chart_template_has_no_item() {
        let design = template("chart-combo").unwrap();
        assert!(design.get("item").is_none());
    }
}
