//! Render options and the JSON document format.
//!
//! A [`Document`] names a built-in template, an inline design, or both; the
//! design is deep-merged over the template before it is decoded into
//! [`RenderOptions`].
//!
//! ```json
//! {
//!   "template": "hierarchy-tree-tech-style-rounded-rect-node",
//!   "design": { "structure": { "levelGap": 60 } },
//!   "data": { "title": "Org chart", "items": [{ "label": "CEO" }] },
//!   "theme": { "colorPrimary": "#7B61FF" }
//! }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    data::Data, error::InfographicError, items::ItemOptions, template, theme::ThemeConfig,
};

const DEFAULT_ITEM: &str = "plain-text";

/// The structure variant and its layout options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructureDesign {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    options: Map<String, Value>,
}

impl StructureDesign {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            options: Map::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Layout options, still undecoded; the structure decodes them.
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }
}

/// The item variant and its size settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDesign {
    #[serde(rename = "type", default = "default_item")]
    kind: String,
    #[serde(flatten)]
    options: ItemOptions,
}

fn default_item() -> String {
    DEFAULT_ITEM.to_string()
}

impl Default for ItemDesign {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM)
    }
}

impl ItemDesign {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            options: ItemOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ItemOptions) -> Self {
        self.options = options;
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn options(&self) -> &ItemOptions {
        &self.options
    }
}

/// Everything needed to render data: which structure, which item, whether
/// to show the title, and theme overrides.
///
/// # Examples
///
/// ```
/// use infograph::design::RenderOptions;
///
/// let options: RenderOptions = serde_json::from_str(
///     r#"{ "structure": { "type": "list-row", "gap": 12 }, "title": false }"#,
/// )
/// .unwrap();
/// assert_eq!(options.structure().kind(), "list-row");
/// assert_eq!(options.item().kind(), "plain-text");
/// assert!(!options.title());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderOptions {
    structure: StructureDesign,
    #[serde(default)]
    item: ItemDesign,
    #[serde(default = "default_title")]
    title: bool,
    #[serde(default)]
    theme: ThemeConfig,
}

fn default_title() -> bool {
    true
}

impl RenderOptions {
    pub fn new(structure: StructureDesign) -> Self {
        Self {
            structure,
            item: ItemDesign::default(),
            title: true,
            theme: ThemeConfig::default(),
        }
    }

    pub fn with_item(mut self, item: ItemDesign) -> Self {
        self.item = item;
        self
    }

    pub fn with_title(mut self, title: bool) -> Self {
        self.title = title;
        self
    }

    pub fn with_theme(mut self, theme: ThemeConfig) -> Self {
        self.theme = theme;
        self
    }

    pub fn structure(&self) -> &StructureDesign {
        &self.structure
    }

    pub fn item(&self) -> &ItemDesign {
        &self.item
    }

    pub fn title(&self) -> bool {
        self.title
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }
}

/// A complete input file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Document {
    template: Option<String>,
    design: Option<Value>,
    data: Data,
    theme: Option<ThemeConfig>,
}

impl Document {
    pub fn new(data: Data) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    pub fn with_design(mut self, design: Value) -> Self {
        self.design = Some(design);
        self
    }

    pub fn with_theme(mut self, theme: ThemeConfig) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::InvalidDocument`] for malformed JSON or a
    /// field of the wrong shape.
    pub fn from_json(source: &str) -> Result<Self, InfographicError> {
        serde_json::from_str(source).map_err(InfographicError::InvalidDocument)
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Resolves the template and the inline design into render options.
    ///
    /// The document theme is applied over the design theme.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::UnknownTemplate`] for an unknown template
    /// name and [`InfographicError::InvalidDocument`] when neither a design
    /// nor a template is given, or the merged design does not decode.
    pub fn resolve(&self) -> Result<RenderOptions, InfographicError> {
        let base = self
            .template
            .as_deref()
            .map(|name| {
                template::template(name)
                    .ok_or_else(|| InfographicError::UnknownTemplate(name.to_string()))
            })
            .transpose()?;

        let merged = match (base, self.design.clone()) {
            (Some(mut base), Some(design)) => {
                merge(&mut base, design);
                base
            }
            (Some(base), None) => base,
            (None, Some(design)) => design,
            (None, None) => {
                return Err(InfographicError::document(
                    "a document needs a `design` or a `template`",
                ));
            }
        };

        let mut options: RenderOptions =
            serde_json::from_value(merged).map_err(InfographicError::InvalidDocument)?;
        if let Some(theme) = &self.theme {
            options.theme = options.theme.merged(theme);
        }
        Ok(options)
    }
}

/// Deep-merges `overlay` into `base`: objects merge key by key, every other
/// value replaces what was there.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_merge_is_deep() {
        let mut base = json!({
            "structure": { "type": "hierarchy-tree", "levelGap": 80, "edgeMarker": "arrow" }
        });
        merge(
            &mut base,
            json!({ "structure": { "levelGap": 40 }, "title": false }),
        );
        assert_eq!(
            base,
            json!({
                "structure": { "type": "hierarchy-tree", "levelGap": 40, "edgeMarker": "arrow" },
                "title": false
            })
        );
    }

    #[test]
    fn test_item_design_flattens_options() {
        let options: RenderOptions = serde_json::from_value(json!({
            "structure": { "type": "hierarchy-tree", "nodeGap": 10 },
            "item": { "type": "rounded-rect-node", "width": 160, "usePaletteColor": true }
        }))
        .unwrap();
        assert_eq!(options.item().kind(), "rounded-rect-node");
        assert_eq!(options.item().options().width(), Some(160.0));
        assert!(options.item().options().use_palette_color());
        assert_eq!(options.structure().options().get("nodeGap"), Some(&json!(10)));
        assert!(options.structure().options().get("type").is_none());
        assert!(options.title());
    }

    #[test]
    fn test_resolve_template_with_overrides() {
        let document = Document::from_json(
            r##"{
                "template": "hierarchy-tree-curved-line-rounded-rect-node",
                "design": { "structure": { "levelGap": 30 } },
                "data": { "items": [{ "label": "Root" }] },
                "theme": { "colorPrimary": "#FF0000" }
            }"##,
        )
        .unwrap();
        let options = document.resolve().unwrap();
        assert_eq!(options.structure().kind(), "hierarchy-tree");
        assert_eq!(options.structure().options().get("edgeType"), Some(&json!("curved")));
        assert_eq!(options.structure().options().get("levelGap"), Some(&json!(30)));
        assert_eq!(options.item().kind(), "rounded-rect-node");
        assert_eq!(
            options.theme(),
            &ThemeConfig::default().with_color_primary("#FF0000")
        );
    }

    #[test]
    fn test_inline_design_without_template() {
        let options = Document::new(Data::default())
            .with_design(json!({ "structure": { "type": "list-row" }, "title": false }))
            .resolve()
            .unwrap();
        assert_eq!(options.structure().kind(), "list-row");
        assert_eq!(options.item().kind(), "plain-text");
        assert!(!options.title());
    }

    #[test]
    fn test_resolve_errors() {
        let err = Document::new(Data::default()).resolve().unwrap_err();
        assert!(matches!(err, InfographicError::InvalidDocument(_)));

        let err = Document::new(Data::default())
            .with_template("pyramid")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, InfographicError::UnknownTemplate(name) if name == "pyramid"));

        let err = Document::from_json("{ \"data\": ").unwrap_err();
        assert!(matches!(err, InfographicError::InvalidDocument(_)));
    }
}
