//! SVG markup printer.
//!
//! Scene nodes map one-to-one onto SVG elements. Group positions become
//! `translate` transforms and group size hints are dropped, since they only
//! steer measurement. Button groups are left out when affordances are
//! disabled.

use log::{debug, info};
use svg::{
    Document, Node,
    node::{self, element::Element},
};

use infograph_core::{
    geometry::Insets,
    measure::Measurer,
    scene::{SceneNode, Tag},
};

use crate::{config::StyleConfig, error::InfographicError, export::Exporter};

/// Prints scenes to SVG with a computed `viewBox`.
#[derive(Debug)]
pub struct SvgExporter<'a> {
    style: &'a StyleConfig,
    measurer: &'a Measurer,
}

impl<'a> SvgExporter<'a> {
    pub fn new(style: &'a StyleConfig, measurer: &'a Measurer) -> Self {
        Self { style, measurer }
    }

    /// Builds the SVG document for `scene`.
    ///
    /// The canvas is the measured scene plus the style padding on every side.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::Config`] when the background color cannot
    /// be parsed.
    pub fn render_document(&self, scene: &SceneNode) -> Result<Document, InfographicError> {
        let padding = self.style.padding();
        let bounds = self.measurer.measure(scene);
        let canvas = bounds.add_padding(Insets::uniform(padding));
        let width = canvas.width();
        let height = canvas.height();
        debug!(width, height, padding; "SVG canvas");

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);
        doc = self.add_background(doc, width, height)?;

        let mut main = Element::new("g");
        main.assign("transform", translate(padding - bounds.x(), padding - bounds.y()));
        if let Some(content) = self.convert(scene) {
            main.append(content);
        }
        Ok(doc.add(main))
    }

    fn add_background(
        &self,
        doc: Document,
        width: f32,
        height: f32,
    ) -> Result<Document, InfographicError> {
        self.style
            .background_color()
            .map_err(InfographicError::Config)?;
        let Some(color) = self.style.background_color_str() else {
            return Ok(doc);
        };
        let mut background = Element::new("rect");
        background.assign("x", 0.0);
        background.assign("y", 0.0);
        background.assign("width", width);
        background.assign("height", height);
        background.assign("fill", color);
        Ok(doc.add(background))
    }

    /// Converts a node and its subtree; `None` for dropped subtrees.
    fn convert(&self, node: &SceneNode) -> Option<Element> {
        if !self.style.affordances() && node.text("data-element-type") == Some("btns-group") {
            return None;
        }

        let mut element = Element::new(node.tag().name());
        if node.tag() == Tag::Group {
            let (x, y) = (node.number("x").unwrap_or(0.0), node.number("y").unwrap_or(0.0));
            if x != 0.0 || y != 0.0 {
                element.assign("transform", translate(x, y));
            }
        }
        for (name, value) in node.properties() {
            if node.tag() == Tag::Group && matches!(name, "x" | "y" | "width" | "height") {
                continue;
            }
            element.assign(name, value.to_string());
        }

        if let Some(content) = node.content() {
            element.append(node::Text::new(content));
        }
        for child in node.children() {
            if let Some(child) = self.convert(child) {
                element.append(child);
            }
        }
        Some(element)
    }
}

impl Exporter for SvgExporter<'_> {
    fn export_scene(&self, scene: &SceneNode) -> Result<String, InfographicError> {
        let doc = self.render_document(scene)?;
        let markup = doc.to_string();
        info!(bytes = markup.len(); "SVG rendered");
        Ok(markup)
    }
}

fn translate(x: f32, y: f32) -> String {
    format!("translate({x}, {y})")
}

#[cfg(test)]
mod tests {
    use infograph_core::draw::{self, GroupProps, RectProps};

    use super::*;
    use crate::components::{btn_add, btns_group};
    use crate::data::IndexPath;

    fn scene() -> SceneNode {
        draw::group(
            GroupProps::at(10.0, 5.0).with_size(100.0, 50.0),
            vec![
                draw::rect(&RectProps::new(100.0, 50.0).with_fill("#1783FF")),
                btns_group(vec![btn_add(&IndexPath::top(0), 0.0, 0.0)]),
            ],
        )
    }

    fn export(style: &StyleConfig) -> Result<String, InfographicError> {
        let measurer = Measurer::default();
        SvgExporter::new(style, &measurer).export_scene(&scene())
    }

    #[test]
    fn test_view_box_includes_padding() {
        let svg = export(&StyleConfig::default().with_padding(20.0)).unwrap();
        assert!(svg.contains(r#"viewBox="0 0 140 90""#));
        assert!(svg.contains("translate(10, 15)"));
        assert!(svg.contains("translate(10, 5)"));
    }

    #[test]
    fn test_group_hints_are_not_printed() {
        let svg = export(&StyleConfig::default()).unwrap();
        assert!(svg.contains(r##"fill="#1783FF""##));
        assert!(!svg.contains("<g height="));
    }

    #[test]
    fn test_affordances_toggle() {
        let with_buttons = export(&StyleConfig::default()).unwrap();
        assert!(with_buttons.contains("btn-add-0"));

        let without = export(&StyleConfig::default().with_affordances(false)).unwrap();
        assert!(!without.contains("btn-add-0"));
        assert!(without.contains("#1783FF"));
    }

    #[test]
    fn test_background() {
        let svg = export(&StyleConfig::default().with_background_color("white")).unwrap();
        assert!(svg.contains("<rect"));
        assert_eq!(svg.matches("<rect").count(), 2);

        let err = export(&StyleConfig::default().with_background_color("not-a-color")).unwrap_err();
        assert!(matches!(err, InfographicError::Config(_)));
    }

    #[test]
    fn test_text_content_is_escaped() {
        let text = draw::text(&infograph_core::draw::TextProps::new("a < b"));
        let measurer = Measurer::default();
        let style = StyleConfig::default();
        let svg = SvgExporter::new(&style, &measurer).export_scene(&text).unwrap();
        assert!(svg.contains("a &lt; b"));
    }
}
