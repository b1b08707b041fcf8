//! Infograph - data-driven infographics rendered to SVG.
//!
//! An infographic is a *structure* (the overall layout, such as a tree or a
//! row) filled with *items* (the per-datum visual) and topped by an optional
//! title. Structures and items are pure render functions looked up by key in
//! a [`registry`]; they return a scene graph that the [`export`] layer
//! prints as SVG.
//!
//! Designs are either spelled out as [`design::RenderOptions`] or picked
//! from the built-in [`template`]s and tweaked through a JSON
//! [`design::Document`].

pub mod components;
pub mod config;
pub mod data;
pub mod design;
pub mod export;
pub mod items;
pub mod layout;
pub mod registry;
pub mod structures;
pub mod template;
pub mod theme;

mod error;

pub use infograph_core::{color, draw, flex, geometry, measure, scene};

pub use error::InfographicError;

use log::{debug, info, trace};

use infograph_core::{measure::Measurer, scene::SceneNode};

use config::AppConfig;
use data::Data;
use design::{Document, RenderOptions};
use export::{Exporter, svg::SvgExporter};
use registry::{Registry, Slot};
use structures::StructureProps;
use theme::Theme;

/// Builder for rendering infographics.
///
/// Holds the application configuration, the registry variants are looked up
/// in and the measurer used for layout.
///
/// # Examples
///
/// ```rust,no_run
/// use infograph::{InfographicBuilder, config::AppConfig};
///
/// let source = r#"{
///     "template": "list-row-plain-text",
///     "data": { "title": "Steps", "items": [{ "label": "Plan" }, { "label": "Ship" }] }
/// }"#;
///
/// let builder = InfographicBuilder::new(AppConfig::default());
/// let document = builder.parse_document(source).expect("Failed to parse");
/// let scene = builder.render_document(&document).expect("Failed to render");
/// let svg = builder.render_svg(&scene).expect("Failed to export");
/// ```
#[derive(Debug)]
pub struct InfographicBuilder {
    config: AppConfig,
    registry: &'static Registry,
    measurer: Measurer,
}

impl Default for InfographicBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl InfographicBuilder {
    /// Creates a builder over the built-in registry and the default measurer.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            registry: Registry::builtin(),
            measurer: Measurer::default(),
        }
    }

    /// Uses a custom registry for variant lookups.
    pub fn with_registry(mut self, registry: &'static Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Uses a custom measurer, for example one backed by real font metrics.
    pub fn with_measurer(mut self, measurer: Measurer) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::InvalidDocument`] for malformed JSON.
    pub fn parse_document(&self, source: &str) -> Result<Document, InfographicError> {
        info!(bytes = source.len(); "Parsing document");
        let document = Document::from_json(source)?;
        debug!(
            template = document.template().unwrap_or("-"),
            items = document.data().items().len();
            "Document parsed"
        );
        Ok(document)
    }

    /// Resolves the template and design of a document into render options.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::UnknownTemplate`] or
    /// [`InfographicError::InvalidDocument`] when the design does not resolve.
    pub fn resolve_design(&self, document: &Document) -> Result<RenderOptions, InfographicError> {
        let options = document.resolve()?;
        info!(
            structure = options.structure().kind(),
            item = options.item().kind();
            "Design resolved"
        );
        Ok(options)
    }

    /// Renders `data` with `options` into a scene.
    ///
    /// The item renderer is wired only into structures declaring the item
    /// slot, and the title renderer only into structures declaring the title
    /// slot while `options.title()` is on. The configured theme is the base
    /// that `options.theme()` overrides.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::NotFound`] for an unknown structure or
    /// item key, and whatever the structure reports for its options.
    pub fn render(
        &self,
        options: &RenderOptions,
        data: &Data,
    ) -> Result<SceneNode, InfographicError> {
        let structure_key = options.structure().kind();
        let structure = self.registry.resolve_structure(structure_key)?;
        let theme = Theme::new(&self.config.theme().merged(options.theme()));

        let mut props = StructureProps::new(
            structure_key,
            data,
            options.structure().options(),
            &theme,
            &self.measurer,
            options.item().options(),
        );
        if structure.declares(Slot::Item) {
            let item = self.registry.resolve_item(options.item().kind())?;
            props = props.with_item(item.render());
        }
        if structure.declares(Slot::Title) && options.title() {
            props = props.with_title(components::title);
        }

        info!(
            structure = structure_key,
            items = data.items().len();
            "Rendering infographic"
        );
        let scene = (structure.render())(&props)?;
        trace!(nodes = scene.descendants().count(); "Scene rendered");
        Ok(scene)
    }

    /// Resolves and renders a document.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_design`] and [`Self::render`].
    pub fn render_document(&self, document: &Document) -> Result<SceneNode, InfographicError> {
        let options = self.resolve_design(document)?;
        self.render(&options, document.data())
    }

    /// Prints a scene as an SVG string, honoring the style configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::Config`] for an invalid background color.
    pub fn render_svg(&self, scene: &SceneNode) -> Result<String, InfographicError> {
        SvgExporter::new(self.config.style(), &self.measurer).export_scene(scene)
    }
}
