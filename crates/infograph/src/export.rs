//! Export of finalized scenes.
//!
//! The last stage of the pipeline:
//!
//! ```text
//! Document (JSON)
//!     ↓ resolve design
//! RenderOptions + Data
//!     ↓ structure render (measure, then finalize)
//! SceneNode
//!     ↓ export (this module)
//! Markup
//! ```
//!
//! [`svg::SvgExporter`] is the only backend.

pub mod svg;

use infograph_core::scene::SceneNode;

use crate::error::InfographicError;

/// Converts a finalized scene into an output format.
pub trait Exporter {
    /// Renders `scene` to the backend's markup.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::Config`] when the export style is invalid.
    fn export_scene(&self, scene: &SceneNode) -> Result<String, InfographicError>;
}
