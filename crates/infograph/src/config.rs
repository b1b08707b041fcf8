//! Configuration types for Infograph rendering.
//!
//! This module provides configuration structures that control theming and
//! SVG output. All types implement [`serde::Deserialize`] for loading from
//! external sources such as the CLI's TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining theme and style settings.
//! - [`ThemeConfig`] - Default palette and theme colors.
//! - [`StyleConfig`] - Output options such as background color, padding and affordances.
//!
//! # Example
//!
//! ```
//! # use infograph::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r##"
//!     [theme]
//!     color_primary = "#ff5a5f"
//!
//!     [style]
//!     background_color = "#ffffff"
//!     affordances = false
//!     "##,
//! )
//! .unwrap();
//! assert!(config.style().background_color().unwrap().is_some());
//! assert!(!config.style().affordances());
//! assert_eq!(config.style().padding(), 20.0);
//! ```

use serde::Deserialize;

use infograph_core::color::Color;

pub use crate::theme::ThemeConfig;

/// Top-level application configuration combining theme and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Theme configuration section.
    #[serde(default)]
    theme: ThemeConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified theme and style configurations.
    pub fn new(theme: ThemeConfig, style: StyleConfig) -> Self {
        Self { theme, style }
    }

    /// Returns the theme configuration.
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Visual output configuration for rendered infographics.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background [`Color`] of the exported document, as a color string.
    background_color: Option<String>,

    /// Space around the scene in the exported document.
    padding: f32,

    /// Whether add/remove buttons are kept in the exported document.
    affordances: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            padding: 20.0,
            affordances: true,
        }
    }
}

impl StyleConfig {
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    pub fn with_affordances(mut self, affordances: bool) -> Self {
        self.affordances = affordances;
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the configured background color string, unparsed.
    pub fn background_color_str(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    pub fn padding(&self) -> f32 {
        self.padding.max(0.0)
    }

    pub fn affordances(&self) -> bool {
        self.affordances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = StyleConfig::default();
        assert_eq!(style.padding(), 20.0);
        assert!(style.affordances());
        assert!(matches!(style.background_color(), Ok(None)));
    }

    #[test]
    fn test_invalid_background_color() {
        let style = StyleConfig::default().with_background_color("not-a-color");
        assert!(style.background_color().is_err());
    }

    #[test]
    fn test_negative_padding_is_clamped() {
        assert_eq!(StyleConfig::default().with_padding(-4.0).padding(), 0.0);
    }
}
