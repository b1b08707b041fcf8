//! Theme and palette resolution.
//!
//! A [`ThemeConfig`] is the user-facing, partially specified theme (from the
//! TOML configuration or a document). [`Theme`] is the resolved form handed
//! to structures; it answers the two questions every structure asks:
//! "what colors does this item use" ([`Theme::theme_colors`]) and "which
//! palette entry belongs to this index path" ([`Theme::palette_color`]).

use serde::Deserialize;

use infograph_core::color::Color;

use crate::data::IndexPath;

const DEFAULT_PRIMARY: &str = "#1783FF";
const DEFAULT_BACKGROUND: &str = "#ffffff";
const LIGHT_TEXT: &str = "#ffffff";
const DARK_TEXT: &str = "#262626";

/// Share of the background mixed into the primary color for soft fills.
const PRIMARY_BG_MIX: f32 = 0.9;

const DEFAULT_PALETTE: [&str; 11] = [
    "#1783FF", "#00C9C9", "#F0884D", "#D580FF", "#7863FF", "#60C42D", "#BD8F24", "#FF80CA",
    "#2491B3", "#17C76F", "#70CAF8",
];

/// Partially specified theme settings.
///
/// Keys are accepted both in snake case (TOML) and camel case (JSON).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(alias = "colorPrimary")]
    color_primary: Option<String>,
    #[serde(alias = "colorText")]
    color_text: Option<String>,
    #[serde(alias = "colorBg")]
    color_bg: Option<String>,
    palette: Option<Vec<String>>,
}

impl ThemeConfig {
    pub fn with_color_primary(mut self, color: impl Into<String>) -> Self {
        self.color_primary = Some(color.into());
        self
    }

    pub fn with_color_text(mut self, color: impl Into<String>) -> Self {
        self.color_text = Some(color.into());
        self
    }

    pub fn with_color_bg(mut self, color: impl Into<String>) -> Self {
        self.color_bg = Some(color.into());
        self
    }

    pub fn with_palette(mut self, palette: Vec<String>) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Returns a copy where every setting present in `other` wins.
    pub fn merged(&self, other: &ThemeConfig) -> ThemeConfig {
        ThemeConfig {
            color_primary: other.color_primary.clone().or_else(|| self.color_primary.clone()),
            color_text: other.color_text.clone().or_else(|| self.color_text.clone()),
            color_bg: other.color_bg.clone().or_else(|| self.color_bg.clone()),
            palette: other.palette.clone().or_else(|| self.palette.clone()),
        }
    }
}

/// Colors an item is rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub color_primary: String,
    pub color_text: String,
    pub color_primary_bg: String,
    pub color_bg: String,
}

/// A fully resolved theme.
///
/// # Examples
///
/// ```
/// use infograph::data::IndexPath;
/// use infograph::theme::{Theme, ThemeConfig};
///
/// let theme = Theme::new(
///     &ThemeConfig::default().with_palette(vec!["red".into(), "blue".into()]),
/// );
/// assert_eq!(theme.palette_color(&IndexPath::top(3)), "blue");
///
/// let colors = theme.theme_colors(Some("red"));
/// assert_eq!(colors.color_primary, "red");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    color_primary: String,
    color_text: String,
    color_bg: String,
    palette: Vec<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(&ThemeConfig::default())
    }
}

impl Theme {
    /// Resolves a theme, filling unset settings with defaults.
    ///
    /// Without an explicit text color, the text color contrasts with the
    /// background.
    pub fn new(config: &ThemeConfig) -> Self {
        let color_bg = config
            .color_bg
            .clone()
            .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());
        let color_text = config.color_text.clone().unwrap_or_else(|| {
            let dark_background = Color::new(&color_bg).is_ok_and(Color::is_dark);
            if dark_background { LIGHT_TEXT } else { DARK_TEXT }.to_string()
        });
        let palette = config
            .palette
            .clone()
            .unwrap_or_else(|| DEFAULT_PALETTE.iter().map(ToString::to_string).collect());

        Self {
            color_primary: config
                .color_primary
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIMARY.to_string()),
            color_text,
            color_bg,
            palette,
        }
    }

    pub fn color_primary(&self) -> &str {
        &self.color_primary
    }

    pub fn color_text(&self) -> &str {
        &self.color_text
    }

    pub fn color_bg(&self) -> &str {
        &self.color_bg
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Returns the item colors, optionally replacing the primary color.
    ///
    /// The soft primary background mixes the primary color toward the
    /// background. Unparsable primaries (such as paint references) fall back
    /// to the background color.
    pub fn theme_colors(&self, primary_override: Option<&str>) -> ThemeColors {
        let color_primary = primary_override.unwrap_or(&self.color_primary).to_string();
        let color_primary_bg = match (Color::new(&color_primary), Color::new(&self.color_bg)) {
            (Ok(primary), Ok(background)) => primary.mix(background, PRIMARY_BG_MIX).to_hex(),
            _ => self.color_bg.clone(),
        };
        ThemeColors {
            color_primary,
            color_text: self.color_text.clone(),
            color_primary_bg,
            color_bg: self.color_bg.clone(),
        }
    }

    /// Returns the palette entry for `path`, cycling on its first index.
    ///
    /// An empty palette yields the primary color.
    pub fn palette_color(&self, path: &IndexPath) -> String {
        if self.palette.is_empty() {
            return self.color_primary.clone();
        }
        let index = path.first().unwrap_or(0) % self.palette.len();
        self.palette[index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.color_primary(), DEFAULT_PRIMARY);
        assert_eq!(theme.color_text(), DARK_TEXT);
        assert_eq!(theme.palette().len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn test_dark_background_switches_text_color() {
        let theme = Theme::new(&ThemeConfig::default().with_color_bg("#333"));
        assert_eq!(theme.color_text(), LIGHT_TEXT);

        let theme = Theme::new(
            &ThemeConfig::default()
                .with_color_bg("#333")
                .with_color_text("#eee"),
        );
        assert_eq!(theme.color_text(), "#eee");
    }

    #[test]
    fn test_palette_cycles_on_first_index() {
        let theme = Theme::new(
            &ThemeConfig::default().with_palette(vec!["a".into(), "b".into(), "c".into()]),
        );
        assert_eq!(theme.palette_color(&IndexPath::top(0)), "a");
        assert_eq!(theme.palette_color(&IndexPath::top(4)), "b");
        assert_eq!(theme.palette_color(&IndexPath::from(vec![2, 9])), "c");
        assert_eq!(theme.palette_color(&IndexPath::default()), "a");
    }

    #[test]
    fn test_empty_palette_uses_primary() {
        let theme = Theme::new(
            &ThemeConfig::default()
                .with_color_primary("#ff0000")
                .with_palette(Vec::new()),
        );
        assert_eq!(theme.palette_color(&IndexPath::top(5)), "#ff0000");
    }

    #[test]
    fn test_primary_bg_is_mixed_toward_background() {
        let theme = Theme::new(&ThemeConfig::default().with_color_bg("#ffffff"));
        let colors = theme.theme_colors(Some("#000000"));
        assert_eq!(colors.color_primary, "#000000");
        let black = Color::new("#000000").unwrap();
        let white = Color::new("#ffffff").unwrap();
        assert_eq!(colors.color_primary_bg, black.mix(white, PRIMARY_BG_MIX).to_hex());
        assert_ne!(colors.color_primary_bg, "#000000");

        let colors = theme.theme_colors(Some("url(#g)"));
        assert_eq!(colors.color_primary_bg, "#ffffff");
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = ThemeConfig::default()
            .with_color_primary("red")
            .with_color_text("black");
        let merged = base.merged(&ThemeConfig::default().with_color_primary("blue"));
        let theme = Theme::new(&merged);
        assert_eq!(theme.color_primary(), "blue");
        assert_eq!(theme.color_text(), "black");
    }
}
