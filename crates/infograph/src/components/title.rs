//! Infographic title block.

use infograph_core::{
    draw::{self, HorizontalAlign, TextProps},
    flex::{Align, FlexLayout},
    measure::Measurer,
    scene::SceneNode,
};

use crate::theme::ThemeColors;

/// Renders the title block of an infographic.
pub type TitleFn = fn(&TitleProps<'_>) -> SceneNode;

/// Inputs of the title renderer.
#[derive(Debug, Clone, Copy)]
pub struct TitleProps<'a> {
    title: Option<&'a str>,
    desc: Option<&'a str>,
    colors: &'a ThemeColors,
    measurer: &'a Measurer,
}

impl<'a> TitleProps<'a> {
    pub fn new(
        title: Option<&'a str>,
        desc: Option<&'a str>,
        colors: &'a ThemeColors,
        measurer: &'a Measurer,
    ) -> Self {
        Self {
            title,
            desc,
            colors,
            measurer,
        }
    }

    pub fn title(&self) -> Option<&'a str> {
        self.title
    }

    pub fn desc(&self) -> Option<&'a str> {
        self.desc
    }

    pub fn colors(&self) -> &'a ThemeColors {
        self.colors
    }

    pub fn measurer(&self) -> &'a Measurer {
        self.measurer
    }
}

/// Centered title over an optional description.
///
/// # Examples
///
/// ```
/// use infograph::components::{TitleProps, title};
/// use infograph::theme::Theme;
/// use infograph_core::measure::Measurer;
///
/// let colors = Theme::default().theme_colors(None);
/// let measurer = Measurer::default();
/// let node = title(&TitleProps::new(Some("Roadmap"), None, &colors, &measurer));
/// assert_eq!(node.find_by_id("title-text").unwrap().content(), Some("Roadmap"));
/// assert!(node.find_by_id("desc").is_none());
/// ```
pub fn title(props: &TitleProps<'_>) -> SceneNode {
    let mut children = Vec::with_capacity(2);
    if let Some(title) = props.title.filter(|title| !title.is_empty()) {
        children.push(draw::text(
            &TextProps::new(title)
                .with_font_size(24.0)
                .with_line_height(1.4)
                .with_font_weight("bold")
                .with_fill(props.colors.color_text.as_str())
                .with_align_horizontal(HorizontalAlign::Center)
                .with_id("title"),
        ));
    }
    if let Some(desc) = props.desc.filter(|desc| !desc.is_empty()) {
        children.push(draw::text(
            &TextProps::new(desc)
                .with_font_size(14.0)
                .with_line_height(1.4)
                .with_fill("#666")
                .with_align_horizontal(HorizontalAlign::Center)
                .with_id("desc"),
        ));
    }

    FlexLayout::column()
        .with_align(Align::Center)
        .with_gap(8.0)
        .with_id("title-group")
        .render(props.measurer, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn test_title_and_desc_are_stacked() {
        let colors = Theme::default().theme_colors(None);
        let measurer = Measurer::default();
        let node = title(&TitleProps::new(
            Some("Title"),
            Some("Description"),
            &colors,
            &measurer,
        ));
        assert!(node.find_by_id("title").is_some());
        assert!(node.find_by_id("desc").is_some());
        assert_eq!(node.children()[1].number("y"), Some(24.0 * 1.4 + 8.0));
    }

    #[test]
    fn test_empty_strings_render_nothing() {
        let colors = Theme::default().theme_colors(None);
        let measurer = Measurer::default();
        let node = title(&TitleProps::new(Some(""), None, &colors, &measurer));
        assert!(node.children().is_empty());
    }
}
