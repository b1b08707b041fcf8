//! Dual-axis combo chart.
//!
//! The primary series is drawn as gradient columns against the left axis;
//! the secondary series as a smooth line with dots against the right axis.
//! Both axes use nice linear scales over `[min, max]`, where `max` defaults
//! to 115% of the largest value.
//!
//! Series are read from the data's extra fields:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `primaryValues` | `[{label, value}]` columns; falls back to `items` |
//! | `secondaryValues` | `[{label, value}]` line points |
//! | `xTitle`, `primaryYTitle`, `secondaryYTitle` | axis titles |
//! | `primaryLabel`, `secondaryLabel` | legend entries |
//! | `primaryMin`, `primaryMax`, `primaryStep` | left axis bounds and tick step |
//! | `secondaryMin`, `secondaryMax`, `secondaryStep` | right axis bounds and tick step |

use log::debug;
use serde::{Deserialize, de::DeserializeOwned};

use infograph_core::{
    color::Color,
    draw::{
        self, EllipseProps, GradientStop, GroupProps, HorizontalAlign, LinearGradientProps,
        PathProps, RectProps, StrokeDefinition, TextProps, VerticalAlign,
    },
    geometry::{Insets, Point},
    scene::SceneNode,
};

use crate::{
    components::format_value,
    data::{Data, IndexPath},
    error::InfographicError,
    layout::{LinearScale, stepped_ticks, ticks},
    structures::StructureProps,
};

const LEFT_AXIS_SPACE: f32 = 50.0;
const RIGHT_AXIS_SPACE: f32 = 50.0;
const X_LABEL_SPACE: f32 = 40.0;
const LEGEND_SPACE: f32 = 30.0;
const X_TITLE_SPACE: f32 = 22.0;
const Y_TITLE_SPACE: f32 = 26.0;

const DEFAULT_TICK_COUNT: usize = 5;
const NICE_COUNT: usize = 10;
const HEADROOM: f64 = 1.15;

const DEFAULT_PRIMARY_LABEL: &str = "Primary (left axis)";
const DEFAULT_SECONDARY_LABEL: &str = "Secondary (right axis)";

/// Chart padding: one value for every side, or CSS-style shorthand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    Uniform(f32),
    Sides(Vec<f32>),
}

impl Padding {
    /// Expands the shorthand to four sides (`[all]`, `[vertical,
    /// horizontal]`, `[top, horizontal, bottom]` or `[top, right, bottom,
    /// left]`).
    pub fn insets(&self) -> Insets {
        match self {
            Self::Uniform(value) => Insets::uniform(*value),
            Self::Sides(sides) => match sides.as_slice() {
                [] => Insets::default(),
                [all] => Insets::uniform(*all),
                [vertical, horizontal] => {
                    Insets::new(*vertical, *horizontal, *vertical, *horizontal)
                }
                [top, horizontal, bottom] => Insets::new(*top, *horizontal, *bottom, *horizontal),
                [top, right, bottom, left, ..] => Insets::new(*top, *right, *bottom, *left),
            },
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::Uniform(40.0)
    }
}

/// Layout options of the combo chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartComboOptions {
    column_width: f32,
    column_gap: f32,
    padding: Padding,
    show_value: bool,
    chart_height: f32,
}

impl Default for ChartComboOptions {
    fn default() -> Self {
        Self {
            column_width: 40.0,
            column_gap: 60.0,
            padding: Padding::default(),
            show_value: true,
            chart_height: 280.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct SeriesPoint {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    value: Option<f64>,
}

impl SeriesPoint {
    fn value(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

/// Bounds and tick step of one value axis.
#[derive(Debug, Clone, Copy, Default)]
struct AxisSpec {
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
}

impl AxisSpec {
    fn read(data: &Data, prefix: &str) -> Result<Self, InfographicError> {
        Ok(Self {
            min: extra(data, &format!("{prefix}Min"))?,
            max: extra(data, &format!("{prefix}Max"))?,
            step: extra(data, &format!("{prefix}Step"))?,
        })
    }

    /// Builds the scale over `series` and the tick values of the axis.
    ///
    /// Ticks are taken on the requested domain, before it is made nice.
    fn scale(&self, series: &[SeriesPoint], height: f32) -> (LinearScale, Vec<f64>) {
        let data_max = series.iter().map(SeriesPoint::value).fold(0.0, f64::max);
        let min = self.min.unwrap_or(0.0);
        let mut max = self.max.unwrap_or(data_max * HEADROOM);
        if max <= min {
            max = min + 1.0;
        }
        let scale = LinearScale::new(min, max, f64::from(height), 0.0).nice(NICE_COUNT);
        let values = match self.step {
            Some(step) if step > 0.0 => stepped_ticks(min, max, step),
            _ => ticks(min, max, DEFAULT_TICK_COUNT),
        };
        (scale, values)
    }
}

fn extra<T: DeserializeOwned>(data: &Data, key: &str) -> Result<Option<T>, InfographicError> {
    data.extra_as(key).map_err(InfographicError::InvalidDocument)
}

fn label(content: impl Into<String>, x: f32, y: f32, font_size: f32, fill: &str) -> TextProps {
    TextProps::new(content)
        .with_position(x, y)
        .with_font_size(font_size)
        .with_fill(fill)
}

fn axis_title(content: &str, x: f32, y: f32, fill: &str) -> SceneNode {
    draw::text(
        &label(content, x, y, 14.0, fill)
            .with_font_weight("bold")
            .with_align_horizontal(HorizontalAlign::Center)
            .with_align_vertical(VerticalAlign::Center),
    )
}

fn line(from: Point, to: Point, stroke: StrokeDefinition) -> SceneNode {
    draw::path(
        &PathProps::new(format!("M {} {} L {} {}", from.x(), from.y(), to.x(), to.y()))
            .with_fill("none")
            .with_stroke(stroke),
    )
}

/// Builds a smooth path through `points` using Catmull-Rom style control
/// points at one sixth of the neighbor span.
fn smooth_path(points: &[Point]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut segments = vec![format!("M {} {}", first.x(), first.y())];
    for i in 0..points.len().saturating_sub(1) {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points.get(i + 2).copied().unwrap_or(p2);

        let c1 = Point::new(p1.x() + (p2.x() - p0.x()) / 6.0, p1.y() + (p2.y() - p0.y()) / 6.0);
        let c2 = Point::new(p2.x() - (p3.x() - p1.x()) / 6.0, p2.y() - (p3.y() - p1.y()) / 6.0);
        segments.push(format!(
            "C {} {} {} {} {} {}",
            c1.x(),
            c1.y(),
            c2.x(),
            c2.y(),
            p2.x(),
            p2.y()
        ));
    }
    segments.join(" ")
}

fn lighten(color: &str, amount: f32) -> String {
    match (Color::new(color), Color::new("#ffffff")) {
        (Ok(color), Ok(white)) => color.mix(white, amount).to_hex(),
        _ => color.to_string(),
    }
}

/// Renders the dual-axis combo chart.
///
/// # Errors
///
/// Returns an error when the layout options or the chart fields of the data
/// cannot be decoded.
pub fn chart_combo(props: &StructureProps<'_>) -> Result<SceneNode, InfographicError> {
    let options: ChartComboOptions = props.layout_options()?;
    let data = props.data();
    let theme = props.theme();

    let primary: Vec<SeriesPoint> = match extra::<Vec<SeriesPoint>>(data, "primaryValues")? {
        Some(values) if !values.is_empty() => values,
        _ => data
            .items()
            .iter()
            .map(|datum| SeriesPoint {
                label: datum.label().map(str::to_string),
                value: datum.value(),
            })
            .collect(),
    };
    let secondary: Vec<SeriesPoint> = extra(data, "secondaryValues")?.unwrap_or_default();
    let x_title: Option<String> = extra(data, "xTitle")?;
    let primary_y_title: Option<String> = extra(data, "primaryYTitle")?;
    let secondary_y_title: Option<String> = extra(data, "secondaryYTitle")?;
    let primary_label: String =
        extra(data, "primaryLabel")?.unwrap_or_else(|| DEFAULT_PRIMARY_LABEL.to_string());
    let secondary_label: String =
        extra(data, "secondaryLabel")?.unwrap_or_else(|| DEFAULT_SECONDARY_LABEL.to_string());

    let axis_color = theme.color_text().to_string();
    let column_color = theme.palette_color(&IndexPath::top(0));
    let line_color = theme.palette_color(&IndexPath::top(1));

    let count = primary.len() as f32;
    let step_x = options.column_width + options.column_gap;
    let chart_width = (count * options.column_width + (count - 1.0) * options.column_gap).max(0.0);
    let chart_height = options.chart_height;
    let padding = options.padding.insets();

    let x_title_space = if x_title.is_some() { X_TITLE_SPACE } else { 0.0 };
    let primary_title_space = if primary_y_title.is_some() { Y_TITLE_SPACE } else { 0.0 };
    let secondary_title_space = if secondary_y_title.is_some() { Y_TITLE_SPACE } else { 0.0 };

    let total_width = primary_title_space
        + LEFT_AXIS_SPACE
        + chart_width
        + RIGHT_AXIS_SPACE
        + secondary_title_space
        + padding.horizontal_sum();
    let total_height =
        chart_height + padding.vertical_sum() + X_LABEL_SPACE + x_title_space + LEGEND_SPACE;

    let (left_scale, left_ticks) = AxisSpec::read(data, "primary")?.scale(&primary, chart_height);
    let (right_scale, right_ticks) =
        AxisSpec::read(data, "secondary")?.scale(&secondary, chart_height);

    let origin_x = padding.left() + primary_title_space + LEFT_AXIS_SPACE;
    let origin_y = padding.top();
    let right_x = origin_x + chart_width;
    let base_y = origin_y + chart_height;
    let left_y = |value: f64| origin_y + left_scale.apply(value) as f32;
    let right_y = |value: f64| origin_y + right_scale.apply(value) as f32;

    debug!(
        columns = primary.len(),
        points = secondary.len(),
        width = total_width,
        height = total_height;
        "Combo chart layout"
    );

    let mut gradients = Vec::new();

    let grid: Vec<SceneNode> = left_ticks
        .iter()
        .map(|tick| {
            let y = left_y(*tick);
            draw::path(
                &PathProps::new(format!("M {origin_x} {y} L {right_x} {y}"))
                    .with_fill("none")
                    .with_stroke(StrokeDefinition::solid(axis_color.as_str(), 1.0))
                    .with_opacity(0.1),
            )
        })
        .collect();

    let axes = vec![
        line(
            Point::new(origin_x, origin_y),
            Point::new(origin_x, base_y),
            StrokeDefinition::solid(column_color.as_str(), 2.0),
        ),
        line(
            Point::new(right_x, origin_y),
            Point::new(right_x, base_y),
            StrokeDefinition::solid(line_color.as_str(), 2.0),
        ),
        line(
            Point::new(origin_x, base_y),
            Point::new(right_x, base_y),
            StrokeDefinition::solid(axis_color.as_str(), 1.0),
        ),
    ];

    let mut tick_labels = Vec::with_capacity(left_ticks.len() + right_ticks.len());
    for tick in &left_ticks {
        tick_labels.push(draw::text(
            &label(format_value(*tick), origin_x - 8.0, left_y(*tick), 11.0, &column_color)
                .with_align_horizontal(HorizontalAlign::Right)
                .with_align_vertical(VerticalAlign::Center),
        ));
    }
    for tick in &right_ticks {
        tick_labels.push(draw::text(
            &label(format_value(*tick), right_x + 8.0, right_y(*tick), 11.0, &line_color)
                .with_align_vertical(VerticalAlign::Center),
        ));
    }

    let mut columns = Vec::with_capacity(primary.len());
    let mut values = Vec::new();
    let mut x_labels = Vec::with_capacity(primary.len());
    let fade = lighten(&column_color, 0.4);
    let zero_y = left_y(0.0);
    for (index, point) in primary.iter().enumerate() {
        let value = point.value();
        let x = origin_x + index as f32 * step_x;
        let top = left_y(value);
        let center_x = x + options.column_width / 2.0;

        let gradient_id = format!("combo-column-gradient-{index}");
        gradients.push(draw::linear_gradient(
            &LinearGradientProps::new(gradient_id.as_str())
                .with_vector(0.0, 0.0, 0.0, 1.0)
                .with_stop(GradientStop::new(0.0, column_color.as_str()))
                .with_stop(GradientStop::new(1.0, fade.as_str())),
        ));
        columns.push(
            draw::rect(
                &RectProps::new(options.column_width, zero_y - top)
                    .with_position(x, top)
                    .with_radius(4.0)
                    .with_fill(format!("url(#{gradient_id})")),
            )
            .with_data("element-type", "shape"),
        );

        if options.show_value {
            values.push(draw::text(
                &label(format_value(value), center_x, top - 6.0, 11.0, &column_color)
                    .with_font_weight("bold")
                    .with_align_horizontal(HorizontalAlign::Center)
                    .with_align_vertical(VerticalAlign::Bottom),
            ));
        }
        x_labels.push(draw::text(
            &label(
                point.label.clone().unwrap_or_default(),
                center_x,
                base_y + 16.0,
                12.0,
                &axis_color,
            )
            .with_align_horizontal(HorizontalAlign::Center),
        ));
    }

    let line_points: Vec<Point> = secondary
        .iter()
        .enumerate()
        .map(|(index, point)| {
            Point::new(
                origin_x + index as f32 * step_x + options.column_width / 2.0,
                right_y(point.value()),
            )
        })
        .collect();

    let mut series_line = Vec::with_capacity(1);
    if !line_points.is_empty() {
        gradients.push(draw::linear_gradient(
            &LinearGradientProps::new("combo-line-gradient")
                .with_stop(GradientStop::new(0.0, line_color.as_str()))
                .with_stop(GradientStop::new(1.0, lighten(&line_color, 0.2))),
        ));
        series_line.push(draw::path(
            &PathProps::new(smooth_path(&line_points))
                .with_fill("none")
                .with_stroke(StrokeDefinition::solid("url(#combo-line-gradient)", 3.0)),
        ));
    }

    let mut dots = Vec::with_capacity(line_points.len());
    for (position, point) in line_points.iter().zip(&secondary) {
        dots.push(
            draw::ellipse(&EllipseProps::circle(*position, 5.0).with_fill(line_color.as_str()))
                .with_data("element-type", "shape"),
        );
        if options.show_value {
            values.push(draw::text(
                &label(
                    format_value(point.value()),
                    position.x(),
                    position.y() - 12.0,
                    10.0,
                    &line_color,
                )
                .with_font_weight("bold")
                .with_align_horizontal(HorizontalAlign::Center)
                .with_align_vertical(VerticalAlign::Bottom),
            ));
        }
    }

    let mut axis_titles = Vec::new();
    if let Some(title) = &x_title {
        axis_titles.push(axis_title(
            title,
            origin_x + chart_width / 2.0,
            base_y + X_LABEL_SPACE + x_title_space / 2.0,
            &axis_color,
        ));
    }
    if let Some(title) = &primary_y_title {
        axis_titles.push(axis_title(
            title,
            padding.left() + primary_title_space / 2.0,
            origin_y + chart_height / 2.0,
            &column_color,
        ));
    }
    if let Some(title) = &secondary_y_title {
        axis_titles.push(axis_title(
            title,
            right_x + RIGHT_AXIS_SPACE + secondary_title_space / 2.0,
            origin_y + chart_height / 2.0,
            &line_color,
        ));
    }

    let legend_y = base_y + X_LABEL_SPACE + x_title_space + 6.0;
    let legend = vec![
        draw::rect(
            &RectProps::new(12.0, 12.0)
                .with_position(origin_x, legend_y)
                .with_radius(2.0)
                .with_fill(column_color.as_str()),
        ),
        draw::text(
            &label(primary_label, origin_x + 16.0, legend_y + 6.0, 11.0, &axis_color)
                .with_align_vertical(VerticalAlign::Center),
        ),
        line(
            Point::new(origin_x + 100.0, legend_y + 6.0),
            Point::new(origin_x + 120.0, legend_y + 6.0),
            StrokeDefinition::solid(line_color.as_str(), 3.0),
        ),
        draw::ellipse(
            &EllipseProps::circle(Point::new(origin_x + 110.0, legend_y + 6.0), 5.0)
                .with_fill(line_color.as_str()),
        ),
        draw::text(
            &label(secondary_label, origin_x + 126.0, legend_y + 6.0, 11.0, &axis_color)
                .with_align_vertical(VerticalAlign::Center),
        ),
    ];

    let layers = [
        grid,
        axes,
        tick_labels,
        columns,
        series_line,
        dots,
        values,
        x_labels,
        axis_titles,
        legend,
    ];
    let mut children = Vec::with_capacity(layers.len() + 1);
    children.push(draw::defs(gradients));
    children.extend(
        layers
            .into_iter()
            .map(|layer| draw::group(GroupProps::new(), layer)),
    );
    let body = draw::group(
        GroupProps::new()
            .with_size(total_width, total_height)
            .with_id("chart"),
        children,
    );
    Ok(props.compose(body, 0.0))
}
