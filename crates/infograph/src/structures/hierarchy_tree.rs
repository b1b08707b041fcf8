//! Hierarchy tree structure.
//!
//! Lays the item tree out with [`tidy_tree`], sized by the largest item of
//! any level, then draws parent-to-child edges (straight or curved, solid or
//! gradient, with optional dots or arrows) and the editing affordances:
//! remove and add-child buttons under each node and insert-between buttons
//! above each pair of adjacent siblings.

use std::{borrow::Cow, collections::HashMap, collections::VecDeque};

use log::debug;
use serde::Deserialize;

use infograph_core::{
    draw::{
        self, EllipseProps, GradientStop, GradientUnits, GroupProps, LinearGradientProps,
        PathProps, PolygonProps, StrokeDefinition, StrokeStyle,
    },
    geometry::{Bounds, Point},
    scene::SceneNode,
};

use crate::{
    components::{btn_add, btn_remove, btns_group, button_size, items_group},
    data::{Datum, IndexPath},
    error::InfographicError,
    items::PositionH,
    layout::tidy_tree,
    structures::StructureProps,
    theme::Theme,
};

/// Gap between the title and the tree.
const TITLE_GAP: f32 = 20.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeType {
    #[default]
    Straight,
    Curved,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeColorMode {
    Solid,
    #[default]
    Gradient,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
}

/// Where edges leave the parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeOrigin {
    /// All edges start at the bottom center of the parent.
    #[default]
    Center,
    /// Edges are spread across the parent's bottom side.
    Distributed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeMarker {
    #[default]
    None,
    Dot,
    Arrow,
}

/// How nodes pick their palette entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// One color per depth.
    Level,
    /// One color per top-level branch.
    #[default]
    Branch,
    /// One color per node, in breadth-first order.
    NodeFlat,
}

/// Layout options of the hierarchy tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HierarchyTreeOptions {
    level_gap: f32,
    node_gap: f32,
    edge_type: EdgeType,
    edge_color_mode: EdgeColorMode,
    edge_width: f32,
    edge_style: EdgeStyle,
    edge_dash_pattern: String,
    edge_corner_radius: f32,
    edge_offset: f32,
    edge_origin: EdgeOrigin,
    edge_origin_padding: f32,
    edge_marker: EdgeMarker,
    marker_size: f32,
    color_mode: ColorMode,
}

impl Default for HierarchyTreeOptions {
    fn default() -> Self {
        Self {
            level_gap: 80.0,
            node_gap: 60.0,
            edge_type: EdgeType::default(),
            edge_color_mode: EdgeColorMode::default(),
            edge_width: 3.0,
            edge_style: EdgeStyle::default(),
            edge_dash_pattern: "5,5".to_string(),
            edge_corner_radius: 0.0,
            edge_offset: 0.0,
            edge_origin: EdgeOrigin::default(),
            edge_origin_padding: 20.0,
            edge_marker: EdgeMarker::default(),
            marker_size: 12.0,
            color_mode: ColorMode::default(),
        }
    }
}

#[derive(Debug)]
struct HierarchyNode<'a> {
    path: IndexPath,
    depth: usize,
    datum: &'a Datum,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Position among the root's children of the depth-1 ancestor, plus one;
    /// `0` for the root.
    branch: usize,
}

/// The normalized item tree, stored as an arena rooted at index `0`.
#[derive(Debug)]
struct Hierarchy<'a> {
    nodes: Vec<HierarchyNode<'a>>,
    /// Arena indexes in breadth-first order.
    order: Vec<usize>,
    /// Breadth-first position of every node, keyed by its index path.
    flat_index: HashMap<IndexPath, usize>,
}

impl<'a> Hierarchy<'a> {
    fn build(items: &'a [Datum]) -> Option<Self> {
        let root = items.first()?;
        let mut hierarchy = Self {
            nodes: vec![HierarchyNode {
                path: IndexPath::top(0),
                depth: 0,
                datum: root,
                parent: None,
                children: Vec::new(),
                branch: 0,
            }],
            order: Vec::new(),
            flat_index: HashMap::new(),
        };

        match root.children().filter(|children| !children.is_empty()) {
            Some(children) => {
                for (i, child) in children.iter().enumerate() {
                    hierarchy.add_subtree(child, IndexPath::from(vec![0, i]), 0, i + 1);
                }
            }
            None => {
                for (i, sibling) in items.iter().enumerate().skip(1) {
                    hierarchy.add_subtree(sibling, IndexPath::top(i), 0, i);
                }
            }
        }

        let mut queue = VecDeque::from([0]);
        while let Some(index) = queue.pop_front() {
            hierarchy
                .flat_index
                .insert(hierarchy.nodes[index].path.clone(), hierarchy.order.len());
            hierarchy.order.push(index);
            queue.extend(hierarchy.nodes[index].children.iter().copied());
        }
        Some(hierarchy)
    }

    fn add_subtree(&mut self, datum: &'a Datum, path: IndexPath, parent: usize, branch: usize) {
        let index = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(HierarchyNode {
            path: path.clone(),
            depth,
            datum,
            parent: Some(parent),
            children: Vec::new(),
            branch,
        });
        self.nodes[parent].children.push(index);

        for (i, child) in datum.children().unwrap_or_default().iter().enumerate() {
            self.add_subtree(child, path.child(i), index, branch);
        }
    }

    fn adjacency(&self) -> Vec<Vec<usize>> {
        self.nodes.iter().map(|node| node.children.clone()).collect()
    }

    fn depth_count(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().map_or(0, |depth| depth + 1)
    }

    fn color_index(&self, index: usize, mode: ColorMode) -> usize {
        let node = &self.nodes[index];
        match mode {
            ColorMode::Level => node.depth,
            ColorMode::Branch => node.branch,
            ColorMode::NodeFlat => self.flat_index.get(&node.path).copied().unwrap_or(0),
        }
    }
}

/// Moves every top-level item after the first under the first one, when the
/// first item has no `children` field.
fn normalize(items: &[Datum]) -> Cow<'_, [Datum]> {
    match items.split_first() {
        Some((first, rest)) if first.children().is_none() => {
            let mut root = first.clone();
            root.set_children(rest.to_vec());
            Cow::Owned(vec![root])
        }
        _ => Cow::Borrowed(items),
    }
}

/// Clamps a corner radius so two corners fit on the horizontal leg and one
/// on each vertical half.
pub(crate) fn corner_radius(requested: f32, dx: f32, dy: f32) -> f32 {
    requested.min(dy.abs() / 2.0).min(dx.abs() / 2.0).max(0.0)
}

/// Builds the `d` attribute of an edge from `start` (parent) to `end` (child).
fn edge_path(start: Point, end: Point, edge_type: EdgeType, requested_radius: f32) -> String {
    let (sx, sy) = (start.x(), start.y());
    let (ex, ey) = (end.x(), end.y());
    let mid_y = (sy + ey) / 2.0;

    match edge_type {
        EdgeType::Curved => format!("M {sx} {sy} C {sx} {mid_y} {ex} {mid_y} {ex} {ey}"),
        EdgeType::Straight => {
            let radius = corner_radius(requested_radius, ex - sx, ey - sy);
            if radius <= 0.0 {
                return format!("M {sx} {sy} L {sx} {mid_y} L {ex} {mid_y} L {ex} {ey}");
            }
            let h = (ex - sx).signum();
            let v = (ey - sy).signum();
            format!(
                "M {sx} {sy} L {sx} {} Q {sx} {mid_y} {} {mid_y} L {} {mid_y} Q {ex} {mid_y} {ex} {} L {ex} {ey}",
                mid_y - v * radius,
                sx + h * radius,
                ex - h * radius,
                mid_y + v * radius,
            )
        }
    }
}

/// Per-node placement shared by the item, edge and button passes.
struct Placed {
    /// Top-left corner of the item.
    origin: Point,
    size: Bounds,
    color: String,
}

impl Placed {
    fn center_x(&self) -> f32 {
        self.origin.x() + self.size.width() / 2.0
    }

    fn bottom(&self) -> f32 {
        self.origin.y() + self.size.height()
    }
}

/// Renders a hierarchy tree.
///
/// # Errors
///
/// Returns an error when the options cannot be decoded or no item renderer
/// is wired.
pub fn hierarchy_tree(props: &StructureProps<'_>) -> Result<SceneNode, InfographicError> {
    let options: HierarchyTreeOptions = props.layout_options()?;
    let item = props.item()?;
    let theme = props.theme();
    let button = button_size();

    let items = normalize(props.data().items());
    let Some(hierarchy) = Hierarchy::build(&items) else {
        debug!("Hierarchy tree has no items");
        let body = draw::group(
            GroupProps::new(),
            vec![btns_group(vec![btn_add(
                &IndexPath::top(0),
                -button.width() / 2.0,
                -button.height() / 2.0,
            )])],
        );
        return Ok(props.compose(body, TITLE_GAP));
    };

    // Measure pass: one representative per depth.
    let mut level_sizes = vec![Bounds::default(); hierarchy.depth_count()];
    let mut measured = vec![false; level_sizes.len()];
    for &index in &hierarchy.order {
        let node = &hierarchy.nodes[index];
        if measured[node.depth] {
            continue;
        }
        level_sizes[node.depth] = item.measure(
            &node.path,
            node.datum,
            PositionH::Center,
            item.default_colors(),
        );
        measured[node.depth] = true;
    }
    let max_width = level_sizes.iter().map(|b| b.width()).fold(0.0, f32::max);
    let max_height = level_sizes.iter().map(|b| b.height()).fold(0.0, f32::max);

    let positions = tidy_tree(
        &hierarchy.adjacency(),
        max_width + options.node_gap,
        max_height + options.level_gap,
    );
    let min_x = positions.iter().map(|p| p.x()).fold(f32::INFINITY, f32::min);
    let min_y = positions.iter().map(|p| p.y()).fold(f32::INFINITY, f32::min);
    let offset_x = (-min_x + max_width / 2.0).max(0.0);
    let offset_y = (-min_y + button.height() + 10.0).max(0.0);

    debug!(
        nodes = hierarchy.nodes.len(),
        levels = level_sizes.len(),
        max_width,
        max_height;
        "Hierarchy tree layout"
    );

    let placed: Vec<Placed> = hierarchy
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let size = level_sizes[node.depth];
            let position = positions[index];
            Placed {
                origin: Point::new(
                    position.x() + offset_x - size.width() / 2.0,
                    position.y() + offset_y,
                ),
                size,
                color: palette_color(theme, hierarchy.color_index(index, options.color_mode)),
            }
        })
        .collect();

    let mut item_nodes = Vec::with_capacity(hierarchy.nodes.len());
    let mut buttons = Vec::new();
    let mut edges = Vec::new();
    let mut markers = Vec::new();
    let mut gradients = Vec::new();

    for &index in &hierarchy.order {
        let node = &hierarchy.nodes[index];
        let place = &placed[index];
        let (x, y) = (place.origin.x(), place.origin.y());

        item_nodes.push(item.render(
            &node.path,
            node.datum,
            (x, y),
            PositionH::Center,
            theme.theme_colors(Some(place.color.as_str())),
        ));

        let button_x = x + (place.size.width() - button.width()) / 2.0;
        buttons.push(btn_remove(&node.path, button_x, place.bottom() + 5.0));
        buttons.push(btn_add(
            &node.path.child(0),
            button_x,
            place.bottom() + button.height() + 10.0,
        ));

        let Some(parent_index) = node.parent else {
            continue;
        };
        let parent = &hierarchy.nodes[parent_index];
        let parent_place = &placed[parent_index];
        let sibling_count = parent.children.len();
        let sibling_index = parent
            .children
            .iter()
            .position(|&child| child == index)
            .unwrap_or(0);

        let start_x = match options.edge_origin {
            EdgeOrigin::Distributed if sibling_count > 1 => {
                let usable = (parent_place.size.width() - options.edge_origin_padding * 2.0).max(0.0);
                let segment = usable / sibling_count as f32;
                let left = parent_place.center_x() - usable / 2.0;
                left + segment * sibling_index as f32 + segment / 2.0
            }
            _ => parent_place.center_x(),
        };
        let start = Point::new(start_x, parent_place.bottom() + options.edge_offset);
        let child_x = place.center_x();
        let tip_y = y - options.edge_offset;
        let end_y = match options.edge_marker {
            EdgeMarker::Arrow => tip_y - options.marker_size,
            _ => tip_y,
        };
        let end = Point::new(child_x, end_y);

        let gradient_mode = options.edge_color_mode == EdgeColorMode::Gradient;
        let paint = if gradient_mode {
            let id = format!("gradient-{}-{}", parent.path.key(), node.path.key());
            gradients.push(draw::linear_gradient(
                &LinearGradientProps::new(id.as_str())
                    .with_units(GradientUnits::UserSpaceOnUse)
                    .with_vector(start.x(), start.y(), end.x(), end.y())
                    .with_stop(GradientStop::new(0.0, parent_place.color.as_str()))
                    .with_stop(GradientStop::new(1.0, place.color.as_str())),
            ));
            format!("url(#{id})")
        } else {
            theme.color_primary().to_string()
        };

        let mut stroke = StrokeDefinition::new(paint, options.edge_width);
        if options.edge_style == EdgeStyle::Dashed {
            stroke = stroke.with_style(StrokeStyle::Custom(options.edge_dash_pattern.clone()));
        }
        edges.push(
            draw::path(
                &PathProps::new(edge_path(
                    start,
                    end,
                    options.edge_type,
                    options.edge_corner_radius,
                ))
                .with_fill("none")
                .with_stroke(stroke),
            )
            .with_data("element-type", "edge"),
        );

        let (start_color, end_color) = if gradient_mode {
            (parent_place.color.as_str(), place.color.as_str())
        } else {
            (theme.color_primary(), theme.color_primary())
        };
        match options.edge_marker {
            EdgeMarker::None => {}
            EdgeMarker::Arrow => {
                let half = options.marker_size / 2.0;
                markers.push(draw::polygon(
                    &PolygonProps::new([
                        Point::new(child_x, tip_y),
                        Point::new(child_x - half, end_y),
                        Point::new(child_x + half, end_y),
                    ])
                    .with_fill(end_color),
                ));
            }
            EdgeMarker::Dot => {
                markers.push(draw::ellipse(
                    &EllipseProps::circle(start, options.marker_size).with_fill(start_color),
                ));
                markers.push(draw::ellipse(
                    &EllipseProps::circle(Point::new(child_x, tip_y), options.marker_size)
                        .with_fill(end_color),
                ));
            }
        }
    }

    // Insert-between buttons above each pair of adjacent siblings.
    for parent in &hierarchy.nodes {
        if parent.children.len() < 2 {
            continue;
        }
        let mut siblings = parent.children.clone();
        siblings.sort_by(|a, b| placed[*a].center_x().total_cmp(&placed[*b].center_x()));
        let y = placed[siblings[0]].origin.y() - button.height() - 5.0;
        for pair in siblings.windows(2) {
            let left = &placed[pair[0]];
            let right = &placed[pair[1]];
            let mid_x = (left.center_x() + right.center_x()) / 2.0;
            buttons.push(btn_add(
                &hierarchy.nodes[pair[0]].path.next_sibling(),
                mid_x - button.width() / 2.0,
                y,
            ));
        }
    }

    let mut decorations = edges;
    decorations.extend(markers);

    let mut body = Vec::with_capacity(4);
    if !gradients.is_empty() {
        body.push(draw::defs(gradients));
    }
    body.push(draw::group(GroupProps::new(), decorations).with_data("element-type", "edges-group"));
    body.push(items_group(item_nodes));
    body.push(btns_group(buttons));

    Ok(props.compose(draw::group(GroupProps::new(), body), TITLE_GAP))
}

fn palette_color(theme: &Theme, color_index: usize) -> String {
    theme.palette_color(&IndexPath::top(color_index))
}
