//! Tidy tree layout.
//!
//! Buchheim, Jünger and Leipert's linear-time refinement of the
//! Reingold–Tilford algorithm, with the same conventions as `d3.tree` in
//! node-size mode: the root sits at `x = 0`, siblings are one unit apart
//! (separation 1), every depth is one row, and the unit box is scaled by the
//! node size.
//!
//! The tree is given as an adjacency list where node `0` is the root.

use log::trace;

use infograph_core::geometry::Point;

/// Horizontal distance between adjacent siblings, in node widths.
const SEPARATION: f64 = 1.0;

#[derive(Debug, Clone)]
struct WalkNode {
    parent: Option<usize>,
    children: Vec<usize>,
    /// Position among siblings.
    number: usize,
    ancestor: usize,
    /// Anchor carried between siblings during apportioning.
    default_ancestor: Option<usize>,
    prelim: f64,
    modifier: f64,
    change: f64,
    shift: f64,
    thread: Option<usize>,
    depth: usize,
}

impl WalkNode {
    fn new(index: usize) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            number: 0,
            ancestor: index,
            default_ancestor: None,
            prelim: 0.0,
            modifier: 0.0,
            change: 0.0,
            shift: 0.0,
            thread: None,
            depth: 0,
        }
    }
}

struct TidyTree {
    nodes: Vec<WalkNode>,
}

impl TidyTree {
    fn next_left(&self, v: usize) -> Option<usize> {
        self.nodes[v].children.first().copied().or(self.nodes[v].thread)
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.nodes[v].children.last().copied().or(self.nodes[v].thread)
    }

    fn parent_of(&self, v: usize) -> Option<usize> {
        self.nodes[v].parent
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let distance = self.nodes[wp].number as f64 - self.nodes[wm].number as f64;
        let change = shift / distance;
        self.nodes[wp].change -= change;
        self.nodes[wp].shift += shift;
        self.nodes[wm].change += change;
        self.nodes[wp].prelim += shift;
        self.nodes[wp].modifier += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        let children = self.nodes[v].children.clone();
        for w in children.into_iter().rev() {
            let node = &mut self.nodes[w];
            node.prelim += shift;
            node.modifier += shift;
            change += node.change;
            shift += node.shift + change;
        }
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let candidate = self.nodes[vim].ancestor;
        if self.parent_of(candidate) == self.parent_of(v) {
            candidate
        } else {
            ancestor
        }
    }

    fn apportion(&mut self, v: usize, w: Option<usize>, mut ancestor: usize) -> usize {
        let Some(w) = w else {
            return ancestor;
        };
        let Some(parent) = self.parent_of(v) else {
            return ancestor;
        };

        let mut vip = v;
        let mut vop = v;
        let mut vim = w;
        let mut vom = self.nodes[parent].children[0];
        let mut sip = self.nodes[vip].modifier;
        let mut sop = self.nodes[vop].modifier;
        let mut sim = self.nodes[vim].modifier;
        let mut som = self.nodes[vom].modifier;

        let mut next_im = self.next_right(vim);
        let mut next_ip = self.next_left(vip);
        while let (Some(im), Some(ip)) = (next_im, next_ip) {
            vim = im;
            vip = ip;
            vom = self.next_left(vom).unwrap_or(vom);
            vop = self.next_right(vop).unwrap_or(vop);
            self.nodes[vop].ancestor = v;

            let shift = self.nodes[vim].prelim + sim - self.nodes[vip].prelim - sip + SEPARATION;
            if shift > 0.0 {
                let from = self.next_ancestor(vim, v, ancestor);
                self.move_subtree(from, v, shift);
                sip += shift;
                sop += shift;
            }

            sim += self.nodes[vim].modifier;
            sip += self.nodes[vip].modifier;
            som += self.nodes[vom].modifier;
            sop += self.nodes[vop].modifier;

            next_im = self.next_right(vim);
            next_ip = self.next_left(vip);
        }

        if next_im.is_some() && self.next_right(vop).is_none() {
            self.nodes[vop].thread = next_im;
            self.nodes[vop].modifier += sim - sop;
        }
        if next_ip.is_some() && self.next_left(vom).is_none() {
            self.nodes[vom].thread = next_ip;
            self.nodes[vom].modifier += sip - som;
            ancestor = v;
        }
        ancestor
    }

    fn first_walk(&mut self, v: usize) {
        let Some(parent) = self.parent_of(v) else {
            return;
        };
        let number = self.nodes[v].number;
        let left_sibling = number.checked_sub(1).map(|i| self.nodes[parent].children[i]);

        if let (Some(&first), Some(&last)) =
            (self.nodes[v].children.first(), self.nodes[v].children.last())
        {
            self.execute_shifts(v);
            let midpoint = (self.nodes[first].prelim + self.nodes[last].prelim) / 2.0;
            match left_sibling {
                Some(w) => {
                    self.nodes[v].prelim = self.nodes[w].prelim + SEPARATION;
                    self.nodes[v].modifier = self.nodes[v].prelim - midpoint;
                }
                None => self.nodes[v].prelim = midpoint,
            }
        } else if let Some(w) = left_sibling {
            self.nodes[v].prelim = self.nodes[w].prelim + SEPARATION;
        }

        let anchor = self.nodes[parent]
            .default_ancestor
            .unwrap_or(self.nodes[parent].children[0]);
        let anchor = self.apportion(v, left_sibling, anchor);
        self.nodes[parent].default_ancestor = Some(anchor);
    }
}

/// Lays out the tree rooted at node `0`.
///
/// `children[i]` lists the children of node `i` in order. Returns one
/// position per node: `x` is centered on the node (root at `0`), `y` is the
/// top of its row (`depth × node_height`).
///
/// # Examples
///
/// ```
/// use infograph::layout::tidy_tree;
///
/// let positions = tidy_tree(&[vec![1, 2], vec![], vec![]], 100.0, 50.0);
/// assert_eq!(positions[0].x(), 0.0);
/// assert_eq!(positions[1].x(), -50.0);
/// assert_eq!(positions[2].x(), 50.0);
/// assert_eq!(positions[2].y(), 50.0);
/// ```
pub fn tidy_tree(children: &[Vec<usize>], node_width: f32, node_height: f32) -> Vec<Point> {
    let count = children.len();
    if count == 0 {
        return Vec::new();
    }

    // One extra virtual node sits above the root so the root has a parent.
    let virtual_root = count;
    let mut tree = TidyTree {
        nodes: (0..=count).map(WalkNode::new).collect(),
    };
    for (parent, kids) in children.iter().enumerate() {
        for (number, &child) in kids.iter().enumerate() {
            tree.nodes[child].parent = Some(parent);
            tree.nodes[child].number = number;
        }
        tree.nodes[parent].children = kids.clone();
    }
    tree.nodes[virtual_root].children = vec![0];
    tree.nodes[0].parent = Some(virtual_root);

    let pre_order = pre_order(children);
    for &v in &pre_order {
        if let Some(&parent) = tree.nodes[v].parent.as_ref().filter(|p| **p != virtual_root) {
            tree.nodes[v].depth = tree.nodes[parent].depth + 1;
        }
    }

    for v in post_order(children) {
        tree.first_walk(v);
    }
    tree.nodes[virtual_root].modifier = -tree.nodes[0].prelim;

    let mut x = vec![0.0; count];
    for &v in &pre_order {
        let Some(parent) = tree.nodes[v].parent else {
            continue;
        };
        let parent_modifier = tree.nodes[parent].modifier;
        x[v] = tree.nodes[v].prelim + parent_modifier;
        tree.nodes[v].modifier += parent_modifier;
    }

    trace!(nodes = count; "Tidy tree laid out");

    (0..count)
        .map(|v| {
            Point::new(
                (x[v] * f64::from(node_width)) as f32,
                tree.nodes[v].depth as f32 * node_height,
            )
        })
        .collect()
}

/// Parents before children, siblings left to right.
fn pre_order(children: &[Vec<usize>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(children.len());
    let mut stack = vec![0];
    while let Some(node) = stack.pop() {
        order.push(node);
        stack.extend(children[node].iter().rev());
    }
    order
}

/// Children before parents, siblings left to right.
fn post_order(children: &[Vec<usize>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(children.len());
    let mut stack = vec![0];
    while let Some(node) = stack.pop() {
        order.push(node);
        stack.extend(children[node].iter());
    }
    order.reverse();
    order
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn xs(positions: &[Point]) -> Vec<f32> {
        positions.iter().map(|p| p.x()).collect()
    }

    #[test]
    fn test_single_node() {
        let positions = tidy_tree(&[vec![]], 10.0, 10.0);
        assert_eq!(positions, vec![Point::new(0.0, 0.0)]);
    }

    #[test]
    fn test_empty_tree() {
        assert!(tidy_tree(&[], 10.0, 10.0).is_empty());
    }

    #[test]
    fn test_three_children_are_centered_under_root() {
        let positions = tidy_tree(&[vec![1, 2, 3], vec![], vec![], vec![]], 10.0, 20.0);
        assert_eq!(xs(&positions), vec![0.0, -10.0, 0.0, 10.0]);
        assert!(positions[1..].iter().all(|p| p.y() == 20.0));
    }

    #[test]
    fn test_subtrees_do_not_overlap() {
        // root -> a(a1, a2, a3), b(b1, b2, b3)
        let children = vec![
            vec![1, 2],
            vec![3, 4, 5],
            vec![6, 7, 8],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
        ];
        let positions = tidy_tree(&children, 1.0, 1.0);
        let leaves: Vec<f32> = (3..9).map(|i| positions[i].x()).collect();
        for pair in leaves.windows(2) {
            assert!(pair[1] - pair[0] >= 1.0 - 1e-5, "leaves overlap: {leaves:?}");
        }
        assert_approx_eq!(f32, positions[0].x(), 0.0);
        assert_approx_eq!(f32, positions[1].x(), -1.5);
        assert_approx_eq!(f32, positions[2].x(), 1.5);
    }

    #[test]
    fn test_walk_orders() {
        let children = vec![vec![1, 2], vec![3, 4], vec![], vec![], vec![]];
        assert_eq!(pre_order(&children), vec![0, 1, 3, 4, 2]);
        assert_eq!(post_order(&children), vec![3, 4, 1, 2, 0]);
    }

    #[test]
    fn test_wide_uneven_tree_keeps_unit_spacing_per_row() {
        // root -> a(a1, a2), b, c(c1, c2, c3)
        let children = vec![
            vec![1, 2, 3],
            vec![4, 5],
            vec![],
            vec![6, 7, 8],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
        ];
        let positions = tidy_tree(&children, 1.0, 1.0);
        for row in [vec![1, 2, 3], vec![4, 5, 6, 7, 8]] {
            let xs: Vec<f32> = row.iter().map(|&i| positions[i].x()).collect();
            for pair in xs.windows(2) {
                assert!(pair[1] - pair[0] >= 1.0 - 1e-5, "row overlaps: {xs:?}");
            }
        }
        let midpoint = (positions[6].x() + positions[8].x()) / 2.0;
        assert_approx_eq!(f32, positions[3].x(), midpoint);
    }

    #[test]
    fn test_parent_is_centered_over_children() {
        let children = vec![vec![1, 2], vec![3, 4], vec![], vec![], vec![]];
        let positions = tidy_tree(&children, 1.0, 1.0);
        let midpoint = (positions[3].x() + positions[4].x()) / 2.0;
        assert_approx_eq!(f32, positions[1].x(), midpoint);
        assert_eq!(positions[3].y(), 2.0);
    }
}
