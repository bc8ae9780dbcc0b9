//! Layered tidy-tree layout.
//!
//! Nodes at the same depth share a level along the main axis. Along the cross
//! axis every subtree gets an extent wide enough for itself and its children,
//! and a parent sits centered over the block of its children.

use std::collections::HashMap;

use log::{debug, trace};

use arbor_core::{
    geometry::{Point, Size},
    identifier::NodeId,
    node::Node,
    style::Orientation,
    tree::Tree,
};

use super::{Edge, Layout, Placement};
use crate::config::LayoutConfig;

/// Computes node positions and edge routes for a [`Tree`].
#[derive(Debug, Clone)]
pub struct Engine {
    horizontal_spacing: f32,
    vertical_spacing: f32,
    edge_offset: f32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            horizontal_spacing: config.horizontal_spacing(),
            vertical_spacing: config.vertical_spacing(),
            edge_offset: config.edge_offset(),
        }
    }

    /// Set the gap between columns
    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Set the gap between rows
    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Set how far an edge leaves its parent before turning
    pub fn with_edge_offset(mut self, offset: f32) -> Self {
        self.edge_offset = offset;
        self
    }

    /// Lays out every node of `tree`.
    ///
    /// The result is normalized so that its bounds start at the origin.
    pub fn calculate_layout(&self, tree: &Tree) -> Layout {
        let axes = Axes::new(tree.orientation());
        let (sibling_spacing, level_spacing) = if axes.orientation.is_horizontal() {
            (self.vertical_spacing, self.horizontal_spacing)
        } else {
            (self.horizontal_spacing, self.vertical_spacing)
        };

        let order: Vec<&Node> = tree.iter().collect();

        let mut depths: HashMap<NodeId, usize> = HashMap::with_capacity(order.len());
        let mut level_sizes: Vec<f32> = Vec::new();
        for node in &order {
            let depth = node
                .parent()
                .and_then(|parent| depths.get(&parent))
                .map_or(0, |depth| depth + 1);
            depths.insert(node.id(), depth);
            if level_sizes.len() <= depth {
                level_sizes.resize(depth + 1, 0.0);
            }
            level_sizes[depth] = level_sizes[depth].max(axes.main(node.size()));
        }

        // Children come after their parent in pre-order, so walking it
        // backwards sizes every child before its parent.
        let mut extents: HashMap<NodeId, f32> = HashMap::with_capacity(order.len());
        for node in order.iter().rev() {
            let own = axes.cross(node.size());
            let extent = match children_span(node, &extents, sibling_spacing) {
                Some(span) => own.max(span),
                None => own,
            };
            extents.insert(node.id(), extent);
        }

        let mut level_offsets = Vec::with_capacity(level_sizes.len());
        let mut offset = 0.0;
        for size in &level_sizes {
            level_offsets.push(offset);
            offset += size + level_spacing;
        }

        let mut starts: HashMap<NodeId, f32> = HashMap::with_capacity(order.len());
        starts.insert(tree.root_id(), 0.0);
        let mut layout = Layout::default();
        for node in &order {
            let id = node.id();
            let start = starts.get(&id).copied().unwrap_or_default();
            let extent = extents.get(&id).copied().unwrap_or_default();

            if let Some(span) = children_span(node, &extents, sibling_spacing) {
                let mut cursor = start + (extent - span) / 2.0;
                for child in node.children() {
                    starts.insert(*child, cursor);
                    cursor += extents.get(child).copied().unwrap_or_default() + sibling_spacing;
                }
            }

            let depth = depths.get(&id).copied().unwrap_or_default();
            let main = level_offsets[depth] + level_sizes[depth] / 2.0;
            let cross = start + extent / 2.0;
            layout
                .placements
                .insert(id, Placement::new(axes.point(main, cross), node.size()));
        }

        for node in &order {
            for child in node.children() {
                if let (Some(from), Some(to)) =
                    (layout.placements.get(&node.id()), layout.placements.get(child))
                {
                    let route = axes.elbow(from, to, self.edge_offset);
                    layout.edges.push(Edge::new(node.id(), *child, route));
                }
            }
        }

        layout.normalize();

        debug!(
            nodes = layout.len(),
            edges = layout.edges.len(),
            orientation:? = axes.orientation;
            "Layout calculated"
        );
        trace!(layout:?; "Layout result");

        layout
    }
}

/// Cross extent of a node's children laid side by side, `None` for a leaf.
fn children_span(node: &Node, extents: &HashMap<NodeId, f32>, spacing: f32) -> Option<f32> {
    if node.is_leaf() {
        return None;
    }
    let total: f32 = node
        .children()
        .iter()
        .map(|child| extents.get(child).copied().unwrap_or_default())
        .sum();
    let gaps = (node.children().len() - 1) as f32 * spacing;
    Some(total + gaps)
}

/// Maps main/cross coordinates to diagram coordinates for an orientation.
///
/// The main coordinate grows away from the root.
#[derive(Debug, Clone, Copy)]
struct Axes {
    orientation: Orientation,
}

impl Axes {
    fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    fn main(self, size: Size) -> f32 {
        if self.orientation.is_horizontal() {
            size.width()
        } else {
            size.height()
        }
    }

    fn cross(self, size: Size) -> f32 {
        if self.orientation.is_horizontal() {
            size.height()
        } else {
            size.width()
        }
    }

    fn point(self, main: f32, cross: f32) -> Point {
        match self.orientation {
            Orientation::TopBottom => Point::new(cross, main),
            Orientation::LeftRight => Point::new(main, cross),
            Orientation::RightLeft => Point::new(-main, cross),
        }
    }

    fn to_main_cross(self, point: Point) -> (f32, f32) {
        match self.orientation {
            Orientation::TopBottom => (point.y(), point.x()),
            Orientation::LeftRight => (point.x(), point.y()),
            Orientation::RightLeft => (-point.x(), point.y()),
        }
    }

    /// Route from the far side of `from` to the near side of `to`, turning
    /// `offset` past the parent.
    ///
    /// The bend never goes past the near side of `to`.
    fn elbow(self, from: &Placement, to: &Placement, offset: f32) -> [Point; 4] {
        let (from_main, from_cross) = self.to_main_cross(from.center());
        let (to_main, to_cross) = self.to_main_cross(to.center());
        let start = from_main + self.main(from.size()) / 2.0;
        let end = to_main - self.main(to.size()) / 2.0;
        let bend = start + offset.clamp(0.0, (end - start).max(0.0));
        [
            self.point(start, from_cross),
            self.point(bend, from_cross),
            self.point(bend, to_cross),
            self.point(end, to_cross),
        ]
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use arbor_core::node::AttributeValue;

    /// Builds a tree from (parent seed, width, height) triples.
    fn build(shape: &[(usize, f32, f32)], orientation: Orientation) -> Tree {
        let mut tree = Tree::default();
        tree.set_orientation(orientation);
        let mut ids = vec![tree.root_id()];
        for (seed, width, height) in shape {
            let parent = ids[seed % ids.len()];
            let id = tree.add_child(parent, "n").unwrap();
            tree.set_attribute(id, AttributeValue::Size(Size::new(*width, *height)))
                .unwrap();
            ids.push(id);
        }
        tree
    }

    fn shape_strategy() -> impl Strategy<Value = Vec<(usize, f32, f32)>> {
        prop::collection::vec((any::<usize>(), 10.0f32..200.0, 10.0f32..120.0), 0..30)
    }

    fn orientation_strategy() -> impl Strategy<Value = Orientation> {
        prop_oneof![
            Just(Orientation::TopBottom),
            Just(Orientation::LeftRight),
            Just(Orientation::RightLeft),
        ]
    }

    proptest! {
        #[test]
        fn layout_is_deterministic(shape in shape_strategy(), orientation in orientation_strategy()) {
            let tree = build(&shape, orientation);
            let engine = Engine::new();
            prop_assert_eq!(engine.calculate_layout(&tree), engine.calculate_layout(&tree.clone()));
        }

        #[test]
        fn nodes_never_overlap(shape in shape_strategy(), orientation in orientation_strategy()) {
            let tree = build(&shape, orientation);
            let layout = Engine::new().calculate_layout(&tree);
            let bounds: Vec<_> = layout.placements().map(|(_, p)| p.bounds()).collect();
            prop_assert_eq!(bounds.len(), tree.len());
            for (i, a) in bounds.iter().enumerate() {
                for b in &bounds[i + 1..] {
                    prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
                }
            }
        }

        #[test]
        fn layout_starts_at_origin(shape in shape_strategy(), orientation in orientation_strategy()) {
            let tree = build(&shape, orientation);
            let bounds = Engine::new().calculate_layout(&tree).bounds();
            prop_assert!(bounds.min_x().abs() < 1e-3);
            prop_assert!(bounds.min_y().abs() < 1e-3);
        }
    }
}
