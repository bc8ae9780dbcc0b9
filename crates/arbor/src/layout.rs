//! Layout engine for positioning diagram nodes.
//!
//! This module turns a [`Tree`](arbor_core::tree::Tree) into positioned nodes
//! and routed edges ready for rendering. Layout is a pure function of the
//! tree structure, node sizes, orientation and spacing, so it runs again from
//! scratch after every change.
//!
//! # Pipeline Position
//!
//! ```text
//! Tree
//!     ↓ layout (this module)
//! Layout
//!     ↓ scene
//! Scene
//!     ↓ export
//! Output
//! ```
//!
//! # Re-exports
//!
//! - [`Engine`] - The tree layout engine

mod engine;

pub use engine::Engine;

use indexmap::IndexMap;

use arbor_core::{
    geometry::{Bounds, Point, Size},
    identifier::NodeId,
};

/// Position and size of one laid-out node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    center: Point,
    size: Size,
}

impl Placement {
    pub fn new(center: Point, size: Size) -> Self {
        Self { center, size }
    }

    /// Center of the node.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_center(self.center, self.size)
    }

    fn translate(&mut self, offset: Point) {
        self.center = self.center.add_point(offset);
    }
}

/// A routed connector from a parent to one of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    parent: NodeId,
    child: NodeId,
    /// Elbow route: start anchor, two bend points, end anchor.
    route: [Point; 4],
}

impl Edge {
    pub fn new(parent: NodeId, child: NodeId, route: [Point; 4]) -> Self {
        Self {
            parent,
            child,
            route,
        }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn child(&self) -> NodeId {
        self.child
    }

    /// Anchor on the parent's outline.
    pub fn start(&self) -> Point {
        self.route[0]
    }

    /// Anchor on the child's outline.
    pub fn end(&self) -> Point {
        self.route[3]
    }

    pub fn route(&self) -> &[Point; 4] {
        &self.route
    }

    fn translate(&mut self, offset: Point) {
        for point in &mut self.route {
            *point = point.add_point(offset);
        }
    }
}

/// Result of a layout pass.
///
/// Placements are kept in tree pre-order; edges follow the same order, one
/// per parent/child pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    placements: IndexMap<NodeId, Placement>,
    edges: Vec<Edge>,
}

impl Layout {
    pub fn placement(&self, id: NodeId) -> Option<&Placement> {
        self.placements.get(&id)
    }

    /// Placements in tree pre-order.
    pub fn placements(&self) -> impl Iterator<Item = (NodeId, &Placement)> {
        self.placements.iter().map(|(id, placement)| (*id, placement))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Smallest rectangle enclosing every node.
    pub fn bounds(&self) -> Bounds {
        let mut placements = self.placements.values();
        let Some(first) = placements.next() else {
            return Bounds::default();
        };
        placements.fold(first.bounds(), |bounds, placement| {
            bounds.merge(&placement.bounds())
        })
    }

    /// Shifts everything so that the bounds start at the origin.
    fn normalize(&mut self) {
        let bounds = self.bounds();
        let offset = Point::new(-bounds.min_x(), -bounds.min_y());
        for placement in self.placements.values_mut() {
            placement.translate(offset);
        }
        for edge in &mut self.edges {
            edge.translate(offset);
        }
    }
}
