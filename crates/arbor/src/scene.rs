//! Renderer-facing snapshot of a laid-out diagram.
//!
//! A [`Scene`] joins the node attributes of a [`Tree`] with the positions of
//! its [`Layout`]. Renderers only ever see scenes; they never touch the tree.

use arbor_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    identifier::NodeId,
    style::{FontStyle, Orientation, Shape},
    tree::Tree,
};

use crate::layout::Layout;

/// Everything needed to draw one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub id: NodeId,
    pub label: String,
    pub shape: Shape,
    pub color: Color,
    pub font: FontStyle,
    /// Center of the node.
    pub position: Point,
    pub size: Size,
}

impl NodeView {
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_center(self.position, self.size)
    }
}

/// Everything needed to draw one parent/child connector.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeView {
    pub parent: NodeId,
    pub child: NodeId,
    pub route: [Point; 4],
}

impl EdgeView {
    pub fn start(&self) -> Point {
        self.route[0]
    }

    pub fn end(&self) -> Point {
        self.route[3]
    }
}

/// Ordered nodes and edges of a diagram, plus its overall bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    orientation: Orientation,
    nodes: Vec<NodeView>,
    edges: Vec<EdgeView>,
    bounds: Bounds,
}

impl Scene {
    /// Builds the scene of `tree` as positioned by `layout`.
    ///
    /// Nodes without a placement are skipped.
    pub fn new(tree: &Tree, layout: &Layout) -> Self {
        let nodes = tree
            .iter()
            .filter_map(|node| {
                let placement = layout.placement(node.id())?;
                Some(NodeView {
                    id: node.id(),
                    label: node.label().to_string(),
                    shape: node.shape(),
                    color: node.color(),
                    font: node.font(),
                    position: placement.center(),
                    size: placement.size(),
                })
            })
            .collect();
        let edges = layout
            .edges()
            .iter()
            .map(|edge| EdgeView {
                parent: edge.parent(),
                child: edge.child(),
                route: *edge.route(),
            })
            .collect();

        Self {
            orientation: tree.orientation(),
            nodes,
            edges,
            bounds: layout.bounds(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Nodes in tree pre-order.
    pub fn nodes(&self) -> &[NodeView] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeView] {
        &self.edges
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeView> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Receives a fresh [`Scene`] after every change to the diagram.
pub trait Renderer {
    fn render(&mut self, scene: &Scene);
}
