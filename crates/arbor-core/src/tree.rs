//! The diagram tree.
//!
//! [`Tree`] owns every [`Node`] of a diagram in a single id-keyed arena and
//! is the only place where structural links change. It maintains these
//! invariants:
//!
//! - there is exactly one root; it has no parent and cannot be deleted or moved
//! - every other node has exactly one parent and appears exactly once in that
//!   parent's children
//! - no node is its own ancestor
//! - every id listed as a child exists in the arena
//!
//! Every operation validates before it mutates, so a failed call leaves the
//! tree untouched. Each successful mutation bumps [`Tree::revision`], which
//! callers use to invalidate derived data such as layouts.

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::{
    error::EditError,
    identifier::{IdAllocator, NodeId},
    node::{self, AttributeValue, Node},
    style::Orientation,
};

/// A subtree removed from a [`Tree`], ready to be put back where it was.
#[derive(Debug, Clone, PartialEq)]
pub struct DetachedSubtree {
    parent: NodeId,
    index: usize,
    /// Subtree nodes in pre-order; the first entry is the subtree root.
    nodes: Vec<Node>,
}

impl DetachedSubtree {
    /// The node the subtree hung from.
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Position of the subtree root among the parent's children.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Removed nodes in pre-order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Id of the subtree root.
    pub fn root(&self) -> NodeId {
        self.nodes[0].id()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// An id-keyed arena of nodes forming a single rooted tree.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    orientation: Orientation,
    ids: IdAllocator,
    revision: u64,
}

impl Tree {
    pub const DEFAULT_ROOT_LABEL: &'static str = "Root";

    /// Creates a tree holding only a root with the given label.
    pub fn new(root_label: impl Into<String>) -> Self {
        let mut ids = IdAllocator::new();
        let root = ids.allocate();
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(root, root_label));
        Self {
            nodes,
            root,
            orientation: Orientation::default(),
            ids,
            revision: 0,
        }
    }

    /// Builds a tree from fully linked nodes, checking every invariant.
    ///
    /// The id allocator resumes after the largest id present.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidOperation`] if the nodes do not form a
    /// single well-formed tree rooted at `root`, or
    /// [`EditError::InvalidValue`] if a node carries an out-of-domain
    /// attribute.
    pub fn from_nodes(
        root: NodeId,
        orientation: Orientation,
        nodes: impl IntoIterator<Item = Node>,
    ) -> Result<Self, EditError> {
        let mut ids = IdAllocator::new();
        let mut arena = HashMap::new();
        for node in nodes {
            node.validate()?;
            ids.reserve(node.id());
            if let Some(existing) = arena.insert(node.id(), node) {
                return Err(EditError::invalid_operation(format!(
                    "duplicate node id {}",
                    existing.id()
                )));
            }
        }
        if !arena.contains_key(&root) {
            return Err(EditError::NotFound(root));
        }

        let tree = Self {
            nodes: arena,
            root,
            orientation,
            ids,
            revision: 0,
        };
        tree.check_well_formed()?;
        Ok(tree)
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Counter bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, EditError> {
        self.nodes.get(&id).ok_or(EditError::NotFound(id))
    }

    pub fn root(&self) -> &Node {
        &self.nodes[&self.root]
    }

    pub fn children_of(&self, id: NodeId) -> Result<&[NodeId], EditError> {
        self.node(id).map(Node::children)
    }

    pub fn parent_of(&self, id: NodeId) -> Result<Option<NodeId>, EditError> {
        self.node(id).map(Node::parent)
    }

    /// Distance from the root; the root has depth 0.
    pub fn depth_of(&self, id: NodeId) -> Result<usize, EditError> {
        let mut depth = 0;
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent() {
            depth += 1;
            current = self.node(parent)?;
        }
        Ok(depth)
    }

    /// Number of nodes in the subtree rooted at `id`, `id` included.
    pub fn subtree_size(&self, id: NodeId) -> Result<usize, EditError> {
        self.node(id)?;
        Ok(self.pre_order_from(id).count())
    }

    /// True if `ancestor` lies on the path from `id` up to the root, or is `id`.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> Result<bool, EditError> {
        let mut current = Some(self.node(id)?.id());
        while let Some(candidate) = current {
            if candidate == ancestor {
                return Ok(true);
            }
            current = self.node(candidate)?.parent();
        }
        Ok(false)
    }

    /// Iterates over all nodes in pre-order, children in their stored order.
    pub fn iter(&self) -> PreOrder<'_> {
        self.pre_order_from(self.root)
    }

    /// Iterates over the subtree rooted at `id` in pre-order.
    ///
    /// Yields nothing if `id` is unknown.
    pub fn pre_order_from(&self, id: NodeId) -> PreOrder<'_> {
        let stack = if self.nodes.contains_key(&id) {
            vec![id]
        } else {
            Vec::new()
        };
        PreOrder { tree: self, stack }
    }

    /// Appends a new default node labeled `label` under `parent`.
    ///
    /// # Errors
    ///
    /// [`EditError::NotFound`] for an unknown parent and
    /// [`EditError::InvalidValue`] for a blank label.
    pub fn add_child(&mut self, parent: NodeId, label: impl Into<String>) -> Result<NodeId, EditError> {
        self.node(parent)?;
        let label = checked_label(label)?;
        let id = self.ids.allocate();
        self.attach(parent, Node::new(id, label));
        trace!(parent:?, id:?; "Added child");
        Ok(id)
    }

    /// Appends a new default node under `parent` reusing a known id.
    ///
    /// This recreates a node that was removed by undo, so later edits that
    /// refer to it by id keep working.
    pub fn add_child_with_id(
        &mut self,
        parent: NodeId,
        id: NodeId,
        label: impl Into<String>,
    ) -> Result<(), EditError> {
        self.node(parent)?;
        let label = checked_label(label)?;
        if self.contains(id) {
            return Err(EditError::invalid_operation(format!(
                "node id {id} is already in use"
            )));
        }
        self.ids.reserve(id);
        self.attach(parent, Node::new(id, label));
        trace!(parent:?, id:?; "Re-added child");
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, mut node: Node) {
        let id = node.id();
        node.set_parent(Some(parent));
        self.nodes.insert(id, node);
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children_mut().push(id);
        }
        self.revision += 1;
    }

    /// Removes `id` and all of its descendants.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidOperation`] for the root, [`EditError::NotFound`]
    /// for unknown ids.
    pub fn delete_subtree(&mut self, id: NodeId) -> Result<DetachedSubtree, EditError> {
        let node = self.node(id)?;
        let Some(parent) = node.parent() else {
            return Err(EditError::invalid_operation("the root node cannot be deleted"));
        };
        let index = self.index_in_parent(id, parent)?;

        let removed_ids: Vec<NodeId> = self.pre_order_from(id).map(Node::id).collect();
        let nodes: Vec<Node> = removed_ids
            .iter()
            .filter_map(|removed| self.nodes.remove(removed))
            .collect();
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children_mut().remove(index);
        }
        self.revision += 1;
        trace!(id:?, removed = nodes.len(); "Deleted subtree");

        Ok(DetachedSubtree {
            parent,
            index,
            nodes,
        })
    }

    /// Puts a previously deleted subtree back at its original position.
    ///
    /// # Errors
    ///
    /// Fails if the parent is gone, the index is past the parent's children,
    /// or any id of the subtree is already in use.
    pub fn restore_subtree(&mut self, subtree: DetachedSubtree) -> Result<(), EditError> {
        let parent = self.node(subtree.parent)?;
        if subtree.index > parent.children().len() {
            return Err(EditError::invalid_operation(format!(
                "cannot restore at index {} of {} which has {} children",
                subtree.index,
                subtree.parent,
                parent.children().len()
            )));
        }
        let Some(first) = subtree.nodes.first() else {
            return Err(EditError::invalid_operation("cannot restore an empty subtree"));
        };
        let subtree_root = first.id();
        if let Some(clash) = subtree.nodes.iter().find(|node| self.contains(node.id())) {
            return Err(EditError::invalid_operation(format!(
                "node id {} is already in use",
                clash.id()
            )));
        }

        for node in subtree.nodes {
            self.ids.reserve(node.id());
            self.nodes.insert(node.id(), node);
        }
        if let Some(parent_node) = self.nodes.get_mut(&subtree.parent) {
            parent_node.children_mut().insert(subtree.index, subtree_root);
        }
        self.revision += 1;
        trace!(id:? = subtree_root; "Restored subtree");
        Ok(())
    }

    /// Replaces one attribute of `id`, returning the previous value.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        value: AttributeValue,
    ) -> Result<AttributeValue, EditError> {
        value.validate()?;
        let node = self.nodes.get_mut(&id).ok_or(EditError::NotFound(id))?;
        let previous = node.replace_attribute(value);
        self.revision += 1;
        Ok(previous)
    }

    /// Sets the tree-wide orientation, returning the previous one.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Orientation {
        let previous = std::mem::replace(&mut self.orientation, orientation);
        self.revision += 1;
        previous
    }

    /// Moves `id` (with its subtree) to the end of `new_parent`'s children.
    ///
    /// Returns the old parent and index, which [`move_to`](Self::move_to)
    /// accepts to undo the move.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidOperation`] when moving the root, or when
    /// `new_parent` is `id` itself or one of its descendants.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(NodeId, usize), EditError> {
        let (old_parent, old_index) = self.check_move(id, new_parent)?;
        let end = self.children_of(new_parent)?.len();
        let index = if old_parent == new_parent { end - 1 } else { end };
        self.relink(id, old_parent, old_index, new_parent, index);
        Ok((old_parent, old_index))
    }

    /// Moves `id` under `parent` at position `index`.
    ///
    /// `index` is interpreted after `id` has been removed from its current
    /// parent.
    pub fn move_to(&mut self, id: NodeId, parent: NodeId, index: usize) -> Result<(), EditError> {
        let (old_parent, old_index) = self.check_move(id, parent)?;
        let mut available = self.children_of(parent)?.len();
        if old_parent == parent {
            available -= 1;
        }
        if index > available {
            return Err(EditError::invalid_operation(format!(
                "index {index} is past the {available} children of {parent}"
            )));
        }
        self.relink(id, old_parent, old_index, parent, index);
        Ok(())
    }

    fn check_move(&self, id: NodeId, new_parent: NodeId) -> Result<(NodeId, usize), EditError> {
        let node = self.node(id)?;
        self.node(new_parent)?;
        let Some(old_parent) = node.parent() else {
            return Err(EditError::invalid_operation("the root node cannot be moved"));
        };
        if self.is_ancestor_or_self(id, new_parent)? {
            return Err(EditError::invalid_operation(format!(
                "cannot move {id} under its own descendant {new_parent}"
            )));
        }
        let old_index = self.index_in_parent(id, old_parent)?;
        Ok((old_parent, old_index))
    }

    fn relink(
        &mut self,
        id: NodeId,
        old_parent: NodeId,
        old_index: usize,
        new_parent: NodeId,
        index: usize,
    ) {
        if let Some(parent_node) = self.nodes.get_mut(&old_parent) {
            parent_node.children_mut().remove(old_index);
        }
        if let Some(parent_node) = self.nodes.get_mut(&new_parent) {
            parent_node.children_mut().insert(index, id);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_parent(Some(new_parent));
        }
        self.revision += 1;
        trace!(id:?, old_parent:?, new_parent:?, index; "Moved subtree");
    }

    fn index_in_parent(&self, id: NodeId, parent: NodeId) -> Result<usize, EditError> {
        self.children_of(parent)?
            .iter()
            .position(|child| *child == id)
            .ok_or_else(|| {
                EditError::invalid_operation(format!("{id} is not listed as a child of {parent}"))
            })
    }

    /// Verifies every structural invariant.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidOperation`] describing the first violation found.
    pub fn check_well_formed(&self) -> Result<(), EditError> {
        let root = self.node(self.root)?;
        if let Some(parent) = root.parent() {
            return Err(EditError::invalid_operation(format!(
                "root {} has parent {parent}",
                self.root
            )));
        }

        let mut seen = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(EditError::invalid_operation(format!(
                    "node {id} is reachable twice"
                )));
            }
            let node = self.node(id)?;
            for child in node.children() {
                let child_node = self.nodes.get(child).ok_or_else(|| {
                    EditError::invalid_operation(format!("{id} lists missing child {child}"))
                })?;
                if child_node.parent() != Some(id) {
                    return Err(EditError::invalid_operation(format!(
                        "{child} is listed under {id} but names {:?} as parent",
                        child_node.parent()
                    )));
                }
                stack.push(*child);
            }
        }

        if seen.len() != self.nodes.len() {
            return Err(EditError::invalid_operation(format!(
                "{} node(s) are not reachable from the root",
                self.nodes.len() - seen.len()
            )));
        }
        Ok(())
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROOT_LABEL)
    }
}

/// Two trees are equal when they hold the same nodes, root and orientation.
///
/// The id allocator and the revision counter are bookkeeping and do not take
/// part in the comparison.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.orientation == other.orientation
            && self.nodes == other.nodes
    }
}

/// Pre-order iterator over the nodes of a [`Tree`].
pub struct PreOrder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.nodes.get(&id)?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

fn checked_label(label: impl Into<String>) -> Result<String, EditError> {
    let label = label.into();
    node::validate_label(&label)?;
    Ok(label)
}
