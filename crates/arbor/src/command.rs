//! Reversible edit commands.
//!
//! A [`Command`] is one undoable unit of change to a [`Tree`]. It is built
//! from its forward parameters only; the state it needs to undo itself (the
//! previous attribute value, the removed subtree, the original position of a
//! moved node) is captured the first time it is applied and kept from then
//! on. Redo re-applies the forward effect and keeps the captured state as is.

use std::fmt;

use log::debug;

use arbor_core::{
    color::Color,
    error::EditError,
    geometry::Size,
    identifier::NodeId,
    node::AttributeValue,
    style::{FontStyle, Orientation, Shape},
    tree::{DetachedSubtree, Tree},
};

/// A reversible mutation of a [`Tree`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddChild {
        parent: NodeId,
        label: String,
        /// Id of the created node, known once applied.
        child: Option<NodeId>,
    },
    DeleteSubtree {
        node: NodeId,
        removed: Option<DetachedSubtree>,
    },
    SetLabel {
        node: NodeId,
        label: String,
        previous: Option<String>,
    },
    SetColor {
        node: NodeId,
        color: Color,
        previous: Option<Color>,
    },
    SetShape {
        node: NodeId,
        shape: Shape,
        previous: Option<Shape>,
    },
    SetSize {
        node: NodeId,
        size: Size,
        previous: Option<Size>,
    },
    SetStyle {
        node: NodeId,
        font: FontStyle,
        previous: Option<FontStyle>,
    },
    SetOrientation {
        orientation: Orientation,
        previous: Option<Orientation>,
    },
    Reparent {
        node: NodeId,
        new_parent: NodeId,
        /// Old parent and index among its children.
        origin: Option<(NodeId, usize)>,
    },
}

impl Command {
    pub fn add_child(parent: NodeId, label: impl Into<String>) -> Self {
        Self::AddChild {
            parent,
            label: label.into(),
            child: None,
        }
    }

    pub fn delete_subtree(node: NodeId) -> Self {
        Self::DeleteSubtree {
            node,
            removed: None,
        }
    }

    pub fn set_orientation(orientation: Orientation) -> Self {
        Self::SetOrientation {
            orientation,
            previous: None,
        }
    }

    pub fn reparent(node: NodeId, new_parent: NodeId) -> Self {
        Self::Reparent {
            node,
            new_parent,
            origin: None,
        }
    }

    /// Builds the setter command matching the kind of `value`.
    pub fn set_attribute(node: NodeId, value: AttributeValue) -> Self {
        match value {
            AttributeValue::Label(label) => Self::SetLabel {
                node,
                label,
                previous: None,
            },
            AttributeValue::Color(color) => Self::SetColor {
                node,
                color,
                previous: None,
            },
            AttributeValue::Shape(shape) => Self::SetShape {
                node,
                shape,
                previous: None,
            },
            AttributeValue::Size(size) => Self::SetSize {
                node,
                size,
                previous: None,
            },
            AttributeValue::Font(font) => Self::SetStyle {
                node,
                font,
                previous: None,
            },
        }
    }

    /// Short name of the command kind, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddChild { .. } => "add_child",
            Self::DeleteSubtree { .. } => "delete_subtree",
            Self::SetLabel { .. } => "set_label",
            Self::SetColor { .. } => "set_color",
            Self::SetShape { .. } => "set_shape",
            Self::SetSize { .. } => "set_size",
            Self::SetStyle { .. } => "set_style",
            Self::SetOrientation { .. } => "set_orientation",
            Self::Reparent { .. } => "reparent",
        }
    }

    /// True once the command has captured the state needed to revert it.
    pub fn is_applied(&self) -> bool {
        match self {
            Self::AddChild { child, .. } => child.is_some(),
            Self::DeleteSubtree { removed, .. } => removed.is_some(),
            Self::SetLabel { previous, .. } => previous.is_some(),
            Self::SetColor { previous, .. } => previous.is_some(),
            Self::SetShape { previous, .. } => previous.is_some(),
            Self::SetSize { previous, .. } => previous.is_some(),
            Self::SetStyle { previous, .. } => previous.is_some(),
            Self::SetOrientation { previous, .. } => previous.is_some(),
            Self::Reparent { origin, .. } => origin.is_some(),
        }
    }

    /// Applies the forward effect to `tree`.
    ///
    /// The first successful call records the prior state. Later calls (redo)
    /// leave the recorded state untouched. On error the tree is unchanged.
    pub fn apply(&mut self, tree: &mut Tree) -> Result<(), EditError> {
        debug!(command = self.name(); "Applying command");
        match self {
            Self::AddChild {
                parent,
                label,
                child,
            } => match *child {
                Some(id) => tree.add_child_with_id(*parent, id, label.clone())?,
                None => *child = Some(tree.add_child(*parent, label.clone())?),
            },
            Self::DeleteSubtree { node, removed } => {
                let detached = tree.delete_subtree(*node)?;
                removed.get_or_insert(detached);
            }
            Self::SetLabel {
                node,
                label,
                previous,
            } => {
                let current = tree.node(*node)?.label().to_string();
                tree.set_attribute(*node, AttributeValue::Label(label.clone()))?;
                previous.get_or_insert(current);
            }
            Self::SetColor {
                node,
                color,
                previous,
            } => {
                let current = tree.node(*node)?.color();
                tree.set_attribute(*node, AttributeValue::Color(*color))?;
                previous.get_or_insert(current);
            }
            Self::SetShape {
                node,
                shape,
                previous,
            } => {
                let current = tree.node(*node)?.shape();
                tree.set_attribute(*node, AttributeValue::Shape(*shape))?;
                previous.get_or_insert(current);
            }
            Self::SetSize {
                node,
                size,
                previous,
            } => {
                let current = tree.node(*node)?.size();
                tree.set_attribute(*node, AttributeValue::Size(*size))?;
                previous.get_or_insert(current);
            }
            Self::SetStyle {
                node,
                font,
                previous,
            } => {
                let current = tree.node(*node)?.font();
                tree.set_attribute(*node, AttributeValue::Font(*font))?;
                previous.get_or_insert(current);
            }
            Self::SetOrientation {
                orientation,
                previous,
            } => {
                let current = tree.set_orientation(*orientation);
                previous.get_or_insert(current);
            }
            Self::Reparent {
                node,
                new_parent,
                origin,
            } => {
                let old = tree.reparent(*node, *new_parent)?;
                origin.get_or_insert(old);
            }
        }
        Ok(())
    }

    /// Undoes the effect of [`apply`](Self::apply).
    ///
    /// Must run against the state the command left behind, which is what
    /// the history guarantees.
    pub fn revert(&self, tree: &mut Tree) -> Result<(), EditError> {
        debug!(command = self.name(); "Reverting command");
        match self {
            Self::AddChild { child, .. } => {
                tree.delete_subtree(*captured(child)?)?;
            }
            Self::DeleteSubtree { removed, .. } => {
                tree.restore_subtree(captured(removed)?.clone())?;
            }
            Self::SetLabel { node, previous, .. } => {
                tree.set_attribute(*node, AttributeValue::Label(captured(previous)?.clone()))?;
            }
            Self::SetColor { node, previous, .. } => {
                tree.set_attribute(*node, AttributeValue::Color(*captured(previous)?))?;
            }
            Self::SetShape { node, previous, .. } => {
                tree.set_attribute(*node, AttributeValue::Shape(*captured(previous)?))?;
            }
            Self::SetSize { node, previous, .. } => {
                tree.set_attribute(*node, AttributeValue::Size(*captured(previous)?))?;
            }
            Self::SetStyle { node, previous, .. } => {
                tree.set_attribute(*node, AttributeValue::Font(*captured(previous)?))?;
            }
            Self::SetOrientation { previous, .. } => {
                tree.set_orientation(*captured(previous)?);
            }
            Self::Reparent { node, origin, .. } => {
                let (parent, index) = *captured(origin)?;
                tree.move_to(*node, parent, index)?;
            }
        }
        Ok(())
    }
}

fn captured<T>(state: &Option<T>) -> Result<&T, EditError> {
    state
        .as_ref()
        .ok_or_else(|| EditError::invalid_operation("command has not been applied"))
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddChild { parent, label, .. } => write!(f, "add `{label}` under {parent}"),
            Self::DeleteSubtree { node, .. } => write!(f, "delete {node}"),
            Self::SetLabel { node, label, .. } => write!(f, "label {node} `{label}`"),
            Self::SetColor { node, color, .. } => write!(f, "color {node} {color}"),
            Self::SetShape { node, shape, .. } => write!(f, "shape {node} {shape}"),
            Self::SetSize { node, size, .. } => {
                write!(f, "size {node} {}x{}", size.width(), size.height())
            }
            Self::SetStyle { node, font, .. } => write!(f, "font {node} {font}"),
            Self::SetOrientation { orientation, .. } => write!(f, "orientation {orientation}"),
            Self::Reparent {
                node, new_parent, ..
            } => write!(f, "move {node} under {new_parent}"),
        }
    }
}
