//! The diagram controller.
//!
//! [`Controller`] owns the [`Tree`], its [`History`] and the current
//! [`Layout`]. Every change goes through it: an [`Action`] (or one of the
//! typed convenience methods) becomes exactly one [`Command`], the command is
//! applied through the history, the layout is recomputed and every attached
//! [`Renderer`] receives the new [`Scene`].
//!
//! The tree is only ever handed out as `&Tree`, so there is no way to change
//! it without leaving an undo record.

use std::path::Path;

use log::{debug, info, warn};

use arbor_core::{
    color::Color,
    error::EditError,
    geometry::Size,
    identifier::NodeId,
    node::{Attribute, AttributeValue},
    style::{FontStyle, Orientation, Shape},
    tree::Tree,
};

use crate::{
    ArborError,
    command::Command,
    config::AppConfig,
    document,
    history::History,
    layout::{Engine, Layout},
    scene::{Renderer, Scene},
};

/// A request from the property editor or another front end.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddChild { parent: NodeId, label: String },
    DeleteSubtree { node: NodeId },
    /// Set one attribute from its raw text form.
    SetAttribute {
        node: NodeId,
        attribute: Attribute,
        value: String,
    },
    /// Set the tree orientation from its text form (`TB`, `LR`, `RL`).
    SetOrientation { value: String },
    Reparent { node: NodeId, new_parent: NodeId },
    Undo,
    Redo,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddChild { .. } => "add_child",
            Self::DeleteSubtree { .. } => "delete_subtree",
            Self::SetAttribute { .. } => "set_attribute",
            Self::SetOrientation { .. } => "set_orientation",
            Self::Reparent { .. } => "reparent",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

/// Single entry point for editing a diagram.
///
/// # Examples
///
/// ```
/// use arbor::{Action, Controller, config::AppConfig};
///
/// let mut controller = Controller::new(&AppConfig::default());
/// let root = controller.tree().root_id();
///
/// let child = controller.add_child(root, "Child").unwrap();
/// assert_eq!(controller.tree().children_of(root).unwrap(), &[child]);
///
/// controller.handle_action(Action::Undo).unwrap();
/// assert!(!controller.tree().contains(child));
/// ```
pub struct Controller {
    tree: Tree,
    history: History,
    engine: Engine,
    layout: Layout,
    renderers: Vec<Box<dyn Renderer>>,
}

impl Controller {
    /// Creates a controller editing a fresh single-root diagram.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_tree(Tree::default(), config)
    }

    /// Creates a controller editing `tree`.
    pub fn with_tree(tree: Tree, config: &AppConfig) -> Self {
        let engine = Engine::from_config(config.layout());
        let layout = engine.calculate_layout(&tree);
        Self {
            tree,
            history: History::with_max_depth(config.history().max_depth()),
            engine,
            layout,
            renderers: Vec::new(),
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Layout of the current tree.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Renderer-facing snapshot of the current diagram.
    pub fn scene(&self) -> Scene {
        Scene::new(&self.tree, &self.layout)
    }

    /// Attaches a renderer and immediately hands it the current scene.
    pub fn attach_renderer(&mut self, mut renderer: Box<dyn Renderer>) {
        renderer.render(&self.scene());
        self.renderers.push(renderer);
    }

    /// Handles one front-end request.
    ///
    /// Returns the id of the created node for [`Action::AddChild`] and
    /// `None` for every other action.
    ///
    /// # Errors
    ///
    /// Returns the [`EditError`] describing why the action was rejected. The
    /// diagram and its history are unchanged in that case.
    pub fn handle_action(&mut self, action: Action) -> Result<Option<NodeId>, EditError> {
        let name = action.name();
        debug!(action = name; "Handling action");

        let result = match action {
            Action::AddChild { parent, label } => self.add_child(parent, label).map(Some),
            Action::DeleteSubtree { node } => self.delete_subtree(node).map(|_| None),
            Action::SetAttribute {
                node,
                attribute,
                value,
            } => self
                .set_attribute_str(node, attribute, &value)
                .map(|_| None),
            Action::SetOrientation { value } => value
                .parse::<Orientation>()
                .map_err(EditError::InvalidValue)
                .and_then(|orientation| self.set_orientation(orientation))
                .map(|_| None),
            Action::Reparent { node, new_parent } => {
                self.reparent(node, new_parent).map(|_| None)
            }
            Action::Undo => self.undo().map(|_| None),
            Action::Redo => self.redo().map(|_| None),
        };

        match result {
            Ok(created) => Ok(created),
            Err(err) => {
                warn!(action = name, err:err; "Action rejected");
                Err(err)
            }
        }
    }

    /// Appends a default node labeled `label` under `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        label: impl Into<String>,
    ) -> Result<NodeId, EditError> {
        self.execute(Command::add_child(parent, label))?;
        match self.history.undo_stack().last() {
            Some(Command::AddChild {
                child: Some(id), ..
            }) => Ok(*id),
            _ => Err(EditError::invalid_operation("added node was not recorded")),
        }
    }

    /// Removes `node` and all of its descendants.
    pub fn delete_subtree(&mut self, node: NodeId) -> Result<(), EditError> {
        self.execute(Command::delete_subtree(node))
    }

    pub fn set_label(&mut self, node: NodeId, label: impl Into<String>) -> Result<(), EditError> {
        self.set_attribute(node, AttributeValue::Label(label.into()))
    }

    pub fn set_color(&mut self, node: NodeId, color: Color) -> Result<(), EditError> {
        self.set_attribute(node, AttributeValue::Color(color))
    }

    pub fn set_shape(&mut self, node: NodeId, shape: Shape) -> Result<(), EditError> {
        self.set_attribute(node, AttributeValue::Shape(shape))
    }

    pub fn set_size(&mut self, node: NodeId, size: Size) -> Result<(), EditError> {
        self.set_attribute(node, AttributeValue::Size(size))
    }

    pub fn set_font_style(&mut self, node: NodeId, font: FontStyle) -> Result<(), EditError> {
        self.set_attribute(node, AttributeValue::Font(font))
    }

    /// Sets any attribute from a typed value.
    pub fn set_attribute(&mut self, node: NodeId, value: AttributeValue) -> Result<(), EditError> {
        value.validate()?;
        self.tree.node(node)?;
        self.execute(Command::set_attribute(node, value))
    }

    /// Sets an attribute from its raw text form, as typed into the editor.
    pub fn set_attribute_str(
        &mut self,
        node: NodeId,
        attribute: Attribute,
        raw: &str,
    ) -> Result<(), EditError> {
        let value = AttributeValue::parse(attribute, raw, self.tree.node(node)?)?;
        self.set_attribute(node, value)
    }

    /// Changes the growth direction. Undoable like any other edit.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), EditError> {
        self.execute(Command::set_orientation(orientation))
    }

    /// Moves `node` with its subtree to the end of `new_parent`'s children.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), EditError> {
        self.execute(Command::reparent(node, new_parent))
    }

    pub fn undo(&mut self) -> Result<(), EditError> {
        self.history.undo(&mut self.tree)?;
        self.refresh();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditError> {
        self.history.redo(&mut self.tree)?;
        self.refresh();
        Ok(())
    }

    /// Swaps in a whole new diagram and forgets the history.
    pub fn replace_tree(&mut self, tree: Tree) {
        self.tree = tree;
        self.history.clear();
        self.refresh();
    }

    /// Loads a `.diagram` file, replacing the current diagram.
    ///
    /// On error the current diagram is kept.
    pub fn load_document(&mut self, path: impl AsRef<Path>) -> Result<(), ArborError> {
        let tree = document::load(path)?;
        self.replace_tree(tree);
        info!(nodes = self.tree.len(); "Document opened");
        Ok(())
    }

    /// Saves the current diagram as a `.diagram` file.
    pub fn save_document(&self, path: impl AsRef<Path>) -> Result<(), ArborError> {
        document::save(&self.tree, path)
    }

    fn execute(&mut self, command: Command) -> Result<(), EditError> {
        self.history.apply(&mut self.tree, command)?;
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        self.layout = self.engine.calculate_layout(&self.tree);
        if self.renderers.is_empty() {
            return;
        }
        let scene = self.scene();
        for renderer in &mut self.renderers {
            renderer.render(&scene);
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
