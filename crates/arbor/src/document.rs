//! `.diagram` files.
//!
//! A diagram is saved as pretty-printed JSON holding a format version, the
//! tree orientation, the root id and a flat pre-order list of nodes:
//!
//! ```json
//! {
//!   "version": 1,
//!   "orientation": "TB",
//!   "root": 0,
//!   "nodes": [
//!     { "id": 0, "parent": null, "label": "Root", "shape": "ellipse",
//!       "color": "#ffffff", "font": { "size": 10, "weight": "bold" },
//!       "width": 100.0, "height": 40.0, "children": [] }
//!   ]
//! }
//! ```
//!
//! Node ids are kept as they are, so a loaded tree keeps handing out ids
//! after the largest one in the file.

use std::{fs, path::Path};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use arbor_core::{
    color::Color,
    geometry::Size,
    identifier::NodeId,
    node::Node,
    style::{FontStyle, Orientation, Shape},
    tree::Tree,
};

use crate::ArborError;

/// Current `.diagram` format version.
pub const FORMAT_VERSION: u32 = 1;

/// File extension of saved diagrams.
pub const EXTENSION: &str = "diagram";

#[derive(Debug, Serialize, Deserialize)]
struct DocumentFile {
    version: u32,
    #[serde(default)]
    orientation: Orientation,
    root: NodeId,
    nodes: Vec<NodeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    id: NodeId,
    parent: Option<NodeId>,
    label: String,
    #[serde(default)]
    shape: Shape,
    #[serde(default)]
    color: Color,
    #[serde(default)]
    font: FontStyle,
    #[serde(default = "default_width")]
    width: f32,
    #[serde(default = "default_height")]
    height: f32,
    #[serde(default)]
    children: Vec<NodeId>,
}

fn default_width() -> f32 {
    Node::DEFAULT_WIDTH
}

fn default_height() -> f32 {
    Node::DEFAULT_HEIGHT
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id(),
            parent: node.parent(),
            label: node.label().to_string(),
            shape: node.shape(),
            color: node.color(),
            font: node.font(),
            width: node.width(),
            height: node.height(),
            children: node.children().to_vec(),
        }
    }
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        Node::new(record.id, record.label)
            .with_shape(record.shape)
            .with_color(record.color)
            .with_font(record.font)
            .with_size(Size::new(record.width, record.height))
            .with_links(record.parent, record.children)
    }
}

/// Serializes `tree` to the `.diagram` JSON text.
pub fn to_json(tree: &Tree) -> Result<String, ArborError> {
    let document = DocumentFile {
        version: FORMAT_VERSION,
        orientation: tree.orientation(),
        root: tree.root_id(),
        nodes: tree.iter().map(NodeRecord::from).collect(),
    };
    serde_json::to_string_pretty(&document)
        .map_err(|err| ArborError::Document(format!("cannot serialize diagram: {err}")))
}

/// Parses `.diagram` JSON text into a validated [`Tree`].
///
/// # Errors
///
/// Returns [`ArborError::Document`] for malformed JSON, an unsupported
/// version, or nodes that do not form a single well-formed tree with valid
/// attribute values.
pub fn from_json(text: &str) -> Result<Tree, ArborError> {
    let document: DocumentFile = serde_json::from_str(text)
        .map_err(|err| ArborError::Document(format!("malformed diagram: {err}")))?;
    if document.version != FORMAT_VERSION {
        return Err(ArborError::Document(format!(
            "unsupported diagram version {} (expected {FORMAT_VERSION})",
            document.version
        )));
    }
    debug!(nodes = document.nodes.len(), version = document.version; "Validating diagram");

    let nodes = document.nodes.into_iter().map(Node::from);
    Tree::from_nodes(document.root, document.orientation, nodes)
        .map_err(|err| ArborError::Document(format!("invalid diagram: {err}")))
}

/// Writes `tree` to `path`.
pub fn save(tree: &Tree, path: impl AsRef<Path>) -> Result<(), ArborError> {
    let path = path.as_ref();
    let text = to_json(tree)?;
    fs::write(path, text)?;
    info!(path:? = path, nodes = tree.len(); "Diagram saved");
    Ok(())
}

/// Reads and validates the diagram stored at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Tree, ArborError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let tree = from_json(&text)?;
    info!(path:? = path, nodes = tree.len(); "Diagram loaded");
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(nodes: &str) -> String {
        format!(r#"{{ "version": 1, "orientation": "LR", "root": 0, "nodes": [{nodes}] }}"#)
    }

    fn assert_document_error(text: &str, needle: &str) {
        match from_json(text) {
            Err(ArborError::Document(message)) => {
                assert!(message.contains(needle), "`{message}` lacks `{needle}`")
            }
            other => panic!("expected document error, got {other:?}"),
        }
    }

    #[test]
    fn test_minimal_document_uses_defaults() {
        let text = document(r#"{ "id": 0, "parent": null, "label": "Root" }"#);
        let tree = from_json(&text).unwrap();
        assert_eq!(tree.orientation(), Orientation::LeftRight);
        assert_eq!(tree.root().shape(), Shape::Ellipse);
        assert_eq!(tree.root().size(), Size::new(100.0, 40.0));
    }

    #[test]
    fn test_original_shape_names_load() {
        let text = document(
            r#"{ "id": 0, "parent": null, "label": "Root", "shape": "class", "children": [1, 2] },
               { "id": 1, "parent": 0, "label": "A", "shape": "rbox" },
               { "id": 2, "parent": 0, "label": "B", "shape": "stick_figure" }"#,
        );
        let tree = from_json(&text).unwrap();
        assert_eq!(tree.root().shape(), Shape::Record);
        assert_eq!(tree.node(NodeId::new(1)).unwrap().shape(), Shape::RoundedBox);
        assert_eq!(tree.node(NodeId::new(2)).unwrap().shape(), Shape::StickFigure);

        let saved = to_json(&tree).unwrap();
        assert!(saved.contains(r#""shape": "record""#), "{saved}");
        assert!(saved.contains(r#""shape": "stick_figure""#), "{saved}");
    }

    #[test]
    fn test_json_round_trip_keeps_ids() {
        let mut tree = Tree::default();
        let root = tree.root_id();
        let a = tree.add_child(root, "A").unwrap();
        let b = tree.add_child(root, "B").unwrap();
        tree.delete_subtree(a).unwrap();

        let loaded = from_json(&to_json(&tree).unwrap()).unwrap();
        assert_eq!(loaded, tree);
        assert!(loaded.contains(b));
        assert!(!loaded.contains(a));
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let text = r#"{ "version": 7, "root": 0, "nodes": [] }"#;
        assert_document_error(text, "unsupported diagram version 7");
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert_document_error("{ nope", "malformed diagram");
        let text = document(r#"{ "id": 0, "parent": null, "label": "Root", "shape": "blob" }"#);
        assert_document_error(&text, "malformed diagram");
    }

    #[test]
    fn test_rejects_structural_errors() {
        let cases = [
            // missing root
            r#"{ "id": 1, "parent": null, "label": "x" }"#,
            // child listed but absent
            r#"{ "id": 0, "parent": null, "label": "Root", "children": [3] }"#,
            // duplicate id
            r#"{ "id": 0, "parent": null, "label": "Root" },
               { "id": 0, "parent": null, "label": "again" }"#,
            // orphan
            r#"{ "id": 0, "parent": null, "label": "Root" },
               { "id": 1, "parent": 0, "label": "lost" }"#,
            // parent disagreement
            r#"{ "id": 0, "parent": null, "label": "Root", "children": [1] },
               { "id": 1, "parent": null, "label": "A" }"#,
        ];
        for nodes in cases {
            assert_document_error(&document(nodes), "invalid diagram");
        }
    }

    #[test]
    fn test_rejects_invalid_attributes() {
        let text = document(r#"{ "id": 0, "parent": null, "label": "Root", "width": 0.0 }"#);
        assert_document_error(&text, "invalid diagram");

        let text = document(r#"{ "id": 0, "parent": null, "label": "" }"#);
        assert_document_error(&text, "label must not be empty");

        let text = document(
            r#"{ "id": 0, "parent": null, "label": "Root", "font": { "size": 0, "weight": "bold" } }"#,
        );
        assert_document_error(&text, "invalid diagram");
    }
}
