//! Integration tests for the Controller API
//!
//! These tests drive a diagram through the public editing surface the way a
//! property editor would.

use arbor::{
    Action, Controller, EditError, HistoryDirection,
    color::Color,
    config::{AppConfig, HistoryConfig, LayoutConfig, StyleConfig},
    identifier::NodeId,
    node::{Attribute, AttributeValue},
    style::{Orientation, Shape},
    tree::Tree,
};

/// root ─┬─ A ── C
///       └─ B
struct Sample {
    tree: Tree,
    a: NodeId,
    b: NodeId,
    c: NodeId,
}

fn sample() -> Sample {
    let mut tree = Tree::default();
    let root = tree.root_id();
    let a = tree.add_child(root, "A").unwrap();
    let b = tree.add_child(root, "B").unwrap();
    let c = tree.add_child(a, "C").unwrap();
    tree.set_attribute(a, AttributeValue::Shape(Shape::Hexagon))
        .unwrap();
    tree.set_attribute(a, AttributeValue::Color(Color::new("teal").unwrap()))
        .unwrap();
    Sample { tree, a, b, c }
}

#[test]
fn test_delete_then_undo_scenario() {
    let Sample { tree, a, b, c } = sample();
    let original = tree.clone();
    let mut controller = Controller::with_tree(tree, &AppConfig::default());
    let root = controller.tree().root_id();

    let d = controller
        .handle_action(Action::AddChild {
            parent: b,
            label: "D".to_string(),
        })
        .unwrap()
        .unwrap();
    assert_eq!(controller.tree().children_of(b).unwrap(), &[d]);
    let with_d = controller.tree().clone();

    controller
        .handle_action(Action::DeleteSubtree { node: a })
        .unwrap();
    assert!(!controller.tree().contains(a));
    assert!(!controller.tree().contains(c));
    assert_eq!(controller.tree().children_of(root).unwrap(), &[b]);

    controller.handle_action(Action::Undo).unwrap();
    assert_eq!(controller.tree(), &with_d);
    assert_eq!(controller.tree().children_of(root).unwrap()[0], a);
    let restored = controller.tree().node(a).unwrap();
    assert_eq!(restored.shape(), Shape::Hexagon);
    assert_eq!(restored.color(), Color::new("teal").unwrap());
    assert_eq!(restored.children(), &[c]);

    controller.handle_action(Action::Undo).unwrap();
    assert!(!controller.tree().contains(d));
    assert_eq!(controller.tree(), &original);

    assert_eq!(
        controller.handle_action(Action::Undo),
        Err(EditError::Empty(HistoryDirection::Undo))
    );
    assert_eq!(controller.tree(), &original);
}

#[test]
fn test_redo_restores_post_apply_state() {
    let Sample { tree, a, .. } = sample();
    let mut controller = Controller::with_tree(tree, &AppConfig::default());

    controller
        .handle_action(Action::SetAttribute {
            node: a,
            attribute: Attribute::Label,
            value: "Renamed".to_string(),
        })
        .unwrap();
    let after = controller.tree().clone();
    let after_layout = controller.layout().clone();

    controller.handle_action(Action::Undo).unwrap();
    assert_eq!(controller.tree().node(a).unwrap().label(), "A");

    controller.handle_action(Action::Redo).unwrap();
    assert_eq!(controller.tree(), &after);
    assert_eq!(controller.layout(), &after_layout);
}

#[test]
fn test_new_edit_clears_redo() {
    let Sample { tree, b, .. } = sample();
    let mut controller = Controller::with_tree(tree, &AppConfig::default());

    controller.set_shape(b, Shape::Box).unwrap();
    controller.undo().unwrap();
    assert!(controller.history().can_redo());

    controller.set_shape(b, Shape::Triangle).unwrap();
    assert_eq!(
        controller.handle_action(Action::Redo),
        Err(EditError::Empty(HistoryDirection::Redo))
    );
    assert_eq!(controller.tree().node(b).unwrap().shape(), Shape::Triangle);
}

#[test]
fn test_rejected_actions_keep_diagram_usable() {
    let Sample { tree, a, c, .. } = sample();
    let original = tree.clone();
    let mut controller = Controller::with_tree(tree, &AppConfig::default());
    let root = controller.tree().root_id();
    let missing = NodeId::new(1000);

    let rejected = [
        (
            Action::DeleteSubtree { node: root },
            "invalid operation",
        ),
        (Action::DeleteSubtree { node: missing }, "not found"),
        (
            Action::Reparent {
                node: a,
                new_parent: c,
            },
            "invalid operation",
        ),
        (
            Action::SetAttribute {
                node: a,
                attribute: Attribute::Height,
                value: "-3".to_string(),
            },
            "invalid value",
        ),
        (
            Action::AddChild {
                parent: a,
                label: String::new(),
            },
            "invalid value",
        ),
        (
            Action::SetAttribute {
                node: c,
                attribute: Attribute::Label,
                value: " ".to_string(),
            },
            "invalid value",
        ),
        (Action::Redo, "nothing to redo"),
    ];
    for (action, message) in rejected {
        let err = controller.handle_action(action.clone()).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "{action:?} gave `{err}`, expected `{message}`"
        );
    }

    assert_eq!(controller.tree(), &original);
    assert!(!controller.history().can_undo());
    assert!(controller.add_child(root, "still works").is_ok());
}

#[test]
fn test_reparent_and_undo() {
    let Sample { tree, a, b, c } = sample();
    let original = tree.clone();
    let mut controller = Controller::with_tree(tree, &AppConfig::default());

    controller
        .handle_action(Action::Reparent {
            node: c,
            new_parent: b,
        })
        .unwrap();
    assert_eq!(controller.tree().parent_of(c), Ok(Some(b)));
    assert!(controller.tree().children_of(a).unwrap().is_empty());

    controller.undo().unwrap();
    assert_eq!(controller.tree(), &original);
}

#[test]
fn test_orientation_round_trip_restores_layout() {
    let Sample { tree, .. } = sample();
    let mut controller = Controller::with_tree(tree, &AppConfig::default());
    let top_bottom = controller.layout().clone();

    controller.set_orientation(Orientation::LeftRight).unwrap();
    controller.set_orientation(Orientation::TopBottom).unwrap();

    assert_eq!(controller.layout(), &top_bottom);
    assert_eq!(controller.history().undo_len(), 2);
}

#[test]
fn test_history_depth_from_config() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        HistoryConfig::new(2),
        StyleConfig::default(),
    );
    let mut controller = Controller::new(&config);
    let root = controller.tree().root_id();
    for label in ["one", "two", "three"] {
        controller.add_child(root, label).unwrap();
    }

    assert_eq!(controller.history().undo_len(), 2);
    controller.undo().unwrap();
    controller.undo().unwrap();
    assert!(controller.undo().is_err());
    assert_eq!(controller.tree().len(), 2);
}
