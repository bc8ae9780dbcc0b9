//! Integration tests for `.diagram` persistence

use arbor::{
    ArborError, Controller,
    color::Color,
    config::AppConfig,
    document,
    geometry::Size,
    node::AttributeValue,
    style::{FontStyle, FontWeight, Orientation, Shape},
    tree::Tree,
};

/// Three levels with mixed shapes, colors, fonts and sizes.
fn styled_tree() -> Tree {
    let mut tree = Tree::new("Company");
    let root = tree.root_id();
    let engineering = tree.add_child(root, "Engineering").unwrap();
    let sales = tree.add_child(root, "Sales").unwrap();
    let platform = tree.add_child(engineering, "Platform").unwrap();
    let apps = tree.add_child(engineering, "Apps").unwrap();
    let emea = tree.add_child(sales, "EMEA").unwrap();

    let edits = [
        (root, AttributeValue::Shape(Shape::Box)),
        (root, AttributeValue::Color(Color::new("#336699").unwrap())),
        (engineering, AttributeValue::Shape(Shape::Record)),
        (
            engineering,
            AttributeValue::Font(FontStyle::new(14, FontWeight::Italic).unwrap()),
        ),
        (sales, AttributeValue::Shape(Shape::Diamond)),
        (sales, AttributeValue::Color(Color::new("rgba(255, 0, 0, 0.5)").unwrap())),
        (platform, AttributeValue::Size(Size::new(140.0, 55.5))),
        (apps, AttributeValue::Shape(Shape::RoundedBox)),
        (emea, AttributeValue::Shape(Shape::Parallelogram)),
    ];
    for (id, value) in edits {
        tree.set_attribute(id, value).unwrap();
    }
    tree.set_orientation(Orientation::RightLeft);
    tree
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company.diagram");
    let tree = styled_tree();

    document::save(&tree, &path).unwrap();
    let loaded = document::load(&path).unwrap();

    assert_eq!(loaded, tree);
    assert_eq!(loaded.orientation(), Orientation::RightLeft);
    let labels: Vec<&str> = loaded.iter().map(|node| node.label()).collect();
    assert_eq!(
        labels,
        vec!["Company", "Engineering", "Platform", "Apps", "Sales", "EMEA"]
    );
    assert!(loaded.check_well_formed().is_ok());
}

#[test]
fn test_loaded_tree_allocates_fresh_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company.diagram");
    let tree = styled_tree();
    document::save(&tree, &path).unwrap();

    let mut loaded = document::load(&path).unwrap();
    let largest = loaded.iter().map(|node| node.id()).max().unwrap();
    let fresh = loaded.add_child(loaded.root_id(), "New").unwrap();
    assert!(fresh > largest);
}

#[test]
fn test_controller_load_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.diagram");
    let output = dir.path().join("out.diagram");
    document::save(&styled_tree(), &input).unwrap();

    let mut controller = Controller::new(&AppConfig::default());
    controller.load_document(&input).unwrap();
    assert_eq!(controller.tree().len(), 6);
    assert!(!controller.history().can_undo());

    let root = controller.tree().root_id();
    controller.set_label(root, "Holding").unwrap();
    controller.save_document(&output).unwrap();

    let saved = document::load(&output).unwrap();
    assert_eq!(saved.root().label(), "Holding");
}

#[test]
fn test_failed_load_keeps_current_diagram() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.diagram");
    std::fs::write(&path, r#"{ "version": 1, "root": 5, "nodes": [] }"#).unwrap();

    let mut controller = Controller::new(&AppConfig::default());
    let root = controller.tree().root_id();
    controller.add_child(root, "kept").unwrap();

    let err = controller.load_document(&path).unwrap_err();
    assert!(matches!(err, ArborError::Document(_)), "{err:?}");
    assert_eq!(controller.tree().len(), 2);
    assert!(controller.history().can_undo());

    let missing = dir.path().join("missing.diagram");
    assert!(matches!(
        controller.load_document(&missing),
        Err(ArborError::Io(_))
    ));
}
