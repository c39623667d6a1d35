use layouter::{Direction, Edge, LayoutEngine, LayoutNode, PositionType};

/// A 20x10 child attached to a fresh root; the root fills whatever box
/// `do_layout` is given.
fn root_with_child(engine: &LayoutEngine) -> (LayoutNode, LayoutNode) {
    let root = LayoutNode::new(engine).unwrap();
    let child = LayoutNode::new(engine).unwrap();
    child.set_width(20.0);
    child.set_height(10.0);
    assert!(root.insert_child(&child, 0));
    (root, child)
}

#[test]
fn physical_margin_stays_on_the_left() {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = LayoutEngine::new();
    let (root, child) = root_with_child(&engine);
    child.set_margin(Edge::Left, 10.0);

    root.do_layout(100.0, 50.0, Direction::Rtl).unwrap();

    assert_eq!((child.left(), child.width()), (80.0, 20.0));
    assert_eq!(child.right(), 0.0);
    assert_eq!(child.margin(Edge::Left), 10.0);
    assert_eq!(child.margin(Edge::Right), 0.0);
    assert_eq!(child.margin(Edge::Start), 0.0);
    assert_eq!(child.margin(Edge::End), 10.0);
}

#[test]
fn absolute_left_inset_is_measured_from_the_left() {
    let engine = LayoutEngine::new();
    let (root, child) = root_with_child(&engine);
    child.set_position_type(PositionType::Absolute);
    child.set_position(Edge::Left, 10.0);

    root.do_layout(100.0, 50.0, Direction::Rtl).unwrap();

    assert_eq!(child.left(), 10.0);
    assert_eq!(child.right(), 70.0);
}

#[test]
fn start_margin_lands_on_the_right() {
    let engine = LayoutEngine::new();
    let (root, child) = root_with_child(&engine);
    child.set_margin(Edge::Start, 10.0);

    root.do_layout(100.0, 50.0, Direction::Rtl).unwrap();

    assert_eq!(child.left(), 70.0);
    assert_eq!(child.right(), 10.0);
    assert_eq!(child.margin(Edge::Right), 10.0);
    assert_eq!(child.margin(Edge::Left), 0.0);
    assert_eq!(child.margin(Edge::Start), 10.0);
}

#[test]
fn start_margin_follows_a_direction_change() {
    let engine = LayoutEngine::new();
    let (root, child) = root_with_child(&engine);
    child.set_margin(Edge::Start, 10.0);

    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();
    assert_eq!(child.left(), 10.0);
    assert_eq!(child.margin(Edge::Left), 10.0);

    root.set_direction(Direction::Rtl);
    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();
    assert!(child.has_new_layout());
    assert_eq!(child.left(), 70.0);
    assert_eq!(child.margin(Edge::Left), 0.0);
    assert_eq!(child.margin(Edge::Right), 10.0);
}

#[test]
fn padding_is_kept_on_its_physical_side() {
    let engine = LayoutEngine::new();
    let (root, child) = root_with_child(&engine);
    root.set_padding(Edge::Start, 10.0);

    root.do_layout(100.0, 50.0, Direction::Rtl).unwrap();

    assert_eq!(child.left(), 70.0);
    assert_eq!(root.padding(Edge::Right), 10.0);
    assert_eq!(root.padding(Edge::Left), 0.0);

    root.set_padding(Edge::Start, f32::NAN);
    root.set_padding(Edge::Left, 10.0);
    root.do_layout(100.0, 50.0, Direction::Rtl).unwrap();

    assert_eq!(child.left(), 80.0);
    assert_eq!(root.padding(Edge::Left), 10.0);
    assert_eq!(root.padding(Edge::End), 10.0);
}

#[test]
fn left_to_right_child_inside_right_to_left_root() {
    let engine = LayoutEngine::new();
    let (root, child) = root_with_child(&engine);
    child.set_width(40.0);
    child.set_direction(Direction::Ltr);
    child.set_padding(Edge::Start, 5.0);
    let grandchild = LayoutNode::new(&engine).unwrap();
    grandchild.set_width(10.0);
    grandchild.set_height(10.0);
    assert!(child.insert_child(&grandchild, 0));

    root.do_layout(100.0, 50.0, Direction::Rtl).unwrap();

    assert_eq!(child.left(), 60.0);
    assert_eq!(child.padding(Edge::Left), 5.0);
    assert_eq!(grandchild.left(), 5.0);
    assert_eq!(grandchild.layout_result().direction, Direction::Ltr);
}
