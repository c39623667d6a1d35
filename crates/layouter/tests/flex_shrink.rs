use layouter::{Direction, LayoutEngine, LayoutNode};

/// A 100x50 root holding two children of the given widths.
fn pair(engine: &LayoutEngine, a_width: f32, b_width: f32) -> (LayoutNode, LayoutNode, LayoutNode) {
    let root = LayoutNode::new(engine).unwrap();
    let a = LayoutNode::new(engine).unwrap();
    let b = LayoutNode::new(engine).unwrap();
    a.set_width(a_width);
    b.set_width(b_width);
    assert!(root.insert_child(&a, 0));
    assert!(root.insert_child(&b, 1));
    (root, a, b)
}

#[test]
fn overflow_is_shared_evenly_by_equal_items() {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = LayoutEngine::new();
    let (root, a, b) = pair(&engine, 60.0, 60.0);

    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();

    assert_eq!(a.width(), 50.0);
    assert_eq!((b.left(), b.width()), (50.0, 50.0));
}

/// Shrinking is weighted by shrink factor times basis: 60 and 180 out of a
/// 20 point deficit.
#[test]
fn shrink_factors_weight_the_deficit() {
    let engine = LayoutEngine::new();
    let (root, a, b) = pair(&engine, 60.0, 60.0);
    a.set_flex_shrink(1.0);
    b.set_flex_shrink(3.0);

    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();

    assert_eq!(a.width(), 55.0);
    assert_eq!((b.left(), b.width()), (55.0, 45.0));
}

#[test]
fn larger_basis_gives_up_more() {
    let engine = LayoutEngine::new();
    let (root, a, b) = pair(&engine, 30.0, 90.0);

    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();

    assert_eq!(a.width(), 25.0);
    assert_eq!(b.width(), 75.0);
}

#[test]
fn zero_shrink_keeps_the_basis() {
    let engine = LayoutEngine::new();
    let (root, a, b) = pair(&engine, 60.0, 60.0);
    a.set_flex_shrink(0.0);

    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();

    assert_eq!(a.width(), 60.0);
    assert_eq!((b.left(), b.width()), (60.0, 40.0));
}

#[test]
fn min_width_freezes_a_shrinking_item() {
    let engine = LayoutEngine::new();
    let (root, a, b) = pair(&engine, 60.0, 60.0);
    a.set_min_width(58.0);

    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();

    assert_eq!(a.width(), 58.0);
    assert_eq!((b.left(), b.width()), (58.0, 42.0));
}

#[test]
fn zero_grow_items_keep_their_basis() {
    let engine = LayoutEngine::new();
    let (root, a, b) = pair(&engine, 20.0, 20.0);

    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();
    assert_eq!((a.width(), b.left(), b.width()), (20.0, 20.0, 20.0));
    assert_eq!(b.right(), 60.0);

    b.set_flex_grow(1.0);
    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();
    assert_eq!(a.width(), 20.0);
    assert_eq!(b.width(), 80.0);
}

#[test]
fn grow_factors_split_free_space() {
    let engine = LayoutEngine::new();
    let (root, a, b) = pair(&engine, f32::NAN, f32::NAN);
    for (child, grow) in [(&a, 1.0), (&b, 3.0)] {
        child.set_flex_basis(0.0);
        child.set_flex_grow(grow);
    }

    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();

    assert_eq!((a.width(), b.left(), b.width()), (25.0, 25.0, 75.0));
}

#[test]
fn max_width_caps_growth_and_passes_the_rest_on() {
    let engine = LayoutEngine::new();
    let (root, a, b) = pair(&engine, f32::NAN, f32::NAN);
    for child in [&a, &b] {
        child.set_flex_basis(0.0);
        child.set_flex_grow(1.0);
    }
    a.set_max_width(30.0);

    root.do_layout(100.0, 50.0, Direction::Ltr).unwrap();

    assert_eq!(a.width(), 30.0);
    assert_eq!((b.left(), b.width()), (30.0, 70.0));
}
