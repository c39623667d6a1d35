use layouter::{LayoutEngine, LayoutNode};

#[test]
fn insert_accepts_append_position_only_up_to_child_count() {
    let engine = LayoutEngine::new();
    let parent = LayoutNode::new(&engine).unwrap();
    let a = LayoutNode::new(&engine).unwrap();
    let b = LayoutNode::new(&engine).unwrap();

    assert!(!parent.insert_child(&a, 1));
    assert_eq!(parent.child_count(), 0);
    assert!(parent.insert_child(&a, 0));
    assert!(parent.insert_child(&b, 1));
    assert_eq!(parent.child_count(), 2);
}

#[test]
fn attached_child_cannot_be_inserted_twice() {
    let engine = LayoutEngine::new();
    let parent = LayoutNode::new(&engine).unwrap();
    let other = LayoutNode::new(&engine).unwrap();
    let child = LayoutNode::new(&engine).unwrap();

    assert!(parent.insert_child(&child, 0));
    assert!(!other.insert_child(&child, 0));
    assert!(!parent.insert_child(&child, 1));
    assert_eq!(parent.child_count(), 1);
    assert_eq!(other.child_count(), 0);
}

#[test]
fn removing_a_stranger_changes_nothing() {
    let engine = LayoutEngine::new();
    let parent = LayoutNode::new(&engine).unwrap();
    let child = LayoutNode::new(&engine).unwrap();
    let stranger = LayoutNode::new(&engine).unwrap();
    assert!(parent.insert_child(&child, 0));

    assert!(!parent.remove_child(&stranger));
    assert_eq!(parent.child_count(), 1);
    assert!(parent.remove_child(&child));
    assert_eq!(parent.child_count(), 0);
    assert!(!parent.remove_child(&child));
}

#[test]
fn nodes_from_different_engines_do_not_link() {
    let first = LayoutEngine::new();
    let second = LayoutEngine::new();
    let parent = LayoutNode::new(&first).unwrap();
    let child = LayoutNode::new(&second).unwrap();

    assert!(!parent.insert_child(&child, 0));
}

#[test]
fn deallocation_is_idempotent() {
    let engine = LayoutEngine::new();
    let mut node = LayoutNode::new(&engine).unwrap();
    assert_eq!(engine.node_count(), 1);

    node.deallocate();
    node.deallocate();

    assert!(!node.is_allocated());
    assert_eq!(engine.node_count(), 0);
    assert!(!node.reset());
    drop(node);
    assert_eq!(engine.node_count(), 0);
}

#[test]
fn dropping_a_child_detaches_it() {
    let engine = LayoutEngine::new();
    let parent = LayoutNode::new(&engine).unwrap();
    let child = LayoutNode::new(&engine).unwrap();
    assert!(parent.insert_child(&child, 0));

    drop(child);

    assert_eq!(parent.child_count(), 0);
    assert_eq!(engine.node_count(), 1);
}

#[test]
fn dump_lists_the_subtree() {
    let engine = LayoutEngine::new();
    let parent = LayoutNode::new(&engine).unwrap();
    let child = LayoutNode::new(&engine).unwrap();
    assert!(parent.insert_child(&child, 0));

    let dump = parent.dump();
    assert_eq!(dump.lines().count(), 3);
    assert!(dump.lines().nth(1).is_some_and(|line| line.starts_with("  <node")));
}
