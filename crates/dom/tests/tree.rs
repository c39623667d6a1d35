use std::sync::{Arc, Mutex};

use dom::{DomConfig, DomError, DomManager, DomNode, DomValue, LayoutChange, TaskQueue};

fn manager(width: f32, height: f32) -> (Arc<DomManager>, TaskQueue) {
    DomManager::with_queue(DomConfig::default().with_root_size(width, height)).unwrap()
}

#[test]
fn inconsistencies_are_reported_and_skipped() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (manager, _queue) = manager(100.0, 100.0);

    let errors = manager.create_dom_nodes(vec![
        DomNode::new(1, 0, "View"),
        DomNode::new(2, 99, "View"),
        DomNode::new(1, 0, "View"),
        DomNode::new(3, 0, "View").with_index(5),
        DomNode::new(4, 1, "View"),
    ]);

    assert_eq!(
        errors,
        vec![
            DomError::UnknownParent { id: 2, pid: 99 },
            DomError::DuplicateNode(1),
            DomError::IndexOutOfRange { id: 3, index: 5, len: 1 },
        ]
    );
    assert!(manager.contains(4));
    assert_eq!(manager.node_count(), 3);

    assert_eq!(manager.update_dom_nodes(vec![DomNode::new(50, 0, "")]), vec![DomError::UnknownNode(50)]);
    assert_eq!(
        manager.delete_dom_nodes(vec![DomNode::new(50, 0, ""), DomNode::new(0, 0, "")]),
        vec![DomError::UnknownNode(50), DomError::RootDeletion(0)]
    );
}

#[test]
fn children_keep_their_requested_positions() {
    let (manager, _queue) = manager(100.0, 100.0);
    manager.create_dom_nodes(vec![
        DomNode::new(1, 0, "View"),
        DomNode::new(2, 0, "View"),
        DomNode::new(3, 0, "View").with_index(1),
        DomNode::new(4, 0, "View").with_index(0),
    ]);

    assert_eq!(manager.children_of(0).unwrap().as_slice(), &[4, 1, 3, 2]);
}

#[test]
fn deleting_a_node_removes_its_subtree() {
    let (manager, _queue) = manager(100.0, 100.0);
    manager.create_dom_nodes(vec![
        DomNode::new(1, 0, "View"),
        DomNode::new(2, 1, "View"),
        DomNode::new(3, 2, "Text"),
        DomNode::new(4, 0, "View"),
    ]);

    assert!(manager.delete_dom_nodes(vec![DomNode::new(1, 0, "")]).is_empty());

    assert!(!manager.contains(1));
    assert!(!manager.contains(2));
    assert!(!manager.contains(3));
    assert_eq!(manager.children_of(0).unwrap().as_slice(), &[4]);
    assert!(manager.create_dom_nodes(vec![DomNode::new(2, 4, "View")]).is_empty());
}

#[test]
fn commit_lays_out_the_flex_row() {
    let (manager, _queue) = manager(100.0, 50.0);
    manager.create_dom_nodes(vec![
        DomNode::new(1, 0, "View").with_style("flexGrow", 1.0).with_style("flexBasis", 0.0),
        DomNode::new(2, 0, "View").with_style("flexGrow", 1.0).with_style("flexBasis", 0.0),
    ]);
    let seen: Arc<Mutex<Vec<LayoutChange>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    manager.add_layout_observer(Arc::new(move |changes: &[LayoutChange]| {
        sink.lock().unwrap().extend_from_slice(changes);
    }));

    manager.end_batch();

    let first = manager.layout_of(1).unwrap();
    let second = manager.layout_of(2).unwrap();
    assert_eq!((first.left, first.width, first.height), (0.0, 50.0, 50.0));
    assert_eq!((second.left, second.width, second.height), (50.0, 50.0, 50.0));
    let ids: Vec<u32> = seen.lock().unwrap().iter().map(|change| change.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);

    seen.lock().unwrap().clear();
    manager.end_batch();
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn update_deltas_merge_and_null_restores_defaults() {
    let (manager, _queue) = manager(100.0, 50.0);
    manager.create_dom_nodes(vec![
        DomNode::new(1, 0, "View")
            .with_style("width", 30.0)
            .with_style("backgroundColor", "red")
            .with_attribute("testID", "box"),
    ]);
    manager.end_batch();
    assert_eq!(manager.layout_of(1).unwrap().width, 30.0);

    manager.update_dom_nodes(vec![
        DomNode::new(1, 0, "")
            .with_style("width", DomValue::Null)
            .with_style("flexGrow", 1.0)
            .with_attribute("testID", DomValue::Null),
    ]);
    manager.end_batch();

    let info = manager.node_info(1).unwrap();
    assert!(!info.style.contains_key("width"));
    assert_eq!(info.style.get("backgroundColor"), Some(&DomValue::from("red")));
    assert_eq!(info.style.get("flexGrow"), Some(&DomValue::Number(1.0)));
    assert!(info.attributes.is_empty());
    assert_eq!(manager.layout_of(1).unwrap().width, 100.0);
}

#[test]
fn layout_dump_covers_live_nodes() {
    let (manager, _queue) = manager(100.0, 50.0);
    manager.create_dom_nodes(vec![DomNode::new(1, 0, "View"), DomNode::new(2, 1, "View")]);
    manager.end_batch();

    assert_eq!(manager.dump_layout().lines().count(), 5);
}
