use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dom::{DomConfig, DomEvent, DomManager, Scope, TaskQueue};
use js::{JSError, JSFunction, JSValue, ObjectNodeDecoder, register_scene_builder, register_screen_builder};

fn object(entries: Vec<(&str, JSValue)>) -> JSValue {
    JSValue::Object(entries.into_iter().map(|(key, value)| (key.to_owned(), value)).collect::<BTreeMap<_, _>>())
}

fn view(id: u32, pid: u32) -> JSValue {
    object(vec![
        ("id", JSValue::Number(f64::from(id))),
        ("pId", JSValue::Number(f64::from(pid))),
        ("name", JSValue::String("View".into())),
        ("props", object(vec![("style", object(vec![("flexGrow", JSValue::Number(1.0))]))])),
    ])
}

fn setup() -> (Arc<DomManager>, TaskQueue, Arc<Scope>) {
    let (manager, queue) = DomManager::with_queue(DomConfig::default().with_root_size(100.0, 50.0)).unwrap();
    let scope = Scope::new(Arc::downgrade(&manager));
    (manager, queue, scope)
}

#[test]
fn build_posts_the_scene_to_the_dom_queue() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (manager, mut queue, scope) = setup();
    let class = register_scene_builder(&Arc::downgrade(&scope), Arc::new(ObjectNodeDecoder));
    let builder = class.construct(Vec::new()).unwrap();

    class.call(&builder, "Create", vec![JSValue::Array(vec![view(1, 0), view(2, 0)])]).unwrap();
    class.call(&builder, "Build", Vec::new()).unwrap();
    assert!(!manager.contains(1));

    assert_eq!(queue.run_pending(), 1);
    assert!(manager.contains(1));
    assert_eq!(manager.layout_of(2).unwrap().left, 50.0);

    class.call(&builder, "Delete", vec![JSValue::Array(vec![object(vec![("id", JSValue::Number(1.0))])])]).unwrap();
    class.call(&builder, "Build", Vec::new()).unwrap();
    queue.run_pending();
    assert!(!manager.contains(1));
    assert_eq!(manager.layout_of(2).unwrap().width, 100.0);
}

#[test]
fn script_listeners_receive_events() {
    let (manager, mut queue, scope) = setup();
    let class = register_scene_builder(&Arc::downgrade(&scope), Arc::new(ObjectNodeDecoder));
    let builder = class.construct(Vec::new()).unwrap();
    let received: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let listener = JSFunction::new(move |arguments| {
        if let Some(kind) = arguments.first().and_then(|event| event.get("type")).and_then(JSValue::as_str) {
            sink.lock().unwrap().push(kind.to_owned());
        }
        Ok(JSValue::Undefined)
    });

    class.call(&builder, "Create", vec![JSValue::Array(vec![view(1, 0)])]).unwrap();
    class
        .call(&builder, "AddEventListener", vec![
            JSValue::Number(1.0),
            JSValue::String("click".into()),
            JSValue::Function(listener),
        ])
        .unwrap();
    class.call(&builder, "Build", Vec::new()).unwrap();
    queue.run_pending();

    assert!(manager.dispatch_event(&DomEvent::new(1, "click")));
    assert_eq!(*received.lock().unwrap(), vec!["click".to_owned()]);

    class
        .call(&builder, "RemoveEventListener", vec![JSValue::Number(1.0), JSValue::String("click".into())])
        .unwrap();
    class.call(&builder, "Build", Vec::new()).unwrap();
    queue.run_pending();
    assert!(!manager.dispatch_event(&DomEvent::new(1, "click")));
}

#[test]
fn failing_script_listeners_are_contained() {
    let (manager, mut queue, scope) = setup();
    let class = register_scene_builder(&Arc::downgrade(&scope), Arc::new(ObjectNodeDecoder));
    let builder = class.construct(Vec::new()).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let listener = JSFunction::new(move |_arguments| {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(JSError::InternalError("boom".into()))
    });

    class.call(&builder, "Create", vec![JSValue::Array(vec![view(1, 0)])]).unwrap();
    class
        .call(&builder, "AddEventListener", vec![
            JSValue::Number(1.0),
            JSValue::String("press".into()),
            JSValue::Function(listener),
        ])
        .unwrap();
    class.call(&builder, "Build", Vec::new()).unwrap();
    queue.run_pending();

    assert!(manager.dispatch_event(&DomEvent::new(1, "press")));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn screen_builder_has_no_listener_functions() {
    let (manager, mut queue, scope) = setup();
    let class = register_screen_builder(&Arc::downgrade(&scope), Arc::new(ObjectNodeDecoder));
    assert_eq!(class.name, "ScreenBuilder");
    assert!(!class.has_fn("AddEventListener"));
    let builder = class.construct(Vec::new()).unwrap();

    let result = class.call(&builder, "AddEventListener", vec![JSValue::Number(1.0), JSValue::String("click".into())]);
    assert!(matches!(result, Err(JSError::TypeError(_))));

    class.call(&builder, "Create", vec![JSValue::Array(vec![view(5, 0)])]).unwrap();
    class.call(&builder, "Build", Vec::new()).unwrap();
    queue.run_pending();
    assert!(manager.contains(5));
}

#[test]
fn bad_arguments_are_rejected_before_recording() {
    let (_manager, _queue, scope) = setup();
    let class = register_scene_builder(&Arc::downgrade(&scope), Arc::new(ObjectNodeDecoder));
    let builder = class.construct(Vec::new()).unwrap();

    assert!(class.call(&builder, "Create", Vec::new()).is_err());
    assert!(class.call(&builder, "Create", vec![JSValue::String("nodes".into())]).is_err());
    assert_eq!(builder.pending(), 0);
}

#[test]
fn calls_after_scope_teardown_are_ignored() {
    let (manager, mut queue, scope) = setup();
    let weak_scope = Arc::downgrade(&scope);
    let class = register_scene_builder(&weak_scope, Arc::new(ObjectNodeDecoder));
    let builder = class.construct(Vec::new()).unwrap();
    drop(scope);

    class.call(&builder, "Create", vec![JSValue::Array(vec![view(1, 0)])]).unwrap();
    class.call(&builder, "Build", Vec::new()).unwrap();

    assert_eq!(builder.pending(), 0);
    assert_eq!(queue.run_pending(), 0);
    assert!(!manager.contains(1));
}
