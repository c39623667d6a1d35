//! The live DOM tree and the batch operations applied to it.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use indextree::{Arena, NodeId};
use layouter::{LayoutEngine, LayoutNode, LayoutResult};
use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::config::DomConfig;
use crate::error::DomError;
use crate::event::{DomEvent, EventCallback, ListenerId};
use crate::node::{DomNode, DomNodeInfo};
use crate::style::{apply_layout_property, apply_layout_style};
use crate::task::{TaskQueue, TaskRunner, task_channel};

/// A node whose geometry changed during a commit.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutChange {
    pub id: u32,
    pub layout: LayoutResult,
}

/// Receives the geometry changes produced by each commit.
pub trait LayoutObserver: Send + Sync {
    fn on_layout(&self, changes: &[LayoutChange]);
}

impl<F> LayoutObserver for F
where
    F: Fn(&[LayoutChange]) + Send + Sync,
{
    fn on_layout(&self, changes: &[LayoutChange]) {
        self(changes);
    }
}

struct DomTree {
    arena: Arena<DomNode>,
    ids: HashMap<u32, NodeId>,
    root: NodeId,
    /// Nodes mutated since the last commit.
    touched: HashSet<u32>,
}

impl DomTree {
    fn node(&self, id: u32) -> Option<&DomNode> {
        let handle = self.ids.get(&id)?;
        self.arena.get(*handle).map(|node| node.get())
    }

    fn node_mut(&mut self, id: u32) -> Option<&mut DomNode> {
        let handle = self.ids.get(&id)?;
        self.arena.get_mut(*handle).map(|node| node.get_mut())
    }

    fn child_ids(&self, handle: NodeId) -> Vec<u32> {
        handle.children(&self.arena).filter_map(|child| self.arena.get(child)).map(|n| n.get().id).collect()
    }
}

/// Owner of one DOM tree.
///
/// Shared as `Arc<DomManager>`; deferred work refers to it through `Weak`
/// handles and re-checks liveness before touching the tree. Mutations are
/// expected to arrive on the owning thread through [`post_task`](Self::post_task).
pub struct DomManager {
    config: DomConfig,
    engine: LayoutEngine,
    tree: Mutex<DomTree>,
    runner: TaskRunner,
    observers: Mutex<Vec<Arc<dyn LayoutObserver>>>,
    batches: AtomicU64,
}

impl DomManager {
    /// Create a manager whose tasks are delivered through `runner`.
    pub fn new(config: DomConfig, runner: TaskRunner) -> Result<Arc<Self>> {
        let engine = LayoutEngine::new();
        let mut root = DomNode::new(config.root_id, config.root_id, "root");
        root.layout = Some(LayoutNode::new(&engine)?);

        let mut arena = Arena::new();
        let root_handle = arena.new_node(root);
        let mut ids = HashMap::new();
        ids.insert(config.root_id, root_handle);

        Ok(Arc::new(Self {
            config,
            engine,
            tree: Mutex::new(DomTree { arena, ids, root: root_handle, touched: HashSet::new() }),
            runner,
            observers: Mutex::new(Vec::new()),
            batches: AtomicU64::new(0),
        }))
    }

    /// Create a manager together with the queue its tasks land in.
    pub fn with_queue(config: DomConfig) -> Result<(Arc<Self>, TaskQueue)> {
        let (runner, queue) = task_channel();
        Ok((Self::new(config, runner)?, queue))
    }

    pub fn config(&self) -> &DomConfig {
        &self.config
    }

    pub fn root_id(&self) -> u32 {
        self.config.root_id
    }

    /// Attach each node under its declared parent, in order.
    pub fn create_dom_nodes(&self, nodes: Vec<DomNode>) -> Vec<DomError> {
        let mut tree = self.lock_tree();
        let mut errors = Vec::new();
        for node in nodes {
            if let Err(err) = self.create_one(&mut tree, node) {
                warn!("Skipping create: {err}");
                errors.push(err);
            }
        }
        errors
    }

    /// Merge style and attribute deltas into existing nodes. A `null` value
    /// removes the key.
    pub fn update_dom_nodes(&self, nodes: Vec<DomNode>) -> Vec<DomError> {
        let mut tree = self.lock_tree();
        let mut errors = Vec::new();
        for node in nodes {
            if let Err(err) = update_one(&mut tree, node) {
                warn!("Skipping update: {err}");
                errors.push(err);
            }
        }
        errors
    }

    /// Detach and release each node together with its subtree.
    pub fn delete_dom_nodes(&self, nodes: Vec<DomNode>) -> Vec<DomError> {
        let mut tree = self.lock_tree();
        let mut errors = Vec::new();
        for node in nodes {
            if let Err(err) = self.delete_one(&mut tree, node.id) {
                warn!("Skipping delete: {err}");
                errors.push(err);
            }
        }
        errors
    }

    /// Attach `callback` to `(id, event_name)`, replacing any previous
    /// listener. Returns [`ListenerId::NONE`] when the node is unknown.
    pub fn add_event_listener(&self, id: u32, event_name: &str, callback: EventCallback) -> ListenerId {
        let mut tree = self.lock_tree();
        let Some(node) = tree.node_mut(id) else {
            warn!("Cannot listen for {event_name} on unknown node {id}");
            return ListenerId::NONE;
        };
        let listener_id = ListenerId::next();
        let replaced = node.set_listener(event_name, listener_id, callback);
        if !replaced.is_none() {
            debug!("Listener {replaced:?} for {event_name} on node {id} replaced by {listener_id:?}");
        }
        listener_id
    }

    /// Remove the listener for `(id, event_name)` if it is still `listener_id`.
    pub fn remove_event_listener(&self, id: u32, event_name: &str, listener_id: ListenerId) -> bool {
        if listener_id.is_none() {
            return false;
        }
        let mut tree = self.lock_tree();
        tree.node_mut(id).is_some_and(|node| node.remove_listener(event_name, listener_id))
    }

    /// Id of the listener attached to `(id, event_name)`.
    pub fn listener_id(&self, id: u32, event_name: &str) -> ListenerId {
        let tree = self.lock_tree();
        tree.node(id)
            .and_then(|node| node.listener(event_name))
            .map_or(ListenerId::NONE, |listener| listener.id)
    }

    /// Invoke the listener registered for the event's target and name.
    /// The callback runs without the tree locked.
    pub fn dispatch_event(&self, event: &DomEvent) -> bool {
        let callback = {
            let tree = self.lock_tree();
            tree.node(event.target)
                .and_then(|node| node.listener(&event.name))
                .map(|listener| Arc::clone(&listener.callback))
        };
        match callback {
            Some(callback) => {
                callback(event);
                true
            }
            None => {
                trace!("No listener for {} on node {}", event.name, event.target);
                false
            }
        }
    }

    /// Schedule `task` on the owning thread after every task posted before it.
    pub fn post_task(&self, task: impl FnOnce() + Send + 'static) -> bool {
        let posted = self.runner.post(task);
        if !posted {
            warn!("Task dropped: the DOM task queue is closed");
        }
        posted
    }

    pub fn add_layout_observer(&self, observer: Arc<dyn LayoutObserver>) {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner).push(observer);
    }

    /// Commit point of a batch: lay out the tree and report every node whose
    /// geometry changed to the layout observers.
    pub fn end_batch(&self) {
        let batch = self.batches.fetch_add(1, Ordering::Relaxed) + 1;
        let _span = tracing::debug_span!("end_batch", batch).entered();

        let changes = {
            let mut tree = self.lock_tree();
            debug!("Committing batch {batch} touching {} node(s)", tree.touched.len());
            tree.touched.clear();
            let root = tree.root;
            if let Some(layout) = tree.arena.get(root).and_then(|node| node.get().layout.as_ref()) {
                if let Err(err) =
                    layout.do_layout(self.config.root_width, self.config.root_height, self.config.direction)
                {
                    warn!("Layout pass failed: {err}");
                }
            }
            collect_changes(&tree)
        };

        if changes.is_empty() {
            return;
        }
        let observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner).clone();
        for observer in observers {
            observer.on_layout(&changes);
        }
    }

    /// Number of commits so far.
    pub fn batch_count(&self) -> u64 {
        self.batches.load(Ordering::Relaxed)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.lock_tree().ids.contains_key(&id)
    }

    /// Number of live nodes. The root always counts, so this is never zero.
    pub fn node_count(&self) -> usize {
        self.lock_tree().ids.len()
    }

    pub fn node_info(&self, id: u32) -> Option<DomNodeInfo> {
        let tree = self.lock_tree();
        let handle = *tree.ids.get(&id)?;
        let node = tree.arena.get(handle)?.get();
        Some(node.info(tree.child_ids(handle)))
    }

    pub fn children_of(&self, id: u32) -> Option<SmallVec<u32, 8>> {
        let tree = self.lock_tree();
        let handle = *tree.ids.get(&id)?;
        Some(tree.child_ids(handle).into_iter().collect())
    }

    /// Snapshot of every live node in document order.
    pub fn snapshot(&self) -> Vec<DomNodeInfo> {
        let tree = self.lock_tree();
        tree.root
            .descendants(&tree.arena)
            .filter_map(|handle| {
                let node = tree.arena.get(handle)?.get();
                Some(node.info(tree.child_ids(handle)))
            })
            .collect()
    }

    /// Geometry of `id` from the last commit.
    pub fn layout_of(&self, id: u32) -> Option<LayoutResult> {
        let tree = self.lock_tree();
        tree.node(id)?.layout().map(LayoutNode::layout_result)
    }

    /// Text dump of the layout tree.
    pub fn dump_layout(&self) -> String {
        let tree = self.lock_tree();
        tree.node(self.config.root_id)
            .and_then(DomNode::layout)
            .map(LayoutNode::dump)
            .unwrap_or_default()
    }

    fn lock_tree(&self) -> MutexGuard<'_, DomTree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn create_one(&self, tree: &mut DomTree, mut node: DomNode) -> Result<(), DomError> {
        let id = node.id;
        if tree.ids.contains_key(&id) {
            return Err(DomError::DuplicateNode(id));
        }
        let parent = *tree.ids.get(&node.pid).ok_or(DomError::UnknownParent { id, pid: node.pid })?;
        let len = parent.children(&tree.arena).count();
        let index = node.index.unwrap_or(len);
        if index > len {
            return Err(DomError::IndexOutOfRange { id, index, len });
        }

        let layout = LayoutNode::new(&self.engine).map_err(|err| {
            warn!("Layout allocation failed for node {id}: {err}");
            DomError::LayoutLink(id)
        })?;
        apply_layout_style(&layout, &node.style);
        let parent_layout = tree.arena.get(parent).and_then(|n| n.get().layout.as_ref());
        let linked = parent_layout.is_some_and(|parent_layout| parent_layout.insert_child(&layout, index));
        if !linked {
            return Err(DomError::LayoutLink(id));
        }
        node.layout = Some(layout);

        let handle = tree.arena.new_node(node);
        let sibling = parent.children(&tree.arena).nth(index);
        let attached = match sibling {
            Some(sibling) => sibling.checked_insert_before(handle, &mut tree.arena),
            None => parent.checked_append(handle, &mut tree.arena),
        };
        if let Err(err) = attached {
            warn!("Failed to attach node {id}: {err}");
            release(tree, handle);
            return Err(DomError::LayoutLink(id));
        }
        tree.ids.insert(id, handle);
        tree.touched.insert(id);
        trace!("Created node {id} at index {index}");
        Ok(())
    }

    fn delete_one(&self, tree: &mut DomTree, id: u32) -> Result<(), DomError> {
        let handle = *tree.ids.get(&id).ok_or(DomError::UnknownNode(id))?;
        if handle == tree.root {
            return Err(DomError::RootDeletion(id));
        }
        if let Some(pid) = tree.arena.get(handle).map(|node| node.get().pid) {
            tree.touched.insert(pid);
        }
        let removed = release(tree, handle);
        trace!("Deleted node {id} and {} descendant(s)", removed.saturating_sub(1));
        Ok(())
    }
}

fn update_one(tree: &mut DomTree, delta: DomNode) -> Result<(), DomError> {
    let id = delta.id;
    let node = tree.node_mut(id).ok_or(DomError::UnknownNode(id))?;
    if !delta.view_name.is_empty() {
        node.view_name = delta.view_name;
    }
    if !delta.tag_name.is_empty() {
        node.tag_name = delta.tag_name;
    }
    for (key, value) in delta.style {
        if let Some(layout) = node.layout.as_ref() {
            apply_layout_property(layout, &key, Some(&value));
        }
        if value.is_null() {
            node.style.remove(&key);
        } else {
            node.style.insert(key, value);
        }
    }
    for (key, value) in delta.attributes {
        if value.is_null() {
            node.attributes.remove(&key);
        } else {
            node.attributes.insert(key, value);
        }
    }
    tree.touched.insert(id);
    Ok(())
}

/// Remove `handle` and its subtree from the arena, releasing layout nodes.
/// Returns the number of nodes removed.
fn release(tree: &mut DomTree, handle: NodeId) -> usize {
    let doomed: Vec<NodeId> = handle.descendants(&tree.arena).collect();
    // Arena slots keep their data until reused, so layout nodes are dropped
    // here rather than with the slot.
    for node in doomed.iter().rev() {
        if let Some(entry) = tree.arena.get_mut(*node) {
            let dom_node = entry.get_mut();
            dom_node.layout = None;
            dom_node.listeners.clear();
            if tree.ids.get(&dom_node.id) == Some(node) {
                tree.ids.remove(&dom_node.id);
            }
        }
    }
    handle.remove_subtree(&mut tree.arena);
    doomed.len()
}

fn collect_changes(tree: &DomTree) -> Vec<LayoutChange> {
    let mut changes = Vec::new();
    for handle in tree.root.descendants(&tree.arena) {
        let Some(node) = tree.arena.get(handle).map(|node| node.get()) else { continue };
        let Some(layout) = node.layout.as_ref() else { continue };
        if layout.has_new_layout() {
            layout.set_has_new_layout(false);
            changes.push(LayoutChange { id: node.id, layout: layout.layout_result() });
        }
    }
    changes
}
