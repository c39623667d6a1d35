//! Recording side of the batch pipeline.

use std::fmt;
use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError, Weak};

use log::trace;

use crate::event::EventListenerInfo;
use crate::manager::DomManager;
use crate::node::DomNode;
use crate::scene::Scene;
use crate::scope::Scope;

/// One deferred mutation. Targets are held weakly and re-resolved when the
/// operation runs; a dead target turns the operation into a no-op.
pub enum DomOp {
    Create { dom_manager: Weak<DomManager>, nodes: Vec<DomNode> },
    Update { dom_manager: Weak<DomManager>, nodes: Vec<DomNode> },
    Delete { dom_manager: Weak<DomManager>, nodes: Vec<DomNode> },
    AddListener { scope: Weak<Scope>, info: EventListenerInfo },
    RemoveListener { scope: Weak<Scope>, info: EventListenerInfo },
    /// Ends the batch: runs [`DomManager::end_batch`].
    Commit { dom_manager: Weak<DomManager> },
}

/// Discriminant of a [`DomOp`], for inspection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DomOpKind {
    Create,
    Update,
    Delete,
    AddListener,
    RemoveListener,
    Commit,
}

impl DomOp {
    pub fn kind(&self) -> DomOpKind {
        match self {
            DomOp::Create { .. } => DomOpKind::Create,
            DomOp::Update { .. } => DomOpKind::Update,
            DomOp::Delete { .. } => DomOpKind::Delete,
            DomOp::AddListener { .. } => DomOpKind::AddListener,
            DomOp::RemoveListener { .. } => DomOpKind::RemoveListener,
            DomOp::Commit { .. } => DomOpKind::Commit,
        }
    }

    pub(crate) fn run(self) {
        match self {
            DomOp::Create { dom_manager, nodes } => {
                if let Some(manager) = dom_manager.upgrade() {
                    manager.create_dom_nodes(nodes);
                }
            }
            DomOp::Update { dom_manager, nodes } => {
                if let Some(manager) = dom_manager.upgrade() {
                    manager.update_dom_nodes(nodes);
                }
            }
            DomOp::Delete { dom_manager, nodes } => {
                if let Some(manager) = dom_manager.upgrade() {
                    manager.delete_dom_nodes(nodes);
                }
            }
            DomOp::AddListener { scope, info } => {
                if let Some(scope) = scope.upgrade() {
                    scope.add_listener(info);
                }
            }
            DomOp::RemoveListener { scope, info } => {
                if let Some(scope) = scope.upgrade() {
                    scope.remove_listener(info.dom_id, &info.event_name);
                }
            }
            DomOp::Commit { dom_manager } => {
                if let Some(manager) = dom_manager.upgrade() {
                    manager.end_batch();
                }
            }
        }
    }
}

impl fmt::Debug for DomOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomOp::Create { nodes, .. } | DomOp::Update { nodes, .. } | DomOp::Delete { nodes, .. } => {
                let ids: Vec<u32> = nodes.iter().map(|node| node.id).collect();
                f.debug_struct("DomOp").field("kind", &self.kind()).field("nodes", &ids).finish()
            }
            DomOp::AddListener { info, .. } | DomOp::RemoveListener { info, .. } => {
                f.debug_struct("DomOp").field("kind", &self.kind()).field("info", info).finish()
            }
            DomOp::Commit { .. } => f.debug_struct("DomOp").field("kind", &self.kind()).finish(),
        }
    }
}

/// Thread-safe recorder of [`DomOp`]s.
///
/// Every method locks the log only for the duration of the call. [`build`]
/// drains the log into a [`Scene`], so each recording cycle ends with one
/// build and later calls start a fresh batch.
///
/// [`build`]: SceneBuilder::build
#[derive(Debug, Default)]
pub struct SceneBuilder {
    ops: Mutex<Vec<DomOp>>,
}

/// The lower-level builder used by the `ScreenBuilder` script class. It
/// records the same operations.
pub type ScreenBuilder = SceneBuilder;

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, dom_manager: &Weak<DomManager>, nodes: Vec<DomNode>) {
        self.push(DomOp::Create { dom_manager: Weak::clone(dom_manager), nodes });
    }

    pub fn update(&self, dom_manager: &Weak<DomManager>, nodes: Vec<DomNode>) {
        self.push(DomOp::Update { dom_manager: Weak::clone(dom_manager), nodes });
    }

    pub fn delete(&self, dom_manager: &Weak<DomManager>, nodes: Vec<DomNode>) {
        self.push(DomOp::Delete { dom_manager: Weak::clone(dom_manager), nodes });
    }

    pub fn add_event_listener(&self, scope: &Weak<Scope>, info: EventListenerInfo) {
        self.push(DomOp::AddListener { scope: Weak::clone(scope), info });
    }

    pub fn remove_event_listener(&self, scope: &Weak<Scope>, info: EventListenerInfo) {
        self.push(DomOp::RemoveListener { scope: Weak::clone(scope), info });
    }

    /// Number of operations recorded since the last build.
    pub fn pending(&self) -> usize {
        self.log().len()
    }

    /// Drain the log and append the commit for `dom_manager`.
    pub fn build(&self, dom_manager: &Weak<DomManager>) -> Scene {
        let mut ops = mem::take(&mut *self.log());
        ops.push(DomOp::Commit { dom_manager: Weak::clone(dom_manager) });
        trace!("Built scene with {} operation(s)", ops.len());
        Scene::new(ops)
    }

    fn push(&self, op: DomOp) {
        self.log().push(op);
    }

    fn log(&self) -> MutexGuard<'_, Vec<DomOp>> {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
