//! Flexbox layout nodes for the DOM core.
//!
//! Each [`LayoutNode`] exclusively owns one node of a flex engine tree shared
//! through a [`LayoutEngine`] handle. Style setters mark nodes dirty,
//! [`LayoutNode::do_layout`] resolves the geometry of a whole subtree and
//! records which nodes received a new box.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use taffy::{Style, TaffyTree};

mod geometry;
mod measure;
mod node;
mod printing;
pub mod style;

pub use geometry::{Edges, LayoutResult, LayoutSize};
pub use measure::{MeasureFunction, MeasureInput, MeasureMode};
pub use node::LayoutNode;
pub use style::{
    Direction, Display, Edge, FlexAlign, FlexDirection, FlexWrap, NodeType, Overflow, PositionType,
};

/// Per-node state kept next to the engine node.
///
/// `style` is the style as set through the node's setters. The engine holds
/// a derived copy with direction-relative edges resolved and, under
/// right-to-left flow, left and right swapped.
#[derive(Default)]
pub(crate) struct NodeContext {
    pub(crate) style: Style,
    pub(crate) logical: style::LogicalStyle,
    pub(crate) measure: Option<MeasureFunction>,
    pub(crate) node_type: NodeType,
    pub(crate) direction: Direction,
    pub(crate) dirty: bool,
    pub(crate) has_new_layout: bool,
    /// Whether `result` holds the output of at least one layout pass.
    pub(crate) computed: bool,
    pub(crate) result: LayoutResult,
}

impl NodeContext {
    pub(crate) fn fresh() -> Self {
        Self { dirty: true, ..Self::default() }
    }
}

impl fmt::Debug for NodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeContext")
            .field("measured", &self.measure.is_some())
            .field("node_type", &self.node_type)
            .field("direction", &self.direction)
            .field("dirty", &self.dirty)
            .field("has_new_layout", &self.has_new_layout)
            .field("result", &self.result)
            .finish()
    }
}

/// Shared handle to the flex engine tree all nodes of one document live in.
///
/// Cloning the handle shares the tree. Nodes from different engines cannot be
/// linked together.
#[derive(Clone)]
pub struct LayoutEngine {
    tree: Arc<Mutex<TaffyTree<NodeContext>>>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self { tree: Arc::new(Mutex::new(TaffyTree::new())) }
    }

    /// Number of live engine nodes.
    pub fn node_count(&self) -> usize {
        self.lock().total_node_count()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, TaffyTree<NodeContext>> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn same_engine(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree)
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine").field("nodes", &self.node_count()).finish()
    }
}
