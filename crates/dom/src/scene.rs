use log::trace;

use crate::builder::{DomOp, DomOpKind};

/// An ordered, one-shot batch of deferred operations produced by a
/// [`SceneBuilder`](crate::SceneBuilder).
///
/// The last operation is always the commit. [`build`](Self::build) consumes
/// the scene, so a batch can only be replayed once; it is meant to run on the
/// thread owning the target [`DomManager`](crate::DomManager).
#[derive(Debug)]
#[must_use = "a scene does nothing until it is built"]
pub struct Scene {
    ops: Vec<DomOp>,
}

/// Scene produced by a `ScreenBuilder`.
pub type Screen = Scene;

impl Scene {
    pub(crate) fn new(ops: Vec<DomOp>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn kinds(&self) -> Vec<DomOpKind> {
        self.ops.iter().map(DomOp::kind).collect()
    }

    /// Run every operation in recorded order.
    pub fn build(self) {
        trace!("Running scene of {} operation(s)", self.ops.len());
        for op in self.ops {
            op.run();
        }
    }
}
