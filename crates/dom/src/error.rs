use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Tree inconsistency found while applying a mutation batch. The offending
/// node is skipped; the rest of the batch still applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomError {
    /// A created node names a parent that is not in the tree.
    UnknownParent { id: u32, pid: u32 },
    /// An update or delete targets a node that is not in the tree.
    UnknownNode(u32),
    /// A created node reuses an id that is already live.
    DuplicateNode(u32),
    /// A created node asks for a sibling position past the end.
    IndexOutOfRange { id: u32, index: usize, len: usize },
    /// The layout node could not be allocated or linked.
    LayoutLink(u32),
    /// The root node cannot be deleted.
    RootDeletion(u32),
}

impl Display for DomError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomError::UnknownParent { id, pid } => write!(f, "node {id} names unknown parent {pid}"),
            DomError::UnknownNode(id) => write!(f, "unknown node {id}"),
            DomError::DuplicateNode(id) => write!(f, "node {id} already exists"),
            DomError::IndexOutOfRange { id, index, len } => {
                write!(f, "node {id} index {index} is past the {len} existing children")
            }
            DomError::LayoutLink(id) => write!(f, "failed to link layout for node {id}"),
            DomError::RootDeletion(id) => write!(f, "refusing to delete root node {id}"),
        }
    }
}

impl Error for DomError {}
