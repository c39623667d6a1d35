//! Document node tree with batched, cross-thread mutation.
//!
//! Script-side code records operations into a [`SceneBuilder`], builds a
//! [`Scene`] and posts it to the thread owning the [`DomManager`]. Running the
//! scene applies the recorded operations in order and finishes with a commit
//! that lays out the tree and notifies [`LayoutObserver`]s.

mod builder;
mod config;
mod error;
mod event;
mod manager;
mod node;
mod scene;
mod scope;
pub mod style;
mod task;
mod value;

pub use builder::{DomOp, DomOpKind, SceneBuilder, ScreenBuilder};
pub use config::DomConfig;
pub use error::DomError;
pub use event::{DomEvent, EventCallback, EventListenerInfo, ListenerId};
pub use manager::{DomManager, LayoutChange, LayoutObserver};
pub use node::{DomNode, DomNodeInfo};
pub use scene::{Scene, Screen};
pub use scope::Scope;
pub use task::{Task, TaskQueue, TaskRunner, task_channel};
pub use value::{DomValue, PropertyMap};
