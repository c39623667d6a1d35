use layouter::{LayoutNode, LayoutResult};
use smallvec::SmallVec;

use crate::event::{EventCallback, ListenerId, RegisteredListener};
use crate::value::{DomValue, PropertyMap};

/// A document node as described by the script layer.
///
/// Descriptors are built off-thread and handed to the manager by value; the
/// manager attaches a [`LayoutNode`] when the node joins the tree.
#[derive(Debug, Default)]
pub struct DomNode {
    pub id: u32,
    pub pid: u32,
    /// Position among the parent's children; `None` appends.
    pub index: Option<usize>,
    pub tag_name: String,
    pub view_name: String,
    pub style: PropertyMap,
    pub attributes: PropertyMap,
    pub(crate) listeners: SmallVec<RegisteredListener, 2>,
    pub(crate) layout: Option<LayoutNode>,
}

impl DomNode {
    pub fn new(id: u32, pid: u32, view_name: impl Into<String>) -> Self {
        Self { id, pid, view_name: view_name.into(), ..Self::default() }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    pub fn with_style(mut self, key: &str, value: impl Into<DomValue>) -> Self {
        self.style.insert(key.to_owned(), value.into());
        self
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<DomValue>) -> Self {
        self.attributes.insert(key.to_owned(), value.into());
        self
    }

    pub fn layout(&self) -> Option<&LayoutNode> {
        self.layout.as_ref()
    }

    pub(crate) fn listener(&self, event_name: &str) -> Option<&RegisteredListener> {
        self.listeners.iter().find(|listener| listener.event_name == event_name)
    }

    /// Attach `callback`, replacing any listener for the same event. Returns
    /// the replaced listener's id, or [`ListenerId::NONE`].
    pub(crate) fn set_listener(&mut self, event_name: &str, id: ListenerId, callback: EventCallback) -> ListenerId {
        if let Some(existing) = self.listeners.iter_mut().find(|listener| listener.event_name == event_name) {
            let replaced = existing.id;
            existing.id = id;
            existing.callback = callback;
            return replaced;
        }
        self.listeners.push(RegisteredListener { event_name: event_name.to_owned(), id, callback });
        ListenerId::NONE
    }

    pub(crate) fn remove_listener(&mut self, event_name: &str, id: ListenerId) -> bool {
        let Some(position) = self
            .listeners
            .iter()
            .position(|listener| listener.event_name == event_name && listener.id == id)
        else {
            return false;
        };
        self.listeners.remove(position);
        true
    }

    pub(crate) fn info(&self, children: Vec<u32>) -> DomNodeInfo {
        let mut listeners: Vec<String> = self.listeners.iter().map(|l| l.event_name.clone()).collect();
        listeners.sort();
        DomNodeInfo {
            id: self.id,
            pid: self.pid,
            tag_name: self.tag_name.clone(),
            view_name: self.view_name.clone(),
            style: self.style.clone(),
            attributes: self.attributes.clone(),
            listeners,
            children,
            layout: self.layout.as_ref().map(LayoutNode::layout_result),
        }
    }
}

/// Read-only snapshot of a live node.
#[derive(Clone, Debug, PartialEq)]
pub struct DomNodeInfo {
    pub id: u32,
    pub pid: u32,
    pub tag_name: String,
    pub view_name: String,
    pub style: PropertyMap,
    pub attributes: PropertyMap,
    /// Event names with a registered listener, sorted.
    pub listeners: Vec<String>,
    pub children: Vec<u32>,
    pub layout: Option<LayoutResult>,
}
