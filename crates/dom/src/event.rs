use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::value::DomValue;

/// Process-local handle identifying one registered listener. `0` is reserved
/// for "no listener".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

impl ListenerId {
    pub const NONE: ListenerId = ListenerId(0);

    pub(crate) fn next() -> Self {
        ListenerId(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// An event delivered to the listener registered for `(target, name)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DomEvent {
    pub target: u32,
    pub name: String,
    pub data: DomValue,
}

impl DomEvent {
    pub fn new(target: u32, name: impl Into<String>) -> Self {
        Self { target, name: name.into(), data: DomValue::Null }
    }

    pub fn with_data(mut self, data: DomValue) -> Self {
        self.data = data;
        self
    }
}

pub type EventCallback = Arc<dyn Fn(&DomEvent) + Send + Sync + 'static>;

/// A listener registration request as extracted from script arguments.
#[derive(Clone)]
pub struct EventListenerInfo {
    pub dom_id: u32,
    pub event_name: String,
    /// Absent for removal requests.
    pub callback: Option<EventCallback>,
}

impl EventListenerInfo {
    pub fn new(dom_id: u32, event_name: impl Into<String>) -> Self {
        Self { dom_id, event_name: event_name.into(), callback: None }
    }

    pub fn with_callback(mut self, callback: EventCallback) -> Self {
        self.callback = Some(callback);
        self
    }
}

impl fmt::Debug for EventListenerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListenerInfo")
            .field("dom_id", &self.dom_id)
            .field("event_name", &self.event_name)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

/// The listener currently attached to a node for one event name.
#[derive(Clone)]
pub(crate) struct RegisteredListener {
    pub(crate) event_name: String,
    pub(crate) id: ListenerId,
    pub(crate) callback: EventCallback,
}

impl fmt::Debug for RegisteredListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredListener")
            .field("event_name", &self.event_name)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
