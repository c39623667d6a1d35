use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, warn};

use crate::event::{EventListenerInfo, ListenerId};
use crate::manager::DomManager;

/// Per-script-context state shared with the bridge: the manager the context
/// drives and the listener ids handed out for it.
///
/// Script code removes listeners by `(node, event)` and never sees ids, so
/// the scope remembers which id each pair currently maps to. Entries the
/// manager no longer holds (replaced elsewhere, or dropped with a deleted
/// node) are pruned whenever the table is touched.
#[derive(Debug)]
pub struct Scope {
    dom_manager: Weak<DomManager>,
    listeners: Mutex<HashMap<(u32, String), ListenerId>>,
}

impl Scope {
    pub fn new(dom_manager: Weak<DomManager>) -> Arc<Self> {
        Arc::new(Self { dom_manager, listeners: Mutex::new(HashMap::new()) })
    }

    pub fn dom_manager(&self) -> Weak<DomManager> {
        Weak::clone(&self.dom_manager)
    }

    /// Register the listener described by `info`, replacing the one already
    /// attached to the same node and event.
    pub fn add_listener(&self, info: EventListenerInfo) -> ListenerId {
        let Some(manager) = self.dom_manager.upgrade() else {
            return ListenerId::NONE;
        };
        let Some(callback) = info.callback else {
            warn!("Listener for {} on node {} has no callback", info.event_name, info.dom_id);
            return ListenerId::NONE;
        };
        let id = manager.add_event_listener(info.dom_id, &info.event_name, callback);
        let mut table = self.table();
        prune(&mut table, &manager);
        if !id.is_none() {
            table.insert((info.dom_id, info.event_name), id);
        }
        id
    }

    /// Remove the listener registered through this scope for `(dom_id, event_name)`.
    pub fn remove_listener(&self, dom_id: u32, event_name: &str) -> bool {
        let Some(manager) = self.dom_manager.upgrade() else {
            self.table().clear();
            return false;
        };
        let id = {
            let mut table = self.table();
            prune(&mut table, &manager);
            table.remove(&(dom_id, event_name.to_owned()))
        };
        let Some(id) = id else {
            debug!("No listener registered for {event_name} on node {dom_id}");
            return false;
        };
        manager.remove_event_listener(dom_id, event_name, id)
    }

    /// Id of the live listener this scope registered for `(dom_id, event_name)`.
    pub fn listener_id(&self, dom_id: u32, event_name: &str) -> ListenerId {
        let key = (dom_id, event_name.to_owned());
        let mut table = self.table();
        let Some(&id) = table.get(&key) else { return ListenerId::NONE };
        let live = self
            .dom_manager
            .upgrade()
            .is_some_and(|manager| manager.listener_id(dom_id, event_name) == id);
        if live {
            id
        } else {
            table.remove(&key);
            ListenerId::NONE
        }
    }

    /// Number of live listeners registered through this scope.
    pub fn listener_count(&self) -> usize {
        let mut table = self.table();
        match self.dom_manager.upgrade() {
            Some(manager) => prune(&mut table, &manager),
            None => table.clear(),
        }
        table.len()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<(u32, String), ListenerId>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn prune(table: &mut HashMap<(u32, String), ListenerId>, manager: &DomManager) {
    let before = table.len();
    table.retain(|(dom_id, event_name), id| manager.listener_id(*dom_id, event_name) == *id);
    let dropped = before - table.len();
    if dropped > 0 {
        debug!("Pruned {dropped} stale listener id(s)");
    }
}
