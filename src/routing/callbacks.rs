//! Route change subscribers.
//!
//! Callbacks are kept in registration order and identified by the handle
//! returned when they were added. Notification iterates over a snapshot of
//! the list, so subscribers added or removed while notifying only affect
//! later notifications.

use std::fmt;
use std::sync::Arc;

/// Callback invoked with `(path, value)` after a route is added or overwritten.
pub type RouteCallback<T> = Arc<dyn Fn(&str, &T) + Send + Sync>;

/// Handle identifying a registered callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

/// Ordered list of route change subscribers.
pub struct Callbacks<T> {
    entries: Vec<(CallbackId, RouteCallback<T>)>,
    next_id: u64,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Clone for Callbacks<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            next_id: self.next_id,
        }
    }
}

impl<T> fmt::Debug for Callbacks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("ids", &self.entries.iter().map(|(id, _)| id).collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Callbacks<T> {
    pub fn add(&mut self, callback: RouteCallback<T>) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Remove a callback. Unknown handles are ignored and return false.
    pub fn remove(&mut self, id: CallbackId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Callbacks in registration order, detached from this list.
    pub fn snapshot(&self) -> Vec<RouteCallback<T>> {
        self.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    }

    pub fn notify(&self, path: &str, value: &T) {
        for callback in self.snapshot() {
            callback(path, value);
        }
    }
}
