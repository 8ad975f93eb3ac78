//! Shared change-listener registry for repository adapters.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use hintly_core::ChangeListener;

/// Registry of active change listeners, keyed by subscription id.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<u64, ChangeListener>>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returning the id to deregister it with.
    pub(crate) fn subscribe(&self, listener: ChangeListener) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("listener registry poisoned")
            .insert(id, listener);
        id
    }

    pub(crate) fn remove(&self, id: u64) {
        self.listeners
            .lock()
            .expect("listener registry poisoned")
            .remove(&id);
    }

    /// Fire every registered listener. Listeners are invoked outside the
    /// registry lock so a listener may subscribe or release reentrantly.
    pub(crate) fn notify_all(&self) {
        let snapshot: Vec<ChangeListener> = self
            .listeners
            .lock()
            .expect("listener registry poisoned")
            .values()
            .cloned()
            .collect();
        for listener in snapshot {
            listener();
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.listeners
            .lock()
            .expect("listener registry poisoned")
            .len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering as AtomicOrdering;

    use super::*;

    #[test]
    fn test_subscribe_notify_remove() {
        let registry = ListenerRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counted = count.clone();
        let id = registry.subscribe(Arc::new(move || {
            counted.fetch_add(1, AtomicOrdering::SeqCst);
        }));

        registry.notify_all();
        assert_eq!(count.load(AtomicOrdering::SeqCst), 1);

        registry.remove(id);
        registry.notify_all();
        assert_eq!(count.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(registry.len(), 0);
    }
}
