//! Binding adapter between the overlay store and a rendering host
//!
//! Hosts integrate through the [`ExternalStore`] pair of `subscribe` and
//! `snapshot`. Because the store publishes a new allocation on every write,
//! comparing snapshots by pointer is enough to know whether anything that
//! reads one identifier needs to redraw.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use super::entry::Entry;
use super::registry::{OverlayStore, Subscription};

/// Subscribe / get-snapshot integration point for a reactive host.
pub trait ExternalStore {
    type Snapshot;

    fn subscribe(&self, on_change: Rc<dyn Fn()>) -> Subscription;

    fn snapshot(&self) -> Self::Snapshot;

    /// Snapshot used when rendering without a live host (headless or
    /// pre-rendering). Defaults to the live snapshot.
    fn server_snapshot(&self) -> Self::Snapshot {
        self.snapshot()
    }
}

/// [`ExternalStore`] view of a single overlay identifier
#[derive(Debug, Clone)]
pub struct EntryBinding {
    store: OverlayStore,
    id: String,
}

impl EntryBinding {
    pub fn new(store: &OverlayStore, id: impl Into<String>) -> Self {
        Self {
            store: store.clone(),
            id: id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn store(&self) -> &OverlayStore {
        &self.store
    }

    /// Start watching this identifier for changes
    pub fn watch(&self) -> EntryWatch {
        EntryWatch::new(self.clone())
    }
}

impl ExternalStore for EntryBinding {
    type Snapshot = Arc<Entry>;

    fn subscribe(&self, on_change: Rc<dyn Fn()>) -> Subscription {
        self.store.subscribe(&self.id, move || on_change())
    }

    fn snapshot(&self) -> Arc<Entry> {
        self.store.get_entry(&self.id)
    }
}

/// Change tracker for immediate-mode hosts.
///
/// Holds a live subscription that raises a dirty flag, plus the last
/// snapshot handed out. A redraw is needed only when the flag is raised and
/// the snapshot is a different allocation than the one last seen.
#[derive(Debug)]
pub struct EntryWatch {
    binding: EntryBinding,
    dirty: Rc<Cell<bool>>,
    last_seen: Arc<Entry>,
    subscription: Option<Subscription>,
}

impl EntryWatch {
    fn new(binding: EntryBinding) -> Self {
        let dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dirty);
        let subscription = binding.subscribe(Rc::new(move || flag.set(true)));
        let last_seen = binding.snapshot();

        Self {
            binding,
            dirty,
            last_seen,
            subscription: Some(subscription),
        }
    }

    pub fn id(&self) -> &str {
        self.binding.id()
    }

    /// Last snapshot returned by [`EntryWatch::take_change`] or at creation
    pub fn current(&self) -> &Arc<Entry> {
        &self.last_seen
    }

    /// Whether a notification arrived since the last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Consume a pending notification and return the new snapshot if it
    /// differs from the one last seen.
    pub fn take_change(&mut self) -> Option<Arc<Entry>> {
        if !self.dirty.replace(false) {
            return None;
        }

        let snapshot = self.binding.snapshot();
        if Arc::ptr_eq(&snapshot, &self.last_seen) {
            return None;
        }

        self.last_seen = Arc::clone(&snapshot);
        Some(snapshot)
    }
}

impl Drop for EntryWatch {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
