//! Overlay registry and store API
//!
//! The registry maps overlay identifiers to their current [`Entry`] and to the
//! listeners interested in that identifier. All mutation goes through
//! [`OverlayStore`], which republishes a fresh entry on every write and then
//! notifies only the listeners registered for the written identifier.

use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use super::entry::{merge_payload, Entry, Payload};

pub type SubscriberId = u64;

/// Zero-argument change notification
pub type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct RegistryState {
    /// Map of overlay id -> current entry
    entries: HashMap<String, Arc<Entry>>,
    /// Map of overlay id -> listeners in registration order
    subscribers: HashMap<String, Vec<(SubscriberId, Listener)>>,
    next_subscriber_id: SubscriberId,
}

/// Shared handle to the overlay registry.
///
/// Create one per application at startup and hand clones of it down the
/// tree; clones share the same registry. The handle is single-threaded:
/// listeners run synchronously on the calling thread, right after the
/// mutation that triggered them, and may call back into the store.
#[derive(Clone, Default)]
pub struct OverlayStore {
    state: Rc<RefCell<RegistryState>>,
}

impl OverlayStore {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entry for `id`, or the shared closed entry if `id` was never written.
    pub fn get_entry(&self, id: &str) -> Arc<Entry> {
        self.state
            .borrow()
            .entries
            .get(id)
            .cloned()
            .unwrap_or_else(Entry::closed)
    }

    /// Whether the overlay is currently open
    pub fn is_open(&self, id: &str) -> bool {
        self.get_entry(id).open
    }

    /// Open an overlay.
    ///
    /// A provided payload replaces the stored one wholesale. Without a
    /// payload the previous one is kept (empty for a fresh identifier).
    pub fn show(&self, id: &str, payload: Option<Payload>) {
        let payload = match payload {
            Some(payload) => payload,
            None => self.get_entry(id).payload.clone(),
        };
        self.publish(id, Entry { open: true, payload });
    }

    /// Close an overlay, keeping its payload.
    ///
    /// Closing an identifier that was never written does nothing and
    /// notifies nobody.
    pub fn close(&self, id: &str) {
        let previous = match self.state.borrow().entries.get(id) {
            Some(entry) => Arc::clone(entry),
            None => return,
        };
        self.publish(
            id,
            Entry {
                open: false,
                payload: previous.payload.clone(),
            },
        );
    }

    /// Shallow-merge `partial` into the overlay's payload without touching visibility.
    pub fn update(&self, id: &str, partial: Payload) {
        let previous = self.get_entry(id);
        self.publish(
            id,
            Entry {
                open: previous.open,
                payload: merge_payload(&previous.payload, &partial),
            },
        );
    }

    /// Close the overlay if it is open, otherwise open it with its last payload.
    pub fn toggle(&self, id: &str) {
        if self.is_open(id) {
            self.close(id);
        } else {
            self.show(id, None);
        }
    }

    /// Register `listener` for changes to `id`.
    ///
    /// Every subscription is independent: subscribing the same closure twice
    /// yields two registrations that both fire. A fresh identifier gets the
    /// shared closed entry, without notifying anyone.
    pub fn subscribe<F>(&self, id: &str, listener: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let mut state = self.state.borrow_mut();
        state.entries.entry(id.to_string()).or_insert_with(Entry::closed);
        let subscriber_id = state.next_subscriber_id;
        state.next_subscriber_id += 1;
        state
            .subscribers
            .entry(id.to_string())
            .or_default()
            .push((subscriber_id, Rc::new(listener)));

        Subscription {
            state: Rc::downgrade(&self.state),
            id: id.to_string(),
            subscriber_id,
        }
    }

    /// Identifiers that currently have an entry, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state.borrow().entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of live listeners for `id`
    pub fn subscriber_count(&self, id: &str) -> usize {
        self.state
            .borrow()
            .subscribers
            .get(id)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn publish(&self, id: &str, entry: Entry) {
        debug!("overlay '{}' -> open={} keys={}", id, entry.open, entry.payload.len());
        self.state
            .borrow_mut()
            .entries
            .insert(id.to_string(), Arc::new(entry));
        self.notify(id);
    }

    fn notify(&self, id: &str) {
        // Listeners are collected first so they can re-enter the store.
        let listeners: Vec<Listener> = match self.state.borrow().subscribers.get(id) {
            Some(subscribers) => subscribers.iter().map(|(_, listener)| Rc::clone(listener)).collect(),
            None => return,
        };

        debug!("notifying {} listener(s) of overlay '{}'", listeners.len(), id);
        for listener in listeners {
            listener();
        }
    }
}

impl fmt::Debug for OverlayStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("OverlayStore")
            .field("entries", &state.entries)
            .field("subscribed_ids", &state.subscribers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Registration of one listener against one overlay identifier.
///
/// Dropping the subscription leaves the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
#[must_use = "keep the subscription to be able to unsubscribe later"]
pub struct Subscription {
    state: Weak<RefCell<RegistryState>>,
    id: String,
    subscriber_id: SubscriberId,
}

impl Subscription {
    /// The overlay identifier this subscription listens to
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Remove exactly this listener. A no-op once the store is gone.
    pub fn unsubscribe(self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();
        if let Some(subscribers) = state.subscribers.get_mut(&self.id) {
            subscribers.retain(|(subscriber_id, _)| *subscriber_id != self.subscriber_id);
            if subscribers.is_empty() {
                state.subscribers.remove(&self.id);
            }
        }
    }
}
