use super::binding::{EntryBinding, ExternalStore};
use super::entry::{merge_payload, Payload};
use super::registry::OverlayStore;

/// Imperative control for one overlay.
///
/// Captures an optional default payload at construction so call sites can
/// open, close and adjust the overlay without touching the registry.
#[derive(Debug, Clone)]
pub struct ModalHandle {
    binding: EntryBinding,
    defaults: Option<Payload>,
}

impl ModalHandle {
    pub fn new(store: &OverlayStore, id: impl Into<String>) -> Self {
        Self {
            binding: EntryBinding::new(store, id),
            defaults: None,
        }
    }

    pub fn with_defaults(store: &OverlayStore, id: impl Into<String>, defaults: Payload) -> Self {
        Self {
            binding: EntryBinding::new(store, id),
            defaults: Some(defaults),
        }
    }

    pub fn id(&self) -> &str {
        self.binding.id()
    }

    pub fn defaults(&self) -> Option<&Payload> {
        self.defaults.as_ref()
    }

    pub fn binding(&self) -> &EntryBinding {
        &self.binding
    }

    /// Open the overlay.
    ///
    /// The runtime payload is layered over the defaults. With neither present
    /// the overlay reopens with whatever payload it had before.
    pub fn show_modal(&self, runtime: Option<Payload>) {
        let payload = match (&self.defaults, runtime) {
            (None, None) => None,
            (Some(defaults), None) => Some(defaults.clone()),
            (None, Some(runtime)) => Some(runtime),
            (Some(defaults), Some(runtime)) => Some(merge_payload(defaults, &runtime)),
        };
        self.binding.store().show(self.id(), payload);
    }

    pub fn close_modal(&self) {
        self.binding.store().close(self.id());
    }

    /// Close if open, otherwise reopen with the captured defaults.
    ///
    /// Reopening never restores a runtime payload passed to an earlier
    /// [`ModalHandle::show_modal`] call; only the defaults are applied.
    pub fn toggle_modal(&self) {
        if self.is_open() {
            self.close_modal();
        } else {
            self.show_modal(None);
        }
    }

    /// Merge `partial` into the current payload without changing visibility
    pub fn set_options(&self, partial: Payload) {
        self.binding.store().update(self.id(), partial);
    }

    pub fn is_open(&self) -> bool {
        self.binding.snapshot().open
    }
}
