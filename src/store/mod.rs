//! Keyed overlay state store.
//!
//! The store tracks, per overlay identifier, whether the overlay is open and
//! which payload it carries, and notifies only the listeners of the
//! identifier that changed.
//!
//! # Module Components
//!
//! - [`entry`] - Per-identifier state and payload helpers
//! - [`registry`] - The registry itself and its mutation API
//! - [`binding`] - Subscribe/snapshot adapter for rendering hosts
//! - [`handle`] - Imperative per-overlay control handle
//! - [`scope`] - Ambient overlay scope and configuration reader

pub mod binding;
pub mod entry;
pub mod handle;
pub mod registry;
pub mod scope;

pub use binding::{EntryBinding, EntryWatch, ExternalStore};
pub use entry::{merge_payload, payload_from, Entry, Payload};
pub use handle::ModalHandle;
pub use registry::{Listener, OverlayStore, Subscription};
pub use scope::{current_overlay_id, enter_scope, use_overlay_config, use_overlay_payload, ScopeGuard};
