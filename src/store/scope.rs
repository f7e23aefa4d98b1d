//! Ambient overlay scope and configuration reader
//!
//! An [`OverlayBoundary`](crate::ui::OverlayBoundary) enters a scope for its
//! identifier while rendering content. Code running inside that content can
//! then read the overlay's payload with [`use_overlay_payload`] or
//! [`use_overlay_config`] without being handed the identifier.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::marker::PhantomData;

use super::binding::{EntryBinding, ExternalStore};
use super::entry::Payload;
use super::registry::OverlayStore;
use crate::error::{OverlayError, Result};

thread_local! {
    static SCOPES: RefCell<Vec<EntryBinding>> = const { RefCell::new(Vec::new()) };
}

/// Guard for an entered overlay scope. Leaving happens on drop.
#[derive(Debug)]
#[must_use = "the scope is left as soon as the guard is dropped"]
pub struct ScopeGuard {
    depth: usize,
    // Scopes are per thread
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPES.with(|scopes| scopes.borrow_mut().truncate(self.depth));
    }
}

/// Make `id` the ambient overlay for the current thread until the guard drops.
///
/// Scopes nest: the innermost one wins.
pub fn enter_scope(store: &OverlayStore, id: &str) -> ScopeGuard {
    let depth = SCOPES.with(|scopes| {
        let mut scopes = scopes.borrow_mut();
        let depth = scopes.len();
        scopes.push(EntryBinding::new(store, id));
        depth
    });

    ScopeGuard {
        depth,
        _not_send: PhantomData,
    }
}

fn current_binding() -> Result<EntryBinding> {
    SCOPES
        .with(|scopes| scopes.borrow().last().cloned())
        .ok_or(OverlayError::MissingScope)
}

/// Identifier of the innermost overlay scope
pub fn current_overlay_id() -> Result<String> {
    current_binding().map(|binding| binding.id().to_string())
}

/// Current payload of the ambient overlay.
pub fn use_overlay_payload() -> Result<Payload> {
    let binding = current_binding()?;
    Ok(binding.snapshot().payload.clone())
}

/// Current payload of the ambient overlay, deserialized into `T`.
///
/// Fields missing from the payload follow `T`'s own serde rules, so declare
/// them as `Option` or `#[serde(default)]` when they may be absent.
pub fn use_overlay_config<T>() -> Result<T>
where
    T: DeserializeOwned,
{
    let binding = current_binding()?;
    let payload = binding.snapshot().payload.clone();

    serde_json::from_value(Value::Object(payload)).map_err(|source| OverlayError::InvalidPayload {
        id: binding.id().to_string(),
        source,
    })
}
