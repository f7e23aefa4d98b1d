use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Key/value configuration carried by an overlay.
///
/// Holds both chrome keys (title, width, ...) and opaque data that only the
/// overlay's own content interprets.
pub type Payload = Map<String, Value>;

/// State of one overlay identifier.
///
/// Entries are never mutated after they are published by the store. Every
/// write produces a new allocation, so pointer identity of the shared
/// snapshot doubles as a change marker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    pub open: bool,
    pub payload: Payload,
}

static DEFAULT_ENTRY: Lazy<Arc<Entry>> = Lazy::new(|| Arc::new(Entry::default()));

impl Entry {
    /// The shared entry returned for identifiers the store has never seen.
    pub fn closed() -> Arc<Entry> {
        Arc::clone(&DEFAULT_ENTRY)
    }

    /// Read a single payload value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

/// Shallow-merge `overlay` on top of `base`, keys in `overlay` winning.
pub fn merge_payload(base: &Payload, overlay: &Payload) -> Payload {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Build a payload from a JSON value, keeping only object maps.
///
/// Anything that is not a JSON object yields `None`.
pub fn payload_from(value: Value) -> Option<Payload> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
