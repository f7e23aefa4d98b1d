use overlay_store::store::{payload_from, EntryBinding, ExternalStore, OverlayStore};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

#[test]
fn test_snapshot_tracks_store() {
    let store = OverlayStore::new();
    let binding = EntryBinding::new(&store, "m");

    assert!(Arc::ptr_eq(&binding.snapshot(), &store.get_entry("m")));

    store.show("m", None);
    assert!(binding.snapshot().open);
    assert!(Arc::ptr_eq(&binding.snapshot(), &binding.server_snapshot()));
}

#[test]
fn test_subscribe_forwards_to_store() {
    let store = OverlayStore::new();
    let binding = EntryBinding::new(&store, "m");
    let count = Rc::new(Cell::new(0));
    let inner = Rc::clone(&count);

    let subscription = binding.subscribe(Rc::new(move || inner.set(inner.get() + 1)));
    assert_eq!(subscription.id(), "m");

    store.show("m", None);
    store.show("other", None);
    assert_eq!(count.get(), 1);

    subscription.unsubscribe();
    store.close("m");
    assert_eq!(count.get(), 1);
}

#[test]
fn test_watch_reports_only_real_changes() {
    let store = OverlayStore::new();
    let binding = EntryBinding::new(&store, "m");
    let mut watch = binding.watch();

    assert!(!watch.is_dirty());
    assert!(watch.take_change().is_none());

    store.show("other", None);
    assert!(!watch.is_dirty());

    store.show("m", Some(payload_from(json!({"a": 1})).unwrap()));
    assert!(watch.is_dirty());
    let changed = watch.take_change().expect("entry changed");
    assert!(changed.open);
    assert!(Arc::ptr_eq(&changed, watch.current()));

    // Consumed
    assert!(!watch.is_dirty());
    assert!(watch.take_change().is_none());
}

#[test]
fn test_dropping_watch_unsubscribes() {
    let store = OverlayStore::new();
    let watch = EntryBinding::new(&store, "m").watch();
    assert_eq!(store.subscriber_count("m"), 1);

    drop(watch);
    assert_eq!(store.subscriber_count("m"), 0);
}
