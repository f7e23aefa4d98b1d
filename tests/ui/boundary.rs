use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use overlay_store::store::{payload_from, use_overlay_config, use_overlay_payload, OverlayStore, Payload};
use overlay_store::ui::{ChromeConfig, ChromeProps, ChromeRenderer, OverlayBoundary};
use overlay_store::OverlayError;
use ratatui::{backend::TestBackend, layout::Rect, Frame, Terminal};
use serde::Deserialize;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn payload(value: Value) -> Payload {
    payload_from(value).unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Renderer that records the props it was given and hands back the whole area
#[derive(Default)]
struct RecordingChrome {
    last: RefCell<Option<ChromeProps>>,
}

impl ChromeRenderer for RecordingChrome {
    fn render(&self, _f: &mut Frame, area: Rect, props: &ChromeProps) -> Option<Rect> {
        *self.last.borrow_mut() = Some(props.clone());
        props.open.then_some(area)
    }
}

fn draw<F>(draw_fn: F)
where
    F: FnOnce(&mut Frame),
{
    let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
    let mut draw_fn = Some(draw_fn);
    terminal
        .draw(|f| {
            if let Some(draw_fn) = draw_fn.take() {
                draw_fn(f);
            }
        })
        .unwrap();
}

#[test]
fn test_merge_precedence() {
    let store = OverlayStore::new();
    let boundary = OverlayBoundary::with_config(
        &store,
        "m",
        ChromeConfig {
            title: Some("Static".to_string()),
            width: Some(30),
            ..Default::default()
        },
    );

    store.show("m", Some(payload(json!({"title": "From payload", "record": 1}))));
    let props = boundary.props();

    assert!(props.open);
    assert_eq!(props.title.as_deref(), Some("From payload"));
    assert_eq!(props.width, 30);
}

#[test]
fn test_dismiss_runs_caller_callback_then_closes() {
    let store = OverlayStore::new();
    let observed_open = Rc::new(Cell::new(None));

    let reader = store.clone();
    let observed = Rc::clone(&observed_open);
    let boundary = OverlayBoundary::with_config(
        &store,
        "m",
        ChromeConfig::default().on_dismiss(move || observed.set(Some(reader.is_open("m")))),
    );

    store.show("m", None);
    boundary.props().on_dismiss.call();

    // The caller's callback ran while the overlay was still open
    assert_eq!(observed_open.get(), Some(true));
    assert!(!store.is_open("m"));
}

#[test]
fn test_dismiss_without_caller_callback_closes() {
    let store = OverlayStore::new();
    let boundary = OverlayBoundary::new(&store, "m");

    store.show("m", None);
    boundary.props().on_dismiss.call();

    assert!(!store.is_open("m"));
}

#[test]
fn test_closed_overlay_renders_no_content() {
    let store = OverlayStore::new();
    let boundary = OverlayBoundary::new(&store, "m");
    let renderer = RecordingChrome::default();
    let rendered = Cell::new(false);

    draw(|f| {
        let area = f.area();
        boundary.render(f, area, &renderer, |_, _| rendered.set(true));
    });

    assert!(!rendered.get());
    let props = renderer.last.borrow();
    assert!(!props.as_ref().unwrap().open);
}

#[test]
fn test_content_reads_payload_through_scope() {
    #[derive(Deserialize)]
    struct Content {
        record: u32,
    }

    let store = OverlayStore::new();
    store.show("m", Some(payload(json!({"title": "T", "record": 9}))));
    let boundary = OverlayBoundary::new(&store, "m");
    let renderer = RecordingChrome::default();
    let seen = Cell::new(0);

    draw(|f| {
        let area = f.area();
        boundary.render(f, area, &renderer, |_, _| {
            let content: Content = use_overlay_config().unwrap();
            seen.set(content.record);
        });
    });

    assert_eq!(seen.get(), 9);
    // Scope is gone once rendering returns
    assert!(matches!(use_overlay_payload(), Err(OverlayError::MissingScope)));
}

#[test]
fn test_render_with_hands_full_payload() {
    let store = OverlayStore::new();
    store.show("m", Some(payload(json!({"title": "T", "record": 9}))));
    let boundary = OverlayBoundary::new(&store, "m");
    let renderer = RecordingChrome::default();
    let seen = RefCell::new(None);

    draw(|f| {
        let area = f.area();
        boundary.render_with(f, area, &renderer, |_, _, payload| {
            *seen.borrow_mut() = Some(Value::Object(payload.clone()));
        });
    });

    assert_eq!(seen.into_inner(), Some(json!({"title": "T", "record": 9})));
}

#[test]
fn test_escape_dismisses_open_overlay() {
    let store = OverlayStore::new();
    let boundary = OverlayBoundary::new(&store, "m");

    assert!(!boundary.handle_key(key(KeyCode::Esc)));

    store.show("m", None);
    assert!(boundary.handle_key(key(KeyCode::Esc)));
    assert!(!store.is_open("m"));
}

#[test]
fn test_escape_respects_keyboard_flag() {
    let store = OverlayStore::new();
    let boundary = OverlayBoundary::new(&store, "m");

    store.show("m", Some(payload(json!({"keyboard": false}))));

    assert!(boundary.handle_key(key(KeyCode::Esc)));
    assert!(store.is_open("m"));
}

#[test]
fn test_enter_confirms_unless_loading() {
    let store = OverlayStore::new();
    let confirmed = Rc::new(Cell::new(0));
    let counter = Rc::clone(&confirmed);
    let boundary = OverlayBoundary::with_config(
        &store,
        "m",
        ChromeConfig::default().on_ok(move || counter.set(counter.get() + 1)),
    );

    store.show("m", None);
    assert!(boundary.handle_key(key(KeyCode::Enter)));
    assert_eq!(confirmed.get(), 1);

    store.update("m", payload(json!({"confirm_loading": true})));
    assert!(boundary.handle_key(key(KeyCode::Enter)));
    assert_eq!(confirmed.get(), 1);

    assert!(!boundary.handle_key(key(KeyCode::Char('x'))));
}

#[test]
fn test_watch_follows_boundary_id() {
    let store = OverlayStore::new();
    let boundary = OverlayBoundary::new(&store, "m");
    let mut watch = boundary.watch();

    store.show("other", None);
    assert!(watch.take_change().is_none());

    store.show("m", None);
    assert!(watch.take_change().is_some());
    assert!(boundary.is_open());
}
