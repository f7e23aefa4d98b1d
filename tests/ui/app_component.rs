use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use overlay_store::config::Config;
use overlay_store::constants::{
    OVERLAY_HELP, OVERLAY_LOGS, OVERLAY_USER_DELETE, OVERLAY_USER_EDIT, SUCCESS_USER_DELETED,
    SUCCESS_USER_SAVED,
};
use overlay_store::logger::Logger;
use overlay_store::store::OverlayStore;
use overlay_store::ui::app_component::AppComponent;
use overlay_store::ui::core::{Action, Component, Role, User};
use ratatui::{backend::TestBackend, Terminal};
use serde_json::json;

fn app() -> AppComponent {
    AppComponent::new(OverlayStore::new(), &Config::default(), Logger::new())
}

fn press(app: &mut AppComponent, code: KeyCode) -> Action {
    let action = app.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE));
    app.update(action)
}

fn screen(app: &mut AppComponent) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            app.render(f, area);
        })
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_starts_with_overlays_closed() {
    let mut app = app();

    // Each overlay's watch registers its id, closed
    assert_eq!(app.store().ids().len(), 4);
    assert!(app.store().ids().iter().all(|id| !app.store().is_open(id)));
    assert!(!app.take_overlay_changes());
    assert!(screen(&mut app).contains("Ada Lovelace"));
}

#[test]
fn test_edit_opens_overlay_with_selected_user() {
    let mut app = app();
    app.update(Action::NextUser);
    app.update(Action::EditSelected);

    let entry = app.store().get_entry(OVERLAY_USER_EDIT);
    assert!(entry.open);
    assert_eq!(entry.get("title"), Some(&json!("Edit Alan Turing")));
    let user = User::from_payload(&entry.payload).unwrap();
    assert_eq!(user.name, "Alan Turing");

    assert!(app.take_overlay_changes());
    assert!(!app.take_overlay_changes());

    let rendered = screen(&mut app);
    assert!(rendered.contains("Edit Alan Turing"));
    assert!(rendered.contains("alan@example.com"));
}

#[test]
fn test_cycle_role_updates_payload_only() {
    let mut app = app();
    app.update(Action::EditSelected);
    press(&mut app, KeyCode::Char('r'));

    let edited = User::from_payload(&app.store().get_entry(OVERLAY_USER_EDIT).payload).unwrap();
    assert_eq!(edited.role, Role::Viewer);
    // The list is untouched until the save completes
    assert_eq!(app.users()[0].role, Role::Admin);
}

#[test]
fn test_escape_closes_topmost_overlay() {
    let mut app = app();
    press(&mut app, KeyCode::Char('?'));
    // 'e' is swallowed by the help overlay
    press(&mut app, KeyCode::Char('e'));
    assert!(!app.store().is_open(OVERLAY_USER_EDIT));

    app.update(Action::EditSelected);
    assert!(app.store().is_open(OVERLAY_HELP));
    assert!(app.store().is_open(OVERLAY_USER_EDIT));

    press(&mut app, KeyCode::Esc);
    assert!(!app.store().is_open(OVERLAY_USER_EDIT));
    assert!(app.store().is_open(OVERLAY_HELP));

    press(&mut app, KeyCode::Esc);
    assert!(!app.store().is_open(OVERLAY_HELP));
}

#[test]
fn test_help_toggle_uses_defaults() {
    let mut app = app();

    app.update(Action::ToggleHelp);
    let entry = app.store().get_entry(OVERLAY_HELP);
    assert!(entry.open);
    assert_eq!(entry.get("title"), Some(&json!("Help")));
    assert!(screen(&mut app).contains("toggle this help"));

    app.update(Action::ToggleHelp);
    assert!(!app.store().is_open(OVERLAY_HELP));
}

#[test]
fn test_delete_flow_removes_user() {
    let mut app = app();
    app.update(Action::NextUser);
    app.update(Action::NextUser);
    press(&mut app, KeyCode::Char('d'));

    assert!(app.store().is_open(OVERLAY_USER_DELETE));
    assert!(screen(&mut app).contains("Delete Grace Hopper?"));

    // Enter runs the overlay's confirm callback, which queues the action
    press(&mut app, KeyCode::Enter);
    let queued = app.process_background_actions();
    assert_eq!(queued.len(), 1);
    for action in queued {
        app.update(action);
    }

    assert!(!app.store().is_open(OVERLAY_USER_DELETE));
    assert_eq!(app.users().len(), 4);
    assert!(app.users().iter().all(|user| user.name != "Grace Hopper"));
    assert_eq!(app.status_message(), Some(SUCCESS_USER_DELETED));
}

#[test]
fn test_clear_key_empties_logs_overlay() {
    let logger = Logger::new();
    let (_, sink) = logger
        .dispatch(&Config::default().logging)
        .unwrap()
        .into_log();
    sink.log(
        &log::Record::builder()
            .args(format_args!("user list loaded"))
            .level(log::Level::Info)
            .build(),
    );

    let mut app = AppComponent::new(OverlayStore::new(), &Config::default(), logger);
    press(&mut app, KeyCode::Char('L'));
    assert!(screen(&mut app).contains("user list loaded"));

    // 'c' only clears while the logs overlay has the keys
    press(&mut app, KeyCode::Char('c'));
    assert!(app.logger().get_logs().is_empty());
    assert!(!screen(&mut app).contains("user list loaded"));
    assert!(app.store().is_open(OVERLAY_LOGS));
}

#[test]
fn test_quit() {
    let mut app = app();

    assert!(matches!(press(&mut app, KeyCode::Char('q')), Action::Quit));
    assert!(app.should_quit());
}

#[test]
fn test_keys_go_to_open_overlay_first() {
    let mut app = app();
    app.update(Action::ToggleHelp);

    // 'q' is not a help key, so it must not quit while help is open
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit());
}

#[test]
fn test_operation_failure_clears_loading() {
    let mut app = app();
    app.update(Action::EditSelected);
    app.store()
        .update(OVERLAY_USER_EDIT, serde_json::from_value(json!({"confirm_loading": true})).unwrap());

    app.update(Action::OperationFailed("Save user 1 failed: offline".to_string()));

    let entry = app.store().get_entry(OVERLAY_USER_EDIT);
    assert_eq!(entry.get("confirm_loading"), Some(&json!(false)));
    assert!(entry.open);
    assert_eq!(app.status_message(), Some("Save user 1 failed: offline"));
}

#[tokio::test]
async fn test_save_flow_round_trips_through_background_task() {
    let mut app = app();
    app.update(Action::EditSelected);
    press(&mut app, KeyCode::Char('r'));

    press(&mut app, KeyCode::Enter);
    for action in app.process_background_actions() {
        app.update(action);
    }

    let entry = app.store().get_entry(OVERLAY_USER_EDIT);
    assert_eq!(entry.get("confirm_loading"), Some(&json!(true)));
    assert_eq!(app.active_task_count(), 1);
    assert!(screen(&mut app).contains("Working..."));

    // Enter is ignored while the save is in flight
    press(&mut app, KeyCode::Enter);
    assert!(app.process_background_actions().is_empty());

    let mut saved = false;
    for _ in 0..100 {
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        for action in app.process_background_actions() {
            saved |= matches!(action, Action::UserSaved(_));
            app.update(action);
        }
        if saved {
            break;
        }
    }

    assert!(saved);
    assert!(!app.store().is_open(OVERLAY_USER_EDIT));
    assert_eq!(app.users()[0].role, Role::Viewer);
    assert_eq!(app.status_message(), Some(SUCCESS_USER_SAVED));
}
