use crate::config::Config;
use crate::constants::{
    APP_TITLE, DEMO_SAVE_DELAY_MS, OVERLAY_HELP, OVERLAY_LOGS, OVERLAY_USER_DELETE, OVERLAY_USER_EDIT, STATUS_HINT,
    SUCCESS_USER_DELETED, SUCCESS_USER_SAVED,
};
use crate::logger::Logger;
use crate::store::{payload_from, use_overlay_config, EntryWatch, ModalHandle, OverlayStore, Payload};
use crate::ui::boundary::OverlayBoundary;
use crate::ui::chrome::ChromeConfig;
use crate::ui::core::{Action, Component, Role, TaskManager, User};
use crate::ui::dialogs::DialogChrome;
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent};
use log::{error, info};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;

fn payload(value: Value) -> Payload {
    payload_from(value).unwrap_or_default()
}

/// Control handle and placement point of one overlay
struct Overlay {
    handle: ModalHandle,
    boundary: OverlayBoundary,
}

impl Overlay {
    fn new(store: &OverlayStore, config: &Config, id: &str, defaults: Option<Payload>, base: ChromeConfig) -> Self {
        let handle = match defaults {
            Some(defaults) => ModalHandle::with_defaults(store, id, defaults),
            None => ModalHandle::new(store, id),
        };
        let boundary = OverlayBoundary::with_config(store, id, config.chrome_for(id, base));
        Self { handle, boundary }
    }
}

/// Opaque part of the edit overlay's payload
#[derive(Debug, Default, Deserialize)]
struct EditForm {
    #[serde(default)]
    user: Option<User>,
}

pub struct AppComponent {
    store: OverlayStore,
    users: Vec<User>,
    selected: usize,
    list_state: ListState,
    status_message: Option<String>,

    // Overlays
    edit: Overlay,
    delete: Overlay,
    help: Overlay,
    logs: Overlay,
    chrome: DialogChrome,
    watches: Vec<EntryWatch>,

    // Services
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,

    should_quit: bool,
}

impl AppComponent {
    pub fn new(store: OverlayStore, config: &Config, logger: Logger) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new();

        let save_tx = task_manager.sender();
        let edit = Overlay::new(
            &store,
            config,
            OVERLAY_USER_EDIT,
            None,
            ChromeConfig {
                width: Some(50),
                height: Some(9),
                ok_text: Some("Save".to_string()),
                ..Default::default()
            }
            .on_ok(move || {
                let _ = save_tx.send(Action::SaveUser);
            })
            .on_dismiss(|| info!("User edit dismissed")),
        );

        let delete_tx = task_manager.sender();
        let delete = Overlay::new(
            &store,
            config,
            OVERLAY_USER_DELETE,
            None,
            ChromeConfig {
                title: Some("Delete user".to_string()),
                width: Some(44),
                height: Some(8),
                ok_text: Some("Delete".to_string()),
                danger: Some(true),
                ..Default::default()
            }
            .on_ok(move || {
                let _ = delete_tx.send(Action::ConfirmDelete);
            }),
        );

        let help = Overlay::new(
            &store,
            config,
            OVERLAY_HELP,
            Some(payload(json!({ "title": "Help" }))),
            ChromeConfig {
                width: Some(50),
                height: Some(12),
                cancel_text: Some("Close".to_string()),
                ..Default::default()
            },
        );

        let logs = Overlay::new(
            &store,
            config,
            OVERLAY_LOGS,
            Some(payload(json!({ "title": "Logs" }))),
            ChromeConfig {
                width: Some(90),
                height: Some(20),
                cancel_text: Some("Close".to_string()),
                ..Default::default()
            },
        );

        let watches = vec![
            edit.boundary.watch(),
            delete.boundary.watch(),
            help.boundary.watch(),
            logs.boundary.watch(),
        ];

        Self {
            store,
            users: Self::sample_users(),
            selected: 0,
            list_state: ListState::default(),
            status_message: None,
            edit,
            delete,
            help,
            logs,
            chrome: DialogChrome::default(),
            watches,
            task_manager,
            background_action_rx,
            logger,
            should_quit: false,
        }
    }

    fn sample_users() -> Vec<User> {
        [
            ("Ada Lovelace", "ada@example.com", Role::Admin),
            ("Alan Turing", "alan@example.com", Role::Editor),
            ("Grace Hopper", "grace@example.com", Role::Editor),
            ("Edsger Dijkstra", "edsger@example.com", Role::Viewer),
            ("Barbara Liskov", "barbara@example.com", Role::Viewer),
        ]
        .into_iter()
        .enumerate()
        .map(|(index, (name, email, role))| User {
            id: index as u32 + 1,
            name: name.to_string(),
            email: email.to_string(),
            role,
        })
        .collect()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.users.get(self.selected)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn store(&self) -> &OverlayStore {
        &self.store
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Drain actions sent by background tasks and overlay callbacks
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.background_action_rx.try_recv() {
            actions.push(action);
        }
        self.task_manager.cleanup_finished_tasks();
        actions
    }

    /// Whether any overlay entry changed since the last call
    pub fn take_overlay_changes(&mut self) -> bool {
        let mut changed = false;
        for watch in &mut self.watches {
            if watch.take_change().is_some() {
                changed = true;
            }
        }
        changed
    }

    fn topmost_open(&self) -> Option<&Overlay> {
        [&self.delete, &self.edit, &self.logs, &self.help]
            .into_iter()
            .find(|overlay| overlay.handle.is_open())
    }

    fn edited_user(&self) -> Option<User> {
        User::from_payload(&self.store.get_entry(OVERLAY_USER_EDIT).payload)
    }

    fn edit_selected(&mut self) {
        if let Some(user) = self.selected_user() {
            let runtime = payload(json!({
                "title": format!("Edit {}", user.name),
                "user": user.to_value(),
            }));
            self.edit.handle.show_modal(Some(runtime));
        }
    }

    fn save_user(&mut self) {
        let Some(user) = self.edited_user() else {
            return;
        };

        self.edit.handle.set_options(payload(json!({ "confirm_loading": true })));
        self.task_manager
            .spawn_operation(format!("Save user {}", user.id), move || async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(DEMO_SAVE_DELAY_MS)).await;
                anyhow::Ok(Action::UserSaved(user))
            });
    }

    fn apply_saved_user(&mut self, user: User) {
        info!("Saved user {} ({})", user.id, user.role.label());
        if let Some(existing) = self.users.iter_mut().find(|existing| existing.id == user.id) {
            *existing = user;
        }
        self.edit.handle.set_options(payload(json!({ "confirm_loading": false })));
        // The user may already have dismissed the overlay; closing again is harmless.
        self.edit.handle.close_modal();
        self.status_message = Some(SUCCESS_USER_SAVED.to_string());
    }

    fn delete_selected(&mut self) {
        if let Some(user) = self.selected_user() {
            let runtime = payload(json!({ "user_id": user.id, "name": user.name }));
            self.delete.handle.show_modal(Some(runtime));
        }
    }

    fn confirm_delete(&mut self) {
        let entry = self.store.get_entry(OVERLAY_USER_DELETE);
        if let Some(user_id) = entry.get("user_id").and_then(Value::as_u64) {
            self.users.retain(|user| u64::from(user.id) != user_id);
            self.selected = self.selected.min(self.users.len().saturating_sub(1));
            self.status_message = Some(SUCCESS_USER_DELETED.to_string());
            info!("Deleted user {}", user_id);
        }
        self.delete.handle.close_modal();
    }

    fn render_edit_content(f: &mut Frame, area: Rect) {
        let label = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
        let lines = match use_overlay_config::<EditForm>() {
            Ok(EditForm { user: Some(user) }) => vec![
                Line::from(vec![Span::styled("Name   ", label), Span::raw(user.name)]),
                Line::from(vec![Span::styled("Email  ", label), Span::raw(user.email)]),
                Line::from(vec![
                    Span::styled("Role   ", label),
                    Span::styled(user.role.label(), Style::default().fg(Color::Yellow)),
                    Span::styled("  (r to change)", Style::default().fg(Color::DarkGray)),
                ]),
            ],
            Ok(_) => vec![Line::from("No user selected")],
            Err(e) => {
                error!("{}", e);
                vec![Line::from(e.to_string())]
            }
        };
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }

    fn render_delete_content(f: &mut Frame, area: Rect, payload: &Payload) {
        let name = payload.get("name").and_then(Value::as_str).unwrap_or("this user");
        let text = format!("Delete {}?\n\nThis action cannot be undone!", name);
        f.render_widget(
            Paragraph::new(text)
                .alignment(ratatui::layout::Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_help_content(f: &mut Frame, area: Rect) {
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = [
            ("j / k", "move selection"),
            ("e", "edit the selected user"),
            ("r", "cycle role while editing"),
            ("Enter", "confirm the open overlay"),
            ("d", "delete the selected user"),
            ("L", "show logs, c clears them"),
            ("?", "toggle this help"),
            ("q", "quit"),
        ]
        .into_iter()
        .map(|(k, desc)| Line::from(vec![Span::styled(format!("{:<7}", k), key), Span::raw(desc)]))
        .collect();
        f.render_widget(Paragraph::new(lines), area);
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if let Some(overlay) = self.topmost_open() {
            if overlay.boundary.handle_key(key) {
                return Action::None;
            }
            return match (overlay.handle.id(), key.code) {
                (OVERLAY_USER_EDIT, KeyCode::Char('r')) => Action::CycleRole,
                (OVERLAY_HELP, KeyCode::Char('?')) => Action::ToggleHelp,
                (OVERLAY_LOGS, KeyCode::Char('L')) => Action::ToggleLogs,
                (OVERLAY_LOGS, KeyCode::Char('c')) => Action::ClearLogs,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::NextUser,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousUser,
            KeyCode::Char('e') | KeyCode::Enter => Action::EditSelected,
            KeyCode::Char('d') => Action::DeleteSelected,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('L') => Action::ToggleLogs,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::NextUser => {
                if !self.users.is_empty() {
                    self.selected = (self.selected + 1).min(self.users.len() - 1);
                }
            }
            Action::PreviousUser => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::EditSelected => self.edit_selected(),
            Action::CycleRole => {
                if let Some(mut user) = self.edited_user() {
                    user.role = user.role.next();
                    self.edit.handle.set_options(payload(json!({ "user": user.to_value() })));
                }
            }
            Action::SaveUser => self.save_user(),
            Action::UserSaved(user) => self.apply_saved_user(user),
            Action::DeleteSelected => self.delete_selected(),
            Action::ConfirmDelete => self.confirm_delete(),
            Action::ToggleHelp => self.help.handle.toggle_modal(),
            Action::ToggleLogs => self.logs.handle.toggle_modal(),
            Action::ClearLogs => self.logger.clear(),
            Action::OperationFailed(message) => {
                error!("{}", message);
                self.edit.handle.set_options(payload(json!({ "confirm_loading": false })));
                self.status_message = Some(message);
            }
            Action::Quit => {
                self.should_quit = true;
                return Action::Quit;
            }
            Action::None => {}
        }
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = LayoutManager::main_layout(rect);

        let items: Vec<ListItem> = self
            .users
            .iter()
            .map(|user| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<18} ", user.name)),
                    Span::styled(format!("{:<24} ", user.email), Style::default().fg(Color::Gray)),
                    Span::styled(user.role.label(), Style::default().fg(Color::Yellow)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(APP_TITLE),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");

        self.list_state
            .select(if self.users.is_empty() { None } else { Some(self.selected) });
        f.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let status = self.status_message.as_deref().unwrap_or(STATUS_HINT);
        f.render_widget(Paragraph::new(status).style(Style::default().fg(Color::Gray)), chunks[1]);

        // Later overlays draw on top of earlier ones
        let logs = self.logger.get_logs();
        self.help
            .boundary
            .render(f, rect, &self.chrome, Self::render_help_content);
        self.logs.boundary.render(f, rect, &self.chrome, |f, area| {
            let lines: Vec<Line> = logs.iter().map(|line| Line::from(line.as_str())).collect();
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
        });
        self.edit
            .boundary
            .render(f, rect, &self.chrome, Self::render_edit_content);
        self.delete
            .boundary
            .render_with(f, rect, &self.chrome, Self::render_delete_content);
    }
}
