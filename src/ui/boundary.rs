//! Presentation boundary for one overlay identifier
//!
//! The boundary reads the overlay's entry through the binding adapter,
//! merges its chrome configuration, asks a [`ChromeRenderer`] to draw the
//! shell and renders the content inside the overlay's scope.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;

use super::chrome::{partition, Callback, ChromeConfig, ChromeProps};
use crate::store::{enter_scope, Entry, EntryBinding, EntryWatch, ExternalStore, OverlayStore, Payload};

/// Host-provided renderer for overlay chrome.
pub trait ChromeRenderer {
    /// Draw the shell described by `props` inside `area`.
    ///
    /// Returns the area left for the overlay content, or `None` when nothing
    /// was drawn (the overlay is closed).
    fn render(&self, f: &mut Frame, area: Rect, props: &ChromeProps) -> Option<Rect>;
}

/// Declarative placement point of one overlay
#[derive(Debug, Clone)]
pub struct OverlayBoundary {
    binding: EntryBinding,
    config: ChromeConfig,
}

impl OverlayBoundary {
    pub fn new(store: &OverlayStore, id: impl Into<String>) -> Self {
        Self::with_config(store, id, ChromeConfig::default())
    }

    /// Boundary with a component-declared static configuration, the lowest
    /// layer of the merge.
    pub fn with_config(store: &OverlayStore, id: impl Into<String>, config: ChromeConfig) -> Self {
        Self {
            binding: EntryBinding::new(store, id),
            config,
        }
    }

    pub fn id(&self) -> &str {
        self.binding.id()
    }

    pub fn config(&self) -> &ChromeConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.binding.snapshot().open
    }

    /// Watch the overlay's entry to know when this boundary needs a redraw
    pub fn watch(&self) -> EntryWatch {
        self.binding.watch()
    }

    /// Resolve the props the chrome renders with.
    ///
    /// Precedence, lowest first: static configuration, chrome keys from the
    /// payload, then the live `open` flag and the closing dismissal handler.
    pub fn props(&self) -> ChromeProps {
        let entry = self.binding.snapshot();
        self.props_for(&entry)
    }

    fn props_for(&self, entry: &Entry) -> ChromeProps {
        let (chrome, _opaque) = partition(&entry.payload);
        let config = self.config.clone().apply_payload(&chrome);
        let on_dismiss = self.dismiss_handler(config.on_dismiss.clone());
        ChromeProps::resolve(config, entry.open, on_dismiss)
    }

    fn dismiss_handler(&self, caller: Option<Callback>) -> Callback {
        let store = self.binding.store().clone();
        let id = self.id().to_string();
        Callback::new(move || {
            if let Some(caller) = &caller {
                caller.call();
            }
            store.close(&id);
        })
    }

    /// Render the chrome and, when open, `content` inside the overlay's
    /// scope. Content reads the payload with
    /// [`use_overlay_payload`](crate::store::use_overlay_payload) or
    /// [`use_overlay_config`](crate::store::use_overlay_config).
    pub fn render<R, F>(&self, f: &mut Frame, area: Rect, renderer: &R, content: F)
    where
        R: ChromeRenderer + ?Sized,
        F: FnOnce(&mut Frame, Rect),
    {
        self.render_with(f, area, renderer, |f, inner, _payload| content(f, inner));
    }

    /// Like [`OverlayBoundary::render`], handing the full payload straight to
    /// the content.
    pub fn render_with<R, F>(&self, f: &mut Frame, area: Rect, renderer: &R, content: F)
    where
        R: ChromeRenderer + ?Sized,
        F: FnOnce(&mut Frame, Rect, &Payload),
    {
        let entry: Arc<Entry> = self.binding.snapshot();
        let props = self.props_for(&entry);

        if let Some(inner) = renderer.render(f, area, &props) {
            let _scope = enter_scope(self.binding.store(), self.id());
            content(f, inner, &entry.payload);
        }
    }

    /// Route a key to the overlay shell.
    ///
    /// While open, Esc dismisses (when `closable` and `keyboard` allow it)
    /// and Enter confirms (unless `confirm_loading`). Returns whether the key
    /// was consumed; keys reaching a closed overlay are never consumed.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        let props = self.props();
        if !props.open {
            return false;
        }

        match key.code {
            KeyCode::Esc => {
                if props.can_dismiss_with_key() {
                    props.on_dismiss.call();
                }
                true
            }
            KeyCode::Enter => {
                if !props.confirm_loading {
                    if let Some(on_ok) = &props.on_ok {
                        on_ok.call();
                    }
                }
                true
            }
            _ => false,
        }
    }
}
