//! Overlay chrome configuration and merging
//!
//! A payload mixes keys that configure the overlay's shell ("chrome keys",
//! a closed set listed in [`ChromeKey`]) with opaque keys meant for the
//! overlay content. [`partition`] splits the two and
//! [`ChromeConfig::apply_payload`] layers the chrome part over a static
//! configuration.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

use crate::store::Payload;

/// Payload keys understood by the overlay shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromeKey {
    Title,
    Width,
    Height,
    OkText,
    CancelText,
    Footer,
    Closable,
    Keyboard,
    ConfirmLoading,
    Danger,
}

impl ChromeKey {
    pub const ALL: [ChromeKey; 10] = [
        ChromeKey::Title,
        ChromeKey::Width,
        ChromeKey::Height,
        ChromeKey::OkText,
        ChromeKey::CancelText,
        ChromeKey::Footer,
        ChromeKey::Closable,
        ChromeKey::Keyboard,
        ChromeKey::ConfirmLoading,
        ChromeKey::Danger,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChromeKey::Title => "title",
            ChromeKey::Width => "width",
            ChromeKey::Height => "height",
            ChromeKey::OkText => "ok_text",
            ChromeKey::CancelText => "cancel_text",
            ChromeKey::Footer => "footer",
            ChromeKey::Closable => "closable",
            ChromeKey::Keyboard => "keyboard",
            ChromeKey::ConfirmLoading => "confirm_loading",
            ChromeKey::Danger => "danger",
        }
    }

    pub fn from_key(key: &str) -> Option<ChromeKey> {
        Self::ALL.iter().copied().find(|chrome_key| chrome_key.as_str() == key)
    }
}

/// Split a payload into its chrome part and its opaque part
pub fn partition(payload: &Payload) -> (Payload, Payload) {
    let mut chrome = Payload::new();
    let mut opaque = Payload::new();
    for (key, value) in payload {
        if ChromeKey::from_key(key).is_some() {
            chrome.insert(key.clone(), value.clone());
        } else {
            opaque.insert(key.clone(), value.clone());
        }
    }
    (chrome, opaque)
}

/// Shared zero-argument callback
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

/// Chrome configuration for one overlay.
///
/// Every field is optional so a configuration can be layered over another.
/// Callbacks are never read from files or payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub title: Option<String>,
    /// Width in percent of the available area
    pub width: Option<u16>,
    /// Height in lines
    pub height: Option<u16>,
    pub ok_text: Option<String>,
    pub cancel_text: Option<String>,
    /// Show the footer with the OK / Cancel hints
    pub footer: Option<bool>,
    /// Allow dismissing the overlay
    pub closable: Option<bool>,
    /// Allow dismissing with Esc
    pub keyboard: Option<bool>,
    pub confirm_loading: Option<bool>,
    pub danger: Option<bool>,
    #[serde(skip)]
    pub on_dismiss: Option<Callback>,
    #[serde(skip)]
    pub on_ok: Option<Callback>,
}

impl ChromeConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn on_dismiss<F>(mut self, f: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_dismiss = Some(Callback::new(f));
        self
    }

    pub fn on_ok<F>(mut self, f: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_ok = Some(Callback::new(f));
        self
    }

    /// Layer `other`'s set fields over this configuration
    pub fn overlay(mut self, other: &ChromeConfig) -> Self {
        fn pick<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }

        pick(&mut self.title, &other.title);
        pick(&mut self.width, &other.width);
        pick(&mut self.height, &other.height);
        pick(&mut self.ok_text, &other.ok_text);
        pick(&mut self.cancel_text, &other.cancel_text);
        pick(&mut self.footer, &other.footer);
        pick(&mut self.closable, &other.closable);
        pick(&mut self.keyboard, &other.keyboard);
        pick(&mut self.confirm_loading, &other.confirm_loading);
        pick(&mut self.danger, &other.danger);
        pick(&mut self.on_dismiss, &other.on_dismiss);
        pick(&mut self.on_ok, &other.on_ok);
        self
    }

    /// Layer the chrome keys of `payload` over this configuration.
    ///
    /// Opaque keys are ignored. Chrome keys holding a value of the wrong type
    /// are skipped with a warning; `null` leaves the field untouched.
    pub fn apply_payload(mut self, payload: &Payload) -> Self {
        for (key, value) in payload {
            let Some(chrome_key) = ChromeKey::from_key(key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }

            let applied = match chrome_key {
                ChromeKey::Title => set_string(&mut self.title, value),
                ChromeKey::Width => set_u16(&mut self.width, value),
                ChromeKey::Height => set_u16(&mut self.height, value),
                ChromeKey::OkText => set_string(&mut self.ok_text, value),
                ChromeKey::CancelText => set_string(&mut self.cancel_text, value),
                ChromeKey::Footer => set_bool(&mut self.footer, value),
                ChromeKey::Closable => set_bool(&mut self.closable, value),
                ChromeKey::Keyboard => set_bool(&mut self.keyboard, value),
                ChromeKey::ConfirmLoading => set_bool(&mut self.confirm_loading, value),
                ChromeKey::Danger => set_bool(&mut self.danger, value),
            };

            if !applied {
                warn!("ignoring chrome key '{}' with unexpected value {}", key, value);
            }
        }
        self
    }
}

fn set_string(slot: &mut Option<String>, value: &Value) -> bool {
    match value.as_str() {
        Some(s) => {
            *slot = Some(s.to_string());
            true
        }
        None => false,
    }
}

fn set_u16(slot: &mut Option<u16>, value: &Value) -> bool {
    match value.as_u64().and_then(|n| u16::try_from(n).ok()) {
        Some(n) => {
            *slot = Some(n);
            true
        }
        None => false,
    }
}

fn set_bool(slot: &mut Option<bool>, value: &Value) -> bool {
    match value.as_bool() {
        Some(b) => {
            *slot = Some(b);
            true
        }
        None => false,
    }
}

/// Fully resolved configuration handed to a [`ChromeRenderer`](crate::ui::ChromeRenderer)
#[derive(Debug, Clone)]
pub struct ChromeProps {
    pub open: bool,
    pub title: Option<String>,
    pub width: u16,
    pub height: u16,
    pub ok_text: String,
    pub cancel_text: String,
    pub footer: bool,
    pub closable: bool,
    pub keyboard: bool,
    pub confirm_loading: bool,
    pub danger: bool,
    /// Runs the caller's dismissal callback, then closes the overlay
    pub on_dismiss: Callback,
    pub on_ok: Option<Callback>,
}

impl ChromeProps {
    /// Resolve `config` into renderable props.
    ///
    /// `open` and `on_dismiss` are supplied by the boundary and always win
    /// over anything the configuration holds.
    pub fn resolve(config: ChromeConfig, open: bool, on_dismiss: Callback) -> Self {
        use crate::constants::{
            DEFAULT_CANCEL_TEXT, DEFAULT_OVERLAY_HEIGHT, DEFAULT_OVERLAY_WIDTH, DEFAULT_OK_TEXT,
        };

        Self {
            open,
            title: config.title,
            width: config.width.unwrap_or(DEFAULT_OVERLAY_WIDTH),
            height: config.height.unwrap_or(DEFAULT_OVERLAY_HEIGHT),
            ok_text: config.ok_text.unwrap_or_else(|| DEFAULT_OK_TEXT.to_string()),
            cancel_text: config.cancel_text.unwrap_or_else(|| DEFAULT_CANCEL_TEXT.to_string()),
            footer: config.footer.unwrap_or(true),
            closable: config.closable.unwrap_or(true),
            keyboard: config.keyboard.unwrap_or(true),
            confirm_loading: config.confirm_loading.unwrap_or(false),
            danger: config.danger.unwrap_or(false),
            on_dismiss,
            on_ok: config.on_ok,
        }
    }

    /// Whether Esc should dismiss the overlay
    pub fn can_dismiss_with_key(&self) -> bool {
        self.closable && self.keyboard
    }
}
