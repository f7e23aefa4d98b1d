//! Constants used throughout the application
//!
//! This module centralizes overlay identifiers, default chrome values and UI
//! text for the demo application.

// Chrome defaults
pub const DEFAULT_OVERLAY_WIDTH: u16 = 60;
pub const DEFAULT_OVERLAY_HEIGHT: u16 = 12;
pub const DEFAULT_OK_TEXT: &str = "OK";
pub const DEFAULT_CANCEL_TEXT: &str = "Cancel";
pub const CONFIRM_LOADING_TEXT: &str = "Working...";

// Chrome limits
pub const OVERLAY_MIN_WIDTH: u16 = 10;
pub const OVERLAY_MAX_WIDTH: u16 = 100;
pub const OVERLAY_MIN_HEIGHT: u16 = 3;

// Demo overlay identifiers ({entity}-{action})
pub const OVERLAY_USER_EDIT: &str = "user-edit";
pub const OVERLAY_USER_DELETE: &str = "user-delete";
pub const OVERLAY_HELP: &str = "app-help";
pub const OVERLAY_LOGS: &str = "app-logs";

// Demo text
pub const APP_TITLE: &str = " Users ";
pub const STATUS_HINT: &str = "j/k move • e edit • d delete • ? help • L logs • q quit";
pub const SUCCESS_USER_SAVED: &str = "✅ User saved";
pub const SUCCESS_USER_DELETED: &str = "✅ User deleted";

// Config
pub const CONFIG_FILE_NAME: &str = "overlay-store.toml";
pub const CONFIG_DIR_NAME: &str = "overlay-store";
pub const CONFIG_GENERATED: &str = "Generated default configuration";
pub const LOG_FILE_NAME: &str = "overlay-store.log";
pub const TICK_RATE_MIN_MS: u64 = 10;
pub const TICK_RATE_MAX_MS: u64 = 1000;

/// Simulated latency of the demo's background save
pub const DEMO_SAVE_DELAY_MS: u64 = 600;
