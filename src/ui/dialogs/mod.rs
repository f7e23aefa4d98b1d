//! Overlay chrome renderers

pub mod common;
mod dialog_chrome;

pub use dialog_chrome::DialogChrome;
