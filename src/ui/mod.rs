//! UI module for overlay-store
//!
//! This module holds the presentation side of the store: chrome merging, the
//! overlay boundary, the Ratatui dialog chrome, and the demo application.

pub mod app_component;
pub mod boundary;
pub mod chrome;
pub mod core;
pub mod dialogs;
pub mod layout;
pub mod renderer;

pub use boundary::{ChromeRenderer, OverlayBoundary};
pub use chrome::{partition, Callback, ChromeConfig, ChromeKey, ChromeProps};
pub use dialogs::DialogChrome;
pub use layout::LayoutManager;
pub use renderer::run_app;
