//! overlay-store - keyed overlay/modal state for terminal UIs
//!
//! This library lets distant parts of a UI declare, open, close and
//! parameterize named overlays (dialogs, drawers, confirmations) through one
//! shared store, re-rendering only the overlay whose state changed. It ships
//! a presentation layer for Ratatui and a small demo application.
//!
//! # Modules
//!
//! * [`store`] - The overlay registry, binding adapter, control handle and configuration reader
//! * [`ui`] - Chrome merging, the presentation boundary and the demo application
//! * [`config`] - Application configuration management
//! * [`logger`] - Logging setup and in-memory log buffer
//! * [`error`] - Error types

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Error types for the overlay store
pub mod error;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Keyed overlay state store
pub mod store;

/// Terminal user interface components and rendering
pub mod ui;

pub use error::OverlayError;
pub use store::{
    use_overlay_config, use_overlay_payload, Entry, EntryBinding, ExternalStore, ModalHandle, OverlayStore, Payload,
    Subscription,
};
pub use ui::{ChromeConfig, ChromeProps, ChromeRenderer, OverlayBoundary};
