//! Core UI functionality for the demo application.
//!
//! # Module Components
//!
//! - [`actions`] - Action definitions and the demo's record types
//! - [`component`] - Base component trait and rendering abstractions
//! - [`event_handler`] - Terminal event polling with a fixed tick
//! - [`task_manager`] - Background task management for async operations
//!
//! Background tasks report back through actions; only the UI thread reads
//! or writes the overlay store.

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, Role, User};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};
