//! Activity timeline viewer library
//!
//! Re-exports all modules for use by binary targets.

// Core engine (layout, zoom, picking, session, background IO)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod dialogs;
pub mod entities;
pub mod error;
pub mod render;
pub mod widgets;

// Re-export commonly used types
pub use app::TimelineApp;
pub use core::{Action, Session, ZoomState};
pub use entities::{FileFormat, TimelineDocument};
pub use error::{TimelineError, TimelineResult};
