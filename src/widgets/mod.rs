//! UI Widgets - modular, reusable UI components
//!
//! Each widget is self-contained and reports what the user did through an
//! `ActionQueue`; the app dispatches.

pub mod actions;
pub mod file_dialogs;
pub mod landing;
pub mod menu;
pub mod status;
pub mod timeline;

pub use actions::ActionQueue;
