//! Dialogs: blocking alerts, detail modals and the settings window.

pub mod modal;
pub mod prefs;

pub use modal::{Alert, ModalKind, render_alert, render_modal};
pub use prefs::render_settings_window;
