//! Preferences window

mod prefs;

pub use prefs::render_settings_window;
