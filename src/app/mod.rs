//! Application module - TimelineApp and related functionality.
//!
//! This module organizes the main application logic into focused submodules:
//! - `events` - Keyboard, drag-and-drop and action dispatch
//! - `io` - Background imports and exports through save dialogs
//! - `run` - The eframe::App implementation

mod events;
mod io;
mod run;

pub use io::write_payload;

use crossbeam_channel::Receiver;
use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::config::{AppSettings, PathConfig};
use crate::core::{ReadCompleted, Session, ThreadReader};
use crate::dialogs::{Alert, ModalKind};
use crate::render::Rasterizer;
use crate::widgets::status::StatusBar;
use crate::widgets::timeline::TimelineView;

/// Main application state.
///
/// Only `settings` survives a restart; everything else is rebuilt empty.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineApp {
    pub settings: AppSettings,
    #[serde(skip)]
    pub session: Session,
    #[serde(skip)]
    pub view: TimelineView,
    #[serde(skip)]
    reader: ThreadReader,
    #[serde(skip)]
    read_rx: Receiver<ReadCompleted>,
    /// Created on first PNG export (font discovery is slow).
    #[serde(skip)]
    rasterizer: Option<Rasterizer>,
    #[serde(skip)]
    pub alert: Option<Alert>,
    #[serde(skip)]
    pub modal: Option<ModalKind>,
    #[serde(skip)]
    pub show_settings: bool,
    #[serde(skip)]
    pub status_bar: StatusBar,
    #[serde(skip)]
    pub path_config: PathConfig,
    /// A file is being dragged over the window.
    #[serde(skip)]
    file_hovering: bool,
}

impl Default for TimelineApp {
    fn default() -> Self {
        let settings = AppSettings::default();
        let (reader, read_rx) = ThreadReader::new();
        Self {
            session: Session::new(settings.zoom_state()),
            settings,
            view: TimelineView::default(),
            reader,
            read_rx,
            rasterizer: None,
            alert: None,
            modal: None,
            show_settings: false,
            status_bar: StatusBar::new(),
            path_config: PathConfig::from_env_and_cli(None),
            file_hovering: false,
        }
    }
}

impl TimelineApp {
    /// Finish construction once the egui context exists: background reads
    /// wake the UI, and zoom limits come from the persisted settings.
    pub fn attach(mut self, ctx: &egui::Context, path_config: PathConfig) -> Self {
        let (reader, read_rx) = ThreadReader::new();
        let repaint = ctx.clone();
        self.reader = reader.with_notify(move || repaint.request_repaint());
        self.read_rx = read_rx;
        self.session = Session::new(self.settings.zoom_state());
        self.path_config = path_config;
        self
    }

    /// Re-apply zoom limits after a settings change, keeping the current
    /// zoom where it still fits.
    fn apply_zoom_settings(&mut self) {
        let value = self.session.zoom.value;
        let mut zoom = self.settings.zoom_state();
        zoom.set(value);
        self.session.zoom = zoom;
    }
}
