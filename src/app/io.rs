//! Import and export - file dialogs, background reads, export sinks.

use std::path::{Path, PathBuf};

use eframe::egui;
use log::{debug, error, info, warn};

use super::TimelineApp;
use crate::config;
use crate::core::{Align, DirExporter, ExportPayload, Exporter, FileReader, ReadCompleted};
use crate::dialogs::Alert;
use crate::entities::{FileFormat, VersionAdvisory};
use crate::error::{TimelineError, TimelineResult};
use crate::render;
use crate::widgets::file_dialogs::{create_data_dialog, create_save_dialog};

/// Which export the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ExportKind {
    Png,
    Data(FileFormat),
}

impl TimelineApp {
    /// Ask for a file and read it in the background.
    pub(super) fn import_dialog(&mut self, ctx: &egui::Context) {
        match create_data_dialog("Upload timeline data").pick_file() {
            Some(path) => self.open_path(ctx, path),
            None => debug!("Import cancelled"),
        }
    }

    /// Start a background read; the result lands in `poll_reads`.
    pub fn open_path(&mut self, ctx: &egui::Context, path: PathBuf) {
        info!("Reading {}", path.display());
        self.status_bar
            .set_message(ctx, format!("Loading {}...", path.display()));
        self.reader.read(path);
    }

    /// Apply every read that finished since the last frame.
    pub(super) fn poll_reads(&mut self, ctx: &egui::Context) {
        let completed: Vec<ReadCompleted> = self.read_rx.try_iter().collect();
        for done in completed {
            let name = done.file_name();
            let result = self.session.apply(done);
            self.finish_load(ctx, &name, result);
        }
    }

    /// Load dropped bytes directly (no path on some platforms).
    pub(super) fn load_bytes(&mut self, ctx: &egui::Context, name: &str, bytes: &[u8]) {
        let result = match std::str::from_utf8(bytes) {
            Ok(text) => self.session.load_text(name, text),
            Err(e) => Err(TimelineError::malformed("text", e.to_string())),
        };
        self.finish_load(ctx, name, result);
    }

    fn finish_load(&mut self, ctx: &egui::Context, name: &str, result: TimelineResult<Option<VersionAdvisory>>) {
        match result {
            Ok(advisory) => {
                self.view.reset();
                self.view.align_after_layout(Align::End);
                self.modal = None;
                self.status_bar.set_message(ctx, format!("Loaded {}", name));
                if let Some(advisory) = advisory {
                    self.alert = Some(Alert::version_mismatch(&advisory));
                }
            }
            Err(e) => {
                self.status_bar.set_message(ctx, format!("Failed to load {}", name));
                self.alert = Some(Alert::from_error(&e));
            }
        }
    }

    fn build_payload(&mut self, kind: ExportKind) -> TimelineResult<ExportPayload> {
        match kind {
            ExportKind::Png => {
                let rasterizer = self.rasterizer.get_or_insert_with(render::Rasterizer::new);
                render::export_png(
                    &self.session,
                    rasterizer,
                    self.view.viewport,
                    self.settings.export_pixel_ratio(),
                )
            }
            ExportKind::Data(format) => self.session.export_data(format),
        }
    }

    /// Render or serialize, ask where to put it, write it.
    pub(super) fn export(&mut self, ctx: &egui::Context, kind: ExportKind) {
        if !self.session.has_data() {
            warn!("Nothing to export");
            return;
        }
        let payload = match self.build_payload(kind) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Export failed: {}", e);
                self.alert = Some(Alert::from_error(&e));
                return;
            }
        };

        let start_dir = self
            .settings
            .last_export_dir
            .clone()
            .unwrap_or_else(|| config::export_dir(&self.path_config));
        let Some(target) = create_save_dialog(&payload.file_name, Some(start_dir.as_path())).save_file() else {
            debug!("Export cancelled");
            return;
        };

        match write_payload(payload, &target) {
            Ok(path) => {
                if let Some(dir) = path.parent() {
                    self.settings.last_export_dir = Some(dir.to_path_buf());
                }
                self.status_bar
                    .set_message(ctx, format!("Exported {}", path.display()));
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.alert = Some(Alert::from_error(&e));
            }
        }
    }
}

/// Write `payload` to exactly `target` (dialogs pick the full path).
pub fn write_payload(mut payload: ExportPayload, target: &Path) -> TimelineResult<PathBuf> {
    if let Some(name) = target.file_name() {
        payload.file_name = name.to_string_lossy().into_owned();
    }
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    DirExporter::new(dir).export(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_takes_target_name() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested").join("chosen.png");
        let payload = ExportPayload::new("walks.png", vec![1, 2, 3]);

        let written = write_payload(payload, &target).unwrap();
        assert_eq!(written, target);
        assert_eq!(std::fs::read(&target).unwrap(), vec![1, 2, 3]);
    }
}
