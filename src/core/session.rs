//! Session: the single owner of timeline state.
//!
//! Holds the current document, zoom, file context and the marker cache of the
//! last layout pass. A successful load replaces the document wholesale and
//! resets zoom; a failed one leaves everything as it was.

use glam::Vec2;
use log::{error, info, warn};

use super::exporter::{ExportPayload, export_file_name};
use super::format::LocaleFormatter;
use super::layout::{self, Extent, MarkerCache, TimelineLayout};
use super::pick;
use super::reader::ReadCompleted;
use super::zoom::ZoomState;
use crate::entities::{
    self, ActivityId, Defaults, FileContext, FileFormat, LayoutConstants, TimelineDocument, VersionAdvisory,
    export,
};
use crate::error::TimelineResult;

#[derive(Debug, Clone)]
pub struct Session {
    pub document: TimelineDocument,
    pub zoom: ZoomState,
    pub file: Option<FileContext>,
    pub constants: LayoutConstants,
    markers: MarkerCache,
    formatter: LocaleFormatter,
    defaults: Defaults,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ZoomState::default())
    }
}

impl Session {
    pub fn new(zoom: ZoomState) -> Self {
        Self {
            document: TimelineDocument::default(),
            zoom,
            file: None,
            constants: LayoutConstants::default(),
            markers: MarkerCache::default(),
            formatter: LocaleFormatter::default(),
            defaults: Defaults::default(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.document.has_data()
    }

    pub fn formatter(&self) -> &LocaleFormatter {
        &self.formatter
    }

    pub fn markers(&self) -> &MarkerCache {
        &self.markers
    }

    /// Decode `text` using the extension of `file_name` and replace the
    /// document on success.
    pub fn load_text(&mut self, file_name: &str, text: &str) -> TimelineResult<Option<VersionAdvisory>> {
        let context = FileContext::from_file_name(file_name);
        let result = FileFormat::from_extension(&context.extension)
            .and_then(|format| entities::load_text(format, text, &self.defaults));

        match result {
            Ok(outcome) => {
                if let Some(advisory) = &outcome.advisory {
                    warn!("{}", advisory);
                }
                info!(
                    "Loaded {}: {} day(s), {} activities",
                    context.file_name(),
                    outcome.document.days.len(),
                    outcome.document.activity_count()
                );
                self.replace(outcome.document, Some(context));
                Ok(outcome.advisory)
            }
            Err(e) => {
                error!("Failed to load {}: {}", file_name, e);
                Err(e)
            }
        }
    }

    /// Apply a finished background read.
    pub fn apply(&mut self, completed: ReadCompleted) -> TimelineResult<Option<VersionAdvisory>> {
        let file_name = completed.file_name();
        match completed.result {
            Ok(text) => self.load_text(&file_name, &text),
            Err(e) => {
                error!("Failed to read {}: {}", completed.path.display(), e);
                Err(e)
            }
        }
    }

    pub fn replace(&mut self, document: TimelineDocument, file: Option<FileContext>) {
        self.formatter = LocaleFormatter::new(&document.meta.locale);
        self.document = document;
        self.file = file;
        self.markers = MarkerCache::default();
        self.zoom.reset();
    }

    pub fn clear(&mut self) {
        self.replace(TimelineDocument::default(), None);
    }

    pub fn extent(&self, viewport: Vec2, pixel_ratio: f32) -> Extent {
        layout::compute_extent(&self.document.days, self.zoom.value, &self.constants, viewport, pixel_ratio)
    }

    /// Full layout at the current zoom; refreshes the marker cache.
    pub fn layout(&mut self, viewport: Vec2, pixel_ratio: f32) -> TimelineLayout {
        let layout = self.layout_at(self.zoom.value, viewport, pixel_ratio);
        self.markers = layout.markers.clone();
        layout
    }

    /// Layout at an arbitrary zoom without touching the cache (exports).
    pub fn layout_at(&self, zoom: f32, viewport: Vec2, pixel_ratio: f32) -> TimelineLayout {
        let extent = layout::compute_extent(&self.document.days, zoom, &self.constants, viewport, pixel_ratio);
        layout::compute_layout(
            &self.document.days,
            &self.document.style,
            &self.constants,
            extent,
            zoom,
            pixel_ratio,
        )
    }

    /// Activity under `pointer`, using the last layout pass.
    pub fn hit_test(&self, pointer: Vec2, origin: Vec2, pixel_ratio: f32) -> Option<ActivityId> {
        pick::hit_test(
            pointer,
            origin,
            self.zoom.value,
            pixel_ratio,
            &self.markers,
            self.constants.radius,
        )
    }

    /// Re-serialize the document as JSON or delimited text.
    pub fn export_data(&self, format: FileFormat) -> TimelineResult<ExportPayload> {
        let text = export::encode(format, &self.document)?;
        Ok(ExportPayload::new(
            export_file_name(self.file.as_ref(), format.extension()),
            text.into_bytes(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reader::ReadCompleted;
    use std::path::PathBuf;

    const TWO_DAYS: &str = r#"{
        "days": [
            {"date": "2024-01-01", "activities": [{"timestamp": "10:00:00", "title": "A"}]},
            {"date": "2024-01-02", "activities": [
                {"timestamp": "09:00:00", "title": "B"},
                {"timestamp": "10:00:00", "title": "C"},
                {"timestamp": "11:00:00", "title": "D"}
            ]}
        ]
    }"#;

    #[test]
    fn load_replaces_and_resets_zoom() {
        let mut s = Session::default();
        s.zoom.zoom_at(Vec2::ZERO, 1.0, Vec2::ZERO);
        assert!(s.zoom.value > 1.0);
        let advisory = s.load_text("two.json", TWO_DAYS).unwrap();
        assert!(advisory.is_none());
        assert!(s.has_data());
        assert_eq!(s.zoom.value, 1.0);
        assert_eq!(s.file.as_ref().unwrap().name, "two");
        assert_eq!(s.document.days[1].activities.len(), 3);
    }

    #[test]
    fn version_mismatch_still_loads() {
        let mut s = Session::default();
        let text = r#"{"meta": {"version": "0.0.1"}, "days": [{"date": "2024-01-01", "activities": [{"timestamp": "10:00", "title": "A"}]}]}"#;
        let advisory = s.load_text("old.json", text).unwrap().unwrap();
        assert_eq!(advisory.file_version, "0.0.1");
        assert!(s.has_data());
    }

    #[test]
    fn failed_load_keeps_previous_document() {
        let mut s = Session::default();
        s.load_text("two.json", TWO_DAYS).unwrap();
        let before = s.document.clone();

        let err = s.load_text("bad.json", r#"{"days": [],}"#).unwrap_err();
        assert!(err.is_malformed_input());
        assert_eq!(s.document, before);
        assert_eq!(s.file.as_ref().unwrap().name, "two");

        let err = s.load_text("notes.txt", "hello").unwrap_err();
        assert!(matches!(err, crate::error::TimelineError::UnsupportedFileType { .. }));
        assert_eq!(s.document, before);
    }

    #[test]
    fn layout_feeds_hit_test() {
        let mut s = Session::default();
        s.load_text("two.json", TWO_DAYS).unwrap();
        assert!(s.markers().is_empty());
        let layout = s.layout(Vec2::new(800.0, 600.0), 1.0);
        assert_eq!(s.markers().len(), 4);

        let target = layout.days[1].markers[1].center;
        let origin = Vec2::new(30.0, 40.0);
        assert_eq!(
            s.hit_test(origin + target, origin, 1.0),
            Some(ActivityId { day: 1, index: 1 })
        );
        assert_eq!(s.hit_test(origin, origin, 1.0), None);
    }

    #[test]
    fn apply_reports_read_errors() {
        let mut s = Session::default();
        let completed = ReadCompleted {
            path: PathBuf::from("/x/gone.json"),
            result: Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into()),
        };
        assert!(s.apply(completed).is_err());
        assert!(!s.has_data());
    }

    #[test]
    fn export_uses_source_name() {
        let mut s = Session::default();
        s.load_text("Trip.csv", "timestamp;title;description;fillColor;strokeColor\n2024-05-01 08:00;Go;;;\n")
            .unwrap();
        let payload = s.export_data(FileFormat::Json).unwrap();
        assert_eq!(payload.file_name, "Trip.json");
        let text = String::from_utf8(payload.bytes).unwrap();
        assert!(text.contains("\"2024-05-01\""));
    }
}
