//! Rendering: display list plus the CPU raster backend used for PNG export.
//!
//! The interactive backend paints the same `Scene` through egui (see
//! `widgets::timeline`).

pub mod raster;
pub mod scene;

pub use raster::{MAX_EXPORT_SIDE, Rasterizer, encode_png};
pub use scene::{Scene, Shape, TextAnchor, build_scene};

use chrono::{Local, NaiveDate};
use glam::Vec2;
use log::info;

use crate::core::exporter::{ExportPayload, export_file_name};
use crate::core::session::Session;
use crate::error::TimelineResult;

/// Scene for the whole canvas at the session's zoom and `pixel_ratio`.
pub fn session_scene(session: &Session, viewport: Vec2, pixel_ratio: f32, today: NaiveDate) -> Scene {
    let layout = session.layout_at(session.zoom.value, viewport, pixel_ratio);
    build_scene(
        &session.document,
        &layout,
        session.constants.radius,
        session.constants.branch_dash,
        session.formatter(),
        today,
    )
}

/// Render the whole canvas to PNG bytes named after the source file.
pub fn export_png(
    session: &Session,
    rasterizer: &mut Rasterizer,
    viewport: Vec2,
    pixel_ratio: f32,
) -> TimelineResult<ExportPayload> {
    let scene = session_scene(session, viewport, pixel_ratio, Local::now().date_naive());
    let img = rasterizer.render(&scene)?;
    info!("PNG export: {}x{} at zoom {:.2}", img.width(), img.height(), session.zoom.value);
    Ok(ExportPayload::new(
        export_file_name(session.file.as_ref(), "png"),
        encode_png(&img)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_covers_computed_extent() {
        let mut s = Session::default();
        s.load_text(
            "walks.json",
            r#"{"days": [
                {"date": "2024-01-01", "activities": [{"timestamp": "10:00", "title": "A"}, {"timestamp": "11:00", "title": "B"}]},
                {"date": "2024-01-03", "activities": [{"timestamp": "12:00", "title": "C"}]}
            ]}"#,
        )
        .unwrap();
        let viewport = Vec2::new(200.0, 100.0);
        let extent = s.extent(viewport, 2.0);

        let payload = export_png(&s, &mut Rasterizer::new(), viewport, 2.0).unwrap();
        assert_eq!(payload.file_name, "walks.png");

        let img = image::load_from_memory(&payload.bytes).unwrap();
        assert_eq!(img.width(), extent.width.ceil() as u32);
        assert_eq!(img.height(), extent.height.ceil() as u32);
        assert_eq!(img.width(), 2 * (150 + 300));
        assert_eq!(img.height(), 2 * (80 + 320));
    }

    #[test]
    fn oversized_export_fails_without_allocating() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let days: Vec<String> = (0..400)
            .map(|i| {
                let date = start + chrono::Days::new(i);
                format!(r#"{{"date": "{}", "activities": [{{"timestamp": "10:00", "title": "A"}}]}}"#, date)
            })
            .collect();
        let mut s = Session::default();
        s.load_text("year.json", &format!(r#"{{"days": [{}]}}"#, days.join(",")))
            .unwrap();
        s.zoom.set(2.5);

        let err = export_png(&s, &mut Rasterizer::new(), Vec2::new(800.0, 600.0), 4.0).unwrap_err();
        assert!(matches!(err, crate::error::TimelineError::Export(_)));
        assert!(err.to_string().contains("over the limit"));
    }
}
