//! Timeline widget - the scrollable, zoomable activity canvas
//!
//! Day columns along a horizontal axis with activity markers on branches

mod timeline;
mod timeline_ui;

pub use timeline::TimelineView;
pub use timeline_ui::{paint_scene, render_timeline, to_color32};
