//! Core engine modules - layout, zoom, picking, session, background IO
//!
//! These modules hold the timeline behavior, independent of UI.

pub mod actions;
pub mod exporter;
pub mod format;
pub mod info;
pub mod layout;
pub mod pick;
pub mod reader;
pub mod session;
pub mod zoom;

// Re-exports for convenience
pub use actions::{Action, resolve_shortcut};
pub use exporter::{DirExporter, ExportPayload, Exporter};
pub use format::{DateFormatter, LocaleFormatter};
pub use info::TimelineInfo;
pub use layout::{Align, Extent, MarkerCache, TimelineLayout};
pub use reader::{FileReader, ReadCompleted, ThreadReader};
pub use session::Session;
pub use zoom::{ZoomOutcome, ZoomState};
