//! Entities module - timeline data model and its file formats.
//!
//! - `model` - canonical document (meta, style, days, activities)
//! - `constants` - fixed layout geometry
//! - `color` - CSS color strings
//! - `loader` / `export` - JSON and delimited-text decode/encode
//! - `normalize` - merge with defaults, coerce dates, group and sort

pub mod color;
pub mod constants;
pub mod export;
pub mod loader;
pub mod model;
pub mod normalize;

pub use color::Rgba;
pub use constants::LayoutConstants;
pub use loader::{FileFormat, RawDocument};
pub use model::{APP_VERSION, Activity, ActivityId, Day, FileContext, Meta, StyleConfig, TimelineDocument};
pub use normalize::{Defaults, NormalizeOutcome, VersionAdvisory};

use crate::error::TimelineResult;

/// Decode and normalize file content in one step.
pub fn load_text(format: FileFormat, text: &str, defaults: &Defaults) -> TimelineResult<NormalizeOutcome> {
    let raw = loader::decode(format, text)?;
    normalize::normalize_document(&raw, defaults)
}
