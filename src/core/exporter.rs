//! Export sinks and payload naming.

use std::path::{Path, PathBuf};

use log::info;

use crate::entities::FileContext;
use crate::error::TimelineResult;

/// Base name used when nothing was imported from a named file.
pub const DEFAULT_EXPORT_NAME: &str = "activity-timeline";

/// A named blob ready to be written somewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportPayload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

pub trait Exporter {
    /// Write the payload; returns where it ended up.
    fn export(&self, payload: &ExportPayload) -> TimelineResult<PathBuf>;
}

/// Writes payloads into a fixed directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct DirExporter {
    dir: PathBuf,
}

impl DirExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Exporter for DirExporter {
    fn export(&self, payload: &ExportPayload) -> TimelineResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&payload.file_name);
        std::fs::write(&path, &payload.bytes)?;
        info!("Exported {} ({} bytes)", path.display(), payload.bytes.len());
        Ok(path)
    }
}

/// `<source name>.<ext>`, falling back to the default base name.
pub fn export_file_name(file: Option<&FileContext>, extension: &str) -> String {
    let base = file.map(|f| f.name.as_str()).filter(|n| !n.is_empty()).unwrap_or(DEFAULT_EXPORT_NAME);
    format!("{}.{}", base, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_source_file() {
        let ctx = FileContext::from_file_name("holiday.csv");
        assert_eq!(export_file_name(Some(&ctx), "png"), "holiday.png");
        assert_eq!(export_file_name(None, "json"), "activity-timeline.json");
    }

    #[test]
    fn dir_exporter_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DirExporter::new(dir.path().join("out"));
        let path = exporter.export(&ExportPayload::new("a.csv", b"x;y\n".to_vec())).unwrap();
        assert_eq!(path, dir.path().join("out").join("a.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), b"x;y\n");
    }
}
