//! File decoding: JSON and `;`-delimited text into raw, un-normalized records.
//!
//! Decoders only check syntax and shape. Dates stay textual here; coercion,
//! grouping, merging with defaults and sorting happen in `normalize`.

use std::path::Path;

use log::{debug, trace};
use serde::Deserialize;

use crate::error::{TimelineError, TimelineResult};

/// Supported input/output data formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    pub fn from_extension(extension: &str) -> TimelineResult<Self> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(TimelineError::UnsupportedFileType {
                extension: other.to_string(),
            }),
        }
    }

    pub fn from_path(path: &Path) -> TimelineResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
        }
    }

    /// Extensions accepted by the import dialog.
    pub const ALL_EXTS: &'static [&'static str] = &["json", "csv"];
}

/// User-supplied meta keys; `None` means "use default".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetaOverrides {
    pub locale: Option<String>,
    pub version: Option<String>,
}

/// User-supplied style keys; `None` means "use default".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverrides {
    pub font_size: Option<f32>,
    pub line_thickness: Option<f32>,
    pub timeline_stroke_color: Option<String>,
    pub stroke_color: Option<String>,
    pub fill_color: Option<String>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    /// `HH:MM[:SS]` inside a dated day, or a full `YYYY-MM-DD HH:MM[:SS]`.
    pub timestamp: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub fill_color: Option<String>,
    pub stroke_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDay {
    /// Absent for delimited text, where rows carry full timestamps.
    pub date: Option<String>,
    #[serde(default)]
    pub activities: Vec<RawActivity>,
}

/// Decoded file content before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub meta: Option<MetaOverrides>,
    #[serde(default)]
    pub style: Option<StyleOverrides>,
    #[serde(default)]
    pub days: Vec<RawDay>,
}

/// Decode `text` in the given format.
pub fn decode(format: FileFormat, text: &str) -> TimelineResult<RawDocument> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(TimelineError::malformed(format.label(), "file is empty"));
    }
    match format {
        FileFormat::Json => decode_json(text),
        FileFormat::Csv => decode_csv(text),
    }
}

pub fn decode_json(text: &str) -> TimelineResult<RawDocument> {
    let raw: RawDocument =
        serde_json::from_str(text).map_err(|e| TimelineError::malformed("JSON", e.to_string()))?;
    debug!("Decoded JSON: {} day record(s)", raw.days.len());
    Ok(raw)
}

/// Header cell names, in the fixed column order.
pub const CSV_COLUMNS: [&str; 5] = ["timestamp", "title", "description", "fillColor", "strokeColor"];
pub const CSV_DELIMITER: u8 = b';';

/// Optional JSON blob carried in the sixth header cell.
#[derive(Debug, Default, Deserialize)]
struct CsvHeaderBlob {
    meta: Option<MetaOverrides>,
    style: Option<StyleOverrides>,
}

fn csv_error(e: csv::Error) -> TimelineError {
    TimelineError::malformed("CSV", e.to_string())
}

/// Decode `;`-delimited text. Rows may have any number of cells; only the
/// first five carry data, extra trailing cells are ignored.
pub fn decode_csv(text: &str) -> TimelineResult<RawDocument> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    // Column names in the user's file are ignored; position decides meaning.
    let header = records
        .next()
        .ok_or_else(|| TimelineError::malformed("CSV", "missing header row"))?
        .map_err(csv_error)?;
    let mut raw = RawDocument::default();
    if let Some(blob) = header.get(CSV_COLUMNS.len()).filter(|c| !c.is_empty()) {
        let parsed: CsvHeaderBlob = serde_json::from_str(blob)
            .map_err(|e| TimelineError::malformed("CSV", format!("header JSON: {}", e)))?;
        raw.meta = parsed.meta;
        raw.style = parsed.style;
    }

    let mut activities = Vec::new();
    for record in records {
        let record = record.map_err(csv_error)?;
        if is_ghost_row(&record) {
            trace!("Skipping ghost row at line {}", record.position().map_or(0, |p| p.line()));
            continue;
        }
        let cell = |i: usize| record.get(i).map(str::to_string);
        activities.push(RawActivity {
            timestamp: cell(0).unwrap_or_default(),
            title: cell(1),
            description: cell(2),
            fill_color: cell(3).filter(|c| !c.is_empty()),
            stroke_color: cell(4).filter(|c| !c.is_empty()),
        });
    }

    debug!("Decoded CSV: {} row(s)", activities.len());
    raw.days.push(RawDay { date: None, activities });
    Ok(raw)
}

/// A row whose cells are all empty (`;;;;;`, `""`, whitespace).
fn is_ghost_row(record: &csv::StringRecord) -> bool {
    record.iter().all(|c| c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_dispatch() {
        assert_eq!(FileFormat::from_extension("JSON").unwrap(), FileFormat::Json);
        assert_eq!(FileFormat::from_extension(".csv").unwrap(), FileFormat::Csv);
        let err = FileFormat::from_extension("xlsx").unwrap_err();
        assert!(matches!(err, TimelineError::UnsupportedFileType { ref extension } if extension == "xlsx"));
        assert_eq!(FileFormat::from_path(Path::new("/tmp/a.b.json")).unwrap(), FileFormat::Json);
    }

    #[test]
    fn json_missing_sections_are_none() {
        let raw = decode(FileFormat::Json, r#"{"days": [], "extra": 1}"#).unwrap();
        assert!(raw.meta.is_none());
        assert!(raw.style.is_none());
        assert!(raw.days.is_empty());
    }

    #[test]
    fn json_trailing_comma_is_malformed() {
        let err = decode(FileFormat::Json, r#"{"days": [],}"#).unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn empty_file_is_malformed() {
        assert!(decode(FileFormat::Json, "  \n").unwrap_err().is_malformed_input());
        assert!(decode(FileFormat::Csv, "").unwrap_err().is_malformed_input());
    }

    #[test]
    fn csv_ghost_rows_are_dropped() {
        let text = "timestamp;title;description;fillColor;strokeColor\n\
                    ;;;;;\n\
                    2024-01-01 10:00:00;Coffee;Morning;#fff;#000\n";
        let raw = decode(FileFormat::Csv, text).unwrap();
        assert_eq!(raw.days.len(), 1);
        let acts = &raw.days[0].activities;
        assert_eq!(acts.len(), 1);
        assert_eq!(acts[0].timestamp, "2024-01-01 10:00:00");
        assert_eq!(acts[0].title.as_deref(), Some("Coffee"));
        assert_eq!(acts[0].stroke_color.as_deref(), Some("#000"));
    }

    #[test]
    fn csv_header_blob_carries_meta_and_style() {
        let text = "time;what;desc;fill;stroke;{\"meta\":{\"locale\":\"sv-se\"},\"style\":{\"fontSize\":18}}\n\
                    2024-02-01 09:30;A;;;\n";
        let raw = decode(FileFormat::Csv, text).unwrap();
        assert_eq!(raw.meta.unwrap().locale.as_deref(), Some("sv-se"));
        assert_eq!(raw.style.unwrap().font_size, Some(18.0));
        let act = &raw.days[0].activities[0];
        assert_eq!(act.fill_color, None);
        assert_eq!(act.description.as_deref(), Some(""));
    }

    #[test]
    fn csv_bad_header_blob_is_malformed() {
        let text = "a;b;c;d;e;{not json}\n2024-01-01 10:00;x;y;z;w\n";
        assert!(decode(FileFormat::Csv, text).unwrap_err().is_malformed_input());
    }

    #[test]
    fn csv_trailing_sixth_cell_is_ignored() {
        let text = "timestamp;title;description;fillColor;strokeColor;{}\n\
                    2024-01-01 10:00:00;A;B;#fff;#000;\n\
                    2024-01-01 11:00:00;C;D;#fff;#111;leftover\n";
        let raw = decode(FileFormat::Csv, text).unwrap();
        let acts = &raw.days[0].activities;
        assert_eq!(acts.len(), 2);
        assert_eq!(acts[0].stroke_color.as_deref(), Some("#000"));
        assert_eq!(acts[1].stroke_color.as_deref(), Some("#111"));
    }

    #[test]
    fn csv_quoted_cells_keep_newlines_and_delimiters() {
        let text = "timestamp;title;description;fillColor;strokeColor\n\
                    2024-01-01 10:00:00;\"Lunch; late\";\"line one\nline two\";#fff;#000\n\
                    2024-01-01 12:00:00;\"say \"\"hi\"\"\";;#fff;#000\n";
        let raw = decode(FileFormat::Csv, text).unwrap();
        let acts = &raw.days[0].activities;
        assert_eq!(acts.len(), 2);
        assert_eq!(acts[0].title.as_deref(), Some("Lunch; late"));
        assert_eq!(acts[0].description.as_deref(), Some("line one\nline two"));
        assert_eq!(acts[0].fill_color.as_deref(), Some("#fff"));
        assert_eq!(acts[1].title.as_deref(), Some("say \"hi\""));
    }

    #[test]
    fn csv_short_rows_leave_missing_cells_empty() {
        let text = "timestamp;title;description;fillColor;strokeColor\n2024-01-01 10:00:00;Only title\n";
        let raw = decode(FileFormat::Csv, text).unwrap();
        let act = &raw.days[0].activities[0];
        assert_eq!(act.title.as_deref(), Some("Only title"));
        assert_eq!(act.description, None);
        assert_eq!(act.stroke_color, None);
    }
}
