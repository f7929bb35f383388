//! Re-serialization of a normalized document to the two input formats.
//!
//! Output is accepted by `loader::decode`, so load -> export -> load yields the
//! same document. Derived pixel positions never reach the output.

use serde::Serialize;

use super::loader::{CSV_COLUMNS, CSV_DELIMITER, FileFormat};
use super::model::{Meta, StyleConfig, TimelineDocument};
use crate::error::{TimelineError, TimelineResult};

const JSON_DATE: &str = "%Y-%m-%d";
const JSON_TIME: &str = "%H:%M:%S";
const CSV_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct JsonDocument<'a> {
    meta: &'a Meta,
    style: &'a StyleConfig,
    days: Vec<JsonDay<'a>>,
}

#[derive(Serialize)]
struct JsonDay<'a> {
    date: String,
    activities: Vec<JsonActivity<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonActivity<'a> {
    timestamp: String,
    title: &'a str,
    description: &'a str,
    fill_color: &'a str,
    stroke_color: &'a str,
}

#[derive(Serialize)]
struct HeaderBlob<'a> {
    meta: &'a Meta,
    style: &'a StyleConfig,
}

pub fn encode(format: FileFormat, doc: &TimelineDocument) -> TimelineResult<String> {
    match format {
        FileFormat::Json => to_json(doc),
        FileFormat::Csv => to_csv(doc),
    }
}

pub fn to_json(doc: &TimelineDocument) -> TimelineResult<String> {
    let out = JsonDocument {
        meta: &doc.meta,
        style: &doc.style,
        days: doc
            .days
            .iter()
            .map(|day| JsonDay {
                date: day.date.format(JSON_DATE).to_string(),
                activities: day
                    .activities
                    .iter()
                    .map(|a| JsonActivity {
                        timestamp: a.timestamp.format(JSON_TIME).to_string(),
                        title: &a.title,
                        description: &a.description,
                        fill_color: &a.fill_color,
                        stroke_color: &a.stroke_color,
                    })
                    .collect(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&out).map_err(|e| TimelineError::Export(e.to_string()))
}

fn csv_export_error(e: impl std::fmt::Display) -> TimelineError {
    TimelineError::Export(e.to_string())
}

/// Header row (with the meta/style blob as sixth cell) plus one row per
/// activity. Cells are quoted only where needed; line breaks survive.
pub fn to_csv(doc: &TimelineDocument) -> TimelineResult<String> {
    let blob = serde_json::to_string(&HeaderBlob {
        meta: &doc.meta,
        style: &doc.style,
    })
    .map_err(csv_export_error)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header: Vec<&str> = CSV_COLUMNS.to_vec();
    header.push(&blob);
    writer.write_record(&header).map_err(csv_export_error)?;

    for (_, a) in doc.iter_activities() {
        let timestamp = a.timestamp.format(CSV_TIMESTAMP).to_string();
        writer
            .write_record([
                timestamp.as_str(),
                a.title.as_str(),
                a.description.as_str(),
                a.fill_color.as_str(),
                a.stroke_color.as_str(),
            ])
            .map_err(csv_export_error)?;
    }

    let bytes = writer.into_inner().map_err(csv_export_error)?;
    String::from_utf8(bytes).map_err(csv_export_error)
}
