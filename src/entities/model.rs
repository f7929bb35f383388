//! Canonical timeline document.
//!
//! A `TimelineDocument` is what the normalizer produces and what the layout
//! engine and renderer consume. It is replaced wholesale on every successful
//! load and never partially mutated. Pixel positions are NOT stored here; they
//! live in the per-pass `MarkerCache` (see `core::layout`).

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Running application version, compared against `meta.version` on load.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub locale: String,
    pub version: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            locale: "en-us".to_string(),
            version: APP_VERSION.to_string(),
        }
    }
}

/// Visual style, every field overridable from the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub font_size: f32,
    pub line_thickness: f32,
    pub timeline_stroke_color: String,
    pub stroke_color: String,
    pub fill_color: String,
    pub text_color: String,
    pub background_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            line_thickness: 2.0,
            timeline_stroke_color: "#3B4352".to_string(),
            stroke_color: "#3B4352".to_string(),
            fill_color: "#BAC8D3".to_string(),
            text_color: "#3B4352".to_string(),
            background_color: "#FFFFFF".to_string(),
        }
    }
}

/// One plotted event.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub timestamp: NaiveDateTime,
    pub title: String,
    pub description: String,
    pub fill_color: String,
    pub stroke_color: String,
}

/// A calendar date and its activities (ascending by timestamp).
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
}

/// Position of an activity inside a document: `days[day].activities[index]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivityId {
    pub day: usize,
    pub index: usize,
}

/// Fully normalized timeline.
///
/// Invariants: `days` strictly ascending by date (one bucket per date);
/// activities within a day ascending by timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineDocument {
    pub meta: Meta,
    pub style: StyleConfig,
    pub days: Vec<Day>,
}

impl TimelineDocument {
    pub fn has_data(&self) -> bool {
        !self.days.is_empty()
    }

    pub fn activity(&self, id: ActivityId) -> Option<&Activity> {
        self.days.get(id.day)?.activities.get(id.index)
    }

    /// Largest number of activities in any single day.
    pub fn max_activities(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).max().unwrap_or(0)
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }

    /// All activities in (day, activity) order with their ids.
    pub fn iter_activities(&self) -> impl Iterator<Item = (ActivityId, &Activity)> {
        self.days.iter().enumerate().flat_map(|(day, d)| {
            d.activities
                .iter()
                .enumerate()
                .map(move |(index, a)| (ActivityId { day, index }, a))
        })
    }
}

/// Where the current document came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FileContext {
    pub name: String,
    pub extension: String,
    pub opened_at: DateTime<Local>,
}

impl FileContext {
    /// Split a file name into stem and lowercase extension.
    ///
    /// A name without a dot uses the whole name for both parts.
    pub fn from_file_name(file_name: &str) -> Self {
        let (name, extension) = match file_name.rfind('.') {
            Some(idx) if idx > 0 => (&file_name[..idx], &file_name[idx + 1..]),
            _ => (file_name, file_name),
        };
        Self {
            name: name.to_string(),
            extension: extension.to_lowercase(),
            opened_at: Local::now(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(ts: &str) -> Activity {
        Activity {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            title: "t".into(),
            description: String::new(),
            fill_color: "#fff".into(),
            stroke_color: "#000".into(),
        }
    }

    #[test]
    fn file_context_splits_extension() {
        let ctx = FileContext::from_file_name("Trip.2024.JSON");
        assert_eq!(ctx.name, "Trip.2024");
        assert_eq!(ctx.extension, "json");
        assert_eq!(ctx.file_name(), "Trip.2024.json");

        let bare = FileContext::from_file_name("README");
        assert_eq!(bare.name, "README");
        assert_eq!(bare.extension, "readme");
    }

    #[test]
    fn iterates_activities_in_day_order() {
        let doc = TimelineDocument {
            days: vec![
                Day {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    activities: vec![activity("2024-01-01 08:00:00")],
                },
                Day {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    activities: vec![activity("2024-01-02 08:00:00"), activity("2024-01-02 09:00:00")],
                },
            ],
            ..Default::default()
        };
        let ids: Vec<ActivityId> = doc.iter_activities().map(|(id, _)| id).collect();
        assert_eq!(
            ids,
            vec![
                ActivityId { day: 0, index: 0 },
                ActivityId { day: 1, index: 0 },
                ActivityId { day: 1, index: 1 },
            ]
        );
        assert_eq!(doc.max_activities(), 2);
        assert_eq!(doc.activity_count(), 3);
        assert!(doc.activity(ActivityId { day: 2, index: 0 }).is_none());
    }
}
