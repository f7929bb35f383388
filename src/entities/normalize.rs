//! Data normalizer: raw decoded records + defaults -> canonical document.
//!
//! Merge precedence: a user value overrides the default, the default fills
//! gaps. Activities are grouped by the calendar date of their timestamp, so
//! duplicate day entries in the input collapse into one bucket. Days come out
//! ascending by date and activities ascending by timestamp (stable for equal
//! timestamps).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

use super::loader::{MetaOverrides, RawActivity, RawDay, RawDocument, StyleOverrides};
use super::model::{APP_VERSION, Activity, Day, Meta, StyleConfig, TimelineDocument};
use crate::error::{TimelineError, TimelineResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_EXPECTED: &str = "YYYY-MM-DD";
const TIMESTAMP_EXPECTED: &str = "HH:MM[:SS] or YYYY-MM-DD HH:MM[:SS]";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Defaults merged under user-supplied meta and style.
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    pub meta: Meta,
    pub style: StyleConfig,
}

/// File written by a different application version. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionAdvisory {
    pub app_version: String,
    pub file_version: String,
}

impl std::fmt::Display for VersionAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Possibly version mismatch: application v{} and file v{}",
            self.app_version, self.file_version
        )
    }
}

#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    pub document: TimelineDocument,
    pub advisory: Option<VersionAdvisory>,
}

impl MetaOverrides {
    pub fn merge_over(&self, defaults: &Meta) -> Meta {
        Meta {
            locale: pick(&self.locale, &defaults.locale),
            version: pick(&self.version, &defaults.version),
        }
    }
}

impl StyleOverrides {
    pub fn merge_over(&self, defaults: &StyleConfig) -> StyleConfig {
        StyleConfig {
            font_size: self.font_size.unwrap_or(defaults.font_size),
            line_thickness: self.line_thickness.unwrap_or(defaults.line_thickness),
            timeline_stroke_color: pick(&self.timeline_stroke_color, &defaults.timeline_stroke_color),
            stroke_color: pick(&self.stroke_color, &defaults.stroke_color),
            fill_color: pick(&self.fill_color, &defaults.fill_color),
            text_color: pick(&self.text_color, &defaults.text_color),
            background_color: pick(&self.background_color, &defaults.background_color),
        }
    }
}

fn pick(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Normalize a whole decoded file against `defaults`.
pub fn normalize_document(raw: &RawDocument, defaults: &Defaults) -> TimelineResult<NormalizeOutcome> {
    normalize(raw.meta.as_ref(), raw.style.as_ref(), &raw.days, defaults, APP_VERSION)
}

/// Merge, coerce, group and sort. Does not touch its inputs.
pub fn normalize(
    raw_meta: Option<&MetaOverrides>,
    raw_style: Option<&StyleOverrides>,
    raw_days: &[RawDay],
    defaults: &Defaults,
    app_version: &str,
) -> TimelineResult<NormalizeOutcome> {
    let meta = raw_meta.map_or_else(|| defaults.meta.clone(), |m| m.merge_over(&defaults.meta));
    let style = raw_style.map_or_else(|| defaults.style.clone(), |s| s.merge_over(&defaults.style));

    let mut buckets: BTreeMap<NaiveDate, Vec<Activity>> = BTreeMap::new();
    for raw_day in raw_days {
        let day_date = raw_day.date.as_deref().map(parse_date).transpose()?;
        // Dated days survive even without activities (date marker only).
        if let Some(date) = day_date {
            buckets.entry(date).or_default();
        }
        for raw in &raw_day.activities {
            let activity = coerce_activity(raw, day_date, &style)?;
            buckets.entry(activity.timestamp.date()).or_default().push(activity);
        }
    }

    let days: Vec<Day> = buckets
        .into_iter()
        .map(|(date, mut activities)| {
            activities.sort_by_key(|a| a.timestamp);
            Day { date, activities }
        })
        .collect();

    let advisory = (meta.version != app_version).then(|| VersionAdvisory {
        app_version: app_version.to_string(),
        file_version: meta.version.clone(),
    });

    debug!(
        "Normalized {} day(s), {} activities, locale={}",
        days.len(),
        days.iter().map(|d| d.activities.len()).sum::<usize>(),
        meta.locale
    );

    Ok(NormalizeOutcome {
        document: TimelineDocument { meta, style, days },
        advisory,
    })
}

fn coerce_activity(raw: &RawActivity, day: Option<NaiveDate>, style: &StyleConfig) -> TimelineResult<Activity> {
    let timestamp = parse_timestamp(&raw.timestamp, day)?;
    let text = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().to_string();
    Ok(Activity {
        timestamp,
        title: text(&raw.title),
        description: text(&raw.description),
        fill_color: pick(&raw.fill_color, &style.fill_color),
        stroke_color: pick(&raw.stroke_color, &style.stroke_color),
    })
}

pub fn parse_date(value: &str) -> TimelineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| TimelineError::MalformedDate {
        value: value.to_string(),
        expected: DATE_EXPECTED,
    })
}

/// Parse a full timestamp, or a bare time of day combined with `day`.
pub fn parse_timestamp(value: &str, day: Option<NaiveDate>) -> TimelineResult<NaiveDateTime> {
    let v = value.trim();
    let malformed = || TimelineError::MalformedDate {
        value: value.to_string(),
        expected: TIMESTAMP_EXPECTED,
    };

    if let Some(ts) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(v, f).ok())
    {
        return Ok(ts);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(v) {
        return Ok(ts.naive_local());
    }
    if let Ok(date) = NaiveDate::parse_from_str(v, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    let date = day.ok_or_else(malformed)?;
    TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(v, f).ok())
        .map(|t| date.and_time(t))
        .ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::loader::{FileFormat, decode};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn load(format: FileFormat, text: &str) -> TimelineResult<NormalizeOutcome> {
        normalize_document(&decode(format, text)?, &Defaults::default())
    }

    #[test]
    fn merges_user_style_over_defaults() {
        let overrides = StyleOverrides {
            font_size: Some(20.0),
            background_color: Some("#000000".into()),
            ..Default::default()
        };
        let style = overrides.merge_over(&StyleConfig::default());
        assert_eq!(style.font_size, 20.0);
        assert_eq!(style.background_color, "#000000");
        assert_eq!(style.fill_color, StyleConfig::default().fill_color);
        assert_eq!(style.line_thickness, 2.0);
    }

    #[test]
    fn sorts_days_and_activities() {
        let json = r#"{
            "days": [
                {"date": "2024-01-03", "activities": [
                    {"timestamp": "12:00:00", "title": "late"},
                    {"timestamp": "08:00", "title": "early"}
                ]},
                {"date": "2024-01-01", "activities": [{"timestamp": "10:00:00", "title": "first"}]}
            ]
        }"#;
        let doc = load(FileFormat::Json, json).unwrap().document;
        let dates: Vec<NaiveDate> = doc.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![ymd(2024, 1, 1), ymd(2024, 1, 3)]);
        let titles: Vec<&str> = doc.days[1].activities.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "late"]);

        for w in doc.days.windows(2) {
            assert!(w[0].date < w[1].date);
        }
        for day in &doc.days {
            for w in day.activities.windows(2) {
                assert!(w[0].timestamp < w[1].timestamp);
            }
        }
    }

    #[test]
    fn duplicate_day_entries_are_merged() {
        let json = r#"{"days": [
            {"date": "2024-05-01", "activities": [{"timestamp": "15:00:00", "title": "b"}]},
            {"date": "2024-05-01", "activities": [{"timestamp": "09:00:00", "title": "a"}]}
        ]}"#;
        let doc = load(FileFormat::Json, json).unwrap().document;
        assert_eq!(doc.days.len(), 1);
        assert_eq!(doc.days[0].activities.len(), 2);
        assert_eq!(doc.days[0].activities[0].title, "a");
    }

    #[test]
    fn empty_dated_day_is_kept() {
        let json = r#"{"days": [{"date": "2024-05-01", "activities": []}]}"#;
        let doc = load(FileFormat::Json, json).unwrap().document;
        assert_eq!(doc.days.len(), 1);
        assert!(doc.days[0].activities.is_empty());
    }

    #[test]
    fn csv_rows_group_by_date() {
        let text = "timestamp;title;description;fillColor;strokeColor\n\
                    2024-03-02 18:00:00;Dinner;;#f00;#000\n\
                    2024-03-01 09:00:00;Run;5k;;\n\
                    2024-03-02 07:30;Breakfast;;;\n";
        let doc = load(FileFormat::Csv, text).unwrap().document;
        assert_eq!(doc.days.len(), 2);
        assert_eq!(doc.days[0].date, ymd(2024, 3, 1));
        assert_eq!(doc.days[1].activities[0].title, "Breakfast");
        assert_eq!(doc.days[1].activities[1].fill_color, "#f00");
        // Missing colors come from the style.
        assert_eq!(doc.days[0].activities[0].fill_color, StyleConfig::default().fill_color);
    }

    #[test]
    fn csv_ghost_row_and_one_activity() {
        let text = "timestamp;title;description;fillColor;strokeColor\n;;;;;\n2024-01-01 10:00:00;A;B;#fff;#000\n";
        let doc = load(FileFormat::Csv, text).unwrap().document;
        assert_eq!(doc.activity_count(), 1);
    }

    #[test]
    fn bad_dates_are_malformed() {
        let json = r#"{"days": [{"date": "2024-02-30", "activities": []}]}"#;
        let err = load(FileFormat::Json, json).unwrap_err();
        assert!(matches!(err, TimelineError::MalformedDate { .. }));
        assert!(err.is_malformed_input());

        let csv = "a;b;c;d;e\nyesterday;x;;;\n";
        assert!(load(FileFormat::Csv, csv).unwrap_err().is_malformed_input());
    }

    #[test]
    fn bare_time_needs_a_day() {
        assert!(parse_timestamp("10:00", None).is_err());
        let ts = parse_timestamp("10:00", Some(ymd(2024, 1, 1))).unwrap();
        assert_eq!(ts, ymd(2024, 1, 1).and_hms_opt(10, 0, 0).unwrap());
        let full = parse_timestamp("2024-01-02T03:04:05", None).unwrap();
        assert_eq!(full, ymd(2024, 1, 2).and_hms_opt(3, 4, 5).unwrap());
    }

    #[test]
    fn version_mismatch_is_advisory_only() {
        let json = r#"{"meta": {"version": "0.0.1"}, "days": []}"#;
        let out = load(FileFormat::Json, json).unwrap();
        let advisory = out.advisory.unwrap();
        assert_eq!(advisory.file_version, "0.0.1");
        assert_eq!(advisory.app_version, APP_VERSION);

        let same = load(FileFormat::Json, r#"{"days": []}"#).unwrap();
        assert!(same.advisory.is_none());
        assert_eq!(same.document.meta.locale, "en-us");
    }

    #[test]
    fn input_is_not_mutated() {
        let raw = decode(
            FileFormat::Json,
            r#"{"days": [{"date": "2024-01-02", "activities": [{"timestamp": "09:00"}, {"timestamp": "08:00"}]}]}"#,
        )
        .unwrap();
        let before = raw.clone();
        normalize_document(&raw, &Defaults::default()).unwrap();
        assert_eq!(raw, before);
    }
}
