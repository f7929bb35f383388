//! Summary statistics shown in the "Current Timeline" modal.

use chrono::NaiveDate;

use crate::entities::{FileContext, TimelineDocument};

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineInfo {
    /// `name.ext` of the source file, when known.
    pub file_name: Option<String>,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Calendar days from first to last date, both included.
    pub period_days: i64,
    pub active_days: usize,
    /// `active_days / period_days * 100`.
    pub active_percent: f64,
    pub most_activities: usize,
    pub least_activities: usize,
}

impl TimelineInfo {
    /// `None` for an empty document.
    pub fn compute(doc: &TimelineDocument, file: Option<&FileContext>) -> Option<Self> {
        let first = doc.days.first()?;
        let last = doc.days.last()?;
        let period_days = (last.date - first.date).num_days() + 1;
        let counts = doc.days.iter().map(|d| d.activities.len());

        Some(Self {
            file_name: file.map(FileContext::file_name),
            first_date: first.date,
            last_date: last.date,
            period_days,
            active_days: doc.days.len(),
            active_percent: doc.days.len() as f64 / period_days as f64 * 100.0,
            most_activities: counts.clone().max().unwrap_or(0),
            least_activities: counts.min().unwrap_or(0),
        })
    }
}
