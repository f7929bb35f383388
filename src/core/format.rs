//! Locale-aware date/time text for labels, tooltips and the info modal.

use chrono::{Locale, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use log::warn;

/// Turns dates and timestamps into display text.
pub trait DateFormatter {
    /// Short numeric date, e.g. `01/02/2024` for en-us.
    fn date(&self, date: NaiveDate) -> String;
    /// Full weekday name as the locale writes it (may be lowercase).
    fn weekday(&self, date: NaiveDate) -> String;
    fn time(&self, timestamp: NaiveDateTime) -> String;
    fn date_time(&self, timestamp: NaiveDateTime) -> String;
}

/// `DateFormatter` over chrono's localized formatting.
#[derive(Debug, Clone, Copy)]
pub struct LocaleFormatter {
    locale: Locale,
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self { locale: Locale::en_US }
    }
}

impl LocaleFormatter {
    /// Build from a BCP-47 style tag (`en-us`, `sv-SE`, `de`).
    ///
    /// Unknown tags fall back to `en_US`.
    pub fn new(tag: &str) -> Self {
        match resolve_locale(tag) {
            Some(locale) => Self { locale },
            None => {
                warn!("Unknown locale `{}`, using en_US", tag);
                Self::default()
            }
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn render(&self, at: NaiveDateTime, pattern: &str) -> String {
        Utc.from_utc_datetime(&at).format_localized(pattern, self.locale).to_string()
    }
}

impl DateFormatter for LocaleFormatter {
    fn date(&self, date: NaiveDate) -> String {
        self.render(date.and_time(NaiveTime::MIN), "%x")
    }

    fn weekday(&self, date: NaiveDate) -> String {
        self.render(date.and_time(NaiveTime::MIN), "%A")
    }

    fn time(&self, timestamp: NaiveDateTime) -> String {
        self.render(timestamp, "%X")
    }

    fn date_time(&self, timestamp: NaiveDateTime) -> String {
        self.render(timestamp, "%x %X")
    }
}

/// `en-us` -> `en_US`; a bare language tries `xx_XX` (`de` -> `de_DE`).
fn resolve_locale(tag: &str) -> Option<Locale> {
    let tag = tag.trim().replace('-', "_");
    let mut parts = tag.splitn(2, '_');
    let lang = parts.next()?.to_ascii_lowercase();
    if lang.is_empty() {
        return None;
    }
    let candidate = match parts.next() {
        Some(region) => format!("{}_{}", lang, region.to_ascii_uppercase()),
        None => format!("{}_{}", lang, lang.to_ascii_uppercase()),
    };
    Locale::try_from(candidate.as_str()).ok()
}

/// Upper-case the first character only.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Axis label under/over a day: `<date> (Today)` or `<date> (<Weekday>)`.
pub fn date_label(formatter: &dyn DateFormatter, date: NaiveDate, today: NaiveDate) -> String {
    let suffix = if date == today {
        "Today".to_string()
    } else {
        capitalize_first(&formatter.weekday(date))
    };
    format!("{} ({})", formatter.date(date), suffix)
}
