//! Error taxonomy for loading, normalizing and exporting timelines.
//!
//! Every failure leaves the previously loaded document untouched. The UI
//! surfaces these through a blocking alert; nothing is retried automatically.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    /// File content could not be decoded (syntax, shape, empty file).
    #[error("malformed {format} input: {reason}")]
    MalformedInput { format: &'static str, reason: String },

    /// A date or time field could not be parsed.
    #[error("malformed date `{value}`: expected {expected}")]
    MalformedDate { value: String, expected: &'static str },

    #[error("unsupported file type `.{extension}` (expected .json or .csv)")]
    UnsupportedFileType { extension: String },

    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("export failed: {0}")]
    Export(String),
}

impl TimelineError {
    pub fn malformed(format: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            format,
            reason: reason.into(),
        }
    }

    /// Bad dates are reported to the user the same way as bad syntax.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. } | Self::MalformedDate { .. })
    }

    /// Short headline for alert dialogs.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } | Self::MalformedDate { .. } => "Error parsing the file - check the syntax",
            Self::UnsupportedFileType { .. } => "Can only parse .json or .csv files",
            Self::Io(_) => "Could not read the file",
            Self::Export(_) => "Export failed",
        }
    }
}

impl From<image::ImageError> for TimelineError {
    fn from(value: image::ImageError) -> Self {
        Self::Export(value.to_string())
    }
}

pub type TimelineResult<T> = Result<T, TimelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_count_as_malformed_input() {
        let err = TimelineError::MalformedDate {
            value: "2024-13-01".into(),
            expected: "YYYY-MM-DD",
        };
        assert!(err.is_malformed_input());
        assert!(!TimelineError::UnsupportedFileType { extension: "txt".into() }.is_malformed_input());
    }

    #[test]
    fn display_names_the_format() {
        let err = TimelineError::malformed("JSON", "trailing comma");
        assert_eq!(err.to_string(), "malformed JSON input: trailing comma");
    }
}
