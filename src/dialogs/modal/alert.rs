use eframe::egui::{self, Id, Modal, RichText};

use crate::entities::VersionAdvisory;
use crate::error::TimelineError;

/// Blocking message shown until the user dismisses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Headline from the error kind, details from its message.
    pub fn from_error(err: &TimelineError) -> Self {
        Self::new(err.headline(), err.to_string())
    }

    pub fn version_mismatch(advisory: &VersionAdvisory) -> Self {
        Self::new("Version mismatch", advisory.to_string())
    }
}

/// Draw `alert` if present; clears it when dismissed.
pub fn render_alert(ctx: &egui::Context, alert: &mut Option<Alert>) {
    let Some(current) = alert.as_ref() else {
        return;
    };
    let mut dismissed = false;
    let response = Modal::new(Id::new("alert_modal")).show(ctx, |ui| {
        ui.set_max_width(420.0);
        ui.heading(&current.title);
        ui.add_space(8.0);
        ui.label(RichText::new(&current.message).monospace());
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    });
    if dismissed || response.should_close() {
        *alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_alert_uses_headline() {
        let err = TimelineError::UnsupportedFileType {
            extension: "txt".into(),
        };
        let alert = Alert::from_error(&err);
        assert_eq!(alert.title, "Can only parse .json or .csv files");
        assert!(alert.message.contains(".txt"));
    }

    #[test]
    fn mismatch_alert_names_both_versions() {
        let alert = Alert::version_mismatch(&VersionAdvisory {
            app_version: "0.4.0".into(),
            file_version: "0.1.0".into(),
        });
        assert!(alert.message.contains("v0.4.0"));
        assert!(alert.message.contains("v0.1.0"));
    }
}
