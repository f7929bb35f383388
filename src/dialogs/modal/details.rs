use eframe::egui::{self, Color32, CornerRadius, Grid, Id, Modal, RichText, Sense, Stroke, Ui};

use crate::core::{Action, DateFormatter, Session, TimelineInfo};
use crate::entities::{APP_VERSION, Activity, ActivityId, Rgba};
use crate::widgets::timeline::to_color32;

const ABOUT_TEXT: &str = "Plots dated activities along a horizontal axis, one branch per day. \
Drop a .json or .csv (;) file to begin.";

/// Which modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Activity(ActivityId),
    Info,
    About,
}

/// Label/value pairs for the "Current timeline" modal.
pub fn info_rows(info: &TimelineInfo, formatter: &dyn DateFormatter) -> Vec<(&'static str, String)> {
    let mut rows = Vec::with_capacity(7);
    if let Some(name) = &info.file_name {
        rows.push(("File", name.clone()));
    }
    rows.push(("First date", formatter.date(info.first_date)));
    rows.push(("Last date", formatter.date(info.last_date)));
    rows.push(("Period", format!("{} days", info.period_days)));
    rows.push((
        "Active days",
        format!("{} ({:.1}%)", info.active_days, info.active_percent),
    ));
    rows.push(("Most activities", format!("{} per day", info.most_activities)));
    rows.push(("Least activities", format!("{} per day", info.least_activities)));
    rows
}

fn rows_grid(ui: &mut Ui, id: &str, rows: &[(&str, String)]) {
    Grid::new(id).num_columns(2).spacing([16.0, 4.0]).show(ui, |ui| {
        for (label, value) in rows {
            ui.label(RichText::new(*label).strong());
            ui.monospace(value);
            ui.end_row();
        }
    });
}

fn swatch(ui: &mut Ui, activity: &Activity) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
    let fill = to_color32(Rgba::parse_or(&activity.fill_color, Rgba::WHITE));
    let stroke = to_color32(Rgba::parse_or(&activity.stroke_color, Rgba::BLACK));
    ui.painter().rect(
        rect,
        CornerRadius::same(7),
        fill,
        Stroke::new(2.0, stroke),
        egui::StrokeKind::Inside,
    );
}

fn activity_body(ui: &mut Ui, session: &Session, id: ActivityId) {
    let Some(activity) = session.document.activity(id) else {
        ui.label("Activity no longer exists.");
        return;
    };
    ui.horizontal(|ui| {
        swatch(ui, activity);
        ui.heading(&activity.title);
    });
    ui.label(
        RichText::new(session.formatter().date_time(activity.timestamp))
            .monospace()
            .color(Color32::GRAY),
    );
    ui.add_space(8.0);
    if activity.description.is_empty() {
        ui.weak("No description");
    } else {
        ui.label(&activity.description);
    }
}

fn info_body(ui: &mut Ui, session: &Session) {
    ui.heading("Current timeline");
    ui.add_space(8.0);
    match TimelineInfo::compute(&session.document, session.file.as_ref()) {
        Some(info) => rows_grid(ui, "info_grid", &info_rows(&info, session.formatter())),
        None => {
            ui.weak("Nothing loaded");
        }
    }
}

fn about_body(ui: &mut Ui) {
    ui.heading(env!("CARGO_PKG_NAME"));
    ui.monospace(format!("Version {}", APP_VERSION));
    ui.add_space(8.0);
    ui.label(ABOUT_TEXT);
    ui.add_space(8.0);
    ui.label(RichText::new("Shortcuts").strong());
    let rows: Vec<(&str, String)> = Action::ALL
        .iter()
        .map(|a| (a.label(), a.shortcut().to_string()))
        .collect();
    rows_grid(ui, "about_shortcuts", &rows);
}

/// Draw the open modal; clears `modal` when dismissed.
pub fn render_modal(ctx: &egui::Context, modal: &mut Option<ModalKind>, session: &Session) {
    let Some(kind) = *modal else {
        return;
    };
    let mut dismissed = false;
    let response = Modal::new(Id::new("details_modal")).show(ctx, |ui| {
        ui.set_min_width(320.0);
        ui.set_max_width(480.0);
        match kind {
            ModalKind::Activity(id) => activity_body(ui, session, id),
            ModalKind::Info => info_body(ui, session),
            ModalKind::About => about_body(ui),
        }
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            if ui.button("Close").clicked() {
                dismissed = true;
            }
        });
    });
    if dismissed || response.should_close() {
        *modal = None;
    }
}
