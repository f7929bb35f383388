//! Menu strip along the top of the window.

use eframe::egui::{self, Button, Ui};

use crate::core::Action;
use crate::entities::FileFormat;
use crate::widgets::actions::ActionQueue;

/// Strip groups, separated visually.
const GROUPS: [&[Action]; 5] = [
    &[Action::Info],
    &[Action::PanStart, Action::PanCenter, Action::PanEnd],
    &[Action::ResetZoom, Action::ZoomOut, Action::ZoomIn],
    &[
        Action::ExportPng,
        Action::ExportData(FileFormat::Json),
        Action::ExportData(FileFormat::Csv),
    ],
    &[Action::Import, Action::Settings, Action::About, Action::ToggleMenu],
];

fn button_text(action: Action) -> &'static str {
    match action {
        Action::Info => "ℹ Info",
        Action::PanStart => "⏮ Start",
        Action::PanCenter => "⏺ Center",
        Action::PanEnd => "⏭ End",
        Action::ResetZoom => "⟲ 100%",
        Action::ZoomOut => "➖",
        Action::ZoomIn => "➕",
        Action::ExportPng => "🖼 PNG",
        Action::ExportData(FileFormat::Json) => "🗋 JSON",
        Action::ExportData(FileFormat::Csv) => "🗋 CSV",
        Action::Import => "📂 Upload",
        Action::Settings => "⚙",
        Action::About => "❓",
        Action::ToggleMenu => "✖",
    }
}

/// Render the strip; data actions are disabled while nothing is loaded.
pub fn render_menu(ui: &mut Ui, has_data: bool, zoom: f32) -> ActionQueue {
    let mut queue = ActionQueue::new();
    ui.horizontal_wrapped(|ui| {
        for (i, group) in GROUPS.iter().enumerate() {
            if i > 0 {
                ui.separator();
            }
            for &action in *group {
                let enabled = has_data || !action.requires_data();
                let response = ui
                    .add_enabled(enabled, Button::new(button_text(action)))
                    .on_hover_text(format!("{} ({})", action.label(), action.shortcut()));
                if response.clicked() {
                    queue.send(action);
                }
                queue.hovered |= response.hovered();
            }
        }
        if has_data {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.monospace(format!("{:>5.0}%", zoom * 100.0));
            });
        }
    });
    queue
}
