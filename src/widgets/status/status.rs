use eframe::egui;

use crate::core::Session;

/// How long a status message stays visible, in seconds.
const MESSAGE_TTL: f64 = 6.0;

/// Status bar component: source file, counts, zoom and the last message.
#[derive(Default)]
pub struct StatusBar {
    pub current_message: String,
    message_time: f64,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` until it expires.
    pub fn set_message(&mut self, ctx: &egui::Context, message: impl Into<String>) {
        self.current_message = message.into();
        self.message_time = ctx.input(|i| i.time);
    }

    /// Drop the message once it is older than its lifetime.
    pub fn update(&mut self, ctx: &egui::Context) {
        if self.current_message.is_empty() {
            return;
        }
        let now = ctx.input(|i| i.time);
        if now - self.message_time > MESSAGE_TTL {
            self.current_message.clear();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_secs_f64(MESSAGE_TTL));
        }
    }

    /// Render status bar at bottom of screen
    pub fn render(&self, ctx: &egui::Context, session: &Session) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &session.file {
                    Some(file) => ui.monospace(file.file_name()),
                    None => ui.monospace("No file"),
                };

                ui.separator();

                ui.monospace(format!(
                    "{} days, {} activities",
                    session.document.days.len(),
                    session.document.activity_count()
                ));

                ui.separator();

                ui.monospace(format!("{:>6.1}%", session.zoom.value * 100.0));

                ui.separator();

                ui.monospace(&session.document.meta.locale);

                if !self.current_message.is_empty() {
                    ui.separator();
                    ui.monospace(&self.current_message);
                }
            });
        });
    }
}
