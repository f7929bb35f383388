//! Main application loop - eframe::App implementation.
//!
//! Contains the core update() method that runs each frame:
//! - Background read completions and dropped files
//! - UI rendering (menu strip, status bar, canvas or landing page, dialogs)
//! - Input handling
//! - State persistence

use chrono::Local;
use eframe::egui;
use log::{debug, error, trace};

use crate::app::TimelineApp;
use crate::dialogs::{render_alert, render_modal, render_settings_window};
use crate::widgets::ActionQueue;
use crate::widgets::landing::render_landing;
use crate::widgets::menu::render_menu;
use crate::widgets::timeline::render_timeline;

impl eframe::App for TimelineApp {
    /// Main frame update - called every frame by eframe.
    ///
    /// Flow:
    /// 1. Apply theme
    /// 2. Apply finished reads and dropped files
    /// 3. Render menu strip and status bar
    /// 4. Render canvas (or landing page when empty)
    /// 5. Dispatch widget actions and keyboard input
    /// 6. Dialogs on top
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme based on settings
        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        self.poll_reads(ctx);
        self.handle_dropped_files(ctx);

        let mut queue = ActionQueue::new();

        if self.settings.show_menu {
            egui::TopBottomPanel::top("menu_strip").show(ctx, |ui| {
                queue.merge(render_menu(ui, self.session.has_data(), self.session.zoom.value));
            });
        }

        // Update status messages BEFORE laying out panels
        self.status_bar.update(ctx);
        self.status_bar.render(ctx, &self.session);

        let today = Local::now().date_naive();
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(egui::Margin::ZERO))
            .show(ctx, |ui| {
                if self.session.has_data() {
                    queue.merge(render_timeline(ui, &mut self.session, &mut self.view, today));
                } else {
                    queue.merge(render_landing(
                        ui,
                        &self.session.constants,
                        &self.session.document.style,
                        self.file_hovering,
                    ));
                }
            });

        if !queue.actions.is_empty() {
            trace!("Widget actions: {:?}", queue.actions);
        }
        self.handle_queue(ctx, queue);

        // Process keyboard input after widgets had their turn
        self.handle_keyboard_input(ctx);

        render_modal(ctx, &mut self.modal, &self.session);
        render_alert(ctx, &mut self.alert);

        if self.show_settings && render_settings_window(ctx, &mut self.show_settings, &mut self.settings) {
            self.apply_zoom_settings();
        }
    }

    /// Save app state to persistent storage.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(self) {
            Ok(json) => {
                storage.set_string(eframe::APP_KEY, json);
                debug!("Settings saved");
            }
            Err(e) => error!("Failed to serialize settings: {}", e),
        }
    }
}
