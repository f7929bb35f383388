//! Input handling and action dispatch.

use eframe::egui;
use log::{debug, trace};

use super::TimelineApp;
use super::io::ExportKind;
use crate::core::{Action, Align, resolve_shortcut};
use crate::dialogs::ModalKind;
use crate::widgets::ActionQueue;

impl TimelineApp {
    /// Single-key shortcuts. Ignored while typing or while a dialog is up.
    pub(super) fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        // Don't process hotkeys when text input is active (typing in fields)
        if ctx.wants_keyboard_input() || self.alert.is_some() || self.modal.is_some() {
            return;
        }

        let has_data = self.session.has_data();
        let actions: Vec<Action> = ctx.input(|i| {
            let ctrl = i.modifiers.ctrl || i.modifiers.command;
            let shift = i.modifiers.shift;
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Text(text) => Some(text.chars()),
                    _ => None,
                })
                .flatten()
                .filter_map(|key| resolve_shortcut(key, ctrl, shift, has_data))
                .collect()
        });

        for action in actions {
            trace!("Hotkey -> {:?}", action);
            self.handle_action(ctx, action);
        }
    }

    /// Dropped files: the first one wins. Native drops carry a path,
    /// web-style drops carry bytes.
    pub(super) fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.first().cloned()));
        self.file_hovering = hovering;

        let Some(file) = dropped else {
            return;
        };
        if let Some(path) = file.path {
            debug!("File dropped: {}", path.display());
            self.open_path(ctx, path);
        } else if let Some(bytes) = file.bytes {
            debug!("File dropped: {} ({} bytes)", file.name, bytes.len());
            self.load_bytes(ctx, &file.name, &bytes);
        }
    }

    /// Everything a widget asked for this frame.
    pub(super) fn handle_queue(&mut self, ctx: &egui::Context, queue: ActionQueue) {
        if let Some(id) = queue.opened {
            self.modal = Some(ModalKind::Activity(id));
        }
        for action in queue.actions {
            self.handle_action(ctx, action);
        }
    }

    pub(super) fn handle_action(&mut self, ctx: &egui::Context, action: Action) {
        if action.requires_data() && !self.session.has_data() {
            return;
        }
        debug!("Action: {:?}", action);
        let viewport = self.view.viewport;
        match action {
            Action::PanStart => self.view.align(Align::Start),
            Action::PanCenter => self.view.align(Align::Center),
            Action::PanEnd => self.view.align(Align::End),
            Action::ResetZoom => {
                self.session.zoom.reset();
                self.view.reset();
            }
            Action::ZoomIn => {
                let outcome = self.session.zoom.zoom_centered(viewport, 1.0, self.view.effective_scroll());
                self.view.follow_zoom(outcome);
            }
            Action::ZoomOut => {
                let outcome = self.session.zoom.zoom_centered(viewport, -1.0, self.view.effective_scroll());
                self.view.follow_zoom(outcome);
            }
            Action::ToggleMenu => self.settings.show_menu = !self.settings.show_menu,
            Action::Import => self.import_dialog(ctx),
            Action::ExportPng => self.export(ctx, ExportKind::Png),
            Action::ExportData(format) => self.export(ctx, ExportKind::Data(format)),
            Action::Info => self.modal = Some(ModalKind::Info),
            Action::About => self.modal = Some(ModalKind::About),
            Action::Settings => self.show_settings = !self.show_settings,
        }
        ctx.request_repaint();
    }
}
