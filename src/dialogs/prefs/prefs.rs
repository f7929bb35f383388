use eframe::egui;

use crate::config::AppSettings;

/// Settings categories
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum SettingsCategory {
    #[default]
    Appearance,
    Zoom,
    Export,
}

impl SettingsCategory {
    const ALL: [SettingsCategory; 3] = [Self::Appearance, Self::Zoom, Self::Export];

    fn as_str(&self) -> &'static str {
        match self {
            SettingsCategory::Appearance => "Appearance",
            SettingsCategory::Zoom => "Zoom",
            SettingsCategory::Export => "Export",
        }
    }
}

/// Render Appearance settings category
fn render_appearance_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Appearance");
    ui.add_space(8.0);

    ui.checkbox(&mut settings.dark_mode, "Dark Mode");
    ui.checkbox(&mut settings.show_menu, "Show menu strip (M)");
}

/// Render Zoom settings category
fn render_zoom_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("Zoom");
    ui.add_space(8.0);

    ui.label("Step per wheel notch / button:");
    ui.add(
        egui::Slider::new(&mut settings.zoom_factor, 0.01..=0.5)
            .step_by(0.01)
            .custom_formatter(|v, _| format!("{:.0}%", v * 100.0)),
    );
    ui.add_space(8.0);

    ui.label("Minimum:");
    ui.add(egui::Slider::new(&mut settings.zoom_min, 0.05..=1.0).step_by(0.05));
    ui.add_space(8.0);

    ui.label("Maximum:");
    ui.add(egui::Slider::new(&mut settings.zoom_max, 1.0..=10.0).step_by(0.25));
    ui.add_space(12.0);

    if ui.button("Reset zoom limits").clicked() {
        let defaults = AppSettings::default();
        settings.zoom_factor = defaults.zoom_factor;
        settings.zoom_min = defaults.zoom_min;
        settings.zoom_max = defaults.zoom_max;
    }
}

/// Render Export settings category
fn render_export_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading("PNG export");
    ui.add_space(8.0);

    ui.label("Pixel ratio:");
    ui.add(
        egui::Slider::new(&mut settings.export_pixel_ratio, 0.25..=4.0)
            .step_by(0.25)
            .suffix("x"),
    );
    ui.label("Device pixels per canvas unit. 2x gives retina-sized images.");
    ui.add_space(12.0);

    ui.label("Last export folder:");
    ui.horizontal(|ui| {
        match &settings.last_export_dir {
            Some(dir) => ui.monospace(dir.display().to_string()),
            None => ui.weak("(Downloads)"),
        };
        if settings.last_export_dir.is_some() && ui.small_button("Forget").clicked() {
            settings.last_export_dir = None;
        }
    });
}

/// Settings window. Returns true when anything changed this frame.
pub fn render_settings_window(ctx: &egui::Context, show_settings: &mut bool, settings: &mut AppSettings) -> bool {
    let before = settings.clone();
    let category_id = egui::Id::new("settings_category");
    let mut selected = ctx
        .data_mut(|d| d.get_temp::<SettingsCategory>(category_id))
        .unwrap_or_default();

    egui::Window::new("Settings")
        .id(egui::Id::new("settings_window"))
        .open(show_settings)
        .default_size([460.0, 300.0])
        .resizable(true)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                // Left panel: category list
                ui.vertical(|ui| {
                    ui.set_width(120.0);
                    for category in SettingsCategory::ALL {
                        if ui.selectable_label(selected == category, category.as_str()).clicked() {
                            selected = category;
                        }
                    }
                });

                ui.separator();

                ui.vertical(|ui| match selected {
                    SettingsCategory::Appearance => render_appearance_settings(ui, settings),
                    SettingsCategory::Zoom => render_zoom_settings(ui, settings),
                    SettingsCategory::Export => render_export_settings(ui, settings),
                });
            });
        });

    ctx.data_mut(|d| d.insert_temp(category_id, selected));
    *settings != before
}
