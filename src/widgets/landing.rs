//! Empty-state screen: drop area, icon, call to action and version.

use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Pos2, Rect, Sense, Stroke, Ui};
use glam::Vec2;

use crate::core::Action;
use crate::core::layout::landing_layout;
use crate::entities::{APP_VERSION, LayoutConstants, Rgba, StyleConfig};
use crate::render::scene::dash_segments;
use crate::widgets::actions::ActionQueue;
use crate::widgets::timeline::to_color32;

const DROP_FILL: Color32 = Color32::from_rgb(0xE9, 0xE9, 0xE9);
const DROP_FILL_ACTIVE: Color32 = Color32::from_rgb(0xD6, 0xE4, 0xF0);
const DROP_LABEL: &str = "DROP TIMELINE DATA FILE";

/// Boxes of the drop icon in its 100x76 design space (min, max).
const ICON_BOXES: [([f32; 2], [f32; 2]); 4] = [
    ([37.5, 0.0], [62.5, 25.0]),
    ([0.0, 50.0], [25.0, 75.0]),
    ([37.5, 50.0], [62.5, 75.0]),
    ([75.0, 50.0], [100.0, 75.0]),
];

/// Wires from the parent box to the three children (from, to).
const ICON_WIRES: [([f32; 2], [f32; 2]); 4] = [
    ([50.0, 25.0], [50.0, 50.0]),
    ([12.5, 34.375], [87.5, 34.375]),
    ([12.5, 34.375], [12.5, 50.0]),
    ([87.5, 34.375], [87.5, 50.0]),
];

fn at(min: Pos2, p: [f32; 2]) -> Pos2 {
    min + egui::vec2(p[0], p[1])
}

/// Draw the landing page. Clicking the drop area asks for an import.
///
/// `file_hovering` highlights the area while a file is dragged over the window.
pub fn render_landing(ui: &mut Ui, constants: &LayoutConstants, style: &StyleConfig, file_hovering: bool) -> ActionQueue {
    let mut queue = ActionQueue::new();
    let (rect, _) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
    let origin = rect.min;
    let layout = landing_layout(Vec2::new(rect.width(), rect.height()), constants);

    let drop_rect = Rect::from_min_size(
        origin + egui::vec2(layout.drop_min.x, layout.drop_min.y),
        egui::vec2(layout.drop_size.x, layout.drop_size.y),
    );
    let response = ui.interact(drop_rect, ui.id().with("landing_drop"), Sense::click());
    let text_color = to_color32(Rgba::parse_or(&style.text_color, Rgba::BLACK));
    let stroke_color = to_color32(Rgba::parse_or(&style.stroke_color, Rgba::BLACK));
    let painter = ui.painter_at(rect);

    let fill = if file_hovering || response.hovered() { DROP_FILL_ACTIVE } else { DROP_FILL };
    painter.rect_filled(drop_rect, CornerRadius::ZERO, fill);
    let stroke = Stroke::new(style.line_thickness, stroke_color);
    let corners = [
        drop_rect.left_top(),
        drop_rect.right_top(),
        drop_rect.right_bottom(),
        drop_rect.left_bottom(),
        drop_rect.left_top(),
    ];
    for edge in corners.windows(2) {
        let (a, b) = (Vec2::new(edge[0].x, edge[0].y), Vec2::new(edge[1].x, edge[1].y));
        for (s, e) in dash_segments(a, b, (6.0, 6.0)) {
            painter.line_segment([Pos2::new(s.x, s.y), Pos2::new(e.x, e.y)], stroke);
        }
    }

    // Icon: one parent box wired to three children
    let icon_min = origin + egui::vec2(layout.icon_min.x, layout.icon_min.y);
    let wire = Stroke::new(6.25, text_color);
    for (from, to) in ICON_WIRES {
        painter.line_segment([at(icon_min, from), at(icon_min, to)], wire);
    }
    for (min, max) in ICON_BOXES {
        painter.rect_filled(Rect::from_min_max(at(icon_min, min), at(icon_min, max)), 9.0, text_color);
    }

    let title_pos = origin + egui::vec2(layout.title_pos.x, layout.title_pos.y);
    painter.text(title_pos, Align2::CENTER_BOTTOM, DROP_LABEL, FontId::proportional(20.0), text_color);
    let version_pos = origin + egui::vec2(layout.version_pos.x, layout.version_pos.y);
    painter.text(
        version_pos,
        Align2::CENTER_BOTTOM,
        format!("Version {}", APP_VERSION),
        FontId::proportional(14.0),
        text_color,
    );

    let response = response.on_hover_text("Click to choose a .json or .csv file");
    if response.clicked() {
        queue.send(Action::Import);
    }
    queue.hovered = response.hovered();
    queue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_fits_its_layout_box() {
        let layout = landing_layout(Vec2::new(1024.0, 768.0), &LayoutConstants::default());
        let points = ICON_BOXES.iter().chain(ICON_WIRES.iter()).flat_map(|(a, b)| [*a, *b]);
        for [x, y] in points {
            assert!((0.0..=layout.icon_size.x).contains(&x), "x {} outside icon", x);
            assert!((0.0..=layout.icon_size.y).contains(&y), "y {} outside icon", y);
        }
    }
}
