//! Timeline canvas - UI rendering
//!
//! Paints the shared `Scene` with the egui painter inside a two-way scroll
//! area. The canvas is laid out at pixel ratio 1: egui works in points and
//! handles the device scale itself.
//!
//! # Interactions
//!
//! - **Drag**: pan
//! - **Ctrl+wheel / pinch**: zoom about the pointer
//! - **Wheel**: scroll
//! - **Hover marker**: pointer cursor + title tooltip
//! - **Click marker**: open the activity detail modal
//! - **Right click**: context menu (export, zoom, about)

use chrono::NaiveDate;
use eframe::egui::{self, Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Ui};
use glam::Vec2;
use log::trace;

use super::TimelineView;
use crate::core::{Action, Session};
use crate::entities::Rgba;
use crate::render::scene::{Scene, Shape, TextAnchor, build_scene, dash_segments};
use crate::widgets::actions::ActionQueue;

/// Actions offered by the canvas context menu.
const CONTEXT_ACTIONS: [Action; 4] = [Action::ExportPng, Action::ZoomIn, Action::ZoomOut, Action::About];

pub fn to_color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

#[inline]
fn to_egui(v: Vec2) -> egui::Vec2 {
    egui::vec2(v.x, v.y)
}

#[inline]
fn to_glam(p: Pos2) -> Vec2 {
    Vec2::new(p.x, p.y)
}

#[inline]
fn size_to_glam(v: egui::Vec2) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Paint `scene` with its logical origin at `origin` (screen points).
pub fn paint_scene(painter: &egui::Painter, origin: Pos2, scene: &Scene) {
    let s = scene.scale;
    let at = |p: Vec2| origin + to_egui(p * s);

    painter.rect_filled(
        Rect::from_min_size(origin, to_egui(scene.size * s)),
        0.0,
        to_color32(scene.background),
    );

    for shape in &scene.shapes {
        match shape {
            Shape::Line {
                from,
                to,
                width,
                color,
                dash,
            } => {
                let stroke = Stroke::new(width * s, to_color32(*color));
                match dash {
                    Some(d) => {
                        for (a, b) in dash_segments(*from, *to, *d) {
                            painter.line_segment([at(a), at(b)], stroke);
                        }
                    }
                    None => {
                        painter.line_segment([at(*from), at(*to)], stroke);
                    }
                }
            }
            Shape::Circle {
                center,
                radius,
                fill,
                stroke,
                stroke_width,
            } => {
                painter.circle(
                    at(*center),
                    radius * s,
                    to_color32(*fill),
                    Stroke::new(stroke_width * s, to_color32(*stroke)),
                );
            }
            Shape::Text {
                pos,
                text,
                size,
                color,
                anchor,
            } => {
                let align = match anchor {
                    TextAnchor::Left => Align2::LEFT_BOTTOM,
                    TextAnchor::Center => Align2::CENTER_BOTTOM,
                };
                painter.text(at(*pos), align, text, FontId::proportional(size * s), to_color32(*color));
            }
        }
    }
}

/// Draw the timeline and collect what the user did with it.
pub fn render_timeline(ui: &mut Ui, session: &mut Session, view: &mut TimelineView, today: NaiveDate) -> ActionQueue {
    let mut queue = ActionQueue::new();

    view.viewport = size_to_glam(ui.available_size());
    let layout = session.layout(view.viewport, 1.0);
    view.content = layout.extent.view_size(1.0);
    view.resolve_pending_align();
    let scene = build_scene(
        &session.document,
        &layout,
        session.constants.radius,
        session.constants.branch_dash,
        session.formatter(),
        today,
    );

    let mut area = egui::ScrollArea::both()
        .id_salt("timeline_canvas")
        .auto_shrink([false; 2])
        .drag_to_scroll(false);
    if let Some(target) = view.pending_scroll.take() {
        area = area.scroll_offset(to_egui(target));
    }

    let output = area.show(ui, |ui| {
        let (rect, response) = ui.allocate_exact_size(to_egui(view.content), Sense::click_and_drag());
        paint_scene(ui.painter(), rect.min, &scene);
        (rect, response)
    });
    let (rect, mut response) = output.inner;
    let viewport_rect = output.inner_rect;
    view.scroll = size_to_glam(output.state.offset);

    // Drag to pan
    if response.dragged() {
        view.drag_by(size_to_glam(response.drag_delta()));
        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
    }

    // Hover / click on markers
    let hit = response
        .hover_pos()
        .and_then(|p| session.hit_test(to_glam(p), to_glam(rect.min), 1.0));
    if let Some(id) = hit {
        if !response.dragged() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }
        if let Some(activity) = session.document.activity(id) {
            response = response.on_hover_text_at_pointer(activity.title.as_str());
        }
        if response.clicked() {
            trace!("Marker clicked: {:?}", id);
            queue.opened = Some(id);
        }
    }

    // Ctrl+wheel or pinch zooms about the pointer
    if let Some(pointer) = ui.ctx().pointer_hover_pos()
        && viewport_rect.contains(pointer)
    {
        let zoom_delta = ui.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            let anchor = to_glam(pointer) - to_glam(viewport_rect.min);
            let outcome = session.zoom.zoom_at(anchor, zoom_delta - 1.0, view.effective_scroll());
            view.follow_zoom(outcome);
            ui.ctx().request_repaint();
        }
    }

    response.context_menu(|ui| {
        for action in CONTEXT_ACTIONS {
            if ui.button(action.label()).clicked() {
                queue.send(action);
                ui.close();
            }
        }
    });

    queue.hovered = response.hovered();
    queue
}
