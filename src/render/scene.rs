//! Display list for one timeline frame.
//!
//! Built in logical coordinates from a `TimelineLayout`; backends scale by
//! `zoom * pixel_ratio` when painting. Draw order matches paint order:
//! background, axis, then per day: branch, activity markers and labels,
//! date marker, date label.

use chrono::NaiveDate;
use glam::Vec2;

use crate::core::format::{DateFormatter, date_label};
use crate::core::layout::TimelineLayout;
use crate::entities::{Rgba, TimelineDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// `pos` is the left end of the baseline.
    Left,
    /// `pos` is the middle of the baseline.
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
        /// (dash, gap) in logical units.
        dash: Option<(f32, f32)>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Rgba,
        stroke: Rgba,
        stroke_width: f32,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Rgba,
        anchor: TextAnchor,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Logical canvas size.
    pub size: Vec2,
    pub background: Rgba,
    pub shapes: Vec<Shape>,
    /// Surface scale: `zoom * pixel_ratio`.
    pub scale: f32,
}

/// Build the display list. `today` decides the "(Today)" date suffix.
pub fn build_scene(
    doc: &TimelineDocument,
    layout: &TimelineLayout,
    radius: f32,
    dash: (f32, f32),
    formatter: &dyn DateFormatter,
    today: NaiveDate,
) -> Scene {
    let style = &doc.style;
    let axis_color = Rgba::parse_or(&style.timeline_stroke_color, Rgba::BLACK);
    let text_color = Rgba::parse_or(&style.text_color, Rgba::BLACK);
    let date_fill = Rgba::parse_or(&style.fill_color, Rgba::WHITE);
    let date_stroke = Rgba::parse_or(&style.stroke_color, Rgba::BLACK);
    let stroke_width = style.line_thickness;

    let mut shapes = Vec::with_capacity(1 + layout.days.len() * 4 + doc.activity_count() * 3);
    shapes.push(Shape::Line {
        from: layout.axis.0,
        to: layout.axis.1,
        width: stroke_width,
        color: axis_color,
        dash: None,
    });

    for (day, day_layout) in doc.days.iter().zip(&layout.days) {
        shapes.push(Shape::Line {
            from: day_layout.anchor,
            to: day_layout.branch_end,
            width: stroke_width,
            color: axis_color,
            dash: Some(dash),
        });

        for (activity, marker) in day.activities.iter().zip(&day_layout.markers) {
            shapes.push(Shape::Circle {
                center: marker.center,
                radius,
                fill: Rgba::parse_or(&activity.fill_color, date_fill),
                stroke: Rgba::parse_or(&activity.stroke_color, date_stroke),
                stroke_width,
            });
            shapes.push(Shape::Text {
                pos: marker.title_pos,
                text: activity.title.clone(),
                size: style.font_size,
                color: text_color,
                anchor: TextAnchor::Left,
            });
            shapes.push(Shape::Text {
                pos: marker.time_pos,
                text: formatter.time(activity.timestamp),
                size: style.font_size,
                color: text_color,
                anchor: TextAnchor::Left,
            });
        }

        shapes.push(Shape::Circle {
            center: day_layout.anchor,
            radius,
            fill: date_fill,
            stroke: date_stroke,
            stroke_width,
        });
        shapes.push(Shape::Text {
            pos: day_layout.date_label_pos,
            text: date_label(formatter, day.date, today),
            size: style.font_size,
            color: text_color,
            anchor: TextAnchor::Center,
        });
    }

    Scene {
        size: layout.logical_size(),
        background: Rgba::parse_or(&style.background_color, Rgba::WHITE),
        shapes,
        scale: layout.zoom * layout.pixel_ratio,
    }
}

/// Split a line into dash segments of `(dash, gap)`.
pub fn dash_segments(from: Vec2, to: Vec2, dash: (f32, f32)) -> Vec<(Vec2, Vec2)> {
    let length = from.distance(to);
    let period = dash.0 + dash.1;
    if length <= f32::EPSILON || dash.0 <= 0.0 || period <= 0.0 {
        return vec![(from, to)];
    }
    let dir = (to - from) / length;
    let mut out = Vec::with_capacity((length / period).ceil() as usize);
    let mut t = 0.0;
    while t < length {
        let end = (t + dash.0).min(length);
        out.push((from + dir * t, from + dir * end));
        t += period;
    }
    out
}
