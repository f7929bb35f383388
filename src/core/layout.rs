//! Layout engine: day buckets -> logical coordinates.
//!
//! Two spaces are involved:
//! - logical (content) space: unscaled units, what `compute_layout` returns;
//! - surface space: logical * zoom * pixel_ratio, what `compute_extent` returns.
//!
//! Canonical layout rule (one formula for both axes):
//!
//! ```text
//! scale  = max(zoom, 1)
//! width  = max(viewport.w * pr, x_padding * scale * pr + step_x * days * zoom * pr)
//! height = max(viewport.h * pr, y_padding * scale * pr + step_y * max_acts * 2 * zoom * pr)
//! mid    = (height / 2 - line_thickness / 2) / (zoom * pr)
//! ```
//!
//! Even day indices grow upward from the axis, odd ones downward, so
//! neighbouring days never stack their markers on the same side.

use glam::Vec2;
use log::trace;

use crate::entities::{ActivityId, Day, LayoutConstants, StyleConfig};

/// Surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Size in view units (device pixels / pixel ratio), the scrollable area.
    pub fn view_size(self, pixel_ratio: f32) -> Vec2 {
        self.as_vec2() / pixel_ratio
    }
}

/// Which side of the axis a day's activities grow towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn for_day(index: usize) -> Self {
        if index % 2 == 0 { Direction::Up } else { Direction::Down }
    }

    /// +1 for up, -1 for down (screen y grows downward, so y uses `-sign`).
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

/// Last computed marker centers, in (day, activity) order.
///
/// Recomputed on every layout pass; the hit-tester reads it instead of the
/// document so drawing and click targets stay decoupled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerCache {
    entries: Vec<(ActivityId, Vec2)>,
}

impl MarkerCache {
    pub fn push(&mut self, id: ActivityId, center: Vec2) {
        self.entries.push((id, center));
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActivityId, Vec2)> + '_ {
        self.entries.iter().copied()
    }

    pub fn get(&self, id: ActivityId) -> Option<Vec2> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, p)| *p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayout {
    pub id: ActivityId,
    pub center: Vec2,
    /// Left baseline of the title label.
    pub title_pos: Vec2,
    /// Left baseline of the time label.
    pub time_pos: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub x: f32,
    pub direction: Direction,
    /// Date marker on the axis.
    pub anchor: Vec2,
    /// Dashed branch from the axis to the last activity.
    pub branch_end: Vec2,
    /// Centered baseline of the date label.
    pub date_label_pos: Vec2,
    pub markers: Vec<MarkerLayout>,
}

/// Everything the renderer needs for one pass, in logical space.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub extent: Extent,
    pub zoom: f32,
    pub pixel_ratio: f32,
    pub mid: f32,
    /// Main axis line (start, end).
    pub axis: (Vec2, Vec2),
    pub days: Vec<DayLayout>,
    pub markers: MarkerCache,
}

impl TimelineLayout {
    /// Logical size of the whole canvas.
    pub fn logical_size(&self) -> Vec2 {
        self.extent.as_vec2() / (self.zoom * self.pixel_ratio)
    }
}

pub fn scale_factor(zoom: f32) -> f32 {
    zoom.max(1.0)
}

/// Canvas size in device pixels; never smaller than the viewport.
pub fn compute_extent(
    days: &[Day],
    zoom: f32,
    constants: &LayoutConstants,
    viewport: Vec2,
    pixel_ratio: f32,
) -> Extent {
    let scale = scale_factor(zoom);
    let max_activities = days.iter().map(|d| d.activities.len()).max().unwrap_or(0);

    let content_w = constants.x_padding * scale * pixel_ratio
        + constants.step_distance_x_axis * days.len() as f32 * zoom * pixel_ratio;
    let content_h = constants.y_padding * scale * pixel_ratio
        + constants.step_distance_y_axis * (max_activities * 2) as f32 * zoom * pixel_ratio;

    Extent {
        width: (viewport.x * pixel_ratio).max(content_w),
        height: (viewport.y * pixel_ratio).max(content_h),
    }
}

/// Logical y of the main axis.
pub fn vertical_mid(extent: Extent, line_thickness: f32, zoom: f32, pixel_ratio: f32) -> f32 {
    (extent.height / 2.0 - line_thickness / 2.0) / (zoom * pixel_ratio)
}

/// Marker center of activity `index` of day `day_index`.
pub fn marker_position(day_index: usize, index: usize, constants: &LayoutConstants, mid: f32) -> Vec2 {
    let x = constants.x_padding + constants.step_distance_x_axis * day_index as f32;
    let sign = Direction::for_day(day_index).sign();
    let y = mid + constants.step_distance_y_axis * (index + 1) as f32 * -sign;
    Vec2::new(x, y)
}

/// All marker centers for `days` around the axis at `mid`.
pub fn compute_marker_positions(days: &[Day], constants: &LayoutConstants, mid: f32) -> MarkerCache {
    let mut cache = MarkerCache::default();
    for (day_index, day) in days.iter().enumerate() {
        for index in 0..day.activities.len() {
            cache.push(
                ActivityId { day: day_index, index },
                marker_position(day_index, index, constants, mid),
            );
        }
    }
    cache
}

/// Full layout pass: axis, branches, markers and label anchors.
pub fn compute_layout(
    days: &[Day],
    style: &StyleConfig,
    constants: &LayoutConstants,
    extent: Extent,
    zoom: f32,
    pixel_ratio: f32,
) -> TimelineLayout {
    let mid = vertical_mid(extent, style.line_thickness, zoom, pixel_ratio);
    let logical_width = extent.width / (zoom * pixel_ratio);
    let half_font = style.font_size / 2.0;
    let label_dx = constants.radius * constants.label_offset_x_factor;

    let axis = (
        Vec2::new(constants.canvas_internal_padding, mid),
        Vec2::new(logical_width - constants.canvas_internal_padding, mid),
    );

    let mut markers = MarkerCache::default();
    let mut day_layouts = Vec::with_capacity(days.len());

    for (day_index, day) in days.iter().enumerate() {
        let direction = Direction::for_day(day_index);
        let sign = direction.sign();
        let x = constants.x_padding + constants.step_distance_x_axis * day_index as f32;

        let day_markers: Vec<MarkerLayout> = (0..day.activities.len())
            .map(|index| {
                let id = ActivityId { day: day_index, index };
                let center = marker_position(day_index, index, constants, mid);
                markers.push(id, center);
                MarkerLayout {
                    id,
                    center,
                    title_pos: Vec2::new(x + label_dx, center.y + constants.title_offset_y + half_font),
                    time_pos: Vec2::new(x + label_dx, center.y + constants.time_offset_y + half_font),
                }
            })
            .collect();

        // Labels under a downward branch sit lower by half a line of text.
        let sign_adjust = match direction {
            Direction::Down => half_font,
            Direction::Up => 0.0,
        };

        day_layouts.push(DayLayout {
            x,
            direction,
            anchor: Vec2::new(x, mid),
            branch_end: Vec2::new(
                x,
                mid + day.activities.len() as f32 * constants.step_distance_y_axis * -sign,
            ),
            date_label_pos: Vec2::new(
                x,
                mid + sign_adjust + constants.radius * constants.date_label_offset_factor * sign,
            ),
            markers: day_markers,
        });
    }

    trace!(
        "Layout: extent={}x{} zoom={:.3} pr={} mid={:.1} markers={}",
        extent.width,
        extent.height,
        zoom,
        pixel_ratio,
        mid,
        markers.len()
    );

    TimelineLayout {
        extent,
        zoom,
        pixel_ratio,
        mid,
        axis,
        days: day_layouts,
        markers,
    }
}

/// Empty-state drop area, in view units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingLayout {
    pub drop_min: Vec2,
    pub drop_size: Vec2,
    /// Top-left of the drop icon.
    pub icon_min: Vec2,
    pub icon_size: Vec2,
    /// Centered baselines.
    pub title_pos: Vec2,
    pub version_pos: Vec2,
}

/// Drop icon footprint.
const LANDING_ICON: Vec2 = Vec2::new(100.0, 76.0);

pub fn landing_layout(viewport: Vec2, constants: &LayoutConstants) -> LandingLayout {
    let w = if viewport.x < constants.landing_page_width + constants.canvas_internal_padding {
        0.9 * viewport.x
    } else {
        constants.landing_page_width
    };
    let h = if viewport.y < constants.landing_page_height + constants.canvas_internal_padding {
        0.9 * viewport.y
    } else {
        constants.landing_page_height
    };
    let center = viewport / 2.0;

    LandingLayout {
        drop_min: Vec2::new(center.x - w / 2.0, center.y - h / 1.8),
        drop_size: Vec2::new(w, h),
        icon_min: Vec2::new(center.x - LANDING_ICON.x / 2.0, center.y - LANDING_ICON.y - 20.0),
        icon_size: LANDING_ICON,
        title_pos: Vec2::new(center.x, center.y + LANDING_ICON.y / 2.0),
        version_pos: Vec2::new(center.x, center.y + LANDING_ICON.y / 2.0 + 20.0),
    }
}

/// Horizontal placement for "pan start/center/end".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

/// Scroll offset that shows the requested part of `content` in `viewport`.
///
/// Vertically the axis is always centered. Offsets never go negative.
pub fn align_scroll(content: Vec2, viewport: Vec2, align: Align) -> Vec2 {
    let overflow = (content - viewport).max(Vec2::ZERO);
    let x = match align {
        Align::Start => 0.0,
        Align::Center => overflow.x / 2.0,
        Align::End => overflow.x,
    };
    Vec2::new(x, overflow.y / 2.0)
}

/// Keep a scroll offset inside the scrollable range.
pub fn clamp_scroll(scroll: Vec2, content: Vec2, viewport: Vec2) -> Vec2 {
    scroll.clamp(Vec2::ZERO, (content - viewport).max(Vec2::ZERO))
}
