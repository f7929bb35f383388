//! Layout constants. These can't be overridden from data files.

/// Fixed geometry used by the layout engine and the landing page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstants {
    /// Marker circle radius (also the default hit-test tolerance).
    pub radius: f32,
    pub step_distance_x_axis: f32,
    pub step_distance_y_axis: f32,
    /// Inset of the main axis from the canvas edges.
    pub canvas_internal_padding: f32,
    pub x_padding: f32,
    pub y_padding: f32,
    pub landing_page_width: f32,
    pub landing_page_height: f32,
    /// Title baseline relative to the marker center (before half font size).
    pub title_offset_y: f32,
    /// Time baseline relative to the marker center (before half font size).
    pub time_offset_y: f32,
    /// Label x offset from the branch, in radii.
    pub label_offset_x_factor: f32,
    /// Date label distance from the axis, in radii.
    pub date_label_offset_factor: f32,
    /// Dash pattern of per-day branch lines: (dash, gap).
    pub branch_dash: (f32, f32),
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            radius: 18.0,
            step_distance_x_axis: 150.0,
            step_distance_y_axis: 80.0,
            canvas_internal_padding: 20.0,
            x_padding: 150.0,
            y_padding: 80.0,
            landing_page_width: 600.0,
            landing_page_height: 300.0,
            title_offset_y: -10.0,
            time_offset_y: 8.0,
            label_offset_x_factor: 1.5,
            date_label_offset_factor: 2.0,
            branch_dash: (5.0, 8.0),
        }
    }
}
