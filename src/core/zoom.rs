//! Zoom controller.
//!
//! Zoom is a bounded multiplicative scalar. Every change keeps the content
//! point under the anchor (pointer or viewport center) fixed on screen:
//!
//! ```text
//! ref    = (anchor + scroll) / old
//! new    = clamp(old + sign(delta) * factor * old, min, max)
//! scroll = ref * new - anchor
//! ```

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

/// Zoom value plus its limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    pub value: f32,
    pub factor: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            value: 1.0,
            factor: 0.05,
            min: 0.25,
            max: 2.5,
        }
    }
}

/// New zoom and the scroll offset that keeps the anchor stable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomOutcome {
    pub value: f32,
    pub scroll_target: Vec2,
}

impl ZoomState {
    /// Limits from settings, value back at 1.
    pub fn with_limits(factor: f32, min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            value: 1.0_f32.clamp(min, max),
            factor,
            min,
            max,
        }
    }

    /// Step zoom around `anchor` (viewport-relative). Only the sign of
    /// `delta` matters; zero leaves everything as is.
    pub fn zoom_at(&mut self, anchor: Vec2, delta: f32, scroll: Vec2) -> ZoomOutcome {
        if delta == 0.0 || !delta.is_finite() {
            return ZoomOutcome {
                value: self.value,
                scroll_target: scroll,
            };
        }
        let old = self.value;
        let reference = (anchor + scroll) / old;
        let stepped = old + delta.signum() * self.factor * old;
        self.value = stepped.clamp(self.min, self.max);
        let scroll_target = reference * self.value - anchor;
        debug!(
            "Zoom {:.3} -> {:.3} anchor=({:.1},{:.1}) scroll=({:.1},{:.1})",
            old, self.value, anchor.x, anchor.y, scroll_target.x, scroll_target.y
        );
        ZoomOutcome {
            value: self.value,
            scroll_target,
        }
    }

    /// Menu/keyboard zoom: anchors on the viewport center.
    pub fn zoom_centered(&mut self, viewport: Vec2, delta: f32, scroll: Vec2) -> ZoomOutcome {
        self.zoom_at(viewport / 2.0, delta, scroll)
    }

    /// Back to 1, or the nearest limit when settings exclude 1.
    pub fn reset(&mut self) {
        self.value = 1.0_f32.clamp(self.min, self.max);
    }

    /// Jump to `value` (clamped). Non-finite values are ignored.
    pub fn set(&mut self, value: f32) -> f32 {
        if value.is_finite() {
            self.value = value.clamp(self.min, self.max);
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_limits() {
        let mut z = ZoomState::default();
        for _ in 0..200 {
            z.zoom_at(Vec2::ZERO, 1.0, Vec2::ZERO);
        }
        assert_eq!(z.value, 2.5);
        for _ in 0..200 {
            z.zoom_at(Vec2::ZERO, -1.0, Vec2::ZERO);
        }
        assert_eq!(z.value, 0.25);
    }

    #[test]
    fn step_is_multiplicative() {
        let mut z = ZoomState::default();
        let out = z.zoom_at(Vec2::ZERO, 120.0, Vec2::ZERO);
        assert!((out.value - 1.05).abs() < 1e-6);
        z.zoom_at(Vec2::ZERO, -0.001, Vec2::ZERO);
        assert!((z.value - 1.05 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn anchor_point_stays_put() {
        let mut z = ZoomState::default();
        let anchor = Vec2::new(300.0, 200.0);
        let scroll = Vec2::new(120.0, 40.0);
        let before = (anchor + scroll) / z.value;
        let out = z.zoom_at(anchor, 1.0, scroll);
        let after = (anchor + out.scroll_target) / out.value;
        assert!((before - after).length() < 1e-3);
    }

    #[test]
    fn zero_delta_is_noop() {
        let mut z = ZoomState::default();
        let scroll = Vec2::new(5.0, 6.0);
        let out = z.zoom_at(Vec2::new(10.0, 10.0), 0.0, scroll);
        assert_eq!(out.value, 1.0);
        assert_eq!(out.scroll_target, scroll);
    }

    #[test]
    fn centered_zoom_and_reset() {
        let mut z = ZoomState::default();
        let out = z.zoom_centered(Vec2::new(800.0, 600.0), 1.0, Vec2::ZERO);
        assert!((out.scroll_target - Vec2::new(400.0, 300.0) * 0.05).length() < 1e-3);
        z.reset();
        z.reset();
        assert_eq!(z.value, 1.0);
    }

    #[test]
    fn swapped_limits_are_ordered() {
        let z = ZoomState::with_limits(0.1, 3.0, 0.5);
        assert_eq!((z.min, z.max), (0.5, 3.0));
        assert_eq!(z.value, 1.0);
    }

    #[test]
    fn reset_lands_on_nearest_limit_when_one_is_excluded() {
        let mut z = ZoomState::with_limits(0.05, 1.5, 3.0);
        z.set(2.0);
        z.reset();
        assert_eq!(z.value, 1.5);
    }

    #[test]
    fn set_clamps_and_skips_nan() {
        let mut z = ZoomState::default();
        assert_eq!(z.set(10.0), 2.5);
        assert_eq!(z.set(0.01), 0.25);
        assert_eq!(z.set(f32::NAN), 0.25);
        assert_eq!(z.set(1.3), 1.3);
    }
}
