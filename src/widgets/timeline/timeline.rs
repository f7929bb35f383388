//! Timeline canvas widget - view state.
//!
//! The session owns the data and zoom; this only tracks what the scroll area
//! needs between frames. Data flow: egui input -> `ActionQueue` -> app ->
//! `Session`/`TimelineView` mutations -> next frame's layout.

use glam::Vec2;

use crate::core::layout::{self, Align};
use crate::core::zoom::ZoomOutcome;

/// Scroll state of the canvas (not persisted).
#[derive(Clone, Debug, Default)]
pub struct TimelineView {
    /// Offset reported by the scroll area last frame.
    pub scroll: Vec2,
    /// Offset to force on the next frame (pan, zoom anchor).
    pub pending_scroll: Option<Vec2>,
    /// Visible size of the scroll area last frame.
    pub viewport: Vec2,
    /// Canvas size in points last frame.
    pub content: Vec2,
    /// Alignment to apply once `content` matches the current document.
    pub pending_align: Option<Align>,
}

impl TimelineView {
    /// Scroll to start / center / end (axis always vertically centered).
    pub fn align(&mut self, align: Align) {
        self.pending_scroll = Some(layout::align_scroll(self.content, self.viewport, align));
    }

    /// Align on the next frame, after the canvas was laid out again.
    /// Used after a load, when `content` still describes the old document.
    pub fn align_after_layout(&mut self, align: Align) {
        self.pending_align = Some(align);
    }

    /// Turn a deferred alignment into a scroll target. Call once `content`
    /// and `viewport` are current.
    pub fn resolve_pending_align(&mut self) {
        if let Some(align) = self.pending_align.take() {
            self.align(align);
        }
    }

    /// Apply the anchor-preserving scroll from a zoom step.
    pub fn follow_zoom(&mut self, outcome: ZoomOutcome) {
        self.pending_scroll = Some(outcome.scroll_target.max(Vec2::ZERO));
    }

    /// Drag-to-pan: move the view opposite to the pointer.
    pub fn drag_by(&mut self, delta: Vec2) {
        let from = self.effective_scroll();
        self.pending_scroll = Some(layout::clamp_scroll(from - delta, self.content, self.viewport));
    }

    /// Current scroll, including one not applied yet.
    pub fn effective_scroll(&self) -> Vec2 {
        self.pending_scroll.unwrap_or(self.scroll)
    }

    pub fn reset(&mut self) {
        *self = Self {
            viewport: self.viewport,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_uses_last_sizes() {
        let mut view = TimelineView {
            viewport: Vec2::new(100.0, 100.0),
            content: Vec2::new(500.0, 300.0),
            ..Default::default()
        };
        view.align(Align::End);
        assert_eq!(view.pending_scroll, Some(Vec2::new(400.0, 100.0)));
        assert_eq!(view.effective_scroll(), Vec2::new(400.0, 100.0));
    }

    #[test]
    fn drag_is_clamped() {
        let mut view = TimelineView {
            viewport: Vec2::new(100.0, 100.0),
            content: Vec2::new(300.0, 100.0),
            scroll: Vec2::new(50.0, 0.0),
            ..Default::default()
        };
        view.drag_by(Vec2::new(-30.0, -10.0));
        assert_eq!(view.pending_scroll, Some(Vec2::new(80.0, 0.0)));
        view.drag_by(Vec2::new(500.0, 0.0));
        assert_eq!(view.pending_scroll, Some(Vec2::ZERO));
    }

    #[test]
    fn deferred_align_uses_new_content() {
        let mut view = TimelineView {
            viewport: Vec2::new(100.0, 100.0),
            content: Vec2::new(120.0, 100.0),
            scroll: Vec2::new(20.0, 0.0),
            ..Default::default()
        };
        view.reset();
        view.align_after_layout(Align::End);
        assert_eq!(view.pending_scroll, None);

        // next frame: the new document is wider and taller
        view.content = Vec2::new(900.0, 500.0);
        view.resolve_pending_align();
        assert_eq!(view.pending_align, None);
        assert_eq!(view.pending_scroll, Some(Vec2::new(800.0, 200.0)));

        view.resolve_pending_align();
        assert_eq!(view.pending_scroll, Some(Vec2::new(800.0, 200.0)));
    }

    #[test]
    fn reset_keeps_viewport() {
        let mut view = TimelineView {
            viewport: Vec2::new(10.0, 20.0),
            scroll: Vec2::ONE,
            ..Default::default()
        };
        view.reset();
        assert_eq!(view.viewport, Vec2::new(10.0, 20.0));
        assert_eq!(view.scroll, Vec2::ZERO);
    }
}
