//! Shared action queue for widgets that emit commands.

use crate::core::Action;
use crate::entities::ActivityId;

/// What a widget asked for during one frame. Dispatched by the app.
#[derive(Debug, Default)]
pub struct ActionQueue {
    pub hovered: bool,
    pub actions: Vec<Action>,
    /// Marker clicked this frame.
    pub opened: Option<ActivityId>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Fold another widget's queue into this one.
    pub fn merge(&mut self, other: ActionQueue) {
        self.hovered |= other.hovered;
        self.actions.extend(other.actions);
        if other.opened.is_some() {
            self.opened = other.opened;
        }
    }
}
