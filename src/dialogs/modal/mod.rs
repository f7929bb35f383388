//! Modal overlays on top of the canvas

mod alert;
mod details;

pub use alert::{Alert, render_alert};
pub use details::{ModalKind, render_modal};
