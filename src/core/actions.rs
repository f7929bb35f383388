//! User commands shared by the menu strip, context menu and keyboard.

use crate::entities::FileFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PanStart,
    PanCenter,
    PanEnd,
    ResetZoom,
    ZoomIn,
    ZoomOut,
    ToggleMenu,
    Import,
    ExportPng,
    ExportData(FileFormat),
    Info,
    About,
    Settings,
}

impl Action {
    /// Every action in menu order.
    pub const ALL: [Action; 14] = [
        Action::Info,
        Action::PanStart,
        Action::PanCenter,
        Action::PanEnd,
        Action::ResetZoom,
        Action::ZoomOut,
        Action::ZoomIn,
        Action::ExportPng,
        Action::ExportData(FileFormat::Json),
        Action::ExportData(FileFormat::Csv),
        Action::Import,
        Action::About,
        Action::Settings,
        Action::ToggleMenu,
    ];

    /// Single-key shortcut (case-insensitive).
    pub fn from_key(key: char) -> Option<Self> {
        let action = match key.to_ascii_lowercase() {
            's' => Action::PanStart,
            'c' => Action::PanCenter,
            'e' => Action::PanEnd,
            'z' => Action::ResetZoom,
            '+' => Action::ZoomIn,
            '-' => Action::ZoomOut,
            'm' => Action::ToggleMenu,
            'o' => Action::Import,
            'p' => Action::ExportPng,
            'j' => Action::ExportData(FileFormat::Json),
            'v' => Action::ExportData(FileFormat::Csv),
            'i' => Action::Info,
            'a' => Action::About,
            ',' => Action::Settings,
            _ => return None,
        };
        Some(action)
    }

    pub fn shortcut(self) -> char {
        match self {
            Action::PanStart => 'S',
            Action::PanCenter => 'C',
            Action::PanEnd => 'E',
            Action::ResetZoom => 'Z',
            Action::ZoomIn => '+',
            Action::ZoomOut => '-',
            Action::ToggleMenu => 'M',
            Action::Import => 'O',
            Action::ExportPng => 'P',
            Action::ExportData(FileFormat::Json) => 'J',
            Action::ExportData(FileFormat::Csv) => 'V',
            Action::Info => 'I',
            Action::About => 'A',
            Action::Settings => ',',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::PanStart => "Pan to start",
            Action::PanCenter => "Pan to center",
            Action::PanEnd => "Pan to end",
            Action::ResetZoom => "Reset zoom",
            Action::ZoomIn => "Zoom in",
            Action::ZoomOut => "Zoom out",
            Action::ToggleMenu => "Toggle menu",
            Action::Import => "Upload timeline data",
            Action::ExportPng => "Export as PNG",
            Action::ExportData(FileFormat::Json) => "Export as JSON",
            Action::ExportData(FileFormat::Csv) => "Export as CSV",
            Action::Info => "Current timeline",
            Action::About => "About",
            Action::Settings => "Settings",
        }
    }

    /// Actions that do nothing while the canvas is empty.
    pub fn requires_data(self) -> bool {
        !matches!(self, Action::ToggleMenu | Action::Import | Action::About | Action::Settings)
    }
}

/// Keyboard dispatch: Ctrl/Shift combos are left to the platform, and
/// data actions are gated on a loaded document.
pub fn resolve_shortcut(key: char, ctrl: bool, shift: bool, has_data: bool) -> Option<Action> {
    if ctrl || shift {
        return None;
    }
    Action::from_key(key).filter(|a| has_data || !a.requires_data())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_key(action.shortcut()), Some(action));
        }
        assert_eq!(Action::from_key('x'), None);
    }

    #[test]
    fn modifiers_suppress_shortcuts() {
        assert_eq!(resolve_shortcut('s', true, false, true), None);
        assert_eq!(resolve_shortcut('s', false, true, true), None);
        assert_eq!(resolve_shortcut('S', false, false, true), Some(Action::PanStart));
    }

    #[test]
    fn empty_canvas_allows_only_chrome_actions() {
        let allowed: Vec<Action> = "scez+-mopjvia,"
            .chars()
            .filter_map(|c| resolve_shortcut(c, false, false, false))
            .collect();
        assert_eq!(allowed, vec![Action::ToggleMenu, Action::Import, Action::About, Action::Settings]);
    }
}
