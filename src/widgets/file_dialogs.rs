//! Shared file dialog helpers for widget UI.

use std::path::Path;

use crate::entities::FileFormat;

/// Create configured file dialog for timeline data selection.
pub fn create_data_dialog(title: &str) -> rfd::FileDialog {
    rfd::FileDialog::new()
        .add_filter("Timeline data", FileFormat::ALL_EXTS)
        .add_filter("JSON", &["json"])
        .add_filter("CSV (;)", &["csv"])
        .set_title(title)
}

/// Save dialog pre-filled with `file_name`, filtered on its extension.
pub fn create_save_dialog(file_name: &str, start_dir: Option<&Path>) -> rfd::FileDialog {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_string();
    let mut dialog = rfd::FileDialog::new()
        .set_title("Export timeline")
        .set_file_name(file_name)
        .add_filter(ext.to_uppercase(), &[ext.as_str()]);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog
}
