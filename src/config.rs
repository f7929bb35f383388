//! Application paths and persisted UI settings.
//!
//! Only settings are persisted (through eframe storage). Timeline data never
//! outlives the process.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::zoom::ZoomState;

/// Directory name under the platform config/data roots.
const APP_DIR: &str = "activity-timeline";

/// Environment override for the config directory.
pub const CONFIG_DIR_ENV: &str = "ACTIVITY_TIMELINE_CONFIG_DIR";

/// Files whose presence in the working directory makes it the config dir.
const LOCAL_MARKERS: [&str; 2] = ["activity-timeline.json", "activity-timeline.log"];

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI args → ENV var (ACTIVITY_TIMELINE_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from));
        Self { config_dir }
    }
}

/// Get path to a configuration file
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. ACTIVITY_TIMELINE_CONFIG_DIR environment variable
/// 3. Local folder IF any marker files exist there
/// 4. Platform-specific config directory from dirs-next (default)
///
/// Platform paths:
/// - Linux: ~/.config/activity-timeline/{name}
/// - macOS: ~/Library/Application Support/activity-timeline/{name}
/// - Windows: %APPDATA%\activity-timeline\{name}
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    config_dir(config).join(name)
}

/// Get path to a data file (logs). Same priority as `config_file`, with the
/// platform data directory as the default.
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    data_dir(config).join(name)
}

/// Where exports land when no save dialog is involved.
pub fn export_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.join("exports");
    }
    dirs_next::download_dir()
        .or_else(dirs_next::document_dir)
        .unwrap_or_else(|| data_dir(config))
}

/// Ensure that configuration and data directories exist
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = config_dir(config);
    let data_dir = data_dir(config);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;
    }
    if data_dir != config_dir && !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }
    Ok(())
}

fn has_local_config_files(dir: &Path) -> bool {
    LOCAL_MARKERS.iter().any(|f| dir.join(f).exists())
}

fn resolve_dir(config: &PathConfig, platform: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    if let Ok(current_dir) = std::env::current_dir()
        && has_local_config_files(&current_dir)
    {
        return current_dir;
    }
    platform.map(|d| d.join(APP_DIR)).unwrap_or_else(|| PathBuf::from("."))
}

fn config_dir(config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::config_dir())
}

fn data_dir(config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::data_dir())
}

/// UI preferences, persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub zoom_factor: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Device pixels per logical unit in PNG exports.
    pub export_pixel_ratio: f32,
    pub show_menu: bool,
    pub dark_mode: bool,
    /// Where the last save dialog pointed.
    pub last_export_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        let zoom = ZoomState::default();
        Self {
            zoom_factor: zoom.factor,
            zoom_min: zoom.min,
            zoom_max: zoom.max,
            export_pixel_ratio: 1.0,
            show_menu: true,
            dark_mode: false,
            last_export_dir: None,
        }
    }
}

impl AppSettings {
    /// Zoom controller built from these limits (value 1).
    pub fn zoom_state(&self) -> ZoomState {
        ZoomState::with_limits(
            self.zoom_factor.clamp(0.01, 0.5),
            self.zoom_min.max(0.05),
            self.zoom_max.max(0.05),
        )
    }

    pub fn export_pixel_ratio(&self) -> f32 {
        self.export_pixel_ratio.clamp(0.25, 4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_dir_wins() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };
        assert_eq!(config_file("a.json", &config), PathBuf::from("/custom/a.json"));
        assert_eq!(data_file("a.log", &config), PathBuf::from("/custom/a.log"));
        assert_eq!(export_dir(&config), PathBuf::from("/custom/exports"));
    }

    #[test]
    fn ensure_dirs_creates_custom_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = PathConfig {
            config_dir: Some(tmp.path().join("nested/cfg")),
        };
        ensure_dirs(&config).unwrap();
        assert!(tmp.path().join("nested/cfg").is_dir());
    }

    #[test]
    fn settings_fill_missing_keys() {
        let s: AppSettings = serde_json::from_str(r#"{"zoom_max": 4.0}"#).unwrap();
        assert_eq!(s.zoom_max, 4.0);
        assert_eq!(s.zoom_min, 0.25);
        assert!(s.show_menu);
        let z = s.zoom_state();
        assert_eq!((z.value, z.max), (1.0, 4.0));
    }
}
