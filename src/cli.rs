use clap::Parser;
use std::path::PathBuf;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Formats: JSON, CSV (;) -> PNG, JSON, CSV\n",
    "Target:  ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Activity timeline viewer
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Timeline data to open (.json or .csv) - optional, can also drag-and-drop
    #[arg(value_name = "FILE")]
    pub file_path: Option<PathBuf>,

    /// Render/convert FILE without opening a window (format from extension: png, json, csv)
    #[arg(short = 'e', long = "export", value_name = "OUT", requires = "file_path")]
    pub export: Option<PathBuf>,

    /// Zoom level for headless PNG export
    #[arg(short = 'z', long = "zoom", value_name = "ZOOM", default_value_t = 1.0)]
    pub zoom: f32,

    /// Device pixel ratio for headless PNG export (default: from settings, else 1)
    #[arg(long = "pixel-ratio", value_name = "RATIO")]
    pub pixel_ratio: Option<f32>,

    /// Minimum canvas width for headless export
    #[arg(long = "width", value_name = "PX", default_value_t = 1280.0)]
    pub width: f32,

    /// Minimum canvas height for headless export
    #[arg(long = "height", value_name = "PX", default_value_t = 720.0)]
    pub height: f32,

    /// Enable debug logging to file (default: activity-timeline.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_export() {
        let args = Args::try_parse_from(["activity-timeline", "in.csv", "--export", "out.png", "-z", "1.5", "-vv"]).unwrap();
        assert_eq!(args.file_path, Some(PathBuf::from("in.csv")));
        assert_eq!(args.export, Some(PathBuf::from("out.png")));
        assert_eq!(args.zoom, 1.5);
        assert_eq!(args.verbosity, 2);
        assert!(args.log_file.is_none());
    }

    #[test]
    fn export_needs_input() {
        assert!(Args::try_parse_from(["activity-timeline", "--export", "out.png"]).is_err());
    }

    #[test]
    fn bare_log_flag_uses_default_file() {
        let args = Args::try_parse_from(["activity-timeline", "-l"]).unwrap();
        assert_eq!(args.log_file, Some(None));
    }
}
