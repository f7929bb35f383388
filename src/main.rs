use std::path::Path;

use activity_timeline::app::write_payload;
use activity_timeline::cli::Args;
use activity_timeline::config::{self, AppSettings};
use activity_timeline::core::reader::file_name_of;
use activity_timeline::entities::FileFormat;
use activity_timeline::render::{self, Rasterizer};
use activity_timeline::{Session, TimelineApp};
use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use glam::Vec2;
use log::{debug, info};

const APP_NAME: &str = "Activity Timeline";
const SETTINGS_FILE: &str = "activity-timeline.json";
const LOG_FILE: &str = "activity-timeline.log";

/// Render or convert `input` to `output` without opening a window.
fn run_headless(args: &Args, input: &Path, output: &Path) -> Result<()> {
    let text = std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let settings = AppSettings::default();
    let mut session = Session::new(settings.zoom_state());
    // Version advisories are logged by the session; headless runs go on.
    session
        .load_text(&file_name_of(input), &text)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    session.zoom.set(args.zoom);

    let extension = output
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let payload = if extension == "png" {
        let pixel_ratio = args
            .pixel_ratio
            .unwrap_or_else(|| settings.export_pixel_ratio())
            .clamp(0.25, 4.0);
        render::export_png(
            &session,
            &mut Rasterizer::new(),
            Vec2::new(args.width, args.height),
            pixel_ratio,
        )?
    } else {
        let format = FileFormat::from_extension(&extension)
            .with_context(|| format!("Cannot export to {}", output.display()))?;
        session.export_data(format)?
    };

    let written = write_payload(payload, output)?;
    info!("Wrote {}", written.display());
    println!("{}", written.display());
    Ok(())
}

fn main() -> Result<()> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());

    // Ensure directories exist
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // Initialize logger based on --log flag
    if let Some(log_path_opt) = &args.log_file {
        // File logging with specified verbosity level
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| config::data_file(LOG_FILE, &path_config));

        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .filter_module("cosmic_text", log::LevelFilter::Warn)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Console logging with specified verbosity level (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .filter_module("cosmic_text", log::LevelFilter::Warn)
            .format_timestamp_millis()
            .init();
    }

    info!("{} v{} starting...", APP_NAME, env!("CARGO_PKG_VERSION"));
    debug!("Command-line args: {:?}", args);

    if let (Some(input), Some(output)) = (&args.file_path, &args.export) {
        return run_headless(&args, input, output);
    }

    info!("Config path: {}", config::config_file(SETTINGS_FILE, &path_config).display());
    match args.file_path {
        Some(ref path) => info!("Input file: {}", path.display()),
        None => info!("No input file provided, starting with empty state (drag-and-drop supported)"),
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION")))
            .with_inner_size([args.width, args.height])
            .with_resizable(true)
            .with_drag_and_drop(true),
        persist_window: true,
        persistence_path: Some(config::config_file(SETTINGS_FILE, &path_config)),
        ..Default::default()
    };

    let initial_file = args.file_path.clone();

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| {
            // Load persisted app state if available, otherwise create default
            let app: TimelineApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted state found, creating default app");
                    TimelineApp::default()
                });
            let mut app = app.attach(&cc.egui_ctx, path_config);

            if let Some(path) = initial_file {
                app.open_path(&cc.egui_ctx, path);
            }

            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {}", e))
}
