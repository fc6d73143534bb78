#![cfg_attr(
    all(target_os = "windows", feature = "gui"),
    windows_subsystem = "windows"
)]

use std::path::PathBuf;
#[cfg(feature = "gui")]
use std::sync::Arc;

use clap::Parser;
use courtline::Orientation;
use tracing_subscriber::EnvFilter;

mod report;
mod state;

use state::SystemConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "courtline", about = "Tennis positioning visualizer")]
struct Config {
    /// Config file path (default: ~/.config/courtline/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the analysis of the configured scene as JSON instead of
    /// opening a window
    #[arg(long)]
    headless: bool,

    /// Override the configured orientation for this run
    #[arg(long, value_enum)]
    orientation: Option<Orientation>,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("courtline=info")
    };
    // stdout carries the headless report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("debug logging enabled");

    let cli = Config::parse();

    // Load (or create) config file
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(state::config::default_config_path);
    let system = SystemConfig::new(config_path);

    let mut config = system.snapshot();
    if let Some(orientation) = cli.orientation {
        tracing::info!("orientation override: {orientation}");
        config.orientation = orientation;
    }

    if cli.headless || cfg!(not(feature = "gui")) {
        if !cli.headless {
            tracing::info!("built without gui feature, printing report");
        }
        let report = report::build(&config)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    #[cfg(feature = "gui")]
    {
        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([900.0, 1000.0])
                .with_title("Courtline"),
            ..Default::default()
        };

        let system = Arc::new(system);
        tracing::info!("launching native GUI ({})", system.path().display());
        eframe::run_native(
            "Courtline",
            native_options,
            Box::new(move |cc| {
                let hook_state = Arc::clone(&system);
                let app = courtline_ui::app::CourtlineApp::new(cc, config).with_save_hook(
                    Box::new(move |c: &courtline::CourtlineConfig| hook_state.replace(c.clone())),
                );
                Ok(Box::new(app))
            }),
        )
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    }

    tracing::info!("shutting down...");
    Ok(())
}
