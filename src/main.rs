mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use app::SeaIceApp;
use clap::Parser;
use eframe::egui;

use crate::analysis::Analysis;
use crate::config::AnalysisConfig;
use crate::data::loader::load_file;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Extent dataset (.csv, .json or .parquet).
    file: Option<PathBuf>,

    /// TOML file overriding the analysis defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the statistics to stdout instead of opening a window.
    #[arg(long, requires = "file")]
    summary: bool,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::debug!("{args:#?}");

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path).context("failed to load config")?,
        None => AnalysisConfig::default(),
    };

    if args.summary {
        let path = args.file.context("--summary needs a FILE")?;
        let dataset = load_file(&path)?;
        println!("{}", Analysis::run(dataset, &config));
        return Ok(());
    }

    let mut state = AppState::new(config);
    if let Some(path) = &args.file {
        let dataset = load_file(path)?;
        log::info!("Loaded {} observations from {}", dataset.len(), path.display());
        state.set_dataset(dataset, Some(path.clone()));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sea Ice Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(SeaIceApp::new(state)))),
    )
    .map_err(|e| anyhow!("window closed with an error: {e}"))
}
