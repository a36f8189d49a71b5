use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use browser_core::{BrowserConfig, Directory, LoggingIntakeSink};
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::{
    commands::BackendCommand,
    runtime::{launch, BackendSettings},
};
use controller::events::UiEvent;
use ui::UserBrowserApp;

#[derive(Parser, Debug)]
struct Args {
    /// Config file; defaults to userbrowser.toml in the working or config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// TOML or JSON directory file replacing the built-in users.
    #[arg(long)]
    directory: Option<PathBuf>,
    #[arg(long)]
    log_filter: Option<String>,
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_directory(config: &BrowserConfig) -> Result<Directory> {
    match &config.directory_path {
        Some(path) => Directory::load(path)
            .with_context(|| format!("loading user directory from {}", path.display())),
        None => Ok(Directory::builtin()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = BrowserConfig::load(args.config.as_deref()).context("loading config")?;
    if let Some(directory) = args.directory {
        config.directory_path = Some(directory);
    }
    if let Some(filter) = args.log_filter {
        config.log_filter = filter;
    }

    init_tracing(&config.log_filter);
    let directory = load_directory(&config)?;
    tracing::info!(users = directory.len(), "starting user browser");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    launch(
        cmd_rx,
        ui_tx,
        BackendSettings {
            probe_timeout: config.media_probe_timeout(),
        },
        Arc::new(LoggingIntakeSink),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(UserBrowserApp::new(cmd_tx, ui_rx, directory)))),
    )
    .map_err(|err| anyhow::anyhow!("ui event loop failed: {err}"))
}
