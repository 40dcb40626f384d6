/*!
 * wlanscope
 * Live WiFi signal strength dashboard
 * Onyx Digital Intelligence Development LLC
 */

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use wlanscope_scan::{LinuxScanner, SimulatedScanner};

mod app;
mod config;
mod console;
mod cycle;
mod error;
mod sort;
mod ui;

use config::DashboardConfig;
use console::TerminalConsole;

#[derive(Parser)]
#[command(name = "wlanscope")]
#[command(about = "Live WiFi signal strength dashboard")]
struct Cli {
    /// Configuration file path (created with defaults if missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in milliseconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Keep networks in scan order and ignore the sort keys
    #[arg(long)]
    no_sort: bool,

    /// Show simulated adapters instead of scanning
    #[arg(long)]
    demo: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(cli: &Cli) -> Result<()> {
    // stdout belongs to the dashboard
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("wlanscope={log_level},wlanscope_scan={log_level}"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(interval) = cli.interval {
        config.poll_interval_ms = interval;
    }
    if cli.no_sort {
        config.sort_enabled = false;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = load_config(&cli)?;
    tracing::info!("wlanscope starting, refresh every {} ms", config.poll_interval_ms);

    // Initialize terminal
    let mut console = TerminalConsole::new().context("cannot initialize terminal")?;

    let result = if cli.demo {
        app::run(&config, &SimulatedScanner::new(), &mut console).await
    } else {
        app::run(&config, &LinuxScanner::new(), &mut console).await
    };

    // Restore terminal
    console.restore()?;

    result?;
    Ok(())
}
