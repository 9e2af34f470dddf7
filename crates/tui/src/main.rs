mod app;
mod renderer;

use std::fs::File;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::Parser;
use phasefolio_core::{Controller, PortfolioConfig};
use tracing_subscriber::EnvFilter;

/// Scroll-driven portfolio in the terminal.
#[derive(Debug, Parser)]
#[command(name = "phasefolio-tui", version)]
struct Args {
    /// Portfolio configuration (JSON). Defaults to the built-in portfolio.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the frame at this scroll progress as JSON and exit.
    #[arg(long, value_name = "PROGRESS")]
    at: Option<f64>,

    /// Write logs here; the terminal itself is taken by the UI.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_env("PHASEFOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = match &args.config {
        Some(path) => PortfolioConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PortfolioConfig::load_default()?,
    };

    if let Some(progress) = args.at {
        let mut controller = Controller::new(config);
        controller.set_progress(progress);
        let json = serde_json::to_string_pretty(&controller.frame())?;
        writeln!(std::io::stdout().lock(), "{json}")?;
        return Ok(());
    }

    app::run(Controller::new(config))
}
