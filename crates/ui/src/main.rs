#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context as _;
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use phasefolio_core::PortfolioConfig;
#[cfg(not(target_arch = "wasm32"))]
use phasefolio_ui::PortfolioApp;
#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::EnvFilter;

/// Scroll-driven portfolio, native window.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(name = "phasefolio", version)]
struct Args {
    /// Portfolio configuration (JSON). Defaults to the built-in portfolio.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PHASEFOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => PortfolioConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PortfolioConfig::load_default()?,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PACMARSAN // PORTFOLIO")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "phasefolio",
        options,
        Box::new(|cc| Ok(Box::new(PortfolioApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

// The browser build starts from `phasefolio_ui::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
