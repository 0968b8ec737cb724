//! covid-scenes server
//!
//! Loads the case dataset once and serves the three-scene walkthrough.
//!
//! Run with: cargo run --bin covid-scenes -- --data us-states.csv
//!
//! # Configuration
//!
//! A TOML file (see `covid-scenes-cli config`) plus environment overrides:
//! - `COVID_SCENES_CSV`: Dataset path (default: us-states.csv)
//! - `COVID_SCENES_HOST`: Host to bind to (default: 127.0.0.1)
//! - `COVID_SCENES_PORT`: Port to listen on (default: 8080)
//! - `COVID_SCENES_LOG_LEVEL`, `COVID_SCENES_LOG_FORMAT`
//! - `RUST_LOG`: Full filter override

use anyhow::Context;
use clap::Parser;
use covid_scenes::config::Config;
use covid_scenes::dataset::DatasetLoader;
use covid_scenes::logging;
use covid_scenes::web::{serve, AppState};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "covid-scenes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the COVID-19 scene walkthrough")]
struct Args {
    /// Config file (default: search the usual locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV dataset, overrides the configured path
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = logging::bootstrap(|| Config::resolve(args.config.as_deref()))
        .context("Loading configuration")?;
    if let Some(data) = args.data {
        config.data.csv_path = data.to_string_lossy().into_owned();
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    logging::init(&config.logging);

    tracing::info!("Starting covid-scenes v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Dataset: {}", config.data.csv_path);

    let loaded = DatasetLoader::new().load_path(Path::new(&config.data.csv_path));
    if loaded.is_err() {
        tracing::warn!("Serving without data; the page will show the load error");
    }

    let state = AppState::from_load(loaded, config.server);
    serve(state).await.context("Running server")?;

    tracing::info!("covid-scenes stopped");
    Ok(())
}
