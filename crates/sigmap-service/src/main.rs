//! sigmap service - Wi-Fi survey HTTP API.
//!
//! Run with: `cargo run -p sigmap-service`

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use sigmap_service::{AppState, Config, MapAssetManager, api};
use sigmap_store::{FLOORS_FILE, FloorStore, MEASUREMENTS_FILE, MeasurementStore};
use sigmap_wifi::{IwSource, Sampler};

/// Wi-Fi signal survey service - records signal samples against floor plans.
#[derive(Parser, Debug)]
#[command(name = "sigmap-service")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config).
    #[arg(short, long)]
    bind: Option<String>,

    /// Data directory (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Wireless interface to sample (overrides config).
    #[arg(short, long)]
    interface: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sigmap_service=info".parse()?)
                .add_directive("sigmap_store=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default().unwrap_or_default(),
    };

    // Override config with CLI args
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }
    if let Some(interface) = args.interface {
        config.sampler.interface = interface;
    }

    config.validate()?;

    // Open the stores; a corrupt snapshot is fatal here.
    let data_dir = config.storage.data_dir.clone();
    info!("Opening data directory {}", data_dir.display());
    let measurements = MeasurementStore::open(data_dir.join(MEASUREMENTS_FILE))?;
    let floors = Arc::new(FloorStore::open(data_dir.join(FLOORS_FILE))?);

    let assets = MapAssetManager::new(
        Arc::clone(&floors),
        config.storage.uploads_dir(),
        &config.server.base_url,
    )?;

    let sampler = Sampler::new(IwSource, config.sampler.interface.clone());
    info!("Sampling Wi-Fi link on {}", sampler.interface());

    // Create application state
    let state = AppState::new(measurements, floors, assets, sampler);

    // Build the router
    let app = Router::new()
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse()?;

    info!("Starting server on {}", addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
