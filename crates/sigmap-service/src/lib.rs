//! Wi-Fi survey service - HTTP gateway over the sigmap stores.
//!
//! This crate wires the measurement log, the floor registry, the sampling
//! pipeline, and the floor-plan asset manager behind a JSON REST API for
//! the visualization client.
//!
//! # REST API Endpoints
//!
//! - `GET /api/health` - Service health check
//! - `GET /api/measurements?floor=<id>` - List measurements (all floors when ≤ 0)
//! - `POST /api/add` - Sample the Wi-Fi link and store a measurement
//! - `DELETE /api/delete/{id}` - Delete a measurement
//! - `GET /api/export?floor=<id>` - Download measurements as CSV
//! - `GET /api/floors` - List floors
//! - `POST /api/floors/add` - Add a floor
//! - `POST /api/floors/upload-map/{floor_id}` - Upload a floor-plan image (multipart field `map`)
//! - `GET /uploads/{*path}` - Serve an uploaded floor-plan image
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/sigmap/config.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//! base_url = "http://localhost:8080"
//!
//! [storage]
//! data_dir = "~/.local/share/sigmap"
//!
//! [sampler]
//! interface = "wlan0"
//! ```

pub mod api;
pub mod assets;
pub mod config;
pub mod state;

pub use assets::{AssetError, MapAssetManager};
pub use config::{Config, ConfigError, SamplerConfig, ServerConfig, StorageConfig};
pub use state::AppState;
