//! Disk-backed record stores for sigmap survey data.
//!
//! This crate owns the two mutable collections at the heart of the
//! service: the ordered measurement log and the floor registry. Each store
//! owns its data, its lock, and its snapshot file. Every mutation
//! synchronously rewrites the full collection as human-readable JSON, so
//! the on-disk state can be inspected (or hand-edited) between runs.
//!
//! # Example
//!
//! ```no_run
//! use sigmap_store::{FloorStore, MeasurementStore};
//!
//! let measurements = MeasurementStore::open("measurements.json")?;
//! let floors = FloorStore::open("floors.json")?;
//!
//! let ground = floors.add("Ground");
//! assert_eq!(ground.id, 1);
//! # Ok::<(), sigmap_store::Error>(())
//! ```

mod error;
mod export;
mod floors;
mod measurements;
mod snapshot;

pub use error::{Error, Result};
pub use export::export_csv;
pub use floors::FloorStore;
pub use measurements::MeasurementStore;

/// File name of the measurement snapshot inside the data directory.
pub const MEASUREMENTS_FILE: &str = "measurements.json";

/// File name of the floor snapshot inside the data directory.
pub const FLOORS_FILE: &str = "floors.json";

/// Default data directory following platform conventions.
///
/// - Linux: `~/.local/share/sigmap`
/// - macOS: `~/Library/Application Support/sigmap`
/// - Windows: `C:\Users\<user>\AppData\Local\sigmap`
pub fn default_data_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("sigmap")
}
