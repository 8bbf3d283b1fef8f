//! Application state shared across handlers.

use std::sync::Arc;

use sigmap_store::{FloorStore, MeasurementStore};
use sigmap_wifi::Sampler;

use crate::assets::MapAssetManager;

/// Shared application state.
///
/// The stores synchronize internally, so no outer lock is needed here:
/// each handler calls straight into them and the stores' own mutexes
/// serialize access.
pub struct AppState {
    /// The ordered measurement log.
    pub measurements: MeasurementStore,
    /// Floor registry, shared with the asset manager.
    pub floors: Arc<FloorStore>,
    /// Floor-plan asset manager.
    pub assets: MapAssetManager,
    /// Signal sampling pipeline.
    pub sampler: Sampler,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        measurements: MeasurementStore,
        floors: Arc<FloorStore>,
        assets: MapAssetManager,
        sampler: Sampler,
    ) -> Arc<Self> {
        Arc::new(Self {
            measurements,
            floors,
            assets,
            sampler,
        })
    }
}
