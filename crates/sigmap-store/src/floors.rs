//! The floor registry.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{error, info};

use sigmap_types::Floor;

use crate::error::{Error, Result};
use crate::snapshot;

/// Floor metadata keyed by id, persisted as a JSON object.
///
/// Ids are assigned as 1 + the highest existing id; floors are never
/// deleted, so ids strictly increase and are never reused. An internal
/// read/write lock guards the map: every mutation takes the write lock,
/// queries the read lock.
pub struct FloorStore {
    path: PathBuf,
    floors: RwLock<BTreeMap<i64, Floor>>,
}

impl FloorStore {
    /// Open the store backed by the given snapshot file.
    ///
    /// A missing file yields an empty store. Any other read or parse
    /// failure is returned and should be treated as fatal at startup.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let floors: BTreeMap<i64, Floor> = snapshot::load(&path)?.unwrap_or_default();
        info!("Loaded {} floors from {}", floors.len(), path.display());
        Ok(Self {
            path,
            floors: RwLock::new(floors),
        })
    }

    /// Add a floor and persist the registry.
    ///
    /// A snapshot failure is logged and does not roll back the insert.
    pub fn add(&self, name: &str) -> Floor {
        let mut floors = self.floors.write().unwrap();
        let id = floors.keys().next_back().copied().unwrap_or(0) + 1;
        let floor = Floor::new(id, name);
        floors.insert(id, floor.clone());

        if let Err(e) = snapshot::save(&self.path, &*floors) {
            error!("Failed to persist floors after add: {e}");
        }
        floor
    }

    /// All floors. No defined ordering is part of the contract.
    pub fn list(&self) -> Vec<Floor> {
        self.floors.read().unwrap().values().cloned().collect()
    }

    /// Look up a floor by id.
    pub fn get(&self, id: i64) -> Option<Floor> {
        self.floors.read().unwrap().get(&id).cloned()
    }

    /// Whether a floor with this id exists.
    pub fn contains(&self, id: i64) -> bool {
        self.floors.read().unwrap().contains_key(&id)
    }

    /// Update a floor's plan-image path in place, then persist.
    ///
    /// Unlike [`add`](Self::add), a snapshot failure here is surfaced to
    /// the caller (the upload flow reports it as a server error); the
    /// in-memory update still stands.
    pub fn set_map_path(&self, id: i64, map_path: &str) -> Result<()> {
        let mut floors = self.floors.write().unwrap();
        let floor = floors.get_mut(&id).ok_or(Error::FloorNotFound(id))?;
        floor.map_path = map_path.to_string();
        snapshot::save(&self.path, &*floors)
    }

    /// Number of registered floors.
    pub fn len(&self) -> usize {
        self.floors.read().unwrap().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
