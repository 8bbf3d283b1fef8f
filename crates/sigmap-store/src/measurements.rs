//! The ordered measurement log.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{error, info};

use sigmap_types::Measurement;

use crate::error::{Error, Result};
use crate::snapshot;

/// Ordered collection of measurement records, persisted as a JSON array.
///
/// Insertion order is the store's total order; listing and export preserve
/// it regardless of floor filtering. A single internal mutex serializes
/// every read and write; there is no reader parallelism.
pub struct MeasurementStore {
    path: PathBuf,
    records: Mutex<Vec<Measurement>>,
}

impl MeasurementStore {
    /// Open the store backed by the given snapshot file.
    ///
    /// A missing file yields an empty store. Any other read or parse
    /// failure is returned and should be treated as fatal at startup.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<Measurement> = snapshot::load(&path)?.unwrap_or_default();
        info!(
            "Loaded {} measurements from {}",
            records.len(),
            path.display()
        );
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Append a record and persist the full collection.
    ///
    /// The in-memory append always succeeds. A snapshot failure afterwards
    /// is logged and does NOT roll back the append: the record stands in
    /// memory as "applied but unsaved".
    pub fn add(&self, record: Measurement) -> Measurement {
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        if let Err(e) = snapshot::save(&self.path, &*records) {
            error!("Failed to persist measurements after add: {e}");
        }
        record
    }

    /// List records, optionally filtered by floor.
    ///
    /// A filter ≤ 0 returns every record; a positive filter returns only
    /// records on that floor. Insertion order is preserved either way.
    pub fn list(&self, floor_filter: i64) -> Vec<Measurement> {
        let records = self.records.lock().unwrap();
        if floor_filter > 0 {
            records
                .iter()
                .filter(|m| m.floor == floor_filter)
                .cloned()
                .collect()
        } else {
            records.clone()
        }
    }

    /// Remove the first record whose id matches, then persist.
    ///
    /// An unknown id fails with [`Error::MeasurementNotFound`] and leaves
    /// the store (and its snapshot) untouched. As with [`add`](Self::add),
    /// a snapshot failure after the removal is logged, not rolled back.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let pos = records
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| Error::MeasurementNotFound(id.to_string()))?;
        records.remove(pos);

        if let Err(e) = snapshot::save(&self.path, &*records) {
            error!("Failed to persist measurements after delete: {e}");
        }
        Ok(())
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
