//! Floor-plan asset management.
//!
//! Uploaded plan images live in a dedicated uploads directory under
//! deterministic names (`floor_<id>_map<ext>`), and the floor's public
//! `mapPath` records where the client can fetch them back. Resolution of
//! an incoming request path to an on-disk file goes through an explicit
//! index maintained at upload time, seeded at startup from floors that
//! already carry a map path.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use sigmap_store::FloorStore;

/// Public URL prefix under which floor-plan images are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Errors from the asset manager.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The upload names a floor that does not exist.
    #[error("Floor not found: {0}")]
    FloorNotFound(i64),

    /// The uploads directory could not be created.
    #[error("Failed to create uploads directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The image bytes could not be written.
    #[error("Failed to write asset {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The floor registry could not be updated.
    #[error("Failed to record floor map path: {0}")]
    Store(#[from] sigmap_store::Error),

    /// No floor's stored map path matches the requested path.
    #[error("No floor map matches {0}")]
    Unresolved(String),
}

/// Accepts uploaded plan images, associates them with floors, and resolves
/// public asset paths back to files.
pub struct MapAssetManager {
    floors: Arc<FloorStore>,
    uploads_dir: PathBuf,
    /// Public request path (e.g. `/uploads/floor_1_map.png`) to the
    /// on-disk file it refers to.
    index: RwLock<HashMap<String, PathBuf>>,
}

impl MapAssetManager {
    /// Create the manager, ensuring the uploads directory exists and
    /// seeding the resolution index from floors that already carry a map
    /// path.
    ///
    /// Legacy snapshots may store the full external URL; `base_url` is
    /// stripped from such paths before indexing. Failure to create the
    /// uploads directory is returned and should be fatal at startup.
    pub fn new(
        floors: Arc<FloorStore>,
        uploads_dir: impl Into<PathBuf>,
        base_url: &str,
    ) -> Result<Self, AssetError> {
        let uploads_dir = uploads_dir.into();
        fs::create_dir_all(&uploads_dir).map_err(|e| AssetError::CreateDirectory {
            path: uploads_dir.clone(),
            source: e,
        })?;

        let mut index = HashMap::new();
        for floor in floors.list() {
            if floor.map_path.is_empty() {
                continue;
            }
            let public = floor
                .map_path
                .strip_prefix(base_url)
                .unwrap_or(&floor.map_path);
            let Some(file_name) = public.strip_prefix(&format!("{UPLOADS_PREFIX}/")) else {
                debug!(
                    "Floor {} map path {:?} is not an uploads path, skipping",
                    floor.id, floor.map_path
                );
                continue;
            };
            index.insert(public.to_string(), uploads_dir.join(file_name));
        }

        if !index.is_empty() {
            info!("Indexed {} floor map assets", index.len());
        }

        Ok(Self {
            floors,
            uploads_dir,
            index: RwLock::new(index),
        })
    }

    /// Store uploaded image bytes for a floor.
    ///
    /// The file name is deterministic per floor, so re-uploading replaces
    /// the previous image. On success the floor's `mapPath` is updated and
    /// persisted, the resolution index is refreshed, and the new public
    /// path is returned.
    pub fn upload(
        &self,
        floor_id: i64,
        bytes: &[u8],
        original_filename: &str,
    ) -> Result<String, AssetError> {
        if !self.floors.contains(floor_id) {
            return Err(AssetError::FloorNotFound(floor_id));
        }

        let ext = file_extension(original_filename);
        let file_name = format!("floor_{floor_id}_map{ext}");
        let disk_path = self.uploads_dir.join(&file_name);

        fs::write(&disk_path, bytes).map_err(|e| AssetError::Write {
            path: disk_path.clone(),
            source: e,
        })?;

        let public = format!("{UPLOADS_PREFIX}/{file_name}");
        self.floors.set_map_path(floor_id, &public)?;
        self.index
            .write()
            .unwrap()
            .insert(public.clone(), disk_path);

        info!("Stored floor {} map as {}", floor_id, file_name);
        Ok(public)
    }

    /// Resolve a public request path to its on-disk file and content type.
    ///
    /// Only paths some floor's `mapPath` refers to resolve; anything else
    /// is [`AssetError::Unresolved`], even if a file of that name happens
    /// to exist in the uploads directory.
    pub fn resolve(&self, request_path: &str) -> Result<(PathBuf, &'static str), AssetError> {
        let path = self
            .index
            .read()
            .unwrap()
            .get(request_path)
            .cloned()
            .ok_or_else(|| AssetError::Unresolved(request_path.to_string()))?;
        Ok((path, content_type_for(request_path)))
    }
}

/// File extension including the dot, case preserved; empty when absent.
fn file_extension(name: &str) -> &str {
    name.rfind('.').map(|i| &name[i..]).unwrap_or("")
}

/// Content type derived purely from the file extension.
pub fn content_type_for(path: &str) -> &'static str {
    match file_extension(path).to_ascii_lowercase().as_str() {
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "http://localhost:8080";

    fn setup(dir: &tempfile::TempDir) -> (Arc<FloorStore>, MapAssetManager) {
        let floors = Arc::new(FloorStore::open(dir.path().join("floors.json")).unwrap());
        let assets = MapAssetManager::new(
            Arc::clone(&floors),
            dir.path().join("uploads"),
            BASE_URL,
        )
        .unwrap();
        (floors, assets)
    }

    #[test]
    fn test_upload_names_file_after_floor() {
        let dir = tempfile::tempdir().unwrap();
        let (floors, assets) = setup(&dir);
        let floor = floors.add("Ground");

        let path = assets.upload(floor.id, b"png-bytes", "plan.png").unwrap();
        assert_eq!(path, "/uploads/floor_1_map.png");
        assert_eq!(floors.get(floor.id).unwrap().map_path, path);

        let on_disk = dir.path().join("uploads").join("floor_1_map.png");
        assert_eq!(fs::read(on_disk).unwrap(), b"png-bytes");
    }

    #[test]
    fn test_upload_unknown_floor() {
        let dir = tempfile::tempdir().unwrap();
        let (_floors, assets) = setup(&dir);

        assert!(matches!(
            assets.upload(9, b"x", "plan.png"),
            Err(AssetError::FloorNotFound(9))
        ));
    }

    #[test]
    fn test_reupload_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let (floors, assets) = setup(&dir);
        let floor = floors.add("Ground");

        assets.upload(floor.id, b"old", "v1.png").unwrap();
        let path = assets.upload(floor.id, b"new", "v2.png").unwrap();

        let (file, _) = assets.resolve(&path).unwrap();
        assert_eq!(fs::read(file).unwrap(), b"new");
    }

    #[test]
    fn test_resolve_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (floors, assets) = setup(&dir);
        let floor = floors.add("Ground");
        assets.upload(floor.id, b"gif-bytes", "anim.gif").unwrap();

        let (file, content_type) = assets.resolve("/uploads/floor_1_map.gif").unwrap();
        assert_eq!(content_type, "image/gif");
        assert_eq!(fs::read(file).unwrap(), b"gif-bytes");
    }

    #[test]
    fn test_resolve_unknown_path() {
        let dir = tempfile::tempdir().unwrap();
        let (_floors, assets) = setup(&dir);

        assert!(matches!(
            assets.resolve("/uploads/floor_1_map.png"),
            Err(AssetError::Unresolved(_))
        ));
    }

    #[test]
    fn test_index_seeded_from_existing_floors() {
        let dir = tempfile::tempdir().unwrap();
        {
            let (floors, assets) = setup(&dir);
            let floor = floors.add("Ground");
            assets.upload(floor.id, b"bytes", "plan.jpeg").unwrap();
        }

        // A fresh manager over the same data resolves without re-uploading.
        let (_floors, assets) = setup(&dir);
        let (file, content_type) = assets.resolve("/uploads/floor_1_map.jpeg").unwrap();
        assert_eq!(content_type, "image/jpeg");
        assert_eq!(fs::read(file).unwrap(), b"bytes");
    }

    #[test]
    fn test_index_strips_legacy_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let (floors, _assets) = setup(&dir);
        let floor = floors.add("Ground");
        // Older deployments recorded the absolute URL.
        floors
            .set_map_path(floor.id, &format!("{BASE_URL}/uploads/floor_1_map.png"))
            .unwrap();

        let (_floors2, assets) = setup(&dir);
        let (file, _) = assets.resolve("/uploads/floor_1_map.png").unwrap();
        assert!(file.ends_with("uploads/floor_1_map.png"));
    }

    #[test]
    fn test_extension_handling() {
        assert_eq!(file_extension("plan.PNG"), ".PNG");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("noext"), "");

        assert_eq!(content_type_for("/uploads/a.PNG"), "image/png");
        assert_eq!(content_type_for("/uploads/a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("/uploads/a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("/uploads/a.gif"), "image/gif");
        assert_eq!(content_type_for("/uploads/a.bmp"), "application/octet-stream");
        assert_eq!(content_type_for("/uploads/noext"), "application/octet-stream");
    }

    #[test]
    fn test_upload_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let (floors, assets) = setup(&dir);
        let floor = floors.add("Ground");

        let path = assets.upload(floor.id, b"raw", "map").unwrap();
        assert_eq!(path, "/uploads/floor_1_map");

        let (_, content_type) = assets.resolve(&path).unwrap();
        assert_eq!(content_type, "application/octet-stream");
    }
}
