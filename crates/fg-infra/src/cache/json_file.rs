use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fg_core::feed::{CacheSnapshot, SNAPSHOT_SCHEMA_VERSION};
use fg_core::ports::{CacheError, PhotoCachePort};
use fg_core::Photo;
use tokio::fs;
use tracing::{debug, warn};

/// Single-slot snapshot cache backed by one JSON file.
///
/// The file is `<dir>/<key>.json`. Writes go through a sibling temp file and
/// a rename, so a reader sees either the previous snapshot or the new one.
pub struct JsonFileSnapshotCache {
    path: PathBuf,
}

impl JsonFileSnapshotCache {
    /// Characters outside `[A-Za-z0-9_-]` in `key` are replaced with `_`.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        Self {
            path: dir.as_ref().join(format!("{file_name}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn try_read(&self) -> Result<Vec<Photo>, CacheError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let snapshot: CacheSnapshot = serde_json::from_slice(&bytes)?;
        if snapshot.schema != SNAPSHOT_SCHEMA_VERSION {
            return Err(CacheError::Schema {
                found: snapshot.schema,
                expected: SNAPSHOT_SCHEMA_VERSION,
            });
        }

        Ok(snapshot
            .photos
            .into_iter()
            .filter(|p| !p.id.trim().is_empty())
            .collect())
    }

    pub async fn try_write(&self, photos: &[Photo]) -> Result<(), CacheError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let content = serde_json::to_vec(&CacheSnapshot::new(photos.to_vec()))?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PhotoCachePort for JsonFileSnapshotCache {
    async fn read(&self) -> Vec<Photo> {
        match self.try_read().await {
            Ok(photos) => {
                debug!(count = photos.len(), path = %self.path.display(), "Read cached snapshot");
                photos
            }
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Ignoring unreadable photo cache");
                Vec::new()
            }
        }
    }

    async fn write(&self, photos: &[Photo]) {
        match self.try_write(photos).await {
            Ok(()) => {
                debug!(count = photos.len(), path = %self.path.display(), "Wrote cached snapshot")
            }
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Failed to write photo cache")
            }
        }
    }
}
