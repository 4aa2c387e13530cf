use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use hotscore_core::videos::{
    retain_within_window, CacheMeta, SavedCache, VideoCacheStore, VideoMap,
};
use hotscore_core::Result;
use log::{debug, info, warn};
use serde::Serialize;

use super::model::{decode_document, CacheDocument};
use crate::errors::FsStorageError;

/// Video cache persisted as a JSON file, with an optional export snapshot.
pub struct JsonFileCacheStore {
    cache_path: PathBuf,
    export_path: Option<PathBuf>,
}

impl JsonFileCacheStore {
    pub fn new(cache_path: impl Into<PathBuf>, export_path: impl Into<PathBuf>) -> Self {
        JsonFileCacheStore {
            cache_path: cache_path.into(),
            export_path: Some(export_path.into()),
        }
    }

    /// Store that writes only the cache file.
    pub fn without_export(cache_path: impl Into<PathBuf>) -> Self {
        JsonFileCacheStore {
            cache_path: cache_path.into(),
            export_path: None,
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn export_path(&self) -> Option<&Path> {
        self.export_path.as_deref()
    }

    fn load_impl(&self) -> std::result::Result<(CacheMeta, VideoMap), FsStorageError> {
        let raw = match fs::read_to_string(&self.cache_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "No cache file at {}, starting empty",
                    self.cache_path.display()
                );
                return Ok((CacheMeta::never_checked(), VideoMap::new()));
            }
            Err(source) => {
                return Err(FsStorageError::Read {
                    path: self.cache_path.clone(),
                    source,
                })
            }
        };

        let value = json5::from_str::<serde_json::Value>(&raw).map_err(|source| {
            FsStorageError::Parse {
                path: self.cache_path.clone(),
                source,
            }
        })?;

        decode_document(value).map_err(|message| FsStorageError::InvalidDocument {
            path: self.cache_path.clone(),
            message,
        })
    }

    fn save_impl(
        &self,
        meta: &CacheMeta,
        videos: &VideoMap,
        now: DateTime<Utc>,
    ) -> std::result::Result<SavedCache, FsStorageError> {
        let kept = retain_within_window(videos, now);
        let dropped = videos.len() - kept.len();
        if dropped > 0 {
            info!("Dropping {} videos older than the retention window", dropped);
        }

        write_json_atomic(&self.cache_path, &CacheDocument::new(meta, &kept))?;
        debug!(
            "Saved {} videos to {}",
            kept.len(),
            self.cache_path.display()
        );

        let mut saved = SavedCache::new(kept.len());
        if let Some(export_path) = &self.export_path {
            if let Err(e) = write_json_atomic(export_path, &kept) {
                warn!("Video cache saved but export failed: {}", e);
                saved.warnings.push(format!("Export not updated: {}", e));
            }
        }
        Ok(saved)
    }
}

impl VideoCacheStore for JsonFileCacheStore {
    fn load(&self) -> Result<(CacheMeta, VideoMap)> {
        Ok(self.load_impl()?)
    }

    fn save(&self, meta: &CacheMeta, videos: &VideoMap, now: DateTime<Utc>) -> Result<SavedCache> {
        Ok(self.save_impl(meta, videos, now)?)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write pretty-printed JSON next to `path` and rename it into place, so
/// readers see either the previous file or the complete new one.
fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> std::result::Result<(), FsStorageError> {
    let json = serde_json::to_string_pretty(value)?;
    let temp = temp_path(path);

    let write_err = |source| FsStorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    fs::write(&temp, json).map_err(write_err)?;
    if let Err(source) = fs::rename(&temp, path) {
        if let Err(e) = fs::remove_file(&temp) {
            warn!("Failed to remove {}: {}", temp.display(), e);
        }
        return Err(write_err(source));
    }
    Ok(())
}
