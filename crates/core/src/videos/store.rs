//! Video cache storage trait.
//!
//! This module defines the persistence interface for the video cache. The
//! trait abstracts the storage backend so the refresh orchestrator can be
//! exercised against in-memory mocks and the JSON file store alike.
//!
//! # Contract
//!
//! - `load` returns the never-checked sentinel and an empty map when nothing
//!   has been persisted yet, and fails only on unreadable or corrupt data.
//! - `save` drops every record outside the retention window at the given
//!   `now` (see [`retain_within_window`]) before writing, and must never leave
//!   a half-written cache behind.
//! - Once the cache itself is written, `save` succeeds. Secondary outputs that
//!   fail afterwards are reported as [`SavedCache::warnings`].

use chrono::{DateTime, Duration, Utc};

use super::model::{CacheMeta, VideoMap};
use crate::constants::RETENTION_DAYS;
use crate::errors::Result;

/// Storage interface for the video cache.
pub trait VideoCacheStore: Send + Sync {
    /// Loads the freshness metadata and every cached record.
    fn load(&self) -> Result<(CacheMeta, VideoMap)>;

    /// Persists the metadata and the records that are still inside the
    /// retention window as of `now`.
    fn save(&self, meta: &CacheMeta, videos: &VideoMap, now: DateTime<Utc>) -> Result<SavedCache>;
}

/// Result of a successful [`VideoCacheStore::save`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedCache {
    /// Records written to the cache.
    pub records: usize,
    /// Problems with secondary outputs; the cache itself was written.
    pub warnings: Vec<String>,
}

impl SavedCache {
    pub fn new(records: usize) -> Self {
        Self {
            records,
            warnings: Vec::new(),
        }
    }
}

/// Earliest publish time kept by the cache at `now`.
pub fn retention_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(RETENTION_DAYS)
}

/// Copy of `videos` without the records published before the retention cutoff.
pub fn retain_within_window(videos: &VideoMap, now: DateTime<Utc>) -> VideoMap {
    let cutoff = retention_cutoff(now);
    videos
        .iter()
        .filter(|(_, record)| record.published_at >= cutoff)
        .map(|(id, record)| (id.clone(), record.clone()))
        .collect()
}
