//! Cache refresh orchestration.
//!
//! This module provides the `RefreshService`, which decides whether the video
//! cache is due for a refresh and, if so, walks every configured channel,
//! scores the new uploads and merges them into the persisted store.
//!
//! # Architecture
//!
//! ```text
//! RefreshService
//!       │
//!       ├─► VideoCacheStore     (load / save, retention)
//!       ├─► VideoPlatformClient (uploads, statistics)
//!       └─► scoring             (hot score, channel average, growth)
//! ```
//!
//! # Failure policy
//!
//! A channel that fails is reported and skipped; the cycle continues with the
//! next channel and still advances `last_checked`, so the failed channel is
//! retried on the next cycle rather than immediately. An unreadable cache is
//! replaced by an empty one. `refresh` therefore never fails; everything that
//! went wrong is described in the returned [`RefreshReport`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use hotscore_video_data::{ChannelRef, VideoPlatformClient, VideoStatistics};
use log::{debug, error, info, warn};

use super::model::{CacheMeta, VideoMap};
use super::scoring::score_batch;
use super::store::{retention_cutoff, VideoCacheStore};
use crate::constants::{CACHE_TTL_HOURS, DEFAULT_MAX_UPLOAD_PAGES, DEFAULT_STATS_BATCH_SIZE};
use crate::errors::{Error, Result};

// =============================================================================
// Policy
// =============================================================================

/// Tunables of a refresh cycle.
#[derive(Debug, Clone)]
pub struct RefreshPolicy {
    /// How long a refreshed cache stays fresh.
    pub ttl: Duration,
    /// Upper bound on video ids per statistics request.
    pub stats_batch_size: usize,
    /// Upper bound on upload pages walked per channel.
    pub max_upload_pages: usize,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(CACHE_TTL_HOURS),
            stats_batch_size: DEFAULT_STATS_BATCH_SIZE,
            max_upload_pages: DEFAULT_MAX_UPLOAD_PAGES,
        }
    }
}

// =============================================================================
// Refresh Result Types
// =============================================================================

/// Outcome of one channel within a refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelRefreshResult {
    /// The channel was listed; new videos (possibly none) were merged.
    Updated {
        channel: String,
        /// Uploads inside the retention window seen in the feed.
        uploads_seen: usize,
        /// Records inserted into the store.
        videos_added: usize,
        /// New uploads whose statistics were missing or failed to load.
        missing_stats: usize,
    },
    /// The channel could not be listed; nothing was merged for it.
    Failed {
        channel: String,
        error: String,
        /// Whether a later cycle is expected to succeed.
        transient: bool,
    },
}

impl ChannelRefreshResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn videos_added(&self) -> usize {
        match self {
            Self::Updated { videos_added, .. } => *videos_added,
            Self::Failed { .. } => 0,
        }
    }
}

/// Whether a cycle contacted the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// The cache was within its TTL; nothing was fetched or written.
    FreshCache,
    /// The cache was stale and every channel was processed.
    Refreshed,
}

impl fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshStatus::FreshCache => write!(f, "Cache is fresh"),
            RefreshStatus::Refreshed => write!(f, "Cache refreshed"),
        }
    }
}

/// Report of a refresh cycle.
#[derive(Debug, Clone)]
pub struct RefreshReport {
    pub status: RefreshStatus,
    /// Freshness timestamp after the cycle.
    pub last_checked: DateTime<Utc>,
    /// One entry per configured channel, in configuration order.
    pub channels: Vec<ChannelRefreshResult>,
    /// Total records inserted this cycle.
    pub videos_added: usize,
    /// Records written by the store; `None` if nothing was saved.
    pub records_persisted: Option<usize>,
    /// Load and save problems that were recovered from.
    pub storage_warnings: Vec<String>,
}

impl RefreshReport {
    fn fresh(meta: &CacheMeta, storage_warnings: Vec<String>) -> Self {
        Self {
            status: RefreshStatus::FreshCache,
            last_checked: meta.last_checked,
            channels: Vec::new(),
            videos_added: 0,
            records_persisted: None,
            storage_warnings,
        }
    }

    /// Channels that failed this cycle.
    pub fn failed_channels(&self) -> Vec<&ChannelRefreshResult> {
        self.channels.iter().filter(|c| c.is_failed()).collect()
    }

    /// Check if the cycle had no channel or storage failures.
    pub fn is_success(&self) -> bool {
        self.storage_warnings.is_empty() && !self.channels.iter().any(|c| c.is_failed())
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        match self.status {
            RefreshStatus::FreshCache => format!(
                "{} (last checked {})",
                self.status,
                self.last_checked.format("%Y-%m-%d %H:%M UTC")
            ),
            RefreshStatus::Refreshed => {
                let failed = self.failed_channels().len();
                if failed == 0 {
                    format!(
                        "{}: {} new videos from {} channels",
                        self.status,
                        self.videos_added,
                        self.channels.len()
                    )
                } else {
                    format!(
                        "{}: {} new videos, {} of {} channels failed",
                        self.status,
                        self.videos_added,
                        failed,
                        self.channels.len()
                    )
                }
            }
        }
    }
}

/// Records returned to the caller together with the cycle report.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub videos: VideoMap,
    pub report: RefreshReport,
}

// =============================================================================
// RefreshService
// =============================================================================

/// Trait for the refresh entry point used by front ends.
#[async_trait]
pub trait RefreshServiceTrait: Send + Sync {
    /// Refresh the cache if it is stale and return every cached record.
    async fn refresh(&self, channel_ids: &[String]) -> RefreshOutcome;
}

/// Orchestrates cache freshness, fetching, scoring and persistence.
pub struct RefreshService<C, S>
where
    C: VideoPlatformClient,
    S: VideoCacheStore,
{
    client: Arc<C>,
    store: Arc<S>,
    policy: RefreshPolicy,
}

/// What a channel contributed before merging.
struct ChannelFetch {
    uploads_seen: usize,
    stats: Vec<VideoStatistics>,
    missing_stats: usize,
}

impl<C, S> RefreshService<C, S>
where
    C: VideoPlatformClient,
    S: VideoCacheStore,
{
    pub fn new(client: Arc<C>, store: Arc<S>) -> Self {
        Self::with_policy(client, store, RefreshPolicy::default())
    }

    pub fn with_policy(client: Arc<C>, store: Arc<S>, policy: RefreshPolicy) -> Self {
        Self {
            client,
            store,
            policy,
        }
    }

    /// Run one cycle as of `now`.
    ///
    /// `now` is the cycle start: it decides staleness, bounds the retention
    /// window, scores every video and becomes the new `last_checked`.
    pub async fn refresh_at(&self, channel_ids: &[String], now: DateTime<Utc>) -> RefreshOutcome {
        let mut storage_warnings = Vec::new();

        let (mut meta, mut videos) = match self.store.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("Failed to load video cache, starting empty: {}", e);
                storage_warnings.push(e.to_string());
                (CacheMeta::never_checked(), VideoMap::new())
            }
        };

        if !meta.is_stale(now, self.policy.ttl) {
            info!(
                "Video cache is fresh (last checked {}), skipping refresh",
                meta.last_checked
            );
            return RefreshOutcome {
                videos,
                report: RefreshReport::fresh(&meta, storage_warnings),
            };
        }

        info!(
            "Refreshing video cache for {} channels ({} cached videos)",
            channel_ids.len(),
            videos.len()
        );

        let mut channels = Vec::with_capacity(channel_ids.len());
        let mut videos_added = 0;

        for channel_id in channel_ids {
            let result = match self.fetch_channel(channel_id, &videos, now).await {
                Ok(fetch) => {
                    let added = merge_new_videos(&mut videos, &fetch.stats, now);
                    videos_added += added;
                    info!(
                        "Channel {}: {} uploads in window, {} new videos",
                        channel_id, fetch.uploads_seen, added
                    );
                    ChannelRefreshResult::Updated {
                        channel: channel_id.clone(),
                        uploads_seen: fetch.uploads_seen,
                        videos_added: added,
                        missing_stats: fetch.missing_stats,
                    }
                }
                Err(e) => {
                    error!("Failed to refresh channel {}: {}", channel_id, e);
                    ChannelRefreshResult::Failed {
                        channel: channel_id.clone(),
                        transient: e.is_transient(),
                        error: e.to_string(),
                    }
                }
            };
            channels.push(result);
        }

        meta.last_checked = now;

        let records_persisted = match self.store.save(&meta, &videos, now) {
            Ok(saved) => {
                for warning in &saved.warnings {
                    warn!("Video cache saved with a warning: {}", warning);
                }
                storage_warnings.extend(saved.warnings);
                Some(saved.records)
            }
            Err(e) => {
                error!("Failed to save video cache: {}", e);
                storage_warnings.push(e.to_string());
                None
            }
        };

        let report = RefreshReport {
            status: RefreshStatus::Refreshed,
            last_checked: meta.last_checked,
            channels,
            videos_added,
            records_persisted,
            storage_warnings,
        };
        info!("{}", report.summary());

        RefreshOutcome { videos, report }
    }

    /// List a channel's uploads inside the window and fetch statistics for the
    /// ones not cached yet.
    async fn fetch_channel(
        &self,
        channel_id: &str,
        cached: &VideoMap,
        now: DateTime<Utc>,
    ) -> Result<ChannelFetch> {
        let channel = ChannelRef::parse(channel_id).ok_or_else(|| {
            Error::Configuration(format!("Invalid channel reference '{}'", channel_id))
        })?;
        let cutoff = retention_cutoff(now);

        let mut uploads_seen = 0;
        let mut new_ids: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cursor: Option<String> = None;

        'pages: for page_number in 1..=self.policy.max_upload_pages {
            let page = self
                .client
                .list_uploads(&channel, cursor.as_deref())
                .await
                .map_err(|e| Error::upstream_channel(channel_id, e))?;

            for item in page.items {
                // Feeds are newest first: the first old upload ends the walk.
                if item.published_at < cutoff {
                    debug!(
                        "Channel {}: reached uploads older than {} on page {}",
                        channel_id, cutoff, page_number
                    );
                    break 'pages;
                }
                uploads_seen += 1;
                if !cached.contains_key(&item.video_id) && seen.insert(item.video_id.clone()) {
                    new_ids.push(item.video_id);
                }
            }

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }

            if page_number == self.policy.max_upload_pages {
                warn!(
                    "Channel {}: stopped after {} upload pages",
                    channel_id, page_number
                );
            }
        }

        if new_ids.is_empty() {
            return Ok(ChannelFetch {
                uploads_seen,
                stats: Vec::new(),
                missing_stats: 0,
            });
        }

        let batch_size = self
            .policy
            .stats_batch_size
            .min(self.client.max_batch_size())
            .max(1);

        let mut stats = Vec::with_capacity(new_ids.len());
        let mut missing_stats = 0;

        for batch in new_ids.chunks(batch_size) {
            match self.fetch_statistics(batch).await {
                Ok(batch_stats) => {
                    let returned: HashSet<&str> =
                        batch_stats.iter().map(|s| s.video_id.as_str()).collect();
                    missing_stats += batch
                        .iter()
                        .filter(|id| !returned.contains(id.as_str()))
                        .count();
                    stats.extend(
                        batch_stats
                            .into_iter()
                            .filter(|s| s.published_at >= cutoff),
                    );
                }
                Err(e) => {
                    warn!("Channel {}: {}; skipping {} videos", channel_id, e, batch.len());
                    missing_stats += batch.len();
                }
            }
        }

        Ok(ChannelFetch {
            uploads_seen,
            stats,
            missing_stats,
        })
    }

    async fn fetch_statistics(&self, video_ids: &[String]) -> Result<Vec<VideoStatistics>> {
        let stats = self
            .client
            .get_statistics(video_ids)
            .await
            .map_err(|e| Error::UpstreamStats(e.to_string()))?;

        if stats.is_empty() {
            return Err(Error::UpstreamStats(format!(
                "no statistics returned for {} videos",
                video_ids.len()
            )));
        }
        Ok(stats)
    }
}

#[async_trait]
impl<C, S> RefreshServiceTrait for RefreshService<C, S>
where
    C: VideoPlatformClient,
    S: VideoCacheStore,
{
    async fn refresh(&self, channel_ids: &[String]) -> RefreshOutcome {
        self.refresh_at(channel_ids, Utc::now()).await
    }
}

/// Score a channel's batch and insert the records that are not cached yet.
///
/// Returns the number of inserted records. Existing records are never
/// overwritten.
pub fn merge_new_videos(
    videos: &mut VideoMap,
    batch: &[VideoStatistics],
    now: DateTime<Utc>,
) -> usize {
    let mut added = 0;
    for record in score_batch(batch, now) {
        if videos.contains_key(&record.video_id) {
            debug!("Video {} already cached, keeping existing record", record.video_id);
            continue;
        }
        videos.insert(record.video_id.clone(), record);
        added += 1;
    }
    added
}
