//! YouTube Data API v3 client.
//!
//! This client uses three endpoints:
//! - `channels.list` to resolve a channel id or handle to its uploads playlist
//! - `playlistItems.list` to page through that playlist, newest first
//! - `videos.list` to fetch view counts and snippets for up to 50 videos at once
//!
//! Every call costs one quota unit against the API key's daily budget.
//! API documentation: https://developers.google.com/youtube/v3/docs

mod models;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::VideoDataError;
use crate::models::{ChannelRef, PlaylistId, UploadItem, UploadPage, VideoStatistics};
use crate::provider::VideoPlatformClient;
use crate::resolver::ResolutionCache;

use models::{
    ChannelListResponse, ErrorResponse, PlaylistItem, PlaylistItemListResponse, VideoItem,
    VideoListResponse,
};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const PROVIDER_ID: &str = "YOUTUBE";

/// Page size for `playlistItems.list` and batch size for `videos.list` (API maximum).
const MAX_RESULTS: usize = 50;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Canonical watch URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

// ============================================================================
// YouTubeClient
// ============================================================================

/// YouTube Data API v3 client.
///
/// Holds the API key and the memo of resolved uploads playlists. The memo is
/// per instance; share it across clients with [`with_resolution_cache`](Self::with_resolution_cache).
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
    resolutions: Arc<ResolutionCache>,
}

impl YouTubeClient {
    /// Create a new client with the given API key and the default timeout.
    pub fn new(api_key: String) -> Self {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom per-request timeout.
    pub fn with_timeout(api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
            resolutions: Arc::new(ResolutionCache::new()),
        }
    }

    /// Use a shared resolution cache instead of the instance's own.
    pub fn with_resolution_cache(mut self, cache: Arc<ResolutionCache>) -> Self {
        self.resolutions = cache;
        self
    }

    /// Point the client at another API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The memo of resolved uploads playlists.
    pub fn resolution_cache(&self) -> &Arc<ResolutionCache> {
        &self.resolutions
    }

    /// Make a GET request to the API and decode the JSON body.
    ///
    /// `channel` names the channel a request is about, so that a 404 can be
    /// reported as that channel missing.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        channel: Option<&ChannelRef>,
    ) -> Result<T, VideoDataError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        debug!("YouTube request: {} with {} params", endpoint, params.len());

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VideoDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    VideoDataError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, &body, channel));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            VideoDataError::InvalidResponse(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }

    /// Resolve a channel to its uploads playlist, consulting the memo first.
    async fn uploads_playlist(&self, channel: &ChannelRef) -> Result<PlaylistId, VideoDataError> {
        if let Some(playlist) = self.resolutions.get(channel) {
            return Ok(playlist);
        }

        let lookup = match channel {
            ChannelRef::Id(id) => ("id", id.as_str()),
            ChannelRef::Handle(handle) => ("forHandle", handle.as_str()),
        };

        let response: ChannelListResponse = self
            .fetch(
                "channels",
                &[("part", "contentDetails"), lookup],
                Some(channel),
            )
            .await?;

        let playlist = uploads_playlist_from(&response, channel)?;
        self.resolutions.insert(channel.clone(), playlist.clone());
        Ok(playlist)
    }

    async fn fetch_statistics_chunk(
        &self,
        video_ids: &[String],
    ) -> Result<Vec<VideoStatistics>, VideoDataError> {
        let ids = video_ids.join(",");
        let response: VideoListResponse = self
            .fetch(
                "videos",
                &[("part", "statistics,snippet"), ("id", ids.as_str())],
                None,
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(statistics_from_item)
            .collect())
    }
}

#[async_trait]
impl VideoPlatformClient for YouTubeClient {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn max_batch_size(&self) -> usize {
        MAX_RESULTS
    }

    async fn list_uploads(
        &self,
        channel: &ChannelRef,
        cursor: Option<&str>,
    ) -> Result<UploadPage, VideoDataError> {
        let playlist = self.uploads_playlist(channel).await?;
        let max_results = MAX_RESULTS.to_string();

        let mut params = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", &*playlist),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = cursor {
            params.push(("pageToken", token));
        }

        // The uploads playlist of a deleted or terminated channel 404s.
        let response: PlaylistItemListResponse = self
            .fetch("playlistItems", &params, Some(channel))
            .await?;

        Ok(UploadPage {
            items: response
                .items
                .into_iter()
                .filter_map(upload_item_from)
                .collect(),
            next_cursor: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn get_statistics(
        &self,
        video_ids: &[String],
    ) -> Result<Vec<VideoStatistics>, VideoDataError> {
        let mut statistics = Vec::with_capacity(video_ids.len());
        for chunk in video_ids.chunks(MAX_RESULTS) {
            statistics.extend(self.fetch_statistics_chunk(chunk).await?);
        }
        Ok(statistics)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Map a non-success response to an error.
///
/// A 404 on a request about `channel` means the channel is gone.
fn map_error_status(
    status: StatusCode,
    body: &str,
    channel: Option<&ChannelRef>,
) -> VideoDataError {
    let parsed = serde_json::from_str::<ErrorResponse>(body).ok();

    if status == StatusCode::NOT_FOUND {
        if let Some(channel) = channel {
            return VideoDataError::ChannelNotFound(channel.to_string());
        }
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return VideoDataError::RateLimited {
            provider: PROVIDER_ID.to_string(),
        };
    }

    if status == StatusCode::FORBIDDEN {
        if let Some(error) = parsed.as_ref().map(|r| &r.error) {
            if error.has_reason("quotaExceeded") || error.has_reason("dailyLimitExceeded") {
                return VideoDataError::QuotaExceeded {
                    provider: PROVIDER_ID.to_string(),
                };
            }
            if error.has_reason("rateLimitExceeded") {
                return VideoDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                };
            }
        }
    }

    let message = match parsed {
        Some(r) if !r.error.message.is_empty() => {
            format!("HTTP {} - {}", status.as_u16(), r.error.message)
        }
        _ => format!("HTTP {} - {}", status.as_u16(), body),
    };

    VideoDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message,
    }
}

fn uploads_playlist_from(
    response: &ChannelListResponse,
    channel: &ChannelRef,
) -> Result<PlaylistId, VideoDataError> {
    let item = response
        .items
        .first()
        .ok_or_else(|| VideoDataError::ChannelNotFound(channel.to_string()))?;

    item.content_details
        .as_ref()
        .and_then(|d| d.related_playlists.uploads.as_deref())
        .filter(|p| !p.is_empty())
        .map(PlaylistId::from)
        .ok_or_else(|| {
            VideoDataError::InvalidResponse(format!(
                "Channel {} has no uploads playlist",
                item.id
            ))
        })
}

fn upload_item_from(item: PlaylistItem) -> Option<UploadItem> {
    let details = item.content_details;
    let snippet = item.snippet;

    let video_id = details
        .as_ref()
        .and_then(|d| d.video_id.clone())
        .or_else(|| {
            snippet
                .as_ref()
                .and_then(|s| s.resource_id.as_ref())
                .and_then(|r| r.video_id.clone())
        })?;

    let published_at = details
        .as_ref()
        .and_then(|d| d.video_published_at)
        .or_else(|| snippet.as_ref().and_then(|s| s.published_at));

    let Some(published_at) = published_at else {
        debug!("Skipping upload {} without a publish time", video_id);
        return None;
    };

    let thumbnail_url = snippet
        .as_ref()
        .and_then(|s| s.thumbnails.as_ref())
        .and_then(|t| t.best_url())
        .unwrap_or_default()
        .to_string();

    Some(UploadItem {
        title: snippet.and_then(|s| s.title).unwrap_or_default(),
        thumbnail_url,
        video_id,
        published_at,
    })
}

fn statistics_from_item(item: VideoItem) -> Option<VideoStatistics> {
    let Some(snippet) = item.snippet else {
        warn!("Video {} returned without a snippet", item.id);
        return None;
    };

    let views = item
        .statistics
        .and_then(|s| s.view_count)
        .unwrap_or_default();

    Some(VideoStatistics {
        thumbnail_url: snippet
            .thumbnails
            .as_ref()
            .and_then(|t| t.best_url())
            .unwrap_or_default()
            .to_string(),
        video_id: item.id,
        views,
        published_at: snippet.published_at,
        title: snippet.title,
        channel_id: snippet.channel_id,
    })
}

// ============================================================================
// Tests
// ============================================================================
