//! Video platform client trait definitions.
//!
//! This module defines the core `VideoPlatformClient` trait that every
//! upstream video platform implementation must provide.

use async_trait::async_trait;

use crate::errors::VideoDataError;
use crate::models::{ChannelRef, UploadPage, VideoStatistics};

/// Trait for video platform clients.
///
/// A client is a pure I/O boundary: it lists a channel's uploads and fetches
/// statistics for videos. It does not cache videos or decide when to refetch;
/// that is the refresh orchestrator's job.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use hotscore_video_data::provider::VideoPlatformClient;
///
/// struct MyPlatform {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl VideoPlatformClient for MyPlatform {
///     fn id(&self) -> &'static str {
///         "MY_PLATFORM"
///     }
///
///     // ... implement list_uploads and get_statistics
/// }
/// ```
#[async_trait]
pub trait VideoPlatformClient: Send + Sync {
    /// Unique identifier for this client.
    ///
    /// Should be a constant string like "YOUTUBE". Used for logging and errors.
    fn id(&self) -> &'static str;

    /// Maximum number of video ids accepted by one [`get_statistics`](Self::get_statistics) call.
    fn max_batch_size(&self) -> usize {
        50
    }

    /// List one page of a channel's uploads, newest first.
    ///
    /// # Arguments
    ///
    /// * `channel` - The configured channel reference (id or handle)
    /// * `cursor` - The `next_cursor` of the previous page, `None` for the first page
    ///
    /// # Returns
    ///
    /// The page on success. A channel that cannot be resolved yields
    /// [`VideoDataError::ChannelNotFound`].
    async fn list_uploads(
        &self,
        channel: &ChannelRef,
        cursor: Option<&str>,
    ) -> Result<UploadPage, VideoDataError>;

    /// Fetch statistics for a batch of videos.
    ///
    /// Videos unknown to the platform (deleted, private) are simply absent
    /// from the result; callers must not assume one entry per requested id.
    async fn get_statistics(
        &self,
        video_ids: &[String],
    ) -> Result<Vec<VideoStatistics>, VideoDataError>;
}
