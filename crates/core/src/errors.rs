//! Core error types for HotScore.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (filesystem, JSON) are converted to these types by the storage layer.

use hotscore_video_data::VideoDataError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the video pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    /// A single channel's listing or resolution failed.
    #[error("Channel {channel} failed: {source}")]
    UpstreamChannel {
        channel: String,
        #[source]
        source: VideoDataError,
    },

    /// A statistics batch failed or came back empty.
    #[error("Statistics fetch failed: {0}")]
    UpstreamStats(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Storage-agnostic error type for cache persistence.
///
/// This enum uses `String` for all error details, allowing each storage
/// backend to convert its own errors into this format.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The persisted cache exists but could not be read.
    #[error("Failed to read cache: {0}")]
    ReadFailed(String),

    /// The persisted cache was read but is malformed.
    #[error("Cache is corrupt: {0}")]
    Corrupt(String),

    /// The cache could not be written.
    #[error("Failed to write cache: {0}")]
    WriteFailed(String),
}

impl Error {
    /// Wrap a client error with the channel it concerns.
    pub fn upstream_channel(channel: impl Into<String>, source: VideoDataError) -> Self {
        Error::UpstreamChannel {
            channel: channel.into(),
            source,
        }
    }

    /// Returns true if a later refresh cycle may succeed where this one failed.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::UpstreamChannel { source, .. } => source.is_transient(),
            Error::UpstreamStats(_) => true,
            _ => false,
        }
    }
}
