//! HotScore Video Data Crate
//!
//! This crate is the I/O boundary between HotScore and the video platform.
//! It lists channel uploads and fetches per-video statistics; it never caches
//! videos or decides when to refetch them.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   Channel list   |  ("UC…", "@handle", channel URLs)
//! +------------------+
//!          |
//!          v
//! +------------------+     +-------------------+
//! |    ChannelRef    | --> |  ResolutionCache  |  (uploads playlist memo)
//! +------------------+     +-------------------+
//!          |
//!          v
//! +---------------------+
//! | VideoPlatformClient |  (YouTube Data API v3)
//! +---------------------+
//!          |
//!          v
//! +---------------------------------+
//! | UploadPage / VideoStatistics    |
//! +---------------------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ChannelRef`] - Configured channel (canonical id or handle)
//! - [`UploadItem`] / [`UploadPage`] - Entries of a channel's upload feed
//! - [`VideoStatistics`] - View count and snippet of one video
//! - [`VideoPlatformClient`] - The client trait
//! - [`YouTubeClient`] - YouTube Data API v3 implementation
//! - [`VideoDataError`] - Errors returned by clients

pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;

pub use errors::VideoDataError;

pub use models::{ChannelRef, PlaylistId, UploadItem, UploadPage, VideoStatistics};

pub use provider::youtube::{watch_url, YouTubeClient};
pub use provider::VideoPlatformClient;

pub use resolver::ResolutionCache;
