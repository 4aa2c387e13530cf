//! Video data models
//!
//! This module contains the data types exchanged with video platforms:
//! - `channel` - Configured channel reference (ChannelRef)
//! - `upload` - Upload feed entries and pages (UploadItem, UploadPage) and video
//!   statistics (VideoStatistics)
//! - `types` - Identifier aliases (PlaylistId)

mod channel;
mod types;
mod upload;

pub use channel::ChannelRef;
pub use types::PlaylistId;
pub use upload::{UploadItem, UploadPage, VideoStatistics};
