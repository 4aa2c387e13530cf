//! Video cache module.
//!
//! This module provides the core types and services of the hot score pipeline:
//!
//! - [`model`] - Cached records and freshness metadata
//! - [`scoring`] - Hot score, channel average and growth computation
//! - [`store`] - Storage trait and retention window helpers
//! - [`refresh`] - Refresh orchestration service
//! - [`query`] - Dashboard filtering and ordering
//! - [`channels`] - Channel list parsing
//!
//! # Architecture
//!
//! ```text
//! RefreshService → VideoPlatformClient → video-data crate (YouTube)
//!       ↓
//! VideoCacheStore (JSON file)
//! ```
//!
//! The orchestrator only sees the two traits, so it can be exercised with
//! in-memory mocks and the storage backend can change without touching it.

pub mod channels;
pub mod model;
pub mod query;
pub mod refresh;
pub mod scoring;
pub mod store;


pub use channels::parse_channel_list;
pub use model::{CacheMeta, VideoMap, VideoRecord};
pub use query::{DashboardSummary, SortKey, VideoQuery};
pub use refresh::{
    merge_new_videos, ChannelRefreshResult, RefreshOutcome, RefreshPolicy, RefreshReport,
    RefreshService, RefreshServiceTrait, RefreshStatus,
};
pub use store::{retain_within_window, retention_cutoff, SavedCache, VideoCacheStore};
