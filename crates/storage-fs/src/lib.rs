//! JSON file storage implementation for HotScore.
//!
//! This crate implements the storage traits defined in `hotscore-core` on top
//! of plain JSON files:
//! - The cache file, holding the freshness timestamp and every record
//! - An export snapshot of the records, rewritten on every save
//!
//! # Architecture
//!
//! This crate is the only place in the workspace that touches the filesystem
//! for cache data. The core is storage-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!     storage-fs (this crate)
//!              │
//!              ▼
//!   video_cache.json + export
//! ```

pub mod errors;
pub mod videos;

pub use errors::FsStorageError;
pub use videos::JsonFileCacheStore;
