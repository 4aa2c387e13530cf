//! HotScore Core - Domain entities, services, and traits.
//!
//! This crate contains the video cache and scoring logic for HotScore.
//! It is storage-agnostic and defines traits that are implemented by the
//! `storage-fs` crate; upstream access goes through the `video-data` crate.

pub mod constants;
pub mod errors;
pub mod videos;

pub use videos::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
pub use errors::StorageError;
