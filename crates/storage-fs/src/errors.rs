//! Storage-specific error types for file operations.
//!
//! This module provides error types that wrap I/O and JSON errors and convert
//! them to the storage-agnostic error types defined in `hotscore_core`.

use std::path::PathBuf;

use hotscore_core::errors::{Error, StorageError};
use thiserror::Error;

/// Storage-specific errors that wrap `std::io`, `json5` and `serde_json` types.
///
/// These errors are internal to the storage layer and are converted to
/// `hotscore_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum FsStorageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },

    #[error("Invalid cache document {path}: {message}")]
    InvalidDocument { path: PathBuf, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<FsStorageError> for Error {
    fn from(err: FsStorageError) -> Self {
        let message = err.to_string();
        match err {
            FsStorageError::Read { .. } => Error::Storage(StorageError::ReadFailed(message)),
            FsStorageError::Parse { .. } | FsStorageError::InvalidDocument { .. } => {
                Error::Storage(StorageError::Corrupt(message))
            }
            FsStorageError::Write { .. } | FsStorageError::Serialization(_) => {
                Error::Storage(StorageError::WriteFailed(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_document_maps_to_corrupt() {
        let err: Error = FsStorageError::InvalidDocument {
            path: PathBuf::from("video_cache.json"),
            message: "expected an object".to_string(),
        }
        .into();

        assert!(matches!(err, Error::Storage(StorageError::Corrupt(_))));
        assert!(err.to_string().contains("video_cache.json"));
    }

    #[test]
    fn test_write_maps_to_write_failed() {
        let err: Error = FsStorageError::Write {
            path: PathBuf::from("/readonly/video_cache.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();

        assert!(matches!(err, Error::Storage(StorageError::WriteFailed(_))));
    }
}
