//! JSON file storage for the video cache.

mod model;
mod repository;

pub use model::{CacheDocument, LAST_CHECK_KEY};
pub use repository::JsonFileCacheStore;
