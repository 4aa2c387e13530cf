use std::sync::Arc;

/// Uploads playlist identifier discovered at runtime
pub type PlaylistId = Arc<str>;
