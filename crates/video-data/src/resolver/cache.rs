//! Memo of channel reference → uploads playlist.
//!
//! Resolving a channel costs one API call (and quota unit) per lookup, and the
//! answer never changes for the lifetime of a channel. The cache is owned by a
//! client instance and can be shared between clients through an `Arc`, so
//! tests get a fresh, isolated memo simply by building a new client.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::models::{ChannelRef, PlaylistId};

/// Thread-safe memo of resolved uploads playlists.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<ChannelRef, PlaylistId>>,
}

impl ResolutionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously resolved channel.
    pub fn get(&self, channel: &ChannelRef) -> Option<PlaylistId> {
        match self.entries.read() {
            Ok(guard) => guard.get(channel).cloned(),
            Err(poisoned) => poisoned.into_inner().get(channel).cloned(),
        }
    }

    /// Remember the uploads playlist for a channel.
    pub fn insert(&self, channel: ChannelRef, playlist: PlaylistId) {
        debug!("Caching uploads playlist {} for {}", playlist, channel);
        match self.entries.write() {
            Ok(mut guard) => {
                guard.insert(channel, playlist);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(channel, playlist);
            }
        }
    }

    /// Number of memoised channels.
    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every entry.
    pub fn clear(&self) {
        match self.entries.write() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}
