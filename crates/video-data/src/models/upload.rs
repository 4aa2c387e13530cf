use chrono::{DateTime, Utc};

/// One entry of a channel's upload feed.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadItem {
    pub video_id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail_url: String,
}

/// A single page of a channel's upload feed.
///
/// Items are ordered newest first. `next_cursor` is `None` on the last page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadPage {
    pub items: Vec<UploadItem>,
    pub next_cursor: Option<String>,
}

/// Statistics and snippet data for one video.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoStatistics {
    pub video_id: String,
    pub views: u64,
    pub published_at: DateTime<Utc>,
    pub title: String,
    pub thumbnail_url: String,
    pub channel_id: String,
}
