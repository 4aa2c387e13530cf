//! Domain models for cached videos.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::PUBLISHED_AT_FORMAT;

/// Cached videos keyed by video id.
///
/// Ordered so that persisted files and exports are deterministic.
pub type VideoMap = BTreeMap<String, VideoRecord>;

/// One tracked video with its scores.
///
/// Scores are a snapshot taken when the record was inserted; they are never
/// recomputed afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Older cache files only carry the id as the map key
    #[serde(default)]
    pub video_id: String,
    pub title: String,
    pub views: u64,
    #[serde(with = "published_at_format")]
    pub published_at: DateTime<Utc>,
    pub hot_score: f64,
    pub hours_since: f64,
    #[serde(rename = "thumbnail", default)]
    pub thumbnail_url: String,
    pub video_url: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default, deserialize_with = "finite_or_zero")]
    pub channel_avg: f64,
    #[serde(default, deserialize_with = "finite_or_zero")]
    pub growth: f64,
}

impl VideoRecord {
    /// UTC calendar day the video was published.
    pub fn published_on(&self) -> NaiveDate {
        self.published_at.date_naive()
    }

    /// Returns true if the title contains `needle`, ignoring case.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Cache-wide freshness metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheMeta {
    /// When the upstream API was last consulted.
    pub last_checked: DateTime<Utc>,
}

impl CacheMeta {
    pub fn new(last_checked: DateTime<Utc>) -> Self {
        Self { last_checked }
    }

    /// Sentinel for a cache that has never been refreshed (2000-01-01T00:00:00Z).
    pub fn never_checked() -> Self {
        Self {
            last_checked: Utc
                .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }

    /// Returns true if more than `ttl` has elapsed since the last check.
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        now - self.last_checked > ttl
    }
}

impl Default for CacheMeta {
    fn default() -> Self {
        Self::never_checked()
    }
}

/// `published_at` as `%Y-%m-%d %H:%M` in UTC.
pub mod published_at_format {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::PUBLISHED_AT_FORMAT;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(PUBLISHED_AT_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, PUBLISHED_AT_FORMAT)
            .map(|naive| Utc.from_utc_datetime(&naive))
            .map_err(serde::de::Error::custom)
    }
}

/// Reads a float that older caches may hold as `null` or a non-finite value.
fn finite_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()).unwrap_or(0.0))
}
