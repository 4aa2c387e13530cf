//! On-disk layout of the cache file.
//!
//! The cache file is a flat JSON object: every key except [`LAST_CHECK_KEY`]
//! is a video id mapping to its record. The export file is the same object
//! without the freshness key.
//!
//! Files written by older releases may hold `NaN` or `Infinity` literals,
//! which is why the read side parses JSON5 rather than strict JSON.

use chrono::{NaiveDateTime, TimeZone, Utc};
use hotscore_core::constants::LAST_CHECK_FORMAT;
use hotscore_core::videos::{CacheMeta, VideoMap, VideoRecord};
use log::warn;
use serde::Serialize;
use serde_json::Value;

/// Key holding the freshness timestamp in the cache file.
pub const LAST_CHECK_KEY: &str = "_last_check";

/// Serialized form of the cache file.
#[derive(Debug, Serialize)]
pub struct CacheDocument<'a> {
    #[serde(rename = "_last_check")]
    pub last_check: String,
    #[serde(flatten)]
    pub videos: &'a VideoMap,
}

impl<'a> CacheDocument<'a> {
    pub fn new(meta: &CacheMeta, videos: &'a VideoMap) -> Self {
        Self {
            last_check: meta.last_checked.format(LAST_CHECK_FORMAT).to_string(),
            videos,
        }
    }
}

/// Decode a parsed cache file into metadata and records.
///
/// A missing freshness key yields the never-checked sentinel. Records that
/// lack a `video_id` take it from their key. A record that does not decode is
/// skipped; only a bad top level or freshness key fails the document.
pub fn decode_document(value: Value) -> Result<(CacheMeta, VideoMap), String> {
    let Value::Object(mut object) = value else {
        return Err("expected a JSON object at the top level".to_string());
    };

    let meta = match object.remove(LAST_CHECK_KEY) {
        None => CacheMeta::never_checked(),
        Some(Value::String(raw)) => {
            let naive = NaiveDateTime::parse_from_str(&raw, LAST_CHECK_FORMAT)
                .map_err(|e| format!("invalid {} '{}': {}", LAST_CHECK_KEY, raw, e))?;
            CacheMeta::new(Utc.from_utc_datetime(&naive))
        }
        Some(other) => {
            return Err(format!("{} must be a string, got {}", LAST_CHECK_KEY, other));
        }
    };

    let mut videos = VideoMap::new();
    for (key, entry) in object {
        let mut record: VideoRecord = match serde_json::from_value(entry) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable cached video '{}': {}", key, e);
                continue;
            }
        };
        if record.video_id.is_empty() {
            record.video_id = key.clone();
        }
        videos.insert(key, record);
    }

    Ok((meta, videos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_legacy_document() {
        let value = json!({
            "_last_check": "2026-10-18T09:15:00",
            "abc": {
                "title": "Legacy",
                "views": 1000,
                "published_at": "2026-10-18 07:00",
                "hot_score": 500.0,
                "hours_since": 2.0,
                "thumbnail": "https://i.ytimg.com/vi/abc/hqdefault.jpg",
                "video_url": "https://www.youtube.com/watch?v=abc",
                "channel_id": "UC1",
                "channel_avg": 500.0,
                "growth": 0.0
            }
        });

        let (meta, videos) = decode_document(value).unwrap();
        assert_eq!(
            meta.last_checked,
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 15, 0).unwrap()
        );
        assert_eq!(videos.len(), 1);
        assert_eq!(videos["abc"].video_id, "abc");
        assert_eq!(videos["abc"].views, 1000);
    }

    #[test]
    fn test_decode_without_last_check_is_never_checked() {
        let (meta, videos) = decode_document(json!({})).unwrap();
        assert_eq!(meta, CacheMeta::never_checked());
        assert!(videos.is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_timestamp() {
        let err = decode_document(json!({ "_last_check": "yesterday" })).unwrap_err();
        assert!(err.contains("_last_check"));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(decode_document(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_decode_skips_bad_record() {
        let value = json!({
            "_last_check": "2026-10-18T09:15:00",
            "abc": { "title": "No views" },
            "def": {
                "title": "Complete",
                "views": 10,
                "published_at": "2026-10-18 07:00",
                "hot_score": 5.0,
                "hours_since": 2.0,
                "video_url": "https://www.youtube.com/watch?v=def"
            }
        });

        let (_, videos) = decode_document(value).unwrap();
        assert_eq!(videos.len(), 1);
        assert!(videos.contains_key("def"));
    }

    #[test]
    fn test_document_places_last_check_next_to_records() {
        let videos = VideoMap::new();
        let meta = CacheMeta::new(Utc.with_ymd_and_hms(2026, 10, 18, 9, 15, 30).unwrap());
        let value = serde_json::to_value(CacheDocument::new(&meta, &videos)).unwrap();

        assert_eq!(value, json!({ "_last_check": "2026-10-18T09:15:30" }));
    }
}
