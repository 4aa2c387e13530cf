//! Dashboard filtering and ordering over cached records.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::model::{VideoMap, VideoRecord};

/// Sort order of the dashboard listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Highest hot score first
    #[default]
    HotScore,
    /// Most viewed first
    Views,
    /// Newest first
    HoursSince,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::HotScore => "hot_score",
            SortKey::Views => "views",
            SortKey::HoursSince => "hours_since",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "hot_score" | "hot" => Ok(SortKey::HotScore),
            "views" => Ok(SortKey::Views),
            "hours_since" | "newest" => Ok(SortKey::HoursSince),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

/// Filters and ordering applied to the cached records.
///
/// Every bound is inclusive. An empty query returns all records by hot score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoQuery {
    pub sort: SortKey,
    /// Case-insensitive title substring.
    pub search: Option<String>,
    pub min_views: u64,
    pub hot_score_range: Option<(f64, f64)>,
    /// UTC publish dates.
    pub published_range: Option<(NaiveDate, NaiveDate)>,
}

impl VideoQuery {
    pub fn matches(&self, record: &VideoRecord) -> bool {
        if record.views < self.min_views {
            return false;
        }

        if let Some(needle) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !record.title_contains(needle) {
                return false;
            }
        }

        if let Some((low, high)) = self.hot_score_range {
            if record.hot_score < low || record.hot_score > high {
                return false;
            }
        }

        if let Some((from, to)) = self.published_range {
            let day = record.published_on();
            if day < from || day > to {
                return false;
            }
        }

        true
    }

    /// Matching records in display order; ties are broken by video id.
    pub fn apply(&self, videos: &VideoMap) -> Vec<VideoRecord> {
        let mut rows: Vec<VideoRecord> = videos
            .values()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let primary = match self.sort {
                SortKey::HotScore => b.hot_score.total_cmp(&a.hot_score),
                SortKey::Views => b.views.cmp(&a.views),
                SortKey::HoursSince => a.hours_since.total_cmp(&b.hours_since),
            };
            primary.then_with(|| a.video_id.cmp(&b.video_id))
        });

        rows
    }
}

/// Headline numbers shown above the listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub video_count: usize,
    pub channel_count: usize,
    pub top_hot_score: Option<f64>,
}

impl DashboardSummary {
    pub fn from_records(records: &[VideoRecord]) -> Self {
        let channels: HashSet<&str> = records.iter().map(|r| r.channel_id.as_str()).collect();
        let top_hot_score = records
            .iter()
            .map(|r| r.hot_score)
            .max_by(|a, b| a.total_cmp(b));

        Self {
            video_count: records.len(),
            channel_count: channels.len(),
            top_hot_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(video_id: &str, title: &str, views: u64, hot_score: f64, day: u32) -> VideoRecord {
        VideoRecord {
            video_id: video_id.to_string(),
            title: title.to_string(),
            views,
            published_at: Utc.with_ymd_and_hms(2026, 10, day, 9, 30, 0).unwrap(),
            hot_score,
            hours_since: f64::from(18 - day) * 24.0,
            thumbnail_url: String::new(),
            video_url: format!("https://www.youtube.com/watch?v={}", video_id),
            channel_id: if day % 2 == 0 { "UC1" } else { "UC2" }.to_string(),
            channel_avg: 0.0,
            growth: 0.0,
        }
    }

    fn sample() -> VideoMap {
        [
            record("a", "Rust in Production", 1_000, 12.5, 10),
            record("b", "Morning shorts", 50_000, 300.0, 15),
            record("c", "RUST tips", 20, 12.5, 17),
            record("d", "Travel vlog", 8_000, 40.0, 2),
        ]
        .into_iter()
        .map(|r| (r.video_id.clone(), r))
        .collect()
    }

    fn ids(rows: &[VideoRecord]) -> Vec<&str> {
        rows.iter().map(|r| r.video_id.as_str()).collect()
    }

    #[test]
    fn test_default_sort_is_hot_score_desc_with_id_tiebreak() {
        let rows = VideoQuery::default().apply(&sample());
        assert_eq!(ids(&rows), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_by_views() {
        let query = VideoQuery {
            sort: SortKey::Views,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&sample())), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_newest_first() {
        let query = VideoQuery {
            sort: SortKey::HoursSince,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&sample())), vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_search_ignores_case() {
        let query = VideoQuery {
            search: Some("rust".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&sample())), vec!["a", "c"]);
    }

    #[test]
    fn test_min_views_and_hot_score_range_are_inclusive() {
        let query = VideoQuery {
            min_views: 1_000,
            hot_score_range: Some((12.5, 40.0)),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&sample())), vec!["d", "a"]);
    }

    #[test]
    fn test_published_range_is_inclusive() {
        let query = VideoQuery {
            published_range: Some((
                NaiveDate::from_ymd_opt(2026, 10, 10).unwrap(),
                NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
            )),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&sample())), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("hot-score".parse::<SortKey>(), Ok(SortKey::HotScore));
        assert_eq!("Views".parse::<SortKey>(), Ok(SortKey::Views));
        assert_eq!("newest".parse::<SortKey>(), Ok(SortKey::HoursSince));
        assert!("likes".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_summary() {
        let rows = VideoQuery::default().apply(&sample());
        let summary = DashboardSummary::from_records(&rows);

        assert_eq!(summary.video_count, 4);
        assert_eq!(summary.channel_count, 2);
        assert_eq!(summary.top_hot_score, Some(300.0));
        assert_eq!(DashboardSummary::from_records(&[]).top_hot_score, None);
    }
}
