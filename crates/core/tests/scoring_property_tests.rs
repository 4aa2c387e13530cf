//! Property-based integration tests for scoring, retention and queries.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use hotscore_core::videos::scoring::{channel_averages, growth, hot_score, hours_since, score_batch};
use hotscore_core::videos::{retain_within_window, retention_cutoff, SortKey, VideoMap, VideoQuery};
use hotscore_video_data::VideoStatistics;
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

// =============================================================================
// Generators
// =============================================================================

/// Generates statistics for a video published up to 40 days ago.
fn arb_statistics() -> impl Strategy<Value = VideoStatistics> {
    (
        "[a-zA-Z0-9_-]{11}",   // video_id
        0u64..50_000_000,      // views
        0i64..40 * 24 * 60,    // minutes since publish
        prop_oneof![Just("UC1"), Just("UC2"), Just("UC3")],
    )
        .prop_map(|(video_id, views, minutes, channel_id)| VideoStatistics {
            title: format!("Video {}", video_id),
            thumbnail_url: String::new(),
            video_id,
            views,
            published_at: now() - Duration::minutes(minutes),
            channel_id: channel_id.to_string(),
        })
}

/// Generates a scored cache of up to `max_count` videos.
fn arb_video_map(max_count: usize) -> impl Strategy<Value = VideoMap> {
    proptest::collection::vec(arb_statistics(), 0..=max_count).prop_map(|batch| {
        score_batch(&batch, now())
            .into_iter()
            .map(|record| (record.video_id.clone(), record))
            .collect()
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Elapsed hours are never negative, whatever the publish time.
    #[test]
    fn prop_hours_since_is_non_negative(offset_minutes in -10_000i64..100_000) {
        let published = now() - Duration::minutes(offset_minutes);
        prop_assert!(hours_since(published, now()) >= 0.0);
    }

    /// Hot scores are non-negative and zero views always score zero.
    #[test]
    fn prop_hot_score_is_non_negative(views in 0u64..u64::from(u32::MAX), hours in -100.0f64..10_000.0) {
        prop_assert!(hot_score(views, hours) >= 0.0);
        prop_assert_eq!(hot_score(0, hours), 0.0);
    }

    /// Growth values of one channel's batch cancel out around its average.
    #[test]
    fn prop_growth_sums_to_zero_within_channel(scores in proptest::collection::vec(0.01f64..100_000.0, 1..30)) {
        let averages = channel_averages(scores.iter().map(|s| ("UC1", *s)));
        let avg = averages["UC1"];
        let total: f64 = scores.iter().map(|s| growth(*s, avg)).sum();
        prop_assert!(total.abs() < 1e-6 * scores.len() as f64);
    }

    /// Every record carries its batch's channel average.
    #[test]
    fn prop_records_share_channel_average(batch in proptest::collection::vec(arb_statistics(), 1..40)) {
        let records = score_batch(&batch, now());
        prop_assert_eq!(records.len(), batch.len());

        for channel_id in ["UC1", "UC2", "UC3"] {
            let mut avgs = records
                .iter()
                .filter(|r| r.channel_id == channel_id)
                .map(|r| r.channel_avg);
            if let Some(first) = avgs.next() {
                prop_assert!(avgs.all(|avg| avg == first));
            }
        }
    }

    /// Retention keeps exactly the records published on or after the cutoff.
    #[test]
    fn prop_retention_partitions_by_cutoff(videos in arb_video_map(60)) {
        let cutoff = retention_cutoff(now());
        let kept = retain_within_window(&videos, now());

        for (id, record) in &videos {
            prop_assert_eq!(kept.contains_key(id), record.published_at >= cutoff);
        }
    }

    /// Query results match their filters and respect the sort order.
    #[test]
    fn prop_query_results_are_filtered_and_ordered(videos in arb_video_map(60), min_views in 0u64..1_000_000) {
        let query = VideoQuery {
            sort: SortKey::HotScore,
            min_views,
            ..VideoQuery::default()
        };
        let rows = query.apply(&videos);

        prop_assert!(rows.iter().all(|r| r.views >= min_views));
        prop_assert_eq!(
            rows.len(),
            videos.values().filter(|r| r.views >= min_views).count()
        );
        prop_assert!(rows.windows(2).all(|w| w[0].hot_score >= w[1].hot_score));
    }
}
