//! Hot score computation.
//!
//! Pure functions, no I/O. Every intermediate value is kept at full precision;
//! rounding to two decimals happens only when a [`VideoRecord`] is built, so
//! the channel average is the mean of the unrounded hot scores.

use std::collections::HashMap;

use chrono::{DateTime, Timelike, Utc};
use hotscore_video_data::{watch_url, VideoStatistics};
use log::warn;

use super::model::VideoRecord;
use crate::constants::FUTURE_PUBLISH_HOURS;

/// Hours elapsed between publish time and `now`.
///
/// A publish time in the future (clock skew, scheduled premieres) yields
/// [`FUTURE_PUBLISH_HOURS`] instead of a negative value.
pub fn hours_since(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours = (now - published_at).num_milliseconds() as f64 / 3_600_000.0;
    if hours < 0.0 {
        warn!(
            "Publish time {} is {:.2}h in the future; assuming {:.4}h elapsed",
            published_at, -hours, FUTURE_PUBLISH_HOURS
        );
        return FUTURE_PUBLISH_HOURS;
    }
    hours
}

/// Views per hour since publish; 0 when no time has elapsed.
pub fn hot_score(views: u64, hours_since: f64) -> f64 {
    if hours_since > 0.0 {
        views as f64 / hours_since
    } else {
        0.0
    }
}

/// Mean hot score per channel over the given batch.
pub fn channel_averages<'a, I>(scores: I) -> HashMap<String, f64>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut sums: HashMap<&'a str, (f64, usize)> = HashMap::new();
    for (channel_id, score) in scores {
        let entry = sums.entry(channel_id).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(channel_id, (sum, count))| (channel_id.to_string(), sum / count as f64))
        .collect()
}

/// Percentage deviation of a hot score from its channel average; 0 when the average is 0.
pub fn growth(hot_score: f64, channel_avg: f64) -> f64 {
    if channel_avg != 0.0 {
        (hot_score - channel_avg) / channel_avg * 100.0
    } else {
        0.0
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score one fetch batch and build the records to insert.
///
/// Channel averages are batch-local: they cover only the videos in `batch`,
/// grouped by their `channel_id`. Publish times are stored at minute
/// precision, matching the persisted format.
pub fn score_batch(batch: &[VideoStatistics], now: DateTime<Utc>) -> Vec<VideoRecord> {
    let scored: Vec<(&VideoStatistics, f64, f64)> = batch
        .iter()
        .map(|stats| {
            let hours = hours_since(stats.published_at, now);
            (stats, hours, hot_score(stats.views, hours))
        })
        .collect();

    let averages = channel_averages(
        scored
            .iter()
            .map(|(stats, _, score)| (stats.channel_id.as_str(), *score)),
    );

    scored
        .into_iter()
        .map(|(stats, hours, score)| {
            let channel_avg = averages
                .get(stats.channel_id.as_str())
                .copied()
                .unwrap_or_default();

            VideoRecord {
                video_id: stats.video_id.clone(),
                title: stats.title.clone(),
                views: stats.views,
                published_at: truncate_to_minute(stats.published_at),
                hot_score: round2(score),
                hours_since: round2(hours),
                thumbnail_url: stats.thumbnail_url.clone(),
                video_url: watch_url(&stats.video_id),
                channel_id: stats.channel_id.clone(),
                channel_avg: round2(channel_avg),
                growth: round2(growth(score, channel_avg)),
            }
        })
        .collect()
}

fn truncate_to_minute(value: DateTime<Utc>) -> DateTime<Utc> {
    value
        .with_second(0)
        .and_then(|v| v.with_nanosecond(0))
        .unwrap_or(value)
}
