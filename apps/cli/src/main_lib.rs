use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use hotscore_core::videos::{
    parse_channel_list, ChannelRefreshResult, DashboardSummary, RefreshOutcome, RefreshService,
    RefreshServiceTrait, VideoRecord,
};
use hotscore_storage_fs::JsonFileCacheStore;
use hotscore_video_data::YouTubeClient;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::CliArgs;
use crate::config::Config;

pub fn init_tracing() {
    let log_format = std::env::var("HOTSCORE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn load_channels(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read channel list {}", path.display()))?;
    Ok(parse_channel_list(&contents))
}

pub fn build_service(config: &Config) -> RefreshService<YouTubeClient, JsonFileCacheStore> {
    let client = YouTubeClient::with_timeout(config.api_key.clone(), config.request_timeout);
    let store = JsonFileCacheStore::new(&config.cache_path, &config.export_path);
    RefreshService::new(Arc::new(client), Arc::new(store))
}

pub async fn run(config: Config, args: CliArgs) -> Result<()> {
    let query = args.to_query()?;
    let channels = load_channels(&config.channels_file)?;
    if channels.is_empty() {
        tracing::warn!(
            "Channel list {} is empty",
            config.channels_file.display()
        );
    }

    let service = build_service(&config);
    let RefreshOutcome { videos, report } = service.refresh(&channels).await;

    tracing::info!("{}", report.summary());
    for channel in report.failed_channels() {
        if let ChannelRefreshResult::Failed { channel, error, .. } = channel {
            tracing::warn!("Channel {} was skipped: {}", channel, error);
        }
    }
    for warning in &report.storage_warnings {
        tracing::warn!("Cache storage: {}", warning);
    }

    let rows = query.apply(&videos);
    let summary = DashboardSummary::from_records(&rows);
    println!("{}", render_summary(videos.len(), &summary));

    let shown = args.limit.map_or(rows.as_slice(), |limit| &rows[..limit.min(rows.len())]);
    println!("{}", render_table(shown));

    if !args.no_export {
        write_results(&args.output, &rows)?;
        tracing::info!("Wrote {} rows to {}", rows.len(), args.output.display());
    }

    Ok(())
}

pub fn write_results(path: &Path, rows: &[VideoRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn render_summary(cached: usize, summary: &DashboardSummary) -> String {
    let top = summary
        .top_hot_score
        .map(|score| format!("{:.2}", score))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Videos in cache: {} | matching: {} from {} channels | top hot score: {}",
        cached, summary.video_count, summary.channel_count, top
    )
}

const TITLE_WIDTH: usize = 48;

pub fn render_table(rows: &[VideoRecord]) -> String {
    if rows.is_empty() {
        return "No videos found.".to_string();
    }

    let mut out = format!(
        "{:>4}  {:>10}  {:>9}  {:>10}  {:<16}  {:<w$}  {}\n",
        "#",
        "HOT",
        "GROWTH",
        "VIEWS",
        "PUBLISHED",
        "TITLE",
        "URL",
        w = TITLE_WIDTH
    );
    for (rank, row) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:>10.2}  {:>8.2}%  {:>10}  {:<16}  {:<w$}  {}\n",
            rank + 1,
            row.hot_score,
            row.growth,
            row.views,
            row.published_at.format("%Y-%m-%d %H:%M").to_string(),
            truncate(&row.title, TITLE_WIDTH),
            row.video_url,
            w = TITLE_WIDTH
        ));
    }
    out.trim_end().to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn record(video_id: &str, title: &str, hot_score: f64) -> VideoRecord {
        VideoRecord {
            video_id: video_id.to_string(),
            title: title.to_string(),
            views: 1000,
            published_at: Utc.with_ymd_and_hms(2026, 10, 18, 7, 0, 0).unwrap(),
            hot_score,
            hours_since: 2.0,
            thumbnail_url: String::new(),
            video_url: format!("https://www.youtube.com/watch?v={}", video_id),
            channel_id: "UC1".to_string(),
            channel_avg: hot_score,
            growth: 0.0,
        }
    }

    #[test]
    fn test_load_channels() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("channels.txt");
        fs::write(&path, "UC1\n\n# comment\n@handle\nUC1\n").unwrap();

        assert_eq!(load_channels(&path).unwrap(), vec!["UC1", "@handle"]);
    }

    #[test]
    fn test_missing_channel_list_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_channels(&dir.path().join("channels.txt")).unwrap_err();
        assert!(err.to_string().contains("channels.txt"));
    }

    #[test]
    fn test_write_results() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.json");
        write_results(&path, &[record("abc", "Morning", 500.0)]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["video_id"], "abc");
        assert_eq!(value[0]["published_at"], "2026-10-18 07:00");
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&[record("abc", "Morning", 500.0)]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("HOT"));
        assert!(lines[1].contains("500.00"));
        assert!(lines[1].contains("https://www.youtube.com/watch?v=abc"));
        assert_eq!(render_table(&[]), "No videos found.");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Zażółć gęślą jaźń", 6), "Zażół…");
    }

    #[test]
    fn test_render_summary() {
        let summary = DashboardSummary::from_records(&[record("a", "A", 12.5)]);
        assert_eq!(
            render_summary(3, &summary),
            "Videos in cache: 3 | matching: 1 from 1 channels | top hot score: 12.50"
        );
    }
}
