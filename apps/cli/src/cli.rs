use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueHint};
use hotscore_core::videos::{SortKey, VideoQuery};

/// Command-line arguments for the HotScore dashboard.
#[derive(Debug, Parser)]
#[command(
    name = "hotscore",
    version,
    about = "Refresh the video cache and list the hottest uploads"
)]
pub struct CliArgs {
    /// Sort order: hot_score, views or hours_since.
    #[arg(long, default_value = "hot_score", value_parser = parse_sort_key)]
    pub sort: SortKey,

    /// Only list videos whose title contains this text (case-insensitive).
    #[arg(long)]
    pub search: Option<String>,

    /// Minimum view count.
    #[arg(long, default_value_t = 0)]
    pub min_views: u64,

    /// Lowest hot score to list.
    #[arg(long)]
    pub min_hot_score: Option<f64>,

    /// Highest hot score to list.
    #[arg(long)]
    pub max_hot_score: Option<f64>,

    /// Earliest publish date (YYYY-MM-DD, UTC).
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Latest publish date (YYYY-MM-DD, UTC).
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Print at most this many rows.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Where to write the filtered rows as JSON.
    #[arg(long, default_value = "results.json", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Do not write the filtered rows.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_export: bool,
}

fn parse_sort_key(raw: &str) -> std::result::Result<SortKey, String> {
    raw.parse()
}

impl CliArgs {
    /// Build the dashboard query; open-ended ranges are bounded by the extremes.
    pub fn to_query(&self) -> Result<VideoQuery> {
        let hot_score_range = match (self.min_hot_score, self.max_hot_score) {
            (None, None) => None,
            (min, max) => Some((min.unwrap_or(f64::MIN), max.unwrap_or(f64::MAX))),
        };
        if let Some((low, high)) = hot_score_range {
            if low > high {
                bail!("--min-hot-score {} is above --max-hot-score {}", low, high);
            }
        }

        let published_range = match (self.from, self.to) {
            (None, None) => None,
            (from, to) => Some((from.unwrap_or(NaiveDate::MIN), to.unwrap_or(NaiveDate::MAX))),
        };
        if let Some((from, to)) = published_range {
            if from > to {
                bail!("--from {} is after --to {}", from, to);
            }
        }

        Ok(VideoQuery {
            sort: self.sort,
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            min_views: self.min_views,
            hot_score_range,
            published_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("hotscore").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_build_empty_query() {
        let args = parse(&[]);
        assert_eq!(args.output, PathBuf::from("results.json"));
        assert!(!args.no_export);
        assert_eq!(args.to_query().unwrap(), VideoQuery::default());
    }

    #[test]
    fn test_filters_build_query() {
        let args = parse(&[
            "--sort",
            "views",
            "--search",
            "rust",
            "--min-views",
            "1000",
            "--min-hot-score",
            "10.5",
            "--from",
            "2026-10-01",
            "--to",
            "2026-10-18",
        ]);
        let query = args.to_query().unwrap();

        assert_eq!(query.sort, SortKey::Views);
        assert_eq!(query.search.as_deref(), Some("rust"));
        assert_eq!(query.min_views, 1000);
        assert_eq!(query.hot_score_range, Some((10.5, f64::MAX)));
        assert_eq!(
            query.published_range,
            Some((
                NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
            ))
        );
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let result = CliArgs::try_parse_from(["hotscore", "--sort", "likes"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_inverted_ranges_are_rejected() {
        assert!(parse(&["--min-hot-score", "50", "--max-hot-score", "10"])
            .to_query()
            .is_err());
        assert!(parse(&["--from", "2026-10-18", "--to", "2026-10-01"])
            .to_query()
            .is_err());
    }
}
