//! Pipeline constants.

/// How long a refreshed cache stays fresh before the upstream API is contacted again.
pub const CACHE_TTL_HOURS: i64 = 3;

/// Age limit, measured from publish time, beyond which videos are neither
/// fetched nor kept in the cache.
pub const RETENTION_DAYS: i64 = 21;

/// Default number of video ids per statistics request (YouTube's maximum).
pub const DEFAULT_STATS_BATCH_SIZE: usize = 50;

/// Upper bound on upload pages walked per channel and cycle.
/// At 50 items per page this covers 1000 uploads inside the retention window.
pub const DEFAULT_MAX_UPLOAD_PAGES: usize = 20;

/// Elapsed time assumed for videos whose publish time lies in the future (one minute).
pub const FUTURE_PUBLISH_HOURS: f64 = 1.0 / 60.0;

/// Persisted format of the cache freshness timestamp (naive UTC).
pub const LAST_CHECK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Persisted format of a video's publish time (naive UTC, minute precision).
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";
