use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};

pub struct Config {
    pub api_key: String,
    pub channels_file: PathBuf,
    pub cache_path: PathBuf,
    pub export_path: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("HOTSCORE_API_KEY")
            .or_else(|| lookup("YOUTUBE_API_KEY"))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let Some(api_key) = api_key else {
            bail!("HOTSCORE_API_KEY (or YOUTUBE_API_KEY) must be set");
        };

        let channels_file =
            lookup("HOTSCORE_CHANNELS_FILE").unwrap_or_else(|| "channels.txt".into());
        let cache_path = lookup("HOTSCORE_CACHE_PATH").unwrap_or_else(|| "video_cache.json".into());
        let export_path =
            lookup("HOTSCORE_EXPORT_PATH").unwrap_or_else(|| "video_cache_export.json".into());
        let timeout_ms: u64 = lookup("HOTSCORE_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".into())
            .parse()
            .unwrap_or(30000);

        Ok(Self {
            api_key,
            channels_file: PathBuf::from(channels_file),
            cache_path: PathBuf::from(cache_path),
            export_path: PathBuf::from(export_path),
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("HOTSCORE_API_KEY", "secret")])).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.channels_file, PathBuf::from("channels.txt"));
        assert_eq!(config.cache_path, PathBuf::from("video_cache.json"));
        assert_eq!(config.export_path, PathBuf::from("video_cache_export.json"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_youtube_api_key_fallback() {
        let config = Config::from_lookup(lookup(&[("YOUTUBE_API_KEY", "legacy")])).unwrap();
        assert_eq!(config.api_key, "legacy");
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("HOTSCORE_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOTSCORE_API_KEY", "secret"),
            ("HOTSCORE_CHANNELS_FILE", "/etc/hotscore/channels.txt"),
            ("HOTSCORE_CACHE_PATH", "/var/lib/hotscore/cache.json"),
            ("HOTSCORE_REQUEST_TIMEOUT_MS", "5000"),
        ]))
        .unwrap();

        assert_eq!(
            config.channels_file,
            PathBuf::from("/etc/hotscore/channels.txt")
        );
        assert_eq!(config.cache_path, PathBuf::from("/var/lib/hotscore/cache.json"));
        assert_eq!(config.request_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        let config = Config::from_lookup(lookup(&[
            ("HOTSCORE_API_KEY", "secret"),
            ("HOTSCORE_REQUEST_TIMEOUT_MS", "soon"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
