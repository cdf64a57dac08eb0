//! Runtime settings. Defaults, then `PULSE_*` environment variables; the
//! binary layers its command-line flags on top.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "http://52.66.30.60:3010/healthcheck";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_MAX_POINTS: usize = 30;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub poll_interval_ms: u64,
    pub max_points: usize,
    pub request_timeout_ms: u64,
    pub csv_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_points: DEFAULT_MAX_POINTS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            csv_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (the environment in practice).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(endpoint) = lookup("PULSE_ENDPOINT") {
            cfg.endpoint = endpoint;
        }
        if let Some(ms) = lookup("PULSE_POLL_MS") {
            cfg.poll_interval_ms = parse_var("PULSE_POLL_MS", &ms)?;
        }
        if let Some(n) = lookup("PULSE_MAX_POINTS") {
            cfg.max_points = parse_var("PULSE_MAX_POINTS", &n)?;
        }
        if let Some(ms) = lookup("PULSE_TIMEOUT_MS") {
            cfg.request_timeout_ms = parse_var("PULSE_TIMEOUT_MS", &ms)?;
        }
        if let Some(path) = lookup("PULSE_CSV") {
            cfg.csv_path = Some(PathBuf::from(path));
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(Error::Config(format!(
                "endpoint must be an http(s) URL, got {:?}",
                self.endpoint
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll interval must be non-zero".into()));
        }
        if self.max_points == 0 {
            return Err(Error::Config("max points must be non-zero".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key}: cannot parse {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.poll_interval(), Duration::from_secs(2));
        assert_eq!(cfg.max_points, 30);
    }

    #[test]
    fn env_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("PULSE_ENDPOINT", "https://example.test/healthcheck"),
            ("PULSE_POLL_MS", "500"),
            ("PULSE_MAX_POINTS", " 60 "),
            ("PULSE_CSV", "/tmp/requests.csv"),
        ]))
        .unwrap();
        assert_eq!(cfg.endpoint, "https://example.test/healthcheck");
        assert_eq!(cfg.poll_interval_ms, 500);
        assert_eq!(cfg.max_points, 60);
        assert_eq!(cfg.csv_path, Some(PathBuf::from("/tmp/requests.csv")));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("PULSE_POLL_MS", "soon")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PULSE_POLL_MS", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PULSE_MAX_POINTS", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PULSE_ENDPOINT", "ftp://x")])).is_err());
    }

    #[test]
    fn deserializes_partial_json() {
        let cfg: Config = serde_json::from_str(r#"{ "max_points": 10 }"#).unwrap();
        assert_eq!(cfg.max_points, 10);
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
    }
}
