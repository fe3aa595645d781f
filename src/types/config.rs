//! Configuration structures.
//!
//! Configuration is read once at startup from environment-style key/value
//! pairs and is immutable afterwards. Missing keys fall back to the public
//! upstream defaults; present but malformed values are rejected.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::{Error, Result};

pub const NOMINATIM_BASE_URL: &str = "NOMINATIM_BASE_URL";
pub const NOMINATIM_TIMEOUT_SECONDS: &str = "NOMINATIM_TIMEOUT_SECONDS";
pub const OSRM_BASE_URL: &str = "OSRM_BASE_URL";
pub const OSRM_TIMEOUT_SECONDS: &str = "OSRM_TIMEOUT_SECONDS";
pub const USER_AGENT: &str = "MAP_TOOLS_USER_AGENT";

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org";
pub const DEFAULT_USER_AGENT: &str = "map-tools/0.1";

/// Global configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding upstream (Nominatim-compatible).
    #[serde(default = "EndpointConfig::nominatim")]
    pub nominatim: EndpointConfig,

    /// Routing upstream (OSRM-compatible).
    #[serde(default = "EndpointConfig::osrm")]
    pub osrm: EndpointConfig,

    /// Identifying `User-Agent` header sent with every upstream request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nominatim: EndpointConfig::nominatim(),
            osrm: EndpointConfig::osrm(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Base URL and timeout for one upstream provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL without trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn nominatim() -> Self {
        Self::new(DEFAULT_NOMINATIM_URL, Duration::from_secs(10))
    }

    pub fn osrm() -> Self {
        Self::new(DEFAULT_OSRM_URL, Duration::from_secs(15))
    }
}

impl Config {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let nominatim = endpoint_from_lookup(
            &lookup,
            NOMINATIM_BASE_URL,
            NOMINATIM_TIMEOUT_SECONDS,
            defaults.nominatim,
        )?;
        let osrm = endpoint_from_lookup(&lookup, OSRM_BASE_URL, OSRM_TIMEOUT_SECONDS, defaults.osrm)?;

        let user_agent = match lookup(USER_AGENT) {
            Some(ua) if ua.trim().is_empty() => {
                return Err(Error::config(format!("{} cannot be empty", USER_AGENT)))
            }
            Some(ua) => ua.trim().to_string(),
            None => defaults.user_agent,
        };

        Ok(Self {
            nominatim,
            osrm,
            user_agent,
        })
    }
}

fn endpoint_from_lookup<F>(
    lookup: &F,
    url_key: &str,
    timeout_key: &str,
    fallback: EndpointConfig,
) -> Result<EndpointConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = match lookup(url_key) {
        Some(url) => {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    url_key, url
                )));
            }
            url.to_string()
        }
        None => fallback.base_url,
    };

    let timeout = match lookup(timeout_key) {
        Some(raw) => parse_timeout_seconds(timeout_key, &raw)?,
        None => fallback.timeout,
    };

    Ok(EndpointConfig::new(base_url, timeout))
}

fn parse_timeout_seconds(key: &str, raw: &str) -> Result<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("{} must be a number of seconds, got '{}'", key, raw)))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(Error::config(format!("{} must be positive, got '{}'", key, raw)));
    }
    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.nominatim.base_url, DEFAULT_NOMINATIM_URL);
        assert_eq!(config.nominatim.timeout, Duration::from_secs(10));
        assert_eq!(config.osrm.base_url, DEFAULT_OSRM_URL);
        assert_eq!(config.osrm.timeout, Duration::from_secs(15));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (NOMINATIM_BASE_URL, "http://localhost:8080/"),
            (NOMINATIM_TIMEOUT_SECONDS, "2.5"),
            (OSRM_BASE_URL, "http://localhost:5000"),
            (OSRM_TIMEOUT_SECONDS, "30"),
            (USER_AGENT, "test-agent/1.0"),
        ]))
        .unwrap();

        assert_eq!(config.nominatim.base_url, "http://localhost:8080");
        assert_eq!(config.nominatim.timeout, Duration::from_millis(2500));
        assert_eq!(config.osrm.base_url, "http://localhost:5000");
        assert_eq!(config.osrm.timeout, Duration::from_secs(30));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[test]
    fn test_malformed_timeout_rejected() {
        let err = Config::from_lookup(lookup_from(&[(OSRM_TIMEOUT_SECONDS, "soon")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_lookup(lookup_from(&[(OSRM_TIMEOUT_SECONDS, "0")])).unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_non_http_url_rejected() {
        let err =
            Config::from_lookup(lookup_from(&[(NOMINATIM_BASE_URL, "ftp://example.org")])).unwrap_err();
        assert!(err.to_string().contains(NOMINATIM_BASE_URL));
    }

    #[test]
    fn test_serde_humantime_timeout() {
        let config = Config::default();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["nominatim"]["timeout"], "10s");

        let parsed: Config = serde_json::from_value(serde_json::json!({
            "osrm": {"base_url": "http://osrm.local", "timeout": "750ms"}
        }))
        .unwrap();
        assert_eq!(parsed.osrm.timeout, Duration::from_millis(750));
        assert_eq!(parsed.nominatim, EndpointConfig::nominatim());
    }
}
