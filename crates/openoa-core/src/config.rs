//! openoa.toml configuration parser and base URL resolution.
//!
//! The base URL is resolved once at startup. A malformed value is a
//! [`ConfigError`] for the caller to report; it never reaches a probe.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::Uri;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable carrying the backend origin.
pub const API_URL_ENV: &str = "OPENOA_API_URL";

/// Relative path every API route lives under.
pub const API_PREFIX: &str = "/api";

/// Origin used for the same-origin fallback when no API URL is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_BEACON_INTERVAL: Duration = Duration::from_secs(15);

/// Errors raised while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("malformed API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid duration {value:?} for {field}")]
    InvalidDuration { field: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub beacon: BeaconConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin, e.g. `https://api.example.org`. `/api` is appended.
    pub url: Option<String>,
    /// Origin the relative `/api` fallback is resolved against.
    pub origin: Option<String>,
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeaconConfig {
    pub interval: Option<String>,
}

/// Where the resolved base URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    Override,
    Environment,
    ConfigFile,
    SameOrigin,
}

/// A validated API base URL, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    source: UrlSource,
}

impl BaseUrl {
    /// Parse and validate a full base URL (already including any `/api` prefix).
    pub fn parse(raw: &str, source: UrlSource) -> Result<Self, ConfigError> {
        let trimmed = raw.trim().trim_end_matches('/');
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: reason.to_string(),
        };

        let uri: Uri = trimmed.parse().map_err(|e: http::uri::InvalidUri| invalid(&e.to_string()))?;
        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => return Err(invalid(&format!("unsupported scheme {other:?}"))),
            None => return Err(invalid("missing scheme")),
        }
        if uri.host().is_none_or(str::is_empty) {
            return Err(invalid("missing host"));
        }
        if uri.port().is_some() && uri.port_u16().is_none() {
            return Err(invalid("port out of range"));
        }
        if uri.query().is_some() {
            return Err(invalid("query strings are not allowed"));
        }

        Ok(Self {
            url: trimmed.to_string(),
            source,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> UrlSource {
        self.source
    }

    /// Join a route path (leading `/`) onto the base.
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.url, path)
        } else {
            format!("{}/{}", self.url, path)
        }
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: BaseUrl,
    pub timeout: Duration,
    pub beacon_interval: Duration,
}

impl StatusConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve against the process environment.
    pub fn resolve(&self, override_url: Option<&str>) -> Result<ResolvedConfig, ConfigError> {
        let env_url = std::env::var(API_URL_ENV).ok();
        self.resolve_with(override_url, env_url.as_deref())
    }

    /// Resolve with an explicit environment value.
    ///
    /// Precedence: override, environment, `[api].url`, then the
    /// same-origin fallback.
    pub fn resolve_with(
        &self,
        override_url: Option<&str>,
        env_url: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let non_empty = |v: Option<&str>| v.filter(|s| !s.trim().is_empty()).map(str::to_string);

        let (origin, source) = if let Some(url) = non_empty(override_url) {
            (url, UrlSource::Override)
        } else if let Some(url) = non_empty(env_url) {
            (url, UrlSource::Environment)
        } else if let Some(url) = non_empty(self.api.url.as_deref()) {
            (url, UrlSource::ConfigFile)
        } else {
            let origin = non_empty(self.api.origin.as_deref())
                .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
            (origin, UrlSource::SameOrigin)
        };

        let base = format!("{}{}", origin.trim().trim_end_matches('/'), API_PREFIX);
        let base_url = BaseUrl::parse(&base, source)?;

        let timeout = match &self.api.timeout {
            Some(raw) => parse_duration(raw).ok_or_else(|| ConfigError::InvalidDuration {
                field: "api.timeout",
                value: raw.clone(),
            })?,
            None => DEFAULT_TIMEOUT,
        };

        let beacon_interval = match &self.beacon.interval {
            Some(raw) => parse_duration(raw).ok_or_else(|| ConfigError::InvalidDuration {
                field: "beacon.interval",
                value: raw.clone(),
            })?,
            None => DEFAULT_BEACON_INTERVAL,
        };

        Ok(ResolvedConfig {
            base_url,
            timeout,
            beacon_interval,
        })
    }
}

/// Parse a duration string like "5s", "500ms", "1m".
///
/// A bare number is taken as seconds. Zero is rejected.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let parsed = if let Some(ms) = s.strip_suffix("ms") {
        ms.trim().parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.trim().parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.trim()
            .parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    };
    parsed.filter(|d| !d.is_zero())
}
