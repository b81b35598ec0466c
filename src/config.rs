//! Client configuration.
//!
//! Settings come from defaults, a JSON document, or environment variables.
//! The environment loader reads `STAGEDESK_API_URL`,
//! `STAGEDESK_TIMEOUT_SECS`, `STAGEDESK_PAGE_SIZE` and
//! `STAGEDESK_FETCH_RETRIES`.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "STAGEDESK_API_URL";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "STAGEDESK_TIMEOUT_SECS";
/// Environment variable holding the default page size.
pub const ENV_PAGE_SIZE: &str = "STAGEDESK_PAGE_SIZE";
/// Environment variable holding the fetch retry bound.
pub const ENV_FETCH_RETRIES: &str = "STAGEDESK_FETCH_RETRIES";

/// Upper bound on silent retries of idempotent fetches.
pub const MAX_FETCH_RETRIES: u8 = 1;

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting is malformed or out of range.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Setting name.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// The base URL is not an absolute HTTP(S) URL.
    #[error("invalid API base URL '{0}', expected http:// or https://")]
    InvalidBaseUrl(String),

    /// The JSON document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(String),
}

/// Resource paths, relative to the base URL.
///
/// The backend has exposed some lists under more than one path; each path
/// is configurable so deployments can follow the contract they run against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiPaths {
    /// Listing for the current actor.
    pub actor_agreements: String,
    /// Faculty pending queue.
    pub faculty_pending: String,
    /// Admin pending queue.
    pub admin_pending: String,
    /// Admin listing of every agreement.
    pub admin_agreements: String,
    /// Root of single-agreement resources (`{root}/{id}`, `{root}/{id}/sign`).
    pub agreement_root: String,
    /// Login endpoint.
    pub login: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            actor_agreements: "/agreements".to_owned(),
            faculty_pending: "/faculty/me/agreements/pending".to_owned(),
            admin_pending: "/admin/agreements/pending".to_owned(),
            admin_agreements: "/admin/agreements".to_owned(),
            agreement_root: "/agreements".to_owned(),
            login: "/auth/login".to_owned(),
        }
    }
}

/// Settings for the HTTP gateway and the lifecycle controllers.
///
/// # Examples
///
/// ```
/// use stagedesk::config::ClientConfig;
///
/// let config = ClientConfig::from_json_str(r#"{"page_size": 25}"#).expect("valid config");
/// assert_eq!(config.page_size, 25);
/// assert_eq!(config.base_url, "http://localhost:8080/api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL, including the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Default list page size.
    pub page_size: u32,
    /// Silent retries for idempotent fetches, capped at
    /// [`MAX_FETCH_RETRIES`].
    pub fetch_retries: u8,
    /// Resource paths.
    pub paths: ApiPaths,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_owned(),
            timeout_secs: 30,
            page_size: 10,
            fetch_retries: MAX_FETCH_RETRIES,
            paths: ApiPaths::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a default configuration pointing at `base_url`.
    #[must_use]
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON document; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the
    /// [`ClientConfig::validated`] errors for bad values.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let parsed: Self =
            serde_json::from_str(document).map_err(|err| ConfigError::Parse(err.to_string()))?;
        parsed.validated()
    }

    /// Loads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads overrides through `lookup`, starting from the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_number(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            config.page_size = parse_number(ENV_PAGE_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FETCH_RETRIES) {
            config.fetch_retries = parse_number(ENV_FETCH_RETRIES, &raw)?;
        }
        config.validated()
    }

    /// Checks values and normalises the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for a non-HTTP base URL and
    /// [`ConfigError::InvalidValue`] for a zero page size or timeout.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        self.base_url = trimmed.to_owned();
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size",
                value: "0".to_owned(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs",
                value: "0".to_owned(),
            });
        }
        Ok(self)
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the retry bound actually applied.
    #[must_use]
    pub fn effective_fetch_retries(&self) -> u8 {
        self.fetch_retries.min(MAX_FETCH_RETRIES)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_owned(),
    })
}
