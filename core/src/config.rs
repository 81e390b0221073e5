//! Client configuration.
//!
//! Defaults reproduce the development setup: a backend on
//! `http://localhost:8002` serving the `dart_report` entity, with no
//! request timeout. Each field can be overridden from the environment.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ApiError;
use crate::types::DART_REPORT;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8002";

pub const ENV_BASE_URL: &str = "DART_API_URL";
pub const ENV_ENTITY: &str = "DART_API_ENTITY";
pub const ENV_TIMEOUT_SECS: &str = "DART_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub entity: String,
    /// Per-request timeout. `None` waits as long as the transport allows.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            entity: DART_REPORT.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Defaults overlaid with `DART_API_URL`, `DART_API_ENTITY` and
    /// `DART_API_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(entity) = lookup(ENV_ENTITY) {
            config.entity = entity;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                ApiError::InvalidConfig(format!("{ENV_TIMEOUT_SECS}={raw:?}: {e}"))
            })?;
            config.timeout_secs = Some(secs);
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
