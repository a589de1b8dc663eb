//! Runtime configuration read from the environment.
//!
//! `main` loads a `.env` file first (via `dotenvy`), so every variable below
//! may also live there. CLI flags override these values.
//!
//! | Variable                | Default                    |
//! |-------------------------|----------------------------|
//! | `VMMS_BASE_URL`         | `http://127.0.0.1:8000`    |
//! | `VMMS_CSRF_TOKEN`       | none                       |
//! | `VMMS_COOKIES`          | none (token source)        |
//! | `VMMS_HTTP_TIMEOUT_SECS`| `30`                       |
//! | `VMMS_BIN_WIDTH`        | `200`                      |
//! | `VMMS_TOP_FEATURES`     | `10`                       |
//! | `LOG_FILE_PATH`         | `logs/vmms_dashboard.log`  |

use crate::analyzers::dashboard::DashboardSettings;
use crate::fetch::auth::{CSRF_COOKIE, csrf_token_from_cookies};
use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub csrf_token: Option<String>,
    pub http_timeout: Duration,
    pub settings: DashboardSettings,
    pub log_file_path: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            csrf_token: None,
            http_timeout: Duration::from_secs(30),
            settings: DashboardSettings::default(),
            log_file_path: "logs/vmms_dashboard.log".to_string(),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| raw.trim().parse::<T>().with_context(|| format!("invalid {key}: '{raw}'")))
        .transpose()
}

impl DashboardConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, starting from the defaults.
    ///
    /// An explicit `VMMS_CSRF_TOKEN` wins over one parsed out of
    /// `VMMS_COOKIES`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("VMMS_BASE_URL") {
            config.base_url = url;
        }
        config.csrf_token = lookup("VMMS_CSRF_TOKEN").or_else(|| {
            lookup("VMMS_COOKIES").and_then(|c| csrf_token_from_cookies(&c, CSRF_COOKIE))
        });
        if let Some(secs) = parsed::<u64>(&lookup, "VMMS_HTTP_TIMEOUT_SECS")? {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(width) = parsed::<f64>(&lookup, "VMMS_BIN_WIDTH")? {
            config.settings.cost_bin_width = width;
        }
        if let Some(top) = parsed::<usize>(&lookup, "VMMS_TOP_FEATURES")? {
            config.settings.top_features = top;
        }
        if let Some(path) = lookup("LOG_FILE_PATH") {
            config.log_file_path = path;
        }

        Ok(config)
    }
}
