use std::path::PathBuf;
use std::time::Duration;

use crate::view::{PageSize, PageWindow};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_FILE: &str = ".job-dashboard/session.json";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub session_file: PathBuf,
    pub page_size: PageSize,
    pub page_window: PageWindow,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            page_size: PageSize::default(),
            page_window: PageWindow::default(),
        }
    }
}

impl ClientConfig {
    /// Read `JOB_DASHBOARD_*` variables; unset or unparsable values fall back
    /// to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("JOB_DASHBOARD_API_URL")
                .ok()
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_base_url),
            timeout: parse_duration_secs("JOB_DASHBOARD_TIMEOUT_SECS", 30),
            session_file: std::env::var("JOB_DASHBOARD_SESSION_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            page_size: parse_env("JOB_DASHBOARD_PAGE_SIZE").unwrap_or(defaults.page_size),
            page_window: parse_env("JOB_DASHBOARD_PAGE_WINDOW").unwrap_or(defaults.page_window),
        }
    }
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}

fn parse_env<T: std::str::FromStr>(env_var: &str) -> Option<T> {
    std::env::var(env_var).ok().and_then(|v| v.parse().ok())
}
