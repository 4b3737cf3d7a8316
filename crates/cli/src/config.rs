//! # CLI Configuration
//!
//! Settings come from environment variables (a `.env` file is loaded by the
//! binary first). Every value has a default:
//!
//! - `MEDFIND_API_BASE_URL`: directory API base URL (default: the public directory)
//! - `MEDFIND_DATA_DIR`: where bookings are stored (default: `.medfind`)
//! - `LOG_LEVEL`: `trace`, `debug`, `info`, `warn` or `error` (default: `info`)

use std::env;
use std::path::PathBuf;

use eyre::{Result, eyre};
use tracing::Level;

use medfind_client::DEFAULT_BASE_URL;

pub const DEFAULT_DATA_DIR: &str = ".medfind";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the medical center directory
    pub api_base_url: String,
    /// Directory holding the local booking store
    pub data_dir: PathBuf,
    pub log_level: Level,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("MEDFIND_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(eyre!(
                "MEDFIND_API_BASE_URL must be an http(s) URL, got {}",
                api_base_url
            ));
        }

        let data_dir = lookup("MEDFIND_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let log_level = parse_log_level(lookup("LOG_LEVEL").as_deref().unwrap_or("info"));

        Ok(Self {
            api_base_url,
            data_dir,
            log_level,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_level: Level::INFO,
        }
    }
}

/// Unknown names fall back to `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
