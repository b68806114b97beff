//! Host configuration parsed from environment variables.

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PROXY_BODY_LIMIT_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("BADAL_API_URL must start with http:// or https://, got {0}")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Patient backend base URL, without trailing slash.
    pub api_url: String,
    pub proxy_timeout_secs: u64,
    pub proxy_body_limit_bytes: usize,
    /// Seed `hospital@demo.com` and `researcher@demo.com`.
    pub demo_accounts: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_url: DEFAULT_API_URL.to_owned(),
            proxy_timeout_secs: DEFAULT_PROXY_TIMEOUT_SECS,
            proxy_body_limit_bytes: DEFAULT_PROXY_BODY_LIMIT_BYTES,
            demo_accounts: true,
        }
    }
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BADAL_API_URL`: default `http://localhost:8000`
    /// - `BADAL_PROXY_TIMEOUT_SECS`: default 30
    /// - `BADAL_PROXY_BODY_LIMIT_BYTES`: default 25 MiB
    /// - `BADAL_DEMO_ACCOUNTS`: boolean, default on
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `PORT` is not a port number or the API URL
    /// is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };
        let api_url = std::env::var("BADAL_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_owned())
            .trim()
            .trim_end_matches('/')
            .to_owned();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }
        let proxy_body_limit_bytes = usize::try_from(env_parse_u64(
            "BADAL_PROXY_BODY_LIMIT_BYTES",
            DEFAULT_PROXY_BODY_LIMIT_BYTES as u64,
        ))
        .unwrap_or(DEFAULT_PROXY_BODY_LIMIT_BYTES);

        Ok(Self {
            port,
            api_url,
            proxy_timeout_secs: env_parse_u64("BADAL_PROXY_TIMEOUT_SECS", DEFAULT_PROXY_TIMEOUT_SECS),
            proxy_body_limit_bytes,
            demo_accounts: env_bool("BADAL_DEMO_ACCOUNTS").unwrap_or(true),
        })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
