//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::form::catalog::CuisineCatalog;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:7000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL `{0}`: expected http:// or https://")]
    InvalidBaseUrl(String),
    #[error("RESTAURANT_CUISINES is set but lists no cuisines")]
    EmptyCuisines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub timeouts: HttpTimeouts,
    pub cuisines: CuisineCatalog,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            api_token: None,
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            cuisines: CuisineCatalog::default(),
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `RESTAURANT_API_BASE_URL`: default `http://127.0.0.1:7000`
    /// - `RESTAURANT_API_TOKEN`: bearer token sent with every request
    /// - `RESTAURANT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `RESTAURANT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `RESTAURANT_CUISINES`: comma-separated cuisine list overriding the built-in one
    ///
    /// # Errors
    ///
    /// Returns an error for a base URL without an http(s) scheme or a cuisine
    /// override that lists nothing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = normalize_base_url(
            &std::env::var("RESTAURANT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        )?;
        let api_token = std::env::var("RESTAURANT_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        let timeouts = HttpTimeouts {
            request_secs: env_parse("RESTAURANT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("RESTAURANT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let cuisines = match std::env::var("RESTAURANT_CUISINES") {
            Ok(raw) => {
                let catalog = CuisineCatalog::parse_list(&raw);
                if catalog.is_empty() {
                    return Err(ConfigError::EmptyCuisines);
                }
                catalog
            }
            Err(_) => CuisineCatalog::default(),
        };

        Ok(Self { api_base_url, api_token, timeouts, cuisines })
    }
}

/// Trim whitespace and trailing slashes and require an http(s) scheme.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] when the scheme is missing.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
