//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_API_URL, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_MS};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Runtime configuration shared by the client and the mock API.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the employee REST API.
    pub api_url: String,
    /// Per-request timeout for API calls.
    pub request_timeout_ms: u64,
    /// Port the mock API listens on.
    pub port: u16,
    /// Seed the mock API with demo employees on startup.
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            port: DEFAULT_PORT,
            seed_demo_data: false,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

/// Trim whitespace and trailing slashes from an API base URL.
///
/// # Returns
/// `None` when nothing usable remains.
pub fn normalize_api_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing
    /// or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("STAFFDESK_API_URL")
                .ok()
                .and_then(|raw| normalize_api_url(&raw))
                .unwrap_or(defaults.api_url),
            request_timeout_ms: env::var("STAFFDESK_TIMEOUT_MS")
                .ok()
                .and_then(|raw| raw.trim().parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.request_timeout_ms),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            seed_demo_data: env_flag_enabled("STAFFDESK_SEED"),
        }
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_api_url, parse_env_flag, Config};
    use crate::env::{env_lock, EnvGuard};
    use crate::{DEFAULT_API_URL, DEFAULT_PORT};

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn normalize_api_url_strips_trailing_slashes_and_blanks() {
        assert_eq!(
            normalize_api_url(" http://127.0.0.1:3001/ ").as_deref(),
            Some("http://127.0.0.1:3001")
        );
        assert_eq!(
            normalize_api_url("http://host/api//").as_deref(),
            Some("http://host/api")
        );
        assert_eq!(normalize_api_url("   "), None);
    }

    #[test]
    fn from_env_applies_defaults_and_overrides() {
        let _lock = env_lock().lock().expect("env lock");
        {
            let _url = EnvGuard::remove("STAFFDESK_API_URL");
            let _timeout = EnvGuard::set("STAFFDESK_TIMEOUT_MS", "not-a-number");
            let _port = EnvGuard::remove("PORT");
            let _seed = EnvGuard::remove("STAFFDESK_SEED");
            let config = Config::from_env();
            assert_eq!(config.api_url, DEFAULT_API_URL);
            assert_eq!(config.request_timeout_ms, 10_000);
            assert_eq!(config.port, DEFAULT_PORT);
            assert!(!config.seed_demo_data);
        }
        {
            let _url = EnvGuard::set("STAFFDESK_API_URL", "http://api.internal:9000/");
            let _timeout = EnvGuard::set("STAFFDESK_TIMEOUT_MS", "2500");
            let _port = EnvGuard::set("PORT", "4100");
            let _seed = EnvGuard::set("STAFFDESK_SEED", "yes");
            let config = Config::from_env();
            assert_eq!(config.api_url, "http://api.internal:9000");
            assert_eq!(config.request_timeout().as_millis(), 2500);
            assert_eq!(config.port, 4100);
            assert!(config.seed_demo_data);
        }
    }
}
