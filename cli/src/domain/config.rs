//! Run configuration and its validation.
//!
//! Pure functions only: no I/O, no async, no environment access. The CLI
//! layer collects raw [`Settings`] (flags or env vars) and this module turns
//! them into a validated [`UpgraderConfig`] exactly once.

use std::fmt;
use std::time::Duration;

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Path prefix of the management REST API, appended to the base URL.
pub const API_PREFIX: &str = "/api/v2.0";

/// Default pause between two consecutive apps.
pub const DEFAULT_DELAY_SECS: u64 = 1;

// ── Raw settings ─────────────────────────────────────────────────────────────

/// Unvalidated configuration as collected from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub webhook_url: Option<String>,
    pub delay_secs: u64,
    pub verify_tls: bool,
}

// ── Validated config ─────────────────────────────────────────────────────────

/// Bearer credential. Redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Validated configuration for one upgrade run.
#[derive(Debug, Clone)]
pub struct UpgraderConfig {
    /// Base URL with the API prefix applied, without trailing slash.
    pub api_root: String,
    pub api_key: ApiKey,
    /// Notification endpoint; `None` disables notifications.
    pub webhook_url: Option<String>,
    /// Fixed pause between consecutive apps.
    pub delay: Duration,
    /// Whether to verify the management server's TLS certificate.
    pub verify_tls: bool,
}

impl UpgraderConfig {
    /// Validate raw settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the base URL or API key is absent
    /// or blank, and an `Invalid*Url` variant when a URL has no http(s) scheme.
    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let base_url = non_blank(settings.base_url).ok_or(ConfigError::Missing {
            setting: "Base URL",
            flag: "--base-url",
            env: "BASE_URL",
        })?;
        let api_key = non_blank(settings.api_key).ok_or(ConfigError::Missing {
            setting: "API key",
            flag: "--api-key",
            env: "API_KEY",
        })?;

        if !is_http_url(&base_url) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let webhook_url = match non_blank(settings.webhook_url) {
            Some(url) if !is_http_url(&url) => return Err(ConfigError::InvalidWebhookUrl(url)),
            other => other,
        };

        Ok(Self {
            api_root: api_root(&base_url),
            api_key: ApiKey(api_key),
            webhook_url,
            delay: Duration::from_secs(settings.delay_secs),
            verify_tls: settings.verify_tls,
        })
    }
}

/// Join the base URL and [`API_PREFIX`], tolerating a trailing slash or a
/// prefix that is already present.
#[must_use]
pub fn api_root(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(API_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{API_PREFIX}")
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

// ── Unit tests ───────────────────────────────────────────────────────────────
