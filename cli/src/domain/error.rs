//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::cli`,
//! `crate::application`, `tokio`, or `reqwest`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Startup configuration problems. Always fatal, raised before any API call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{setting} is not set. Pass {flag} or export {env}.")]
    Missing {
        setting: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("Invalid base URL '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Invalid webhook URL '{0}': must start with http:// or https://")]
    InvalidWebhookUrl(String),
}

// ── Management API errors ─────────────────────────────────────────────────────

/// A failed call to the management API.
///
/// A transport error and a non-success status are reported identically as a
/// failure of the operation; the distinction only shows up in the message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("status {status}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failed call, when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

// ── Notification errors ───────────────────────────────────────────────────────

/// A failed webhook delivery. Never escalated past a log line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("webhook returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("webhook request failed: {0}")]
    Transport(String),
}

// ── Run errors ────────────────────────────────────────────────────────────────

/// Conditions that abort an upgrade run.
#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error("Unable to fetch apps ({0})")]
    Fetch(#[source] ApiError),
}
