//! Shared `reqwest` client construction.

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::domain::ApiKey;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the management API: bearer token on every request.
///
/// Certificate verification is off unless `verify_tls` is set; home-lab
/// servers usually present self-signed certificates. No request timeout is
/// configured because the job wait call blocks until the job finishes.
///
/// # Errors
///
/// Returns an error if the API key is not a valid header value or the TLS
/// backend cannot be initialised.
pub fn api_client(api_key: &ApiKey, verify_tls: bool) -> Result<reqwest::Client> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose()))
        .context("API key contains characters not allowed in an HTTP header")?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);

    if !verify_tls {
        tracing::debug!("TLS certificate verification disabled for the management API");
    }

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .danger_accept_invalid_certs(!verify_tls)
        .build()
        .context("failed to build management API client")
}

/// Client for the notification webhook. Carries no credentials.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn webhook_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build webhook client")
}
