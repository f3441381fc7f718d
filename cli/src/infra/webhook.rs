//! Infrastructure implementation of the `Notifier` port for Discord-style
//! webhooks (`POST {"content": "..."}`).

use reqwest::StatusCode;

use crate::application::ports::Notifier;
use crate::domain::NotifyError;

/// Posts notifications to a webhook, or skips them when none is configured.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: Option<String>,
}

impl WebhookNotifier {
    /// `url = None` turns every `notify` into a logged no-op.
    #[must_use]
    pub fn new(client: reqwest::Client, url: Option<String>) -> Self {
        Self { client, url }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

impl Notifier for WebhookNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let Some(url) = &self.url else {
            tracing::warn!("webhook URL is not set, notification skipped");
            return Ok(());
        };

        let resp = self
            .client
            .post(url)
            .json(&serde_json::json!({ "content": message }))
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(NotifyError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
