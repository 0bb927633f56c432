use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

/// Fire-and-forget notification channel. Failures propagate to the caller;
/// a saved record is never rolled back on a failed send.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct NotificationPayload<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Posts notifications to an HTTP relay endpoint.
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotifier {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        self.client
            .post(&self.endpoint)
            .json(&NotificationPayload { to, subject, body })
            .send()
            .await
            .context("notification send failed")?
            .error_for_status()
            .context("notification relay returned an error")?;
        tracing::debug!(%to, %subject, "notification sent");
        Ok(())
    }
}
