use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument, warn};

use crate::dto::job_post_dto::CreateJobResponse;
use crate::error::Result;
use crate::models::job_post::JobPostRecord;

/// Backend operation that persists an assembled job post.
///
/// Returns a human-readable status message. The form treats the configured
/// success message as success and any other message, or an `Err`, as failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobCreator: Send + Sync {
    async fn create_job(&self, record: &JobPostRecord) -> Result<String>;
}

#[derive(Clone)]
pub struct HttpJobCreator {
    client: Client,
    endpoint: String,
    success_message: String,
}

impl HttpJobCreator {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
        success_message: impl Into<String>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            success_message: success_message.into(),
        })
    }
}

#[async_trait]
impl JobCreator for HttpJobCreator {
    #[instrument(skip(self, record), fields(blob = %record.blob()))]
    async fn create_job(&self, record: &JobPostRecord) -> Result<String> {
        let response = self.client.post(&self.endpoint).json(record).send().await?;
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Failed to read job creation response body");
                return Err(e.into());
            }
        };
        let reply = reply_text(&body);

        if status.is_success() {
            info!(status = status.as_u16(), "Job post accepted by backend");
            Ok(reply.unwrap_or_else(|| self.success_message.clone()))
        } else {
            warn!(status = status.as_u16(), %body, "Job post refused by backend");
            Ok(reply.unwrap_or_else(|| format!("Job creation failed with status {}", status)))
        }
    }
}

// error, then message, then a bare JSON string, then the raw text.
fn reply_text(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(parsed) = serde_json::from_str::<CreateJobResponse>(body) {
        if let Some(text) = parsed.error.or(parsed.message) {
            return Some(text);
        }
    }
    if let Ok(text) = serde_json::from_str::<String>(body) {
        return Some(text);
    }
    Some(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_prefers_error_then_message() {
        assert_eq!(
            reply_text(r#"{"message": "ok", "error": "Vaga duplicada"}"#).as_deref(),
            Some("Vaga duplicada")
        );
        assert_eq!(
            reply_text(r#"{"message": "Cadastrado com sucesso"}"#).as_deref(),
            Some("Cadastrado com sucesso")
        );
    }

    #[test]
    fn unstructured_bodies_are_returned_verbatim() {
        assert_eq!(reply_text("  Vaga duplicada\n").as_deref(), Some("Vaga duplicada"));
        assert_eq!(reply_text(r#""Vaga duplicada""#).as_deref(), Some("Vaga duplicada"));
        assert_eq!(reply_text(r#"{"id": 5}"#).as_deref(), Some(r#"{"id": 5}"#));
    }

    #[test]
    fn empty_body_has_no_reply() {
        assert_eq!(reply_text(""), None);
        assert_eq!(reply_text(" \n"), None);
    }
}
