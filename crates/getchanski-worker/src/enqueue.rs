//! URL submission

use std::collections::HashMap;
use std::sync::Arc;

use getchanski_core::constants::SENDER_ATTRIBUTE;
use getchanski_core::models::UrlMessage;
use getchanski_core::AppError;

use crate::queue::MessageQueue;

/// Serializes URLs into queue messages tagged with the sender attribute
#[derive(Clone)]
pub struct UrlQueue {
    queue: Arc<dyn MessageQueue>,
    sender_tag: String,
}

impl UrlQueue {
    pub fn new(queue: Arc<dyn MessageQueue>, sender_tag: impl Into<String>) -> Self {
        Self {
            queue,
            sender_tag: sender_tag.into(),
        }
    }

    /// Send `url` to the queue and return the message id.
    ///
    /// Failures are returned to the caller as is; nothing is retried here.
    #[tracing::instrument(skip(self))]
    pub async fn enqueue_url(&self, url: &str) -> Result<String, AppError> {
        if url.trim().is_empty() {
            return Err(AppError::InvalidInput("URL must not be empty".to_string()));
        }

        let body = UrlMessage::new(url).to_body()?;
        let attributes = HashMap::from([(SENDER_ATTRIBUTE.to_string(), self.sender_tag.clone())]);

        let message_id = self.queue.send(&body, &attributes).await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "Failed to enqueue URL");
            AppError::from(e)
        })?;

        tracing::info!(message_id = %message_id, url = %url, "URL enqueued");
        Ok(message_id)
    }
}
