//! Processing of a single received message
//!
//! A message is deleted from the queue only after every step selected by the
//! worker mode has succeeded. Any failure leaves it in place so the queue
//! redelivers it after its visibility timeout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use getchanski_core::constants::AUDIO_EXTENSION;
use getchanski_core::models::UrlMessage;
use getchanski_core::{AppError, WorkerMode};
use getchanski_media::ExtractionTool;
use getchanski_storage::{artifact_key, Storage};

use crate::queue::{MessageQueue, ReceivedMessage};

/// What happened to a received message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All steps succeeded and the message was deleted.
    Acknowledged,
    /// A step failed; the message stays on the queue.
    Abandoned(String),
    /// The message exceeded the receive limit and was deleted unprocessed.
    Discarded,
}

pub struct MediaPipeline {
    queue: Arc<dyn MessageQueue>,
    tool: Arc<dyn ExtractionTool>,
    storage: Option<Arc<dyn Storage>>,
    mode: WorkerMode,
    work_dir: PathBuf,
    max_receive_count: u32,
}

impl MediaPipeline {
    pub fn new(
        queue: Arc<dyn MessageQueue>,
        tool: Arc<dyn ExtractionTool>,
        mode: WorkerMode,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            queue,
            tool,
            storage: None,
            mode,
            work_dir: work_dir.into(),
            max_receive_count: 0,
        }
    }

    /// Storage receiving the artifacts; required in `full` mode.
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Deliveries above this count are discarded. 0 disables the check.
    pub fn with_max_receive_count(mut self, max_receive_count: u32) -> Self {
        self.max_receive_count = max_receive_count;
        self
    }

    pub fn mode(&self) -> WorkerMode {
        self.mode
    }

    #[tracing::instrument(
        skip(self, message),
        fields(message_id = %message.message_id, receive_count = message.receive_count)
    )]
    pub async fn process(&self, message: &ReceivedMessage) -> Outcome {
        if self.max_receive_count > 0 && message.receive_count > self.max_receive_count {
            tracing::error!(
                body = %message.body,
                max_receive_count = self.max_receive_count,
                "Message exceeded receive limit, discarding"
            );
            return match self.acknowledge(message).await {
                Ok(()) => Outcome::Discarded,
                Err(e) => Outcome::Abandoned(e.to_string()),
            };
        }

        if let Err(e) = self.run_steps(message).await {
            tracing::error!(
                error = %e,
                body = %message.body,
                "Message processing failed, leaving it on the queue"
            );
            return Outcome::Abandoned(e.to_string());
        }

        match self.acknowledge(message).await {
            Ok(()) => {
                tracing::info!("Message processed");
                Outcome::Acknowledged
            }
            Err(e) => Outcome::Abandoned(e.to_string()),
        }
    }

    async fn run_steps(&self, message: &ReceivedMessage) -> Result<(), AppError> {
        let envelope = UrlMessage::from_body(&message.body)
            .map_err(|e| AppError::InvalidInput(format!("Malformed message body: {}", e)))?;
        let url = envelope.url.as_str();

        tracing::info!(url = %url, sender = ?message.sender, mode = %self.mode, "Processing URL");

        if self.mode == WorkerMode::Noop {
            return Ok(());
        }

        let info = self.tool.fetch_info(url).await?;
        let path = self.tool.extract_audio(url, &info, &self.work_dir).await?;

        if self.mode == WorkerMode::ExtractOnly {
            tracing::info!(path = %path.display(), "Extract-only mode, keeping local file");
            return Ok(());
        }

        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| AppError::Config("No storage configured for full mode".to_string()))?;

        let key = artifact_key(&info.title, AUDIO_EXTENSION);
        let location = storage.upload_file(&key, &path).await?;
        tracing::info!(key = %key, location = %location, "Audio uploaded");

        remove_artifact(&path).await;
        Ok(())
    }

    async fn acknowledge(&self, message: &ReceivedMessage) -> Result<(), AppError> {
        self.queue
            .delete(&message.receipt_handle)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to delete message");
                AppError::from(e)
            })
    }
}

/// Best-effort removal of the local artifact; failure is only logged.
async fn remove_artifact(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(error = %e, path = %path.display(), "Failed to remove local artifact");
    }
}
