//! Long-poll loop
//!
//! The worker is either idle (waiting on a receive call) or processing the
//! messages returned by the last receive. Shutdown is only observed while
//! idle, so a message in flight always runs to completion.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use getchanski_core::QueueConfig;

use crate::pipeline::{MediaPipeline, Outcome};
use crate::queue::{MessageQueue, QueueError, ReceivedMessage};

/// Messages requested per receive call.
const MESSAGES_PER_POLL: i32 = 1;

pub struct Worker {
    queue: Arc<dyn MessageQueue>,
    pipeline: MediaPipeline,
    wait_secs: i32,
    receive_error_backoff: Duration,
}

impl Worker {
    pub fn new(queue: Arc<dyn MessageQueue>, pipeline: MediaPipeline, config: &QueueConfig) -> Self {
        Self {
            queue,
            pipeline,
            wait_secs: config.longpoll_wait_secs,
            receive_error_backoff: Duration::from_secs(config.receive_error_backoff_secs),
        }
    }

    /// Run one receive call and process whatever it returned.
    pub async fn poll_once(&self) -> Result<Vec<Outcome>, QueueError> {
        let messages = self.receive().await?;
        Ok(self.process_all(messages).await)
    }

    async fn receive(&self) -> Result<Vec<ReceivedMessage>, QueueError> {
        self.queue.receive(MESSAGES_PER_POLL, self.wait_secs).await
    }

    async fn process_all(&self, messages: Vec<ReceivedMessage>) -> Vec<Outcome> {
        if messages.is_empty() {
            tracing::debug!("No messages received");
        }

        let mut outcomes = Vec::with_capacity(messages.len());
        for message in &messages {
            outcomes.push(self.pipeline.process(message).await);
        }
        outcomes
    }

    /// Poll until `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        tracing::info!(
            wait_secs = self.wait_secs,
            backoff_secs = self.receive_error_backoff.as_secs(),
            mode = %self.pipeline.mode(),
            "Worker started"
        );

        loop {
            let received = tokio::select! {
                biased;
                _ = &mut shutdown => break,
                received = self.receive() => received,
            };

            match received {
                Ok(messages) => {
                    self.process_all(messages).await;
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        backoff_secs = self.receive_error_backoff.as_secs(),
                        "Failed to receive messages, backing off"
                    );
                    tokio::select! {
                        biased;
                        _ = &mut shutdown => break,
                        _ = tokio::time::sleep(self.receive_error_backoff) => {}
                    }
                }
            }
        }

        tracing::info!("Worker stopped");
    }
}
