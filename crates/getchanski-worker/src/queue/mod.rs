//! Message queue abstraction
//!
//! The worker and the enqueue path only need three operations: send a body
//! with string attributes, long-poll for messages, delete by receipt handle.

mod sqs;

pub use sqs::SqsQueue;

use async_trait::async_trait;
use std::collections::HashMap;

use getchanski_core::AppError;

/// A message handed out by the queue, valid until its visibility timeout lapses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub message_id: String,
    /// Handle required to delete this delivery of the message.
    pub receipt_handle: String,
    pub body: String,
    /// How many times the message has been received, including this delivery.
    pub receive_count: u32,
    /// Value of the `Sender` message attribute, when present.
    pub sender: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Failed to send message: {0}")]
    Send(String),

    #[error("Failed to receive messages: {0}")]
    Receive(String),

    #[error("Failed to delete message: {0}")]
    Delete(String),

    #[error("Queue response is missing {0}")]
    MissingField(&'static str),
}

impl From<QueueError> for AppError {
    fn from(err: QueueError) -> Self {
        AppError::Queue(err.to_string())
    }
}

#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Send one message and return the queue-assigned id.
    async fn send(
        &self,
        body: &str,
        attributes: &HashMap<String, String>,
    ) -> Result<String, QueueError>;

    /// Long-poll for up to `max_messages`, waiting at most `wait_secs`.
    ///
    /// An empty result is a normal outcome of a poll.
    async fn receive(
        &self,
        max_messages: i32,
        wait_secs: i32,
    ) -> Result<Vec<ReceivedMessage>, QueueError>;

    /// Delete a received message so it is not delivered again.
    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError>;
}
