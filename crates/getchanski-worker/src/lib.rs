//! Getchanski worker library
//!
//! - [`aws`]: SDK configuration shared by the AWS clients
//! - [`queue`]: the message queue seam and its SQS implementation
//! - [`enqueue`]: URL submission used by the API and the CLI
//! - [`pipeline`]: processing of a single received message
//! - [`worker`]: the long-poll loop

pub mod aws;
pub mod enqueue;
pub mod pipeline;
pub mod queue;
pub mod worker;

pub use aws::load_sdk_config;
pub use enqueue::UrlQueue;
pub use pipeline::{MediaPipeline, Outcome};
pub use queue::{MessageQueue, QueueError, ReceivedMessage, SqsQueue};
pub use worker::Worker;
