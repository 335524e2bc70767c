use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::{Message, MessageAttributeValue, MessageSystemAttributeName};
use aws_sdk_sqs::Client;
use std::collections::HashMap;

use getchanski_core::constants::SENDER_ATTRIBUTE;

use super::{MessageQueue, QueueError, ReceivedMessage};

const ALL_ATTRIBUTES: &str = "All";
const STRING_DATA_TYPE: &str = "String";

/// `MessageQueue` over a single SQS queue
#[derive(Clone, Debug)]
pub struct SqsQueue {
    client: Client,
    queue_url: String,
}

impl SqsQueue {
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    pub fn from_sdk_config(config: &SdkConfig, queue_url: impl Into<String>) -> Self {
        Self::new(Client::new(config), queue_url)
    }
}

/// Convert an SDK message, dropping deliveries that cannot be deleted.
fn to_received(message: &Message) -> Option<ReceivedMessage> {
    let receipt_handle = message.receipt_handle()?.to_string();

    let receive_count = message
        .attributes()
        .and_then(|attrs| attrs.get(&MessageSystemAttributeName::ApproximateReceiveCount))
        .and_then(|count| count.parse::<u32>().ok())
        .unwrap_or(1);

    let sender = message
        .message_attributes()
        .and_then(|attrs| attrs.get(SENDER_ATTRIBUTE))
        .and_then(|value| value.string_value())
        .map(str::to_string);

    Some(ReceivedMessage {
        message_id: message.message_id().unwrap_or_default().to_string(),
        receipt_handle,
        body: message.body().unwrap_or_default().to_string(),
        receive_count,
        sender,
    })
}

#[async_trait]
impl MessageQueue for SqsQueue {
    #[tracing::instrument(skip(self, body, attributes), fields(queue_url = %self.queue_url))]
    async fn send(
        &self,
        body: &str,
        attributes: &HashMap<String, String>,
    ) -> Result<String, QueueError> {
        let mut request = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body);

        for (name, value) in attributes {
            let attribute = MessageAttributeValue::builder()
                .data_type(STRING_DATA_TYPE)
                .string_value(value)
                .build()
                .map_err(|e| QueueError::Send(e.to_string()))?;
            request = request.message_attributes(name, attribute);
        }

        let output = request
            .send()
            .await
            .map_err(|e| QueueError::Send(DisplayErrorContext(&e).to_string()))?;

        output
            .message_id()
            .map(str::to_string)
            .ok_or(QueueError::MissingField("MessageId"))
    }

    async fn receive(
        &self,
        max_messages: i32,
        wait_secs: i32,
    ) -> Result<Vec<ReceivedMessage>, QueueError> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .message_system_attribute_names(MessageSystemAttributeName::All)
            .message_attribute_names(ALL_ATTRIBUTES)
            .max_number_of_messages(max_messages)
            .wait_time_seconds(wait_secs)
            .send()
            .await
            .map_err(|e| QueueError::Receive(DisplayErrorContext(&e).to_string()))?;

        let messages = output
            .messages()
            .iter()
            .filter_map(|message| {
                let received = to_received(message);
                if received.is_none() {
                    tracing::warn!(
                        message_id = ?message.message_id(),
                        "Received message without receipt handle, skipping"
                    );
                }
                received
            })
            .collect();

        Ok(messages)
    }

    #[tracing::instrument(skip(self, receipt_handle), fields(queue_url = %self.queue_url))]
    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| QueueError::Delete(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
