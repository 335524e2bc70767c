mod helpers;

use std::sync::Arc;

use getchanski_core::models::UrlMessage;
use getchanski_core::AppError;
use getchanski_worker::UrlQueue;

use helpers::FakeQueue;

#[tokio::test]
async fn enqueue_sends_envelope_with_sender_attribute() {
    let queue = Arc::new(FakeQueue::new());
    let urls = UrlQueue::new(queue.clone(), "getchanski-lambda-0");

    let message_id = urls
        .enqueue_url("https://www.youtube.com/watch?v=abc123")
        .await
        .unwrap();

    assert_eq!(message_id, "msg-1");
    let sent = queue.sent();
    assert_eq!(sent.len(), 1);
    let (body, attributes) = &sent[0];
    assert_eq!(
        body,
        r#"{"URL":"https://www.youtube.com/watch?v=abc123"}"#
    );
    assert_eq!(
        UrlMessage::from_body(body).unwrap().url,
        "https://www.youtube.com/watch?v=abc123"
    );
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes["Sender"], "getchanski-lambda-0");
}

#[tokio::test]
async fn blank_url_is_rejected_before_sending() {
    let queue = Arc::new(FakeQueue::new());
    let urls = UrlQueue::new(queue.clone(), "getchanski-lambda-0");

    let err = urls.enqueue_url("   ").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(queue.sent().is_empty());
}

#[tokio::test]
async fn send_failure_is_returned_to_the_caller() {
    let queue = Arc::new(FakeQueue::new());
    queue.fail_send();
    let urls = UrlQueue::new(queue.clone(), "getchanski-lambda-0");

    let err = urls.enqueue_url("https://example.com").await.unwrap_err();

    assert!(matches!(err, AppError::Queue(_)));
}
