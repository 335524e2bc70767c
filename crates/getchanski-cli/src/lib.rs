use serde::Serialize;

use getchanski_core::constants::STATUS_OK;
use getchanski_worker::UrlQueue;

/// Per-URL result printed by the `enqueue` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnqueueReport {
    pub url: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EnqueueReport {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Submit every URL in order. A failed URL does not stop the remaining ones.
pub async fn enqueue_all(queue: &UrlQueue, urls: &[String]) -> Vec<EnqueueReport> {
    let mut reports = Vec::with_capacity(urls.len());
    for url in urls {
        let report = match queue.enqueue_url(url).await {
            Ok(message_id) => EnqueueReport {
                url: url.clone(),
                status: STATUS_OK.to_string(),
                message_id: Some(message_id),
                error: None,
            },
            Err(e) => EnqueueReport {
                url: url.clone(),
                status: "error".to_string(),
                message_id: None,
                error: Some(e.to_string()),
            },
        };
        reports.push(report);
    }
    reports
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
