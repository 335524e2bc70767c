#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use getchanski_core::models::MediaInfo;
use getchanski_media::{ExtractionTool, ToolError, ToolResult};
use getchanski_storage::{Storage, StorageBackend, StorageError, StorageResult};
use getchanski_worker::{MessageQueue, QueueError, ReceivedMessage};

pub fn message(body: &str) -> ReceivedMessage {
    ReceivedMessage {
        message_id: "m-1".to_string(),
        receipt_handle: "rh-1".to_string(),
        body: body.to_string(),
        receive_count: 1,
        sender: Some("getchanski-lambda-0".to_string()),
    }
}

pub fn url_message(url: &str) -> ReceivedMessage {
    message(&format!(r#"{{"URL":"{}"}}"#, url))
}

#[derive(Default)]
struct QueueState {
    sent: Vec<(String, HashMap<String, String>)>,
    receives: VecDeque<Result<Vec<ReceivedMessage>, String>>,
    receive_calls: usize,
    deleted: Vec<String>,
    fail_send: bool,
    fail_delete: bool,
}

/// Scripted in-process queue.
///
/// Receive calls pop scripted results. Once the script is exhausted the call
/// signals `drained` and never returns, like a long poll on an empty queue.
#[derive(Default)]
pub struct FakeQueue {
    state: Mutex<QueueState>,
    pub drained: Arc<Notify>,
}

impl FakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_messages(&self, messages: Vec<ReceivedMessage>) {
        self.state.lock().unwrap().receives.push_back(Ok(messages));
    }

    pub fn push_receive_error(&self, message: &str) {
        self.state
            .lock()
            .unwrap()
            .receives
            .push_back(Err(message.to_string()));
    }

    pub fn fail_send(&self) {
        self.state.lock().unwrap().fail_send = true;
    }

    pub fn fail_delete(&self) {
        self.state.lock().unwrap().fail_delete = true;
    }

    pub fn sent(&self) -> Vec<(String, HashMap<String, String>)> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn receive_calls(&self) -> usize {
        self.state.lock().unwrap().receive_calls
    }
}

#[async_trait]
impl MessageQueue for FakeQueue {
    async fn send(
        &self,
        body: &str,
        attributes: &HashMap<String, String>,
    ) -> Result<String, QueueError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_send {
            return Err(QueueError::Send("queue unavailable".to_string()));
        }
        state.sent.push((body.to_string(), attributes.clone()));
        Ok(format!("msg-{}", state.sent.len()))
    }

    async fn receive(
        &self,
        _max_messages: i32,
        _wait_secs: i32,
    ) -> Result<Vec<ReceivedMessage>, QueueError> {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.receive_calls += 1;
            state.receives.pop_front()
        };

        match next {
            Some(Ok(messages)) => Ok(messages),
            Some(Err(message)) => Err(QueueError::Receive(message)),
            None => {
                self.drained.notify_one();
                std::future::pending().await
            }
        }
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_delete {
            return Err(QueueError::Delete("receipt handle expired".to_string()));
        }
        state.deleted.push(receipt_handle.to_string());
        Ok(())
    }
}

/// Extraction tool that writes `<id>.mp3` without running anything.
pub struct FakeTool {
    info: MediaInfo,
    fail_info: bool,
    fail_extract: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeTool {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            info: MediaInfo {
                id: id.to_string(),
                title: title.to_string(),
                ext: "webm".to_string(),
            },
            fail_info: false,
            fail_extract: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_info(mut self) -> Self {
        self.fail_info = true;
        self
    }

    pub fn failing_extract(mut self) -> Self {
        self.fail_extract = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionTool for FakeTool {
    async fn fetch_info(&self, url: &str) -> ToolResult<MediaInfo> {
        self.calls.lock().unwrap().push(format!("info {}", url));
        if self.fail_info {
            return Err(ToolError::Failed {
                command: "youtube-dl --dump-json".to_string(),
                exit_code: Some(1),
                output: "ERROR: Unsupported URL".to_string(),
            });
        }
        Ok(self.info.clone())
    }

    async fn extract_audio(
        &self,
        url: &str,
        info: &MediaInfo,
        output_dir: &Path,
    ) -> ToolResult<PathBuf> {
        self.calls.lock().unwrap().push(format!("extract {}", url));
        if self.fail_extract {
            return Err(ToolError::Failed {
                command: "youtube-dl --extract-audio".to_string(),
                exit_code: Some(1),
                output: "ERROR: ffmpeg not found".to_string(),
            });
        }
        let path = output_dir.join(format!("{}.mp3", info.id));
        tokio::fs::write(&path, b"audio").await.unwrap();
        Ok(path)
    }
}

/// Storage whose uploads always fail.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn upload_file(&self, _storage_key: &str, _path: &Path) -> StorageResult<String> {
        Err(StorageError::UploadFailed("access denied".to_string()))
    }

    async fn upload_with_key(&self, _storage_key: &str, _data: Vec<u8>) -> StorageResult<String> {
        Err(StorageError::UploadFailed("access denied".to_string()))
    }

    async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    async fn delete(&self, _storage_key: &str) -> StorageResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
