mod helpers;

use std::sync::Arc;

use getchanski_core::WorkerMode;
use getchanski_storage::{ObjectStorage, Storage};
use getchanski_worker::{MediaPipeline, Outcome};

use helpers::{message, url_message, FailingStorage, FakeQueue, FakeTool};

struct Fixture {
    queue: Arc<FakeQueue>,
    tool: Arc<FakeTool>,
    storage: Arc<ObjectStorage>,
    bucket_dir: tempfile::TempDir,
    work_dir: tempfile::TempDir,
}

impl Fixture {
    fn new(tool: FakeTool) -> Self {
        let bucket_dir = tempfile::tempdir().unwrap();
        Self {
            queue: Arc::new(FakeQueue::new()),
            tool: Arc::new(tool),
            storage: Arc::new(ObjectStorage::local(bucket_dir.path()).unwrap()),
            bucket_dir,
            work_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Names of the objects in the bucket directory.
    fn stored_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = std::fs::read_dir(self.bucket_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        keys.sort();
        keys
    }

    fn pipeline(&self, mode: WorkerMode) -> MediaPipeline {
        MediaPipeline::new(
            self.queue.clone(),
            self.tool.clone(),
            mode,
            self.work_dir.path(),
        )
        .with_storage(self.storage.clone())
        .with_max_receive_count(5)
    }
}

#[tokio::test]
async fn full_mode_uploads_cleans_up_and_deletes() {
    let fixture = Fixture::new(FakeTool::new("abc123", "My Video"));

    let outcome = fixture
        .pipeline(WorkerMode::Full)
        .process(&url_message("https://example.com/video"))
        .await;

    assert_eq!(outcome, Outcome::Acknowledged);
    assert_eq!(fixture.queue.deleted(), vec!["rh-1".to_string()]);
    assert_eq!(
        fixture.tool.calls(),
        vec![
            "info https://example.com/video".to_string(),
            "extract https://example.com/video".to_string(),
        ]
    );
    assert_eq!(
        std::fs::read(fixture.bucket_dir.path().join("My Video.mp3")).unwrap(),
        b"audio".to_vec()
    );
    assert!(!fixture.work_dir.path().join("abc123.mp3").exists());
}

#[tokio::test]
async fn title_with_slash_is_sanitized_in_key() {
    let fixture = Fixture::new(FakeTool::new("x1", "AC/DC Live"));

    let outcome = fixture
        .pipeline(WorkerMode::Full)
        .process(&url_message("https://example.com/acdc"))
        .await;

    assert_eq!(outcome, Outcome::Acknowledged);
    assert!(fixture.storage.exists("AC_DC Live.mp3").await.unwrap());
}

#[tokio::test]
async fn title_with_brackets_and_percent_is_stored_verbatim() {
    let fixture = Fixture::new(FakeTool::new("q9", "Song [Official Video] 100%"));

    let outcome = fixture
        .pipeline(WorkerMode::Full)
        .process(&url_message("https://example.com/song"))
        .await;

    assert_eq!(outcome, Outcome::Acknowledged);
    assert_eq!(
        fixture.stored_keys(),
        vec!["Song [Official Video] 100%.mp3".to_string()]
    );
}

#[tokio::test]
async fn malformed_body_is_left_on_the_queue() {
    let fixture = Fixture::new(FakeTool::new("abc123", "My Video"));

    let outcome = fixture
        .pipeline(WorkerMode::Full)
        .process(&message("not json"))
        .await;

    assert!(matches!(outcome, Outcome::Abandoned(reason) if reason.contains("Malformed")));
    assert!(fixture.queue.deleted().is_empty());
    assert!(fixture.tool.calls().is_empty());
}

#[tokio::test]
async fn tool_failure_is_left_on_the_queue() {
    let fixture = Fixture::new(FakeTool::new("abc123", "My Video").failing_info());

    let outcome = fixture
        .pipeline(WorkerMode::Full)
        .process(&url_message("https://example.com/video"))
        .await;

    assert!(matches!(outcome, Outcome::Abandoned(reason) if reason.contains("Unsupported URL")));
    assert!(fixture.queue.deleted().is_empty());
    assert_eq!(fixture.tool.calls().len(), 1);
}

#[tokio::test]
async fn extraction_failure_is_left_on_the_queue() {
    let fixture = Fixture::new(FakeTool::new("abc123", "My Video").failing_extract());

    let outcome = fixture
        .pipeline(WorkerMode::Full)
        .process(&url_message("https://example.com/video"))
        .await;

    assert!(matches!(outcome, Outcome::Abandoned(_)));
    assert!(fixture.queue.deleted().is_empty());
    assert!(!fixture.storage.exists("My Video.mp3").await.unwrap());
}

#[tokio::test]
async fn upload_failure_keeps_message_and_local_file() {
    let queue = Arc::new(FakeQueue::new());
    let work_dir = tempfile::tempdir().unwrap();
    let pipeline = MediaPipeline::new(
        queue.clone(),
        Arc::new(FakeTool::new("abc123", "My Video")),
        WorkerMode::Full,
        work_dir.path(),
    )
    .with_storage(Arc::new(FailingStorage));

    let outcome = pipeline
        .process(&url_message("https://example.com/video"))
        .await;

    assert!(matches!(outcome, Outcome::Abandoned(reason) if reason.contains("access denied")));
    assert!(queue.deleted().is_empty());
    assert!(work_dir.path().join("abc123.mp3").exists());
}

#[tokio::test]
async fn failed_delete_abandons_the_message() {
    let fixture = Fixture::new(FakeTool::new("abc123", "My Video"));
    fixture.queue.fail_delete();

    let outcome = fixture
        .pipeline(WorkerMode::Full)
        .process(&url_message("https://example.com/video"))
        .await;

    assert!(matches!(outcome, Outcome::Abandoned(reason) if reason.contains("expired")));
    // The upload already happened; a redelivery overwrites the same key.
    assert!(fixture.storage.exists("My Video.mp3").await.unwrap());
}

#[tokio::test]
async fn message_over_receive_limit_is_discarded() {
    let fixture = Fixture::new(FakeTool::new("abc123", "My Video"));
    let mut poisoned = url_message("https://example.com/video");
    poisoned.receive_count = 6;

    let outcome = fixture.pipeline(WorkerMode::Full).process(&poisoned).await;

    assert_eq!(outcome, Outcome::Discarded);
    assert_eq!(fixture.queue.deleted(), vec!["rh-1".to_string()]);
    assert!(fixture.tool.calls().is_empty());
}

#[tokio::test]
async fn message_at_receive_limit_is_processed() {
    let fixture = Fixture::new(FakeTool::new("abc123", "My Video"));
    let mut retried = url_message("https://example.com/video");
    retried.receive_count = 5;

    let outcome = fixture.pipeline(WorkerMode::Full).process(&retried).await;

    assert_eq!(outcome, Outcome::Acknowledged);
    assert_eq!(fixture.tool.calls().len(), 2);
}

#[tokio::test]
async fn zero_receive_limit_never_discards() {
    let queue = Arc::new(FakeQueue::new());
    let tool = Arc::new(FakeTool::new("abc123", "My Video"));
    let pipeline = MediaPipeline::new(queue.clone(), tool.clone(), WorkerMode::Noop, "/tmp");
    let mut retried = url_message("https://example.com/video");
    retried.receive_count = 1000;

    assert_eq!(pipeline.process(&retried).await, Outcome::Acknowledged);
}

#[tokio::test]
async fn noop_mode_only_acknowledges() {
    let fixture = Fixture::new(FakeTool::new("abc123", "My Video"));

    let outcome = fixture
        .pipeline(WorkerMode::Noop)
        .process(&url_message("https://example.com/video"))
        .await;

    assert_eq!(outcome, Outcome::Acknowledged);
    assert!(fixture.tool.calls().is_empty());
    assert_eq!(fixture.queue.deleted().len(), 1);
}

#[tokio::test]
async fn extract_only_mode_keeps_the_artifact() {
    let queue = Arc::new(FakeQueue::new());
    let work_dir = tempfile::tempdir().unwrap();
    let pipeline = MediaPipeline::new(
        queue.clone(),
        Arc::new(FakeTool::new("abc123", "My Video")),
        WorkerMode::ExtractOnly,
        work_dir.path(),
    );

    let outcome = pipeline
        .process(&url_message("https://example.com/video"))
        .await;

    assert_eq!(outcome, Outcome::Acknowledged);
    assert!(work_dir.path().join("abc123.mp3").exists());
    assert_eq!(queue.deleted().len(), 1);
}

#[tokio::test]
async fn full_mode_without_storage_is_abandoned() {
    let queue = Arc::new(FakeQueue::new());
    let work_dir = tempfile::tempdir().unwrap();
    let pipeline = MediaPipeline::new(
        queue.clone(),
        Arc::new(FakeTool::new("abc123", "My Video")),
        WorkerMode::Full,
        work_dir.path(),
    );

    let outcome = pipeline
        .process(&url_message("https://example.com/video"))
        .await;

    assert!(matches!(outcome, Outcome::Abandoned(_)));
    assert!(queue.deleted().is_empty());
}
