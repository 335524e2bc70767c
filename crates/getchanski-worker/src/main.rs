use std::sync::Arc;

use anyhow::Context;

use getchanski_core::{Config, WorkerMode};
use getchanski_infra::{init_telemetry, shutdown_signal, TelemetryFormat};
use getchanski_media::YoutubeDl;
use getchanski_storage::create_storage;
use getchanski_worker::{load_sdk_config, MediaPipeline, MessageQueue, SqsQueue, Worker};

const DEFAULT_LOG_FILTER: &str = "getchanski=debug,aws_config=info";

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let format = if config.is_production() {
        TelemetryFormat::Json
    } else {
        TelemetryFormat::Pretty
    };
    init_telemetry("getchanski-worker", DEFAULT_LOG_FILTER, format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    let worker = match build_worker(&config).await {
        Ok(worker) => worker,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize worker");
            std::process::exit(1);
        }
    };

    worker.run(shutdown_signal()).await;
    Ok(())
}

async fn build_worker(config: &Config) -> Result<Worker, anyhow::Error> {
    let sdk_config = load_sdk_config(config).await;
    let queue: Arc<dyn MessageQueue> =
        Arc::new(SqsQueue::from_sdk_config(&sdk_config, config.queue.url.clone()));

    let worker_config = &config.worker;
    tokio::fs::create_dir_all(&worker_config.work_dir)
        .await
        .with_context(|| format!("Failed to create {}", worker_config.work_dir.display()))?;

    let tool = Arc::new(YoutubeDl::from_config(worker_config));
    let mut pipeline = MediaPipeline::new(
        queue.clone(),
        tool,
        worker_config.mode,
        worker_config.work_dir.clone(),
    )
    .with_max_receive_count(config.queue.max_receive_count);

    if worker_config.mode == WorkerMode::Full {
        let storage = create_storage(config).context("Failed to initialize storage")?;
        tracing::info!(
            backend = %storage.backend_type(),
            bucket = %config.storage.bucket,
            "Storage initialized"
        );
        pipeline = pipeline.with_storage(storage);
    }

    tracing::info!(
        queue_url = %config.queue.url,
        mode = %worker_config.mode,
        extractor = %worker_config.extractor_path,
        work_dir = %worker_config.work_dir.display(),
        "Worker initialized"
    );

    Ok(Worker::new(queue, pipeline, &config.queue))
}
