//! Getchanski CLI: submit URLs straight to the queue.
//!
//! Reads the same environment as the services (`SQS_URL`, `AWS_REGION`, ...).

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;

use getchanski_cli::{enqueue_all, init_tracing};
use getchanski_core::Config;
use getchanski_worker::{load_sdk_config, SqsQueue, UrlQueue};

#[derive(Parser)]
#[command(name = "getchanski", about = "Getchanski queue CLI")]
struct Cli {
    /// Queue URL; overrides SQS_URL
    #[arg(long, global = true)]
    queue_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enqueue one or more URLs for audio extraction
    Enqueue {
        /// URLs to submit
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let queue_url = cli.queue_url.clone();
    let config = Config::from_lookup(|key| match (key, &queue_url) {
        ("SQS_URL", Some(url)) => Some(url.clone()),
        _ => std::env::var(key).ok(),
    })
    .context("Invalid configuration")?;

    match cli.command {
        Commands::Enqueue { urls } => {
            let sdk_config = load_sdk_config(&config).await;
            let queue = SqsQueue::from_sdk_config(&sdk_config, config.queue.url.clone());
            let url_queue = UrlQueue::new(Arc::new(queue), config.queue.sender_tag.clone());

            let reports = enqueue_all(&url_queue, &urls).await;
            print_json(&reports)?;

            let failed = reports.iter().filter(|r| !r.is_ok()).count();
            if failed > 0 {
                anyhow::bail!("{} of {} URLs failed to enqueue", failed, reports.len());
            }
        }
    }

    Ok(())
}
