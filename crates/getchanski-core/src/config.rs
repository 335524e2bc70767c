//! Configuration module
//!
//! Configuration is read from the environment (after loading `.env` with dotenvy).
//! Both binaries share one `Config`; each uses the sections it needs.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context};

use crate::constants::{
    DEFAULT_AWS_REGION, DEFAULT_BUCKET, DEFAULT_COOKIE_DOMAIN, DEFAULT_OAUTH_AUTHORIZE_URL,
    DEFAULT_OAUTH_CLIENT_ID, DEFAULT_PROFILE_API_URL, DEFAULT_SENDER_TAG, DEFAULT_USERS_TABLE,
    MAX_LONGPOLL_WAIT_SECS,
};
use crate::storage_types::StorageBackend;

const LONGPOLL_WAIT_SECS: i32 = 10;
const RECEIVE_ERROR_BACKOFF_SECS: u64 = 30;
const MAX_RECEIVE_COUNT: u32 = 5;
const EXTRACTOR_RETRIES: u32 = 10;
const SERVER_PORT: u16 = 3000;

/// Queue endpoint and polling behaviour
#[derive(Clone, Debug)]
pub struct QueueConfig {
    pub url: String,
    /// Long-poll wait passed to every receive call, 0..=20.
    pub longpoll_wait_secs: i32,
    /// Fixed sleep after a failed receive call.
    pub receive_error_backoff_secs: u64,
    /// Messages received more often than this are discarded. 0 = unbounded.
    pub max_receive_count: u32,
    pub sender_tag: String,
}

/// Object storage for uploaded artifacts
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub endpoint: Option<String>, // S3-compatible providers (MinIO, localstack)
    pub local_path: Option<String>,
}

/// Which processing steps the worker runs for each message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerMode {
    /// Extract audio, upload it, remove the local file.
    Full,
    /// Extract audio and keep it in the work directory.
    ExtractOnly,
    /// Log the URL and acknowledge.
    Noop,
}

impl FromStr for WorkerMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(WorkerMode::Full),
            "extract-only" | "extract_only" => Ok(WorkerMode::ExtractOnly),
            "noop" => Ok(WorkerMode::Noop),
            _ => Err(anyhow!("Invalid worker mode: {}", s)),
        }
    }
}

impl Display for WorkerMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            WorkerMode::Full => write!(f, "full"),
            WorkerMode::ExtractOnly => write!(f, "extract-only"),
            WorkerMode::Noop => write!(f, "noop"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct WorkerConfig {
    pub mode: WorkerMode,
    pub extractor_path: String,
    pub extractor_retries: u32,
    /// Per-invocation timeout for the extraction tool; `None` waits indefinitely.
    pub extractor_timeout_secs: Option<u64>,
    pub work_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct OAuthConfig {
    pub client_id: String,
    pub authorize_url: String,
    pub profile_api_url: String,
    pub cookie_domain: String,
    pub users_table: String,
}

impl OAuthConfig {
    /// Authorization URL the browser is sent to (implicit grant).
    pub fn authorization_url(&self) -> String {
        format!(
            "{}?response_type=token&client_id={}",
            self.authorize_url, self.client_id
        )
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub server_port: u16,
    pub aws_region: String,
    pub aws_endpoint_url: Option<String>,
    pub queue: QueueConfig,
    pub storage: StorageConfig,
    pub worker: WorkerConfig,
    pub oauth: OAuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let queue_url = var("SQS_URL").ok_or_else(|| anyhow!("SQS_URL must be set"))?;

        let longpoll_wait_secs: i32 =
            parse_or(&var, "SQS_LONGPOLL_TIMEOUT_IN_SEC", LONGPOLL_WAIT_SECS)?;
        if !(0..=MAX_LONGPOLL_WAIT_SECS).contains(&longpoll_wait_secs) {
            return Err(anyhow!(
                "SQS_LONGPOLL_TIMEOUT_IN_SEC must be between 0 and {}, got {}",
                MAX_LONGPOLL_WAIT_SECS,
                longpoll_wait_secs
            ));
        }

        let queue = QueueConfig {
            url: queue_url,
            longpoll_wait_secs,
            receive_error_backoff_secs: parse_or(
                &var,
                "SQS_RECEIVE_ERROR_BACKOFF_SECS",
                RECEIVE_ERROR_BACKOFF_SECS,
            )?,
            max_receive_count: parse_or(&var, "SQS_MAX_RECEIVE_COUNT", MAX_RECEIVE_COUNT)?,
            sender_tag: var("SQS_SENDER_TAG").unwrap_or_else(|| DEFAULT_SENDER_TAG.to_string()),
        };

        let storage = StorageConfig {
            backend: parse_or(&var, "STORAGE_BACKEND", StorageBackend::S3)?,
            bucket: var("S3_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            endpoint: var("S3_ENDPOINT"),
            local_path: var("LOCAL_STORAGE_PATH"),
        };

        let work_dir = match var("WORK_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir().context("Failed to resolve current directory")?,
        };

        let worker = WorkerConfig {
            mode: parse_or(&var, "WORKER_MODE", WorkerMode::Full)?,
            extractor_path: var("EXTRACTOR_PATH").unwrap_or_else(|| "youtube-dl".to_string()),
            extractor_retries: parse_or(&var, "EXTRACTOR_RETRIES", EXTRACTOR_RETRIES)?,
            extractor_timeout_secs: parse_opt(&var, "EXTRACTOR_TIMEOUT_SECS")?,
            work_dir,
        };

        let oauth = OAuthConfig {
            client_id: var("OAUTH_CLIENT_ID").unwrap_or_else(|| DEFAULT_OAUTH_CLIENT_ID.to_string()),
            authorize_url: var("OAUTH_AUTHORIZE_URL")
                .unwrap_or_else(|| DEFAULT_OAUTH_AUTHORIZE_URL.to_string()),
            profile_api_url: var("PROFILE_API_URL")
                .unwrap_or_else(|| DEFAULT_PROFILE_API_URL.to_string()),
            cookie_domain: var("COOKIE_DOMAIN").unwrap_or_else(|| DEFAULT_COOKIE_DOMAIN.to_string()),
            users_table: var("USERS_TABLE").unwrap_or_else(|| DEFAULT_USERS_TABLE.to_string()),
        };

        let config = Config {
            environment,
            server_port: parse_or(&var, "SERVER_PORT", SERVER_PORT)?,
            aws_region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            aws_endpoint_url: var("AWS_ENDPOINT_URL"),
            queue,
            storage,
            worker,
            oauth,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage.backend == StorageBackend::Local && self.storage.local_path.is_none() {
            return Err(anyhow!(
                "LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"
            ));
        }
        if self.worker.extractor_path.trim().is_empty() {
            return Err(anyhow!("EXTRACTOR_PATH must not be empty"));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid value for {}: {} ({})", key, raw, e)),
        None => Ok(default),
    }
}

fn parse_opt<T, F>(var: &F, key: &str) -> Result<Option<T>, anyhow::Error>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow!("Invalid value for {}: {} ({})", key, raw, e))
        })
        .transpose()
}
