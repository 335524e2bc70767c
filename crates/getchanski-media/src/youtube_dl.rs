//! youtube-dl subprocess runner.
//!
//! The tool is invoked twice per URL: once with `--dump-json` to read the
//! metadata, once to download and re-encode the audio track to mp3. Output is
//! written to the working directory using the `%(id)s.%(ext)s` template.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

use getchanski_core::constants::AUDIO_EXTENSION;
use getchanski_core::models::MediaInfo;
use getchanski_core::WorkerConfig;

use crate::error::{ToolError, ToolResult};
use crate::tool::ExtractionTool;

/// Output template handed to the tool; the artifact name is derived from it.
pub const OUTPUT_TEMPLATE: &str = "%(id)s.%(ext)s";

/// Audio format selection: native mp3 first, then any best audio stream.
pub const FORMAT_SELECTOR: &str = "bestaudio[ext=mp3]/bestaudio/best";

#[derive(Debug, Clone)]
pub struct YoutubeDl {
    binary: String,
    retries: u32,
    timeout: Option<Duration>,
}

impl YoutubeDl {
    pub fn new(binary: impl Into<String>, retries: u32, timeout: Option<Duration>) -> Self {
        Self {
            binary: binary.into(),
            retries,
            timeout,
        }
    }

    pub fn from_config(config: &WorkerConfig) -> Self {
        Self::new(
            config.extractor_path.clone(),
            config.extractor_retries,
            config.extractor_timeout_secs.map(Duration::from_secs),
        )
    }

    fn common_args(&self) -> Vec<String> {
        vec![
            "--no-mark-watched".to_string(),
            "--no-color".to_string(),
            "--no-playlist".to_string(),
            "--retries".to_string(),
            self.retries.to_string(),
            "--no-cache-dir".to_string(),
            "--no-progress".to_string(),
        ]
    }

    /// Arguments for the metadata call.
    pub fn info_args(&self, url: &str) -> Vec<String> {
        let mut args = self.common_args();
        args.extend(
            ["--dump-json", "--no-warnings", url]
                .iter()
                .map(|s| s.to_string()),
        );
        args
    }

    /// Arguments for the audio download call.
    pub fn download_args(&self, url: &str) -> Vec<String> {
        let mut args = self.common_args();
        args.extend(
            [
                "--output",
                OUTPUT_TEMPLATE,
                "--format",
                FORMAT_SELECTOR,
                "--extract-audio",
                "--audio-format",
                AUDIO_EXTENSION,
                url,
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        args
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.binary, args.join(" "))
    }

    async fn run(&self, args: Vec<String>, current_dir: Option<&Path>) -> ToolResult<Output> {
        let description = self.describe(&args);
        debug!(command = %description, "Running extraction tool");

        let mut cmd = Command::new(&self.binary);
        cmd.args(&args).kill_on_drop(true);
        if let Some(dir) = current_dir {
            cmd.current_dir(dir);
        }

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| ToolError::Timeout {
                    command: description.clone(),
                    seconds: limit.as_secs(),
                })?,
            None => cmd.output().await,
        };

        let output = output.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ToolError::NotFound(self.binary.clone())
            } else {
                ToolError::Spawn {
                    command: description.clone(),
                    source: e,
                }
            }
        })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                command: description,
                exit_code: output.status.code(),
                output: combined_output(&output),
            });
        }

        Ok(output)
    }
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stderr);
    }
    text
}

/// Path the download call writes to, given the tool's output template.
pub fn artifact_path(output_dir: &Path, info: &MediaInfo) -> PathBuf {
    output_dir.join(format!("{}.{}", info.id, AUDIO_EXTENSION))
}

#[async_trait]
impl ExtractionTool for YoutubeDl {
    #[tracing::instrument(skip(self))]
    async fn fetch_info(&self, url: &str) -> ToolResult<MediaInfo> {
        let output = self.run(self.info_args(url), None).await?;

        let info: MediaInfo =
            serde_json::from_slice(&output.stdout).map_err(|e| ToolError::InvalidOutput {
                output: combined_output(&output),
                source: e,
            })?;

        info!(media_id = %info.id, title = %info.title, ext = %info.ext, "Media info fetched");
        Ok(info)
    }

    #[tracing::instrument(skip(self, info), fields(media_id = %info.id))]
    async fn extract_audio(
        &self,
        url: &str,
        info: &MediaInfo,
        output_dir: &Path,
    ) -> ToolResult<PathBuf> {
        let output = self.run(self.download_args(url), Some(output_dir)).await?;
        debug!(output = %combined_output(&output), "Extraction tool finished");

        let path = artifact_path(output_dir, info);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ToolError::MissingArtifact(path));
        }

        info!(path = %path.display(), "Audio extracted");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> YoutubeDl {
        YoutubeDl::new("youtube-dl", 10, None)
    }

    #[test]
    fn info_args_dump_json_without_download_flags() {
        let args = tool().info_args("https://example.com/video");
        assert!(args.contains(&"--dump-json".to_string()));
        assert!(args.contains(&"--no-playlist".to_string()));
        assert!(!args.contains(&"--extract-audio".to_string()));
        assert_eq!(args.last().unwrap(), "https://example.com/video");
    }

    #[test]
    fn download_args_select_best_audio_as_mp3() {
        let args = tool().download_args("https://example.com/video");
        let joined = args.join(" ");
        assert!(joined.contains("--retries 10"));
        assert!(joined.contains("--output %(id)s.%(ext)s"));
        assert!(joined.contains("--format bestaudio[ext=mp3]/bestaudio/best"));
        assert!(joined.contains("--extract-audio --audio-format mp3"));
        assert!(!args.contains(&"--dump-json".to_string()));
    }

    #[test]
    fn artifact_is_named_by_media_id() {
        let info = MediaInfo {
            id: "abc123".to_string(),
            title: "My Video".to_string(),
            ext: "webm".to_string(),
        };
        assert_eq!(
            artifact_path(Path::new("/work"), &info),
            PathBuf::from("/work/abc123.mp3")
        );
    }

    #[tokio::test]
    async fn missing_binary_is_reported() {
        let tool = YoutubeDl::new("/nonexistent/youtube-dl", 1, None);
        let err = tool.fetch_info("https://example.com").await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }
}
