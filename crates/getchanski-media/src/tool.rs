use async_trait::async_trait;
use std::path::{Path, PathBuf};

use getchanski_core::models::MediaInfo;

use crate::error::ToolResult;

/// External media extraction boundary.
///
/// Implemented by [`crate::YoutubeDl`]; tests substitute their own.
#[async_trait]
pub trait ExtractionTool: Send + Sync {
    /// Read metadata for `url` without downloading anything.
    async fn fetch_info(&self, url: &str) -> ToolResult<MediaInfo>;

    /// Download `url` as mp3 into `output_dir` and return the file path.
    async fn extract_audio(
        &self,
        url: &str,
        info: &MediaInfo,
        output_dir: &Path,
    ) -> ToolResult<PathBuf>;
}
