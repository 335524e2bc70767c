//! Error types for the extraction tool.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for extraction tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Extraction tool not found: {0}")]
    NotFound(String),

    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {exit_code:?}: {output}")]
    Failed {
        command: String,
        exit_code: Option<i32>,
        /// Combined stdout and stderr.
        output: String,
    },

    #[error("Invalid media info: {source}; output: {output}")]
    InvalidOutput {
        output: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected artifact was not produced: {0}")]
    MissingArtifact(PathBuf),

    #[error("{command} timed out after {seconds} seconds")]
    Timeout { command: String, seconds: u64 },
}

impl From<ToolError> for getchanski_core::AppError {
    fn from(err: ToolError) -> Self {
        getchanski_core::AppError::Tool(err.to_string())
    }
}
