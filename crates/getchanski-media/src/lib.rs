//! Getchanski Media Library
//!
//! Wraps the external extraction tool (youtube-dl compatible) behind the
//! `ExtractionTool` trait so the worker can be exercised with fakes.

pub mod error;
pub mod tool;
pub mod youtube_dl;

pub use error::{ToolError, ToolResult};
pub use tool::ExtractionTool;
pub use youtube_dl::YoutubeDl;
