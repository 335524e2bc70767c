use serde::{Deserialize, Serialize};

/// Metadata reported by the extraction tool in dump-json mode.
///
/// Only the fields used to name the artifact are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub id: String,
    #[serde(rename = "fulltitle")]
    pub title: String,
    #[serde(default)]
    pub ext: String,
}
