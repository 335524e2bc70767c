//! Storage key generation.

/// Title used when the tool reports an empty one.
const UNTITLED: &str = "untitled";

/// Key for an uploaded artifact: `{title}.{ext}`.
///
/// `/` would create a nested key, so it is replaced with `_`.
pub fn artifact_key(title: &str, ext: &str) -> String {
    let title = title.trim().replace('/', "_");
    let title = if title.is_empty() { UNTITLED } else { title.as_str() };
    format!("{}.{}", title, ext)
}
