use std::path::Path;

use chrono::Local;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

/// Title used when the file has no heading: its base name without a leading `index`.
pub(super) fn default_title(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    match base.strip_prefix("index") {
        Some(rest) => rest.to_string(),
        None => base,
    }
}

pub(super) fn now_timestamp() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

pub(super) fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(|s| s.trim().to_string()).collect()
}
