use chrono::{DateTime, Local};
use std::{fs::OpenOptions, io::Write, path::Path};

pub(crate) fn format_version_entry(now: DateTime<Local>, version: &str) -> String {
    format!("{} -> {}\n", now.to_rfc3339(), version)
}

/// Appends one `<timestamp> -> <version>` line. The file is never read back.
pub(crate) fn append_version_entry(
    log_path: &Path,
    version: &str,
    now: DateTime<Local>,
) -> Result<(), String> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|error| {
            format!(
                "Failed to open version log {}: {}",
                log_path.display(),
                error
            )
        })?;
    file.write_all(format_version_entry(now, version).as_bytes())
        .map_err(|error| {
            format!(
                "Failed to append version log {}: {}",
                log_path.display(),
                error
            )
        })
}
