use std::{fs, io::ErrorKind, path::Path};

use crate::{append_desktop_log, DEFAULT_SURVEY_URL};

/// Drops every char outside 7-bit ASCII.
pub(crate) fn strip_non_ascii(raw: &str) -> String {
    raw.chars().filter(char::is_ascii).collect()
}

/// Reads the persisted URL. Missing, unreadable and empty files all count as absent.
pub(crate) fn read_configured_url(config_path: &Path, sanitize: bool) -> Option<String> {
    let bytes = match fs::read(config_path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => return None,
        Err(error) => {
            append_desktop_log(&format!(
                "failed to read url config {}: {}",
                config_path.display(),
                error
            ));
            return None;
        }
    };

    let text = String::from_utf8_lossy(&bytes);
    let url = if sanitize {
        strip_non_ascii(&text)
    } else {
        text.into_owned()
    };
    if url.is_empty() {
        return None;
    }
    Some(url)
}

pub(crate) fn url_or_default(configured_url: Option<&str>) -> String {
    configured_url.unwrap_or(DEFAULT_SURVEY_URL).to_string()
}

pub(crate) fn resolve_url(config_path: &Path, sanitize: bool) -> String {
    url_or_default(read_configured_url(config_path, sanitize).as_deref())
}
