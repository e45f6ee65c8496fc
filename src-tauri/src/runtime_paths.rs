use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::{ShellPaths, SHELL_ROOT_DIR_NAME, VERSION_LOG_SUFFIX};

pub(crate) fn default_shell_root_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(SHELL_ROOT_DIR_NAME))
}

/// Picks the per-user data directory, falling back to the shell root and then the temp dir.
pub(crate) fn resolve_data_dir(app_data_dir: Option<PathBuf>) -> PathBuf {
    app_data_dir
        .or_else(default_shell_root_dir)
        .unwrap_or_else(|| std::env::temp_dir().join(SHELL_ROOT_DIR_NAME))
}

pub(crate) fn version_log_path(config_file: &Path) -> PathBuf {
    let mut raw: OsString = config_file.as_os_str().to_owned();
    raw.push(VERSION_LOG_SUFFIX);
    PathBuf::from(raw)
}

impl ShellPaths {
    pub(crate) fn new(data_dir: &Path, config_file_name: &str) -> Self {
        let config_file = data_dir.join(config_file_name);
        let version_log = version_log_path(&config_file);
        Self {
            config_file,
            version_log,
        }
    }
}
