use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum UserAgentMode {
    None,
    GlobalHook,
    PerRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(crate) struct WindowSize {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl WindowSize {
    pub(crate) const LARGE: Self = Self {
        width: 1024,
        height: 768,
    };
    #[cfg(test)]
    pub(crate) const COMPACT: Self = Self {
        width: 800,
        height: 600,
    };
}

/// Build-time shell variant, embedded from `shell.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub(crate) struct ShellConfig {
    pub(crate) config_file_name: String,
    pub(crate) sanitize_non_ascii: bool,
    pub(crate) user_agent_mode: UserAgentMode,
    pub(crate) version_log_enabled: bool,
    pub(crate) window_size: WindowSize,
    pub(crate) open_devtools: bool,
    pub(crate) window_title: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            config_file_name: "survey.txt".to_string(),
            sanitize_non_ascii: true,
            user_agent_mode: UserAgentMode::GlobalHook,
            version_log_enabled: false,
            window_size: WindowSize::LARGE,
            open_devtools: false,
            window_title: "Survey".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShellPaths {
    pub(crate) config_file: PathBuf,
    pub(crate) version_log: PathBuf,
}

/// Values used for a single launch; discarded once the window exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaunchConfiguration {
    pub(crate) configured_url: Option<String>,
    pub(crate) resolved_url: String,
    pub(crate) window_size: WindowSize,
    pub(crate) user_agent_override: Option<String>,
    pub(crate) window_title: String,
    pub(crate) open_devtools: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowHandle {
    pub(crate) label: String,
}
