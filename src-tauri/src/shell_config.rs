use crate::{append_startup_log, ShellConfig, EMBEDDED_SHELL_CONFIG};

pub(crate) fn parse_shell_config(raw: &str) -> Result<ShellConfig, String> {
    let config: ShellConfig = serde_json::from_str(raw)
        .map_err(|error| format!("Failed to parse shell config: {error}"))?;
    if config.config_file_name.trim().is_empty() {
        return Err("Shell config has an empty configFileName.".to_string());
    }
    if config.window_size.width == 0 || config.window_size.height == 0 {
        return Err(format!(
            "Shell config has an invalid window size {}x{}.",
            config.window_size.width, config.window_size.height
        ));
    }
    Ok(config)
}

pub(crate) fn load_embedded_shell_config() -> ShellConfig {
    match parse_shell_config(EMBEDDED_SHELL_CONFIG) {
        Ok(config) => config,
        Err(error) => {
            append_startup_log(&format!("{error}; using built-in shell defaults"));
            ShellConfig::default()
        }
    }
}

#[cfg(test)]
impl ShellConfig {
    /// `survey.txt`, sanitized, user agent forced through a process-wide hook.
    pub(crate) fn global_hook_variant() -> Self {
        Self::default()
    }

    /// `survey.url`, raw contents, user agent passed with the navigation.
    pub(crate) fn per_request_variant() -> Self {
        Self {
            config_file_name: "survey.url".to_string(),
            sanitize_non_ascii: false,
            user_agent_mode: crate::app_types::UserAgentMode::PerRequest,
            window_size: crate::app_types::WindowSize::COMPACT,
            ..Self::default()
        }
    }

    pub(crate) fn version_log_variant() -> Self {
        Self {
            version_log_enabled: true,
            ..Self::default()
        }
    }

    pub(crate) fn plain_variant() -> Self {
        Self {
            config_file_name: "survey.url".to_string(),
            sanitize_non_ascii: false,
            user_agent_mode: crate::app_types::UserAgentMode::None,
            window_size: crate::app_types::WindowSize::COMPACT,
            ..Self::default()
        }
    }

    pub(crate) fn debug_variant() -> Self {
        Self {
            open_devtools: true,
            ..Self::plain_variant()
        }
    }
}
