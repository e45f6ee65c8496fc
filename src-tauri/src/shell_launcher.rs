use chrono::Local;
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use crate::{
    append_desktop_log, request_headers::HeaderOverride, url_resolver, version_log,
    LaunchConfiguration, ShellConfig, ShellPaths, UserAgentMode, WindowHandle, SURVEY_USER_AGENT,
};

/// Seam between the launcher's decisions and the windowing runtime.
pub(crate) trait ShellHost {
    fn app_version(&self) -> String;

    /// Registers a header rewrite applied to every request the process issues.
    fn install_header_override(&self, header: HeaderOverride) -> Result<(), String>;

    fn open_window(&self, launch: &LaunchConfiguration) -> Result<WindowHandle, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActivateOutcome {
    Launched,
    WindowAlreadyOpen,
}

/// Process-wide launch state. Owns the only window reference.
#[derive(Debug)]
pub(crate) struct ShellLauncher {
    config: ShellConfig,
    paths: ShellPaths,
    window: Mutex<Option<WindowHandle>>,
    header_hook_installed: AtomicBool,
}

impl ShellLauncher {
    pub(crate) fn new(config: ShellConfig, data_dir: PathBuf) -> Self {
        let paths = ShellPaths::new(&data_dir, &config.config_file_name);
        Self {
            config,
            paths,
            window: Mutex::new(None),
            header_hook_installed: AtomicBool::new(false),
        }
    }

    pub(crate) fn paths(&self) -> &ShellPaths {
        &self.paths
    }

    pub(crate) fn sanitizes_non_ascii(&self) -> bool {
        self.config.sanitize_non_ascii
    }

    pub(crate) fn launch_configuration(&self) -> LaunchConfiguration {
        let configured_url =
            url_resolver::read_configured_url(&self.paths.config_file, self.config.sanitize_non_ascii);
        let resolved_url = url_resolver::url_or_default(configured_url.as_deref());
        let user_agent_override = match self.config.user_agent_mode {
            UserAgentMode::PerRequest => Some(SURVEY_USER_AGENT.to_string()),
            UserAgentMode::None | UserAgentMode::GlobalHook => None,
        };

        LaunchConfiguration {
            configured_url,
            resolved_url,
            window_size: self.config.window_size,
            user_agent_override,
            window_title: self.config.window_title.clone(),
            open_devtools: self.config.open_devtools,
        }
    }

    pub(crate) fn launch<H: ShellHost>(&self, host: &H) -> Result<WindowHandle, String> {
        let launch = self.launch_configuration();

        if self.config.user_agent_mode == UserAgentMode::GlobalHook {
            self.ensure_header_hook(host);
        }

        if self.config.version_log_enabled {
            if let Err(error) = version_log::append_version_entry(
                &self.paths.version_log,
                &host.app_version(),
                Local::now(),
            ) {
                append_desktop_log(&format!("version log skipped: {error}"));
            }
        }

        if launch.configured_url.is_none() {
            append_desktop_log(&format!(
                "no usable url in {}, using default",
                self.paths.config_file.display()
            ));
        }
        append_desktop_log(&format!(
            "opening survey window at {} ({}x{})",
            launch.resolved_url, launch.window_size.width, launch.window_size.height
        ));
        let handle = host.open_window(&launch)?;
        match self.window.lock() {
            Ok(mut guard) => *guard = Some(handle.clone()),
            Err(_) => return Err("Shell window lock poisoned.".to_string()),
        }
        Ok(handle)
    }

    fn ensure_header_hook<H: ShellHost>(&self, host: &H) {
        if self
            .header_hook_installed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let result = HeaderOverride::user_agent(SURVEY_USER_AGENT)
            .and_then(|header| host.install_header_override(header));
        if let Err(error) = result {
            self.header_hook_installed.store(false, Ordering::Release);
            append_desktop_log(&format!("failed to install user agent hook: {error}"));
        }
    }

    pub(crate) fn has_window(&self) -> bool {
        self.window
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Clears the stored reference when the launcher's window is destroyed.
    pub(crate) fn on_window_closed(&self, label: &str) -> bool {
        let Ok(mut guard) = self.window.lock() else {
            return false;
        };
        if guard.as_ref().is_some_and(|handle| handle.label == label) {
            *guard = None;
            return true;
        }
        false
    }

    pub(crate) fn activate<H: ShellHost>(&self, host: &H) -> Result<ActivateOutcome, String> {
        if self.has_window() {
            return Ok(ActivateOutcome::WindowAlreadyOpen);
        }
        self.launch(host).map(|_| ActivateOutcome::Launched)
    }
}

/// Whether closing the last window should end the process on `os`.
pub(crate) fn exit_on_all_windows_closed(os: &str) -> bool {
    os != "macos"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, fs};
    use tauri::http::{
        header::{ACCEPT, USER_AGENT},
        HeaderMap, HeaderValue,
    };

    use crate::{app_types::WindowSize, DEFAULT_SURVEY_URL, MAIN_WINDOW_LABEL};

    #[derive(Default)]
    struct RecordingHost {
        hooks: RefCell<Vec<HeaderOverride>>,
        opened: RefCell<Vec<LaunchConfiguration>>,
        fail_open: bool,
    }

    impl RecordingHost {
        fn send_request(&self, mut headers: HeaderMap) -> HeaderMap {
            for hook in self.hooks.borrow().iter() {
                hook.apply(&mut headers);
            }
            headers
        }
    }

    impl ShellHost for RecordingHost {
        fn app_version(&self) -> String {
            "0.3.0".to_string()
        }

        fn install_header_override(&self, header: HeaderOverride) -> Result<(), String> {
            self.hooks.borrow_mut().push(header);
            Ok(())
        }

        fn open_window(&self, launch: &LaunchConfiguration) -> Result<WindowHandle, String> {
            if self.fail_open {
                return Err("window creation refused".to_string());
            }
            self.opened.borrow_mut().push(launch.clone());
            Ok(WindowHandle {
                label: MAIN_WINDOW_LABEL.to_string(),
            })
        }
    }

    fn launcher_with(config: ShellConfig) -> (tempfile::TempDir, ShellLauncher) {
        let dir = tempfile::tempdir().unwrap();
        let launcher = ShellLauncher::new(config, dir.path().to_path_buf());
        (dir, launcher)
    }

    #[test]
    fn launch_without_config_file_opens_default_url() {
        let (_dir, launcher) = launcher_with(ShellConfig::default());
        let host = RecordingHost::default();

        launcher.launch(&host).unwrap();

        let opened = host.opened.borrow();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].resolved_url, DEFAULT_SURVEY_URL);
        assert_eq!(opened[0].configured_url, None);
        assert_eq!(opened[0].window_size, WindowSize::LARGE);
        assert!(launcher.has_window());
    }

    #[test]
    fn launch_strips_non_ascii_from_configured_url() {
        let (_dir, launcher) = launcher_with(ShellConfig::global_hook_variant());
        fs::write(
            &launcher.paths().config_file,
            "https://example.com/app\u{00FF}",
        )
        .unwrap();
        let host = RecordingHost::default();

        launcher.launch(&host).unwrap();

        assert_eq!(
            host.opened.borrow()[0].resolved_url,
            "https://example.com/app"
        );
    }

    #[test]
    fn launch_appends_one_version_log_line() {
        let (_dir, launcher) = launcher_with(ShellConfig::version_log_variant());
        fs::write(&launcher.paths().config_file, "https://example.com").unwrap();
        let host = RecordingHost::default();

        launcher.launch(&host).unwrap();

        let contents = fs::read_to_string(&launcher.paths().version_log).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        let (timestamp, version) = lines[0].split_once(" -> ").unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert_eq!(version, "0.3.0");
        assert_eq!(host.opened.borrow()[0].resolved_url, "https://example.com");
    }

    #[test]
    fn launch_without_version_logging_leaves_no_log_file() {
        let (_dir, launcher) = launcher_with(ShellConfig::default());
        launcher.launch(&RecordingHost::default()).unwrap();
        assert!(!launcher.paths().version_log.exists());
    }

    #[test]
    fn launch_ignores_unwritable_version_log() {
        let (_dir, launcher) = launcher_with(ShellConfig::version_log_variant());
        fs::create_dir(&launcher.paths().version_log).unwrap();
        let host = RecordingHost::default();

        assert!(launcher.launch(&host).is_ok());
        assert_eq!(host.opened.borrow().len(), 1);
    }

    #[test]
    fn close_then_activate_relaunches_exactly_once() {
        let (_dir, launcher) = launcher_with(ShellConfig::default());
        let host = RecordingHost::default();
        launcher.launch(&host).unwrap();

        assert_eq!(
            launcher.activate(&host).unwrap(),
            ActivateOutcome::WindowAlreadyOpen
        );
        assert_eq!(host.opened.borrow().len(), 1);

        assert!(launcher.on_window_closed(MAIN_WINDOW_LABEL));
        assert!(!launcher.has_window());

        assert_eq!(launcher.activate(&host).unwrap(), ActivateOutcome::Launched);
        assert_eq!(host.opened.borrow().len(), 2);
        assert!(launcher.has_window());
    }

    #[test]
    fn on_window_closed_ignores_foreign_windows() {
        let (_dir, launcher) = launcher_with(ShellConfig::default());
        launcher.launch(&RecordingHost::default()).unwrap();

        assert!(!launcher.on_window_closed("devtools"));
        assert!(launcher.has_window());
    }

    #[test]
    fn global_hook_forces_user_agent_on_every_request() {
        let (_dir, launcher) = launcher_with(ShellConfig::global_hook_variant());
        let host = RecordingHost::default();
        launcher.launch(&host).unwrap();

        let mut original = HeaderMap::new();
        original.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        original.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let sent = host.send_request(original);
        assert_eq!(sent.get(USER_AGENT).unwrap(), "electron-survey");
        assert_eq!(sent.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(sent.len(), 2);

        let sent = host.send_request(HeaderMap::new());
        assert_eq!(sent.get(USER_AGENT).unwrap(), "electron-survey");
        assert_eq!(host.opened.borrow()[0].user_agent_override, None);
    }

    #[test]
    fn global_hook_is_installed_once_per_process() {
        let (_dir, launcher) = launcher_with(ShellConfig::global_hook_variant());
        let host = RecordingHost::default();
        launcher.launch(&host).unwrap();
        launcher.on_window_closed(MAIN_WINDOW_LABEL);
        launcher.activate(&host).unwrap();

        assert_eq!(host.hooks.borrow().len(), 1);
        assert_eq!(host.opened.borrow().len(), 2);
    }

    #[test]
    fn per_request_mode_passes_user_agent_with_navigation() {
        let (_dir, launcher) = launcher_with(ShellConfig::per_request_variant());
        let host = RecordingHost::default();
        launcher.launch(&host).unwrap();

        assert!(host.hooks.borrow().is_empty());
        let opened = host.opened.borrow();
        assert_eq!(
            opened[0].user_agent_override.as_deref(),
            Some(SURVEY_USER_AGENT)
        );
        assert_eq!(opened[0].window_size, WindowSize::COMPACT);
    }

    #[test]
    fn plain_mode_sets_no_user_agent() {
        let (_dir, launcher) = launcher_with(ShellConfig::plain_variant());
        let host = RecordingHost::default();
        launcher.launch(&host).unwrap();

        assert!(host.hooks.borrow().is_empty());
        assert_eq!(host.opened.borrow()[0].user_agent_override, None);
    }

    #[test]
    fn per_request_variant_reads_survey_url_unsanitized() {
        let (_dir, launcher) = launcher_with(ShellConfig::per_request_variant());
        assert!(launcher.paths().config_file.ends_with("survey.url"));
        fs::write(&launcher.paths().config_file, "https://example.com/\u{00E9}").unwrap();

        assert_eq!(
            launcher.launch_configuration().resolved_url,
            "https://example.com/\u{00E9}"
        );
    }

    #[test]
    fn failed_window_creation_keeps_launcher_empty() {
        let (_dir, launcher) = launcher_with(ShellConfig::default());
        let host = RecordingHost {
            fail_open: true,
            ..RecordingHost::default()
        };

        assert!(launcher.launch(&host).is_err());
        assert!(!launcher.has_window());
    }

    #[test]
    fn exit_on_all_windows_closed_stays_resident_only_on_macos() {
        assert!(!exit_on_all_windows_closed("macos"));
        assert!(exit_on_all_windows_closed("windows"));
        assert!(exit_on_all_windows_closed("linux"));
    }
}
