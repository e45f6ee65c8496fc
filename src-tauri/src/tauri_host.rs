use std::sync::Mutex;
use tauri::{
    http::{header::USER_AGENT, HeaderMap},
    AppHandle, Manager, WebviewUrl, WebviewWindowBuilder,
};
use url::Url;

use crate::{
    append_desktop_log, request_headers::HeaderOverride, shell_launcher::ShellHost,
    LaunchConfiguration, WindowHandle, DEFAULT_SURVEY_URL, MAIN_WINDOW_LABEL,
};

/// Headers forced onto every request for the lifetime of the process.
#[derive(Debug, Default)]
pub(crate) struct RequestHookState {
    headers: Mutex<HeaderMap>,
}

impl RequestHookState {
    pub(crate) fn register(&self, header: HeaderOverride) -> Result<(), String> {
        let mut guard = self
            .headers
            .lock()
            .map_err(|_| "Request hook lock poisoned.".to_string())?;
        header.apply(&mut guard);
        Ok(())
    }

    pub(crate) fn user_agent(&self) -> Option<String> {
        let guard = self.headers.lock().ok()?;
        let value = guard.get(USER_AGENT)?.to_str().ok()?;
        Some(value.to_string())
    }
}

pub(crate) struct TauriHost<'a> {
    app_handle: &'a AppHandle,
}

impl<'a> TauriHost<'a> {
    pub(crate) fn new(app_handle: &'a AppHandle) -> Self {
        Self { app_handle }
    }
}

fn parse_navigation_url(raw_url: &str) -> Result<Url, String> {
    match Url::parse(raw_url.trim()) {
        Ok(url) => Ok(url),
        Err(error) => {
            append_desktop_log(&format!(
                "survey url '{raw_url}' is not a valid URL ({error}); using {DEFAULT_SURVEY_URL}"
            ));
            Url::parse(DEFAULT_SURVEY_URL)
                .map_err(|error| format!("Invalid default survey URL: {error}"))
        }
    }
}

impl ShellHost for TauriHost<'_> {
    fn app_version(&self) -> String {
        self.app_handle.package_info().version.to_string()
    }

    fn install_header_override(&self, header: HeaderOverride) -> Result<(), String> {
        let state = self
            .app_handle
            .try_state::<RequestHookState>()
            .ok_or_else(|| "Request hook state is not managed.".to_string())?;
        state.register(header)
    }

    fn open_window(&self, launch: &LaunchConfiguration) -> Result<WindowHandle, String> {
        let url = parse_navigation_url(&launch.resolved_url)?;
        let user_agent = launch.user_agent_override.clone().or_else(|| {
            self.app_handle
                .try_state::<RequestHookState>()
                .and_then(|state| state.user_agent())
        });

        let mut builder = WebviewWindowBuilder::new(
            self.app_handle,
            MAIN_WINDOW_LABEL,
            WebviewUrl::External(url),
        )
        .title(launch.window_title.as_str())
        .inner_size(
            f64::from(launch.window_size.width),
            f64::from(launch.window_size.height),
        );
        if let Some(user_agent) = user_agent.as_deref() {
            builder = builder.user_agent(user_agent);
        }

        let window = builder
            .build()
            .map_err(|error| format!("Failed to create survey window: {error}"))?;
        if launch.open_devtools {
            window.open_devtools();
        }

        Ok(WindowHandle {
            label: window.label().to_string(),
        })
    }
}
