#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_helpers;
mod app_runtime;
mod app_types;
mod logging;
mod request_headers;
mod runtime_paths;
mod shell_config;
mod shell_launcher;
mod tauri_host;
mod url_resolver;
mod version_log;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_helpers::{append_desktop_log, append_shutdown_log, append_startup_log};
pub(crate) use app_types::{
    LaunchConfiguration, ShellConfig, ShellPaths, UserAgentMode, WindowHandle,
};

fn main() {
    app_runtime::run();
}
