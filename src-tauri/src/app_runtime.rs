use std::fs;
use tauri::{AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_shutdown_log, append_startup_log, logging, runtime_paths,
    shell_config,
    shell_launcher::{exit_on_all_windows_closed, ActivateOutcome, ShellLauncher},
    tauri_host::{RequestHookState, TauriHost},
    url_resolver, window_actions, DESKTOP_LOG_FILE,
};

fn launch_shell(app_handle: &AppHandle) {
    let Some(launcher) = app_handle.try_state::<ShellLauncher>() else {
        append_startup_log("launch skipped: shell launcher is not initialized");
        return;
    };

    match launcher.launch(&TauriHost::new(app_handle)) {
        Ok(window) => append_startup_log(&format!("survey window {} opened", window.label)),
        Err(error) => append_startup_log(&format!("failed to open survey window: {error}")),
    }
}

fn activate_shell(app_handle: &AppHandle) {
    let Some(launcher) = app_handle.try_state::<ShellLauncher>() else {
        return;
    };

    match launcher.activate(&TauriHost::new(app_handle)) {
        Ok(ActivateOutcome::Launched) => append_desktop_log("activate relaunched survey window"),
        Ok(ActivateOutcome::WindowAlreadyOpen) => {
            window_actions::focus_main_window(app_handle, append_desktop_log)
        }
        Err(error) => append_desktop_log(&format!("activate failed to open survey window: {error}")),
    }
}

pub(crate) fn run() {
    let shell_config = shell_config::load_embedded_shell_config();

    append_startup_log("survey shell starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        logging::resolve_desktop_log_path(runtime_paths::default_shell_root_dir(), DESKTOP_LOG_FILE)
            .display()
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app_handle, _argv, _cwd| {
            append_desktop_log("second instance started, activating survey shell");
            let main_app = app_handle.clone();
            if let Err(error) = app_handle.run_on_main_thread(move || activate_shell(&main_app)) {
                append_desktop_log(&format!("failed to schedule shell activation: {error}"));
            }
        }))
        .manage(RequestHookState::default())
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                let app_handle = window.app_handle();
                let Some(launcher) = app_handle.try_state::<ShellLauncher>() else {
                    return;
                };
                if launcher.on_window_closed(window.label()) {
                    append_desktop_log(&format!("survey window {} closed", window.label()));
                }
            }
        })
        .setup(move |app| {
            let app_data_dir = match app.path().app_data_dir() {
                Ok(dir) => Some(dir),
                Err(error) => {
                    append_startup_log(&format!("app data directory unavailable: {error}"));
                    None
                }
            };
            let data_dir = runtime_paths::resolve_data_dir(app_data_dir);
            if let Err(error) = fs::create_dir_all(&data_dir) {
                append_startup_log(&format!(
                    "failed to create data directory {}: {}",
                    data_dir.display(),
                    error
                ));
            }

            let launcher = ShellLauncher::new(shell_config, data_dir);
            append_startup_log(&format!(
                "url config {} resolves to {}",
                launcher.paths().config_file.display(),
                url_resolver::resolve_url(
                    &launcher.paths().config_file,
                    launcher.sanitizes_non_ascii()
                )
            ));
            app.manage(launcher);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::Ready => launch_shell(app_handle),
            RunEvent::ExitRequested { code, api, .. } => {
                if code.is_none() && !exit_on_all_windows_closed(std::env::consts::OS) {
                    api.prevent_exit();
                    append_desktop_log("all windows closed, staying resident");
                }
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => activate_shell(app_handle),
            RunEvent::Exit => append_shutdown_log("survey shell exiting"),
            _ => {}
        });
}
