use crate::{logging, runtime_paths, DESKTOP_LOG_FILE};

fn append_log(category: &str, message: &str) {
    if cfg!(debug_assertions) {
        eprintln!("[{category}] {message}");
    }
    if cfg!(test) {
        return;
    }
    let log_path = logging::resolve_desktop_log_path(
        runtime_paths::default_shell_root_dir(),
        DESKTOP_LOG_FILE,
    );
    let _ = logging::append_log_line(&log_path, category, message);
}

pub(crate) fn append_desktop_log(message: &str) {
    append_log("desktop", message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_log("startup", message);
}

pub(crate) fn append_shutdown_log(message: &str) {
    append_log("shutdown", message);
}
