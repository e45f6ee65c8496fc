pub(crate) const DEFAULT_SURVEY_URL: &str = "http://localhost:8080";
pub(crate) const SURVEY_USER_AGENT: &str = "electron-survey";
pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const VERSION_LOG_SUFFIX: &str = ".version";
pub(crate) const SHELL_ROOT_DIR_NAME: &str = ".survey-shell";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const EMBEDDED_SHELL_CONFIG: &str = include_str!("../shell.json");
