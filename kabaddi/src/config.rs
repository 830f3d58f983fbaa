//! Runtime configuration for the `kabaddi` CLI.
//!
//! Every value can come from a command-line flag, an environment variable or a
//! built-in default, in that order.

use std::path::{Path, PathBuf};

/// User id recorded as creator when nothing else is configured.
pub const DEFAULT_USER: &str = "current-user";

const DATA_DIR_ENV: &str = "KABADDI_DATA_DIR";
const USER_ENV: &str = "KABADDI_USER";
const LOG_DIR_ENV: &str = "KABADDI_LOG_DIR";

/// Fallback data directory when `$HOME` is unset.
const FALLBACK_DATA_DIR: &str = "data";

/// Resolve the data directory.
///
/// Priority:
/// 1. `--data-dir` flag
/// 2. `KABADDI_DATA_DIR` env variable
/// 3. `$HOME/.config/kabaddi/data`
/// 4. `./data`
pub fn data_dir(flag: Option<&Path>) -> PathBuf {
    resolve_data_dir(
        flag,
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve_data_dir(flag: Option<&Path>, env: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }
    match home {
        Some(home) => home.join(".config").join("kabaddi").join("data"),
        None => PathBuf::from(FALLBACK_DATA_DIR),
    }
}

/// Resolve the current user id: `--user`, then `KABADDI_USER`, then
/// [`DEFAULT_USER`].
pub fn user_id(flag: Option<&str>) -> String {
    resolve_user_id(flag, std::env::var(USER_ENV).ok())
}

fn resolve_user_id(flag: Option<&str>, env: Option<String>) -> String {
    flag.map(str::to_string)
        .or(env)
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_USER.to_string())
}

/// Directory for daily-rolling log files. Logs go to stderr when unset.
pub fn log_dir() -> Option<PathBuf> {
    std::env::var_os(LOG_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
