//! Log file locations
//!
//! Logs go to `$XDG_STATE_HOME/paraload/logs/` (typically
//! `~/.local/state/paraload/logs/`), one `paraload-{PID}.log` per process so
//! concurrent pickers do not interleave. Old logs are removed at startup.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

/// Logs untouched for this long are removed
const CLEANUP_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

const APP_DIR: &str = "paraload";

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// The log directory, created on first use. Falls back to the system temp
/// directory when the state directory cannot be created.
pub fn log_dir() -> &'static PathBuf {
    LOG_DIR.get_or_init(|| {
        let fallback = std::env::temp_dir().join("paraload-logs");
        let dir = state_log_dir().unwrap_or_else(|| fallback.clone());

        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("Failed to create log directory {:?}: {}", dir, e);
            return fallback;
        }
        dir
    })
}

fn state_log_dir() -> Option<PathBuf> {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        let path = PathBuf::from(state_home);
        if path.is_absolute() {
            return Some(path.join(APP_DIR).join("logs"));
        }
    }

    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
        .map(|base| base.join(APP_DIR).join("logs"))
}

/// `{log_dir}/paraload-{PID}.log`
pub fn main_log_path() -> PathBuf {
    log_dir().join(format!("paraload-{}.log", std::process::id()))
}

/// Remove other processes' logs that have not been written for a week
pub fn cleanup_stale_logs() {
    cleanup_stale_logs_in_dir(log_dir(), std::process::id());
}

fn cleanup_stale_logs_in_dir(dir: &Path, current_pid: u32) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        let Some(pid) = extract_pid_from_filename(&name) else {
            continue;
        };
        if pid == current_pid {
            continue;
        }

        if entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            && is_file_older_than(&entry.path(), CLEANUP_AGE)
        {
            if let Err(e) = fs::remove_file(entry.path()) {
                tracing::debug!("Failed to clean up stale log {:?}: {}", entry.path(), e);
            } else {
                tracing::debug!("Cleaned up stale log file: {:?}", entry.path());
            }
        }
    }
}

fn is_file_older_than(path: &Path, age: Duration) -> bool {
    let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };

    SystemTime::now()
        .duration_since(modified)
        .map(|elapsed| elapsed > age)
        .unwrap_or(false)
}

/// PID from a name like "paraload-12345.log"
fn extract_pid_from_filename(name: &str) -> Option<u32> {
    let without_ext = name.strip_suffix(".log")?;
    let pid_str = without_ext.strip_prefix("paraload-")?;
    pid_str.parse().ok()
}

/// Print the directories paraload reads and writes (`--show-paths`)
pub fn print_all_paths(config_path: Option<&Path>) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let config_file = config_path
        .map(Path::to_path_buf)
        .or_else(crate::config::Config::default_path)
        .unwrap_or_else(|| PathBuf::from("<unavailable>"));

    writeln!(handle, "paraload paths:").ok();
    writeln!(handle).ok();
    writeln!(handle, "Config:     {}", config_file.display()).ok();
    writeln!(handle, "Logs:       {}", log_dir().display()).ok();
    writeln!(handle, "  this run:   {}", main_log_path().display()).ok();
}
