//! Configuration constants and path resolution for postboy
//!
//! Everything the session persists lives under a single per-user config
//! directory: the history document, the theme document, exported snippets
//! and the log file.

use std::path::{Path, PathBuf};

/// Default config directory (tilde is expanded at runtime)
pub const DEFAULT_CONFIG_DIR: &str = "~/.postboy";

/// Environment variable name for overriding the config directory
pub const CONFIG_DIR_ENV_VAR: &str = "POSTBOY_CONFIG_DIR";

/// Environment variable name for the log level
pub const LOG_LEVEL_ENV_VAR: &str = "POSTBOY_LOG_LEVEL";

/// Default log level when neither flag nor env var is given
pub const DEFAULT_LOG_LEVEL: &str = "error";

pub const HISTORY_FILE_NAME: &str = "history.json";
pub const THEME_FILE_NAME: &str = "theme.json";
pub const EXPORTS_DIR_NAME: &str = "exports";
pub const LOG_FILE_NAME: &str = "postboy.log";

/// Number of history entries kept on disk
pub const HISTORY_LIMIT: usize = 5;

/// Terminal rows not available to the scrollable content area
/// (title bar, tab strip, scroll indicator, footer)
pub const VIEWPORT_CHROME_ROWS: u16 = 4;

/// Resolve the config directory: explicit value first, then the env var,
/// then the default. A leading `~` is expanded.
pub fn resolve_config_dir(explicit: Option<&str>) -> PathBuf {
    let raw = explicit
        .map(str::to_string)
        .or_else(|| {
            std::env::var_os(CONFIG_DIR_ENV_VAR).and_then(|val| val.into_string().ok())
        })
        .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string());

    PathBuf::from(shellexpand::tilde(&raw).to_string())
}

/// Resolved locations of every file the session touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn history_file(&self) -> PathBuf {
        self.root.join(HISTORY_FILE_NAME)
    }

    pub fn theme_file(&self) -> PathBuf {
        self.root.join(THEME_FILE_NAME)
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.root.join(EXPORTS_DIR_NAME)
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE_NAME)
    }
}
