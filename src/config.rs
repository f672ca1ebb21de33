//! Runtime configuration.
//!
//! All paths and cadences are passed explicitly into the collectors and the
//! refresh loop; nothing below looks up process-wide state on its own except
//! [`default_data_dir`], which the binary calls once at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the aggregated usage statistics inside the data directory.
pub const STATS_FILE: &str = "stats-cache.json";
/// File name of the per-message history log inside the data directory.
pub const HISTORY_FILE: &str = "history.jsonl";

/// Message-rate thresholds for the one-hour warning line.
///
/// These are presentation policy, not published rate limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// More messages than this in the last hour shows the "busy" warning.
    pub busy: usize,
    /// More messages than this in the last hour shows the "critical" warning.
    pub critical: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            busy: 40,
            critical: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the stats cache and history log.
    pub data_dir: PathBuf,
    /// How long the loop waits for a key before redrawing.
    pub tick: Duration,
    /// How often usage data is reloaded without a manual request.
    pub reload_interval: Duration,
    /// Number of full hours before the current one shown in the hourly chart.
    pub hours_back: u32,
    /// Upper bound on the panel width, in columns.
    pub max_width: u16,
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".claude"),
            tick: Duration::from_secs(2),
            reload_interval: Duration::from_secs(30),
            hours_back: 5,
            max_width: 80,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// Creates a configuration with default cadences for the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn stats_path(&self) -> PathBuf {
        self.data_dir.join(STATS_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }
}

/// Resolves the default data directory: `$CLAUDE_CONFIG_DIR`, else `$HOME/.claude`.
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("CLAUDE_CONFIG_DIR").filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(Path::new(".claude"))
}
