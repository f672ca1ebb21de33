//! Readers for the Claude Code data directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::collector::CollectError;
use crate::collector::traits::FileSystem;
use crate::config::Config;
use crate::model::{EventTimestamp, UsageReading, UsageSnapshot};

/// Reads the stats cache and the message history log.
pub struct UsageCollector<F: FileSystem> {
    fs: F,
    stats_path: PathBuf,
    history_path: PathBuf,
}

/// The only field of a history record the monitor looks at.
#[derive(Deserialize)]
struct HistoryRecord {
    timestamp: Option<Value>,
}

impl<F: FileSystem> UsageCollector<F> {
    pub fn new(fs: F, stats_path: impl Into<PathBuf>, history_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            stats_path: stats_path.into(),
            history_path: history_path.into(),
        }
    }

    /// Creates a collector for the data directory named by `config`.
    pub fn from_config(fs: F, config: &Config) -> Self {
        Self::new(fs, config.stats_path(), config.history_path())
    }

    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }

    /// Whether the stats cache is present at all.
    pub fn stats_exists(&self) -> bool {
        self.fs.exists(&self.stats_path)
    }

    /// Reads and decodes `stats-cache.json`.
    pub fn load_stats(&self) -> Result<UsageSnapshot, CollectError> {
        let content = self.fs.read_to_string(&self.stats_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Reads message timestamps from `history.jsonl`.
    ///
    /// A missing log means no history yet and yields an empty set.
    pub fn load_history(&self) -> Result<Vec<EventTimestamp>, CollectError> {
        if !self.fs.exists(&self.history_path) {
            return Ok(Vec::new());
        }
        let content = self.fs.read(&self.history_path)?;
        let (events, skipped) = parse_history(&content);
        if skipped > 0 {
            debug!(skipped, path = %self.history_path.display(), "skipped unusable history records");
        }
        Ok(events)
    }

    /// Reads both sources as one reading.
    ///
    /// Only the stats cache is required. An unreadable history log leaves the
    /// reading without events.
    pub fn load(&self) -> Result<UsageReading, CollectError> {
        let snapshot = self.load_stats()?;
        let events = self.load_history().unwrap_or_else(|e| {
            warn!(path = %self.history_path.display(), "cannot read history: {}", e);
            Vec::new()
        });
        Ok(UsageReading { snapshot, events })
    }
}

/// Extracts event timestamps (seconds) from history log content.
///
/// Each non-blank line is a JSON object whose numeric `timestamp` is in
/// milliseconds. Lines are decoded one at a time, so a line that is not
/// UTF-8, fails to decode or carries no numeric timestamp is skipped alone;
/// the second value is how many were skipped.
pub fn parse_history(content: &[u8]) -> (Vec<EventTimestamp>, usize) {
    let mut events = Vec::new();
    let mut skipped = 0;

    for line in content.split(|&b| b == b'\n') {
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }
        let millis = serde_json::from_slice::<HistoryRecord>(line)
            .ok()
            .and_then(|record| record.timestamp)
            .and_then(|ts| ts.as_f64());
        match millis {
            Some(ms) => events.push(ms / 1000.0),
            None => skipped += 1,
        }
    }

    (events, skipped)
}
