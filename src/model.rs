//! Snapshot data model.
//!
//! Snapshots are immutable readings that the refresh loop replaces wholesale.
//! Usage data mirrors the layout of `stats-cache.json`; fields the monitor does
//! not interpret are carried through as raw JSON values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single event instant, in (fractional) Unix-epoch seconds.
pub type EventTimestamp = f64;

/// Aggregate usage counters from the stats cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageSnapshot {
    pub total_messages: u64,
    pub total_sessions: u64,
    /// Per-model counters keyed by model identifier.
    pub model_usage: BTreeMap<String, ModelUsage>,
    /// Raw daily activity series, passed through unchanged.
    pub daily_activity: Vec<Value>,
    /// Raw daily per-model token series, passed through unchanged.
    pub daily_model_tokens: Vec<Value>,
}

/// Token counters for one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelUsage {
    #[serde(default)]
    pub output_tokens: u64,
    /// Remaining counters (input, cache reads, ...), kept opaque.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl UsageSnapshot {
    /// Sum of output tokens across every model in the snapshot.
    pub fn total_output_tokens(&self) -> u64 {
        self.model_usage.values().map(|m| m.output_tokens).sum()
    }
}

/// One usage reload: the stats cache plus the message timestamps from the
/// history log, always fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageReading {
    pub snapshot: UsageSnapshot,
    pub events: Vec<EventTimestamp>,
}

/// Host CPU, memory and load reading.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemSnapshot {
    /// Percent of CPU time in user mode, 0..=100.
    pub cpu_user: f64,
    /// Percent of CPU time in kernel mode, 0..=100.
    pub cpu_sys: f64,
    /// Percent of CPU time idle, 0..=100.
    pub cpu_idle: f64,
    /// Used memory in MiB.
    pub mem_used: u64,
    /// Total memory in MiB.
    pub mem_total: u64,
    /// 1, 5 and 15 minute load averages.
    pub load: [f64; 3],
}

impl Default for SystemSnapshot {
    fn default() -> Self {
        Self {
            cpu_user: 0.0,
            cpu_sys: 0.0,
            cpu_idle: 100.0,
            mem_used: 0,
            mem_total: 0,
            load: [0.0; 3],
        }
    }
}

impl SystemSnapshot {
    /// Busy CPU percentage (user + system).
    pub fn cpu_used(&self) -> f64 {
        self.cpu_user + self.cpu_sys
    }

    /// Memory in use as a percentage of total, 0 when total is unknown.
    pub fn mem_percent(&self) -> f64 {
        if self.mem_total == 0 {
            0.0
        } else {
            self.mem_used as f64 / self.mem_total as f64 * 100.0
        }
    }
}
