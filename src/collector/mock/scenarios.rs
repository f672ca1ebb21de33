//! Pre-built mock filesystem scenarios for testing.

use super::filesystem::MockFs;

/// Data directory used by the usage scenarios.
pub const MOCK_DATA_DIR: &str = "/home/user/.claude";

impl MockFs {
    /// Creates a host with the `/proc` files read by the system sampler.
    pub fn typical_system() -> Self {
        let fs = Self::new();

        fs.add_file("/proc/loadavg", "1.20 1.00 0.90 2/512 4242\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16777216 kB
MemFree:         4194304 kB
MemAvailable:    8388608 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 5000 250 1500 40000 500 100 50 0 0 0
cpu1 5000 250 1500 40000 500 100 50 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );

        fs
    }

    /// Creates a data directory at [`MOCK_DATA_DIR`] with a stats cache and a
    /// history log that contains a few unusable lines.
    pub fn typical_usage() -> Self {
        let fs = Self::new();

        fs.add_file(
            format!("{MOCK_DATA_DIR}/stats-cache.json"),
            r#"{
  "totalMessages": 250,
  "totalSessions": 9,
  "modelUsage": {
    "A": {"outputTokens": 100, "inputTokens": 5000},
    "B": {"outputTokens": 300, "cacheReadInputTokens": 120000}
  },
  "dailyActivity": [{"date": "2026-10-18", "messageCount": 42}],
  "dailyModelTokens": []
}"#,
        );
        fs.add_file(
            format!("{MOCK_DATA_DIR}/history.jsonl"),
            "\
{\"display\":\"hello\",\"timestamp\":1792420000000}
{\"display\":\"broken\",\"timestamp\":
{\"display\":\"no timestamp\"}

{\"display\":\"string ts\",\"timestamp\":\"yesterday\"}
{\"display\":\"again\",\"timestamp\":1792416600500}
",
        );

        fs
    }
}
