//! Shared formatting helpers for the dashboard.
//!
//! Pure functions only: no styling, no layout.

/// Format a count with a decimal K/M suffix.
///
/// `999` -> `"999"`, `1500` -> `"1.5K"`, `2_500_000` -> `"2.5M"`.
/// The suffix is chosen before rounding, so `999_999` renders as `"1000.0K"`.
pub fn format_count(n: u64) -> String {
    let f = n as f64;
    if n >= 1_000_000 {
        format!("{:.1}M", f / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", f / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Format a size in MiB: `"512M"` below one GiB, `"2.0G"` from there on.
pub fn format_mib(mib: u64) -> String {
    if mib >= 1024 {
        format!("{:.1}G", mib as f64 / 1024.0)
    } else {
        format!("{}M", mib)
    }
}

/// Experience needed to clear the first level.
const FIRST_LEVEL_EXP: u64 = 100;
/// Growth factor between consecutive level thresholds.
const LEVEL_GROWTH: f64 = 1.4;

/// Progress through the level ladder for a cumulative total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience gathered inside the current level.
    pub progress: u64,
    /// Experience required to clear the current level.
    pub next: u64,
}

/// Derives a level from a cumulative total.
///
/// Level 1 needs 100; every following level needs 1.4x the previous one,
/// truncated to an integer at each step (100, 140, 196, 274, ...). The product
/// is taken in `f64`, so the ladder drifts from exact decimal math after a
/// dozen levels (level 16 needs 15490 rather than 15491).
pub fn level_for(total: u64) -> Level {
    let mut level = 1;
    let mut next = FIRST_LEVEL_EXP;
    let mut remaining = total;
    while remaining >= next {
        remaining -= next;
        level += 1;
        next = (next as f64 * LEVEL_GROWTH) as u64;
    }
    Level {
        level,
        progress: remaining,
        next,
    }
}
