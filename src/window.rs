//! Message-window aggregation over the history timestamps.
//!
//! Everything here is a pure function of the timestamp set and a reference
//! instant. Counts are recomputed from scratch on every tick: each query is a
//! linear scan, so one refresh costs O(n * w) for n timestamps and w windows.
//! The history log is small enough that this is the accepted cost; no index or
//! sort order is maintained and timestamps may arrive in any order.
//!
//! Fixed buckets are half-open `[start, end)`, so adjacent buckets never share
//! an event and their sum equals one range query over the union.

use chrono::{DateTime, TimeDelta, TimeZone};

use crate::model::EventTimestamp;

pub const HOUR_SECS: f64 = 3600.0;
pub const THREE_HOURS_SECS: f64 = 3.0 * HOUR_SECS;
pub const FIVE_HOURS_SECS: f64 = 5.0 * HOUR_SECS;

/// Counts timestamps `t` with `now - t < horizon_secs`.
pub fn rolling_count(events: &[EventTimestamp], now: f64, horizon_secs: f64) -> usize {
    events.iter().filter(|&&t| now - t < horizon_secs).count()
}

/// Counts timestamps in the half-open range `[start, end)`.
pub fn count_between(events: &[EventTimestamp], start: f64, end: f64) -> usize {
    events.iter().filter(|&&t| start <= t && t < end).count()
}

/// Counts timestamps at or after local midnight of the day containing `now`.
pub fn today_count<Tz: TimeZone>(events: &[EventTimestamp], now: &DateTime<Tz>) -> usize {
    let start = day_start(now);
    events.iter().filter(|&&t| t >= start).count()
}

/// Start of the calendar day containing `now`, in epoch seconds.
///
/// When midnight does not exist locally (a DST jump), the earliest valid
/// instant of that day is used; failing that, `now` itself.
fn day_start<Tz: TimeZone>(now: &DateTime<Tz>) -> f64 {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| now.timezone().from_local_datetime(&midnight).earliest())
        .map(|d| epoch_secs(&d))
        .unwrap_or_else(|| epoch_secs(now))
}

/// Converts a date-time to fractional epoch seconds.
pub fn epoch_secs<Tz: TimeZone>(t: &DateTime<Tz>) -> f64 {
    t.timestamp_millis() as f64 / 1000.0
}

/// One hour-long bucket of the hourly chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourBucket {
    /// Two-digit local hour of the bucket's end instant.
    pub label: String,
    pub count: usize,
    /// Whether this bucket ends at `now`, i.e. covers the current partial hour.
    pub current: bool,
}

/// Builds `hours_back + 1` hourly buckets, oldest first.
///
/// Bucket `h` (counting down from `hours_back` to 0) covers
/// `[now - (h+1)h, now - h*1h)` and is labelled with the hour of `now - h*1h`.
pub fn hourly_buckets<Tz>(
    events: &[EventTimestamp],
    now: &DateTime<Tz>,
    hours_back: u32,
) -> Vec<HourBucket>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let now_ts = epoch_secs(now);
    (0..=hours_back)
        .rev()
        .map(|h| {
            let end = now_ts - f64::from(h) * HOUR_SECS;
            let start = end - HOUR_SECS;
            let label = (now.clone() - TimeDelta::hours(i64::from(h)))
                .format("%H")
                .to_string();
            HourBucket {
                label,
                count: count_between(events, start, end),
                current: h == 0,
            }
        })
        .collect()
}

/// All window counts shown in one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowCounts {
    pub last_hour: usize,
    pub last_3h: usize,
    pub last_5h: usize,
    pub today: usize,
    pub hourly: Vec<HourBucket>,
}

impl WindowCounts {
    pub fn compute<Tz>(events: &[EventTimestamp], now: &DateTime<Tz>, hours_back: u32) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let now_ts = epoch_secs(now);
        Self {
            last_hour: rolling_count(events, now_ts, HOUR_SECS),
            last_3h: rolling_count(events, now_ts, THREE_HOURS_SECS),
            last_5h: rolling_count(events, now_ts, FIVE_HOURS_SECS),
            today: today_count(events, now),
            hourly: hourly_buckets(events, now, hours_back),
        }
    }

    /// Largest hourly bucket count, 0 when the chart is empty.
    pub fn peak_hour(&self) -> usize {
        self.hourly.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
