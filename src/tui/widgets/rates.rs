//! Message-rate section: hourly chart, rolling totals and the pace warning.

use crate::config::Thresholds;
use crate::tui::style::Theme;
use crate::window::WindowCounts;

use super::bar::{Severity, bar};
use super::panel::Panel;

/// Bar width for the hourly chart at panel width `w`.
pub fn hourly_bar_width(w: usize) -> usize {
    w.saturating_sub(30).max(8)
}

/// Pace of the last hour relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Idle,
    Steady,
    Busy,
    Critical,
}

impl Pace {
    pub fn classify(last_hour: usize, thresholds: &Thresholds) -> Self {
        if last_hour > thresholds.critical {
            Pace::Critical
        } else if last_hour > thresholds.busy {
            Pace::Busy
        } else if last_hour > 0 {
            Pace::Steady
        } else {
            Pace::Idle
        }
    }

    fn message(self) -> String {
        let rst = Theme::RESET;
        match self {
            Pace::Critical => format!(
                "{}{}⚠ Mana nearly drained! Time for a rest.{rst}",
                Theme::RED,
                Theme::BOLD
            ),
            Pace::Busy => format!("{}△ Spending fast... watch your pace.{rst}", Theme::YELLOW),
            Pace::Steady => format!("{}○ Plenty of mana left.{rst}", Theme::GREEN),
            Pace::Idle => format!("{}  ── The adventure has not begun ──{rst}", Theme::DIM),
        }
    }
}

pub fn render_rates(panel: &mut Panel, windows: &WindowCounts, thresholds: &Thresholds) {
    let bg = Theme::BG;
    let rst = Theme::RESET;
    let fg = Theme::FG;
    let yel = Theme::YELLOW;

    panel.line(&format!(
        "{}{yel}▸ Mana remaining  {}(message rate){rst}",
        Theme::BOLD,
        Theme::DIM
    ));
    panel.separator();

    let hbw = hourly_bar_width(panel.width());
    let peak = windows.peak_hour() as f64;
    for bucket in &windows.hourly {
        let marker = if bucket.current {
            format!("{}▶{rst}{bg}", Theme::RED)
        } else {
            " ".to_string()
        };
        panel.line(&format!(
            "{marker}{fg}{label}h{rst}{bg} {gauge} {yel}{count:>4}{rst}",
            label = bucket.label,
            gauge = bar(bucket.count as f64, peak, hbw, Severity::HighIsBad),
            count = bucket.count,
        ));
    }

    panel.separator();
    panel.line(&format!(
        " {fg}1h{rst}{bg} {yel}{h1:>5}{rst}{bg}  \
         {fg}3h{rst}{bg} {yel}{h3:>5}{rst}{bg}  \
         {fg}5h{rst}{bg} {yel}{h5:>5}{rst}{bg}  \
         {fg}today{rst}{bg} {yel}{today:>5}{rst}",
        h1 = windows.last_hour,
        h3 = windows.last_3h,
        h5 = windows.last_5h,
        today = windows.today,
    ));
    panel.line(&Pace::classify(windows.last_hour, thresholds).message());
}
