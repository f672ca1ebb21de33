//! Two-tone gauge bar.

use crate::tui::style::Theme;

const FILLED: char = '█';
const EMPTY: char = '░';
const NEUTRAL: char = '·';

/// Which end of the scale is the worrying one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Green while low, red when nearly full (CPU, memory, busy hours).
    HighIsBad,
    /// Green while high, red when nearly empty (remaining budgets).
    LowIsBad,
}

/// Renders a bar of exactly `width` visible cells.
///
/// The filled part is `floor(min(value / max, 1) * width)` cells. A `max` of
/// zero (or less) has no scale and renders a dim neutral bar instead.
pub fn bar(value: f64, max: f64, width: usize, severity: Severity) -> String {
    if max <= 0.0 {
        return format!(
            "{}{}{}",
            Theme::DIM,
            NEUTRAL.to_string().repeat(width),
            Theme::RESET
        );
    }

    let ratio = (value / max).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    format!(
        "{}{}{}{}{}",
        color_for(ratio, severity),
        FILLED.to_string().repeat(filled),
        Theme::DIM,
        EMPTY.to_string().repeat(width - filled),
        Theme::RESET
    )
}

fn color_for(ratio: f64, severity: Severity) -> &'static str {
    match severity {
        Severity::HighIsBad if ratio < 0.5 => Theme::GREEN,
        Severity::HighIsBad if ratio < 0.8 => Theme::YELLOW,
        Severity::HighIsBad => Theme::RED,
        Severity::LowIsBad if ratio > 0.5 => Theme::GREEN,
        Severity::LowIsBad if ratio > 0.2 => Theme::YELLOW,
        Severity::LowIsBad => Theme::RED,
    }
}
