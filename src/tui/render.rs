//! Frame composition.

use crate::config::Config;
use crate::model::{SystemSnapshot, UsageSnapshot};
use crate::window::WindowCounts;

use super::style::Theme;
use super::widgets::{Panel, render_party, render_rates, render_system};

/// How the frame is going to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Redrawn in place by the refresh loop.
    Interactive,
    /// Printed once to stdout.
    OneShot,
}

/// Everything one frame shows, taken from a single generation of snapshots.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub usage: &'a UsageSnapshot,
    pub system: &'a SystemSnapshot,
    pub windows: &'a WindowCounts,
    /// Wall-clock time shown in the title, `HH:MM:SS`.
    pub clock: &'a str,
}

/// One rendered screen: styled lines, each exactly `width` visible cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    lines: Vec<String>,
}

impl Frame {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Joins the lines with `newline` (`"\r\n"` in raw mode).
    pub fn to_text(&self, newline: &str) -> String {
        self.lines.join(newline)
    }
}

/// Panel width for a terminal `cols` wide.
pub fn panel_width(cols: u16, max_width: u16) -> usize {
    usize::from(cols.min(max_width)).max(Panel::MIN_WIDTH)
}

/// Lays out the whole dashboard for a `cols` x `rows` terminal.
///
/// Lines past the last terminal row are dropped.
pub fn render(scene: &Scene<'_>, cols: u16, rows: u16, mode: Mode, config: &Config) -> Frame {
    let mut panel = Panel::new(panel_width(cols, config.max_width));
    let rst = Theme::RESET;

    panel.top();
    panel.split_line(
        &format!("{}{}claude-top · usage quest{rst}", Theme::BOLD, Theme::FG),
        &format!("{}{}{rst}", Theme::DIM, scene.clock),
    );

    panel.separator();
    render_system(&mut panel, scene.system);

    panel.separator();
    render_rates(&mut panel, scene.windows, &config.thresholds);

    panel.separator();
    render_party(&mut panel, scene.usage);

    panel.separator();
    let footer = match mode {
        Mode::Interactive => format!(
            "q:quit  r:reload  refresh every {}s",
            config.tick.as_secs_f64()
        ),
        Mode::OneShot => "run claude-top without --once for live monitoring".to_string(),
    };
    panel.line(&format!("{}{footer}{rst}", Theme::DIM));
    panel.bottom();

    let width = panel.width();
    let mut lines = panel.into_lines();
    lines.truncate(usize::from(rows));
    Frame { width, lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelUsage;
    use crate::tui::style::{strip_styles, visible_width};
    use chrono::{TimeZone, Utc};

    fn usage() -> UsageSnapshot {
        let mut usage = UsageSnapshot {
            total_messages: 250,
            total_sessions: 9,
            ..Default::default()
        };
        for (id, out) in [("A", 100), ("B", 300)] {
            usage.model_usage.insert(
                id.to_string(),
                ModelUsage {
                    output_tokens: out,
                    ..Default::default()
                },
            );
        }
        usage
    }

    fn system() -> SystemSnapshot {
        SystemSnapshot {
            cpu_user: 40.0,
            cpu_sys: 15.0,
            cpu_idle: 45.0,
            mem_used: 8192,
            mem_total: 16384,
            load: [1.2, 1.0, 0.9],
        }
    }

    fn frame(events: &[f64], cols: u16, rows: u16, mode: Mode) -> Frame {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 14, 30, 0).unwrap();
        let windows = WindowCounts::compute(events, &now, 5);
        let usage = usage();
        let system = system();
        let scene = Scene {
            usage: &usage,
            system: &system,
            windows: &windows,
            clock: "14:30:00",
        };
        render(&scene, cols, rows, mode, &Config::default())
    }

    fn count(row: &str, glyph: char) -> usize {
        strip_styles(row).chars().filter(|&c| c == glyph).count()
    }

    #[test]
    fn test_every_row_matches_panel_width() {
        let events = [1_792_420_000.0, 1_792_416_600.5, 1_792_400_000.0];
        for (cols, expected) in [(40u16, 40usize), (80, 80), (120, 80)] {
            for mode in [Mode::Interactive, Mode::OneShot] {
                let f = frame(&events, cols, 100, mode);
                assert_eq!(f.width(), expected);
                for line in f.lines() {
                    assert_eq!(visible_width(line), expected, "cols={cols} line={line:?}");
                }
            }
        }
    }

    #[test]
    fn test_panel_width() {
        assert_eq!(panel_width(120, 80), 80);
        assert_eq!(panel_width(40, 80), 40);
        assert_eq!(panel_width(5, 80), Panel::MIN_WIDTH);
    }

    #[test]
    fn test_one_shot_scenario() {
        let f = frame(&[], 80, 100, Mode::OneShot);
        let rows: Vec<String> = f.lines().iter().map(|l| strip_styles(l)).collect();

        let summary = rows.iter().find(|r| r.contains("today")).unwrap();
        assert!(summary.contains("1h     0  3h     0  5h     0  today     0"));

        let row_a = rows.iter().find(|r| r.starts_with("║ A ")).unwrap();
        let row_b = rows.iter().find(|r| r.starts_with("║ B ")).unwrap();
        let mbw = crate::tui::widgets::model_bar_width(80);
        assert_eq!(count(row_b, '█'), mbw * 3 / 4);
        assert_eq!(count(row_a, '█'), mbw / 4);
        assert_eq!(count(row_a, '█') + count(row_a, '░'), mbw);

        let cpu = rows.iter().find(|r| r.contains("CPU")).unwrap();
        assert!(cpu.contains(" 55.0%"));
        assert!(rows.iter().any(|r| r.contains("8.0G/16.0G")));
        assert!(rows.iter().any(|r| r.contains("without --once")));
        assert!(!rows.iter().any(|r| r.contains("q:quit")));
    }

    #[test]
    fn test_title_and_footer() {
        let f = frame(&[], 80, 100, Mode::Interactive);
        let rows: Vec<String> = f.lines().iter().map(|l| strip_styles(l)).collect();
        assert!(rows[0].starts_with('╔'));
        assert!(rows[1].starts_with("║ claude-top · usage quest"));
        assert!(rows[1].ends_with("14:30:00 ║"));
        assert!(rows.iter().any(|r| r.contains("q:quit  r:reload  refresh every 2s")));
        assert!(rows.last().unwrap().starts_with('╚'));
    }

    #[test]
    fn test_frame_is_clamped_to_terminal_rows() {
        let full = frame(&[], 80, 200, Mode::Interactive);
        assert!(full.lines().len() > 10);

        let clamped = frame(&[], 80, 10, Mode::Interactive);
        assert_eq!(clamped.lines().len(), 10);
        assert_eq!(clamped.lines(), &full.lines()[..10]);

        assert!(frame(&[], 80, 0, Mode::Interactive).lines().is_empty());
    }

    #[test]
    fn test_to_text() {
        let f = frame(&[], 80, 3, Mode::Interactive);
        assert_eq!(f.to_text("\r\n").matches("\r\n").count(), 2);
    }
}
