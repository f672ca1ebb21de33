//! Host resource rows: CPU, memory and load average.

use crate::fmt::format_mib;
use crate::model::SystemSnapshot;
use crate::tui::style::Theme;

use super::bar::{Severity, bar};
use super::panel::Panel;

/// Bar width for the resource gauges at panel width `w`.
pub fn gauge_width(w: usize) -> usize {
    w.saturating_sub(38).max(10)
}

pub fn render_system(panel: &mut Panel, system: &SystemSnapshot) {
    let bw = gauge_width(panel.width());
    let bg = Theme::BG;
    let rst = Theme::RESET;
    let dim = Theme::DIM;
    let yel = Theme::YELLOW;

    let cpu = system.cpu_used();
    panel.line(&format!(
        "{fg}CPU  {rst}{bg}  {gauge} {yel}{cpu:5.1}%{rst}{bg} {dim}usr:{usr:.0} sys:{sys:.0}{rst}",
        fg = Theme::FG,
        gauge = bar(cpu, 100.0, bw, Severity::HighIsBad),
        usr = system.cpu_user,
        sys = system.cpu_sys,
    ));

    let mem = system.mem_percent();
    panel.line(&format!(
        "{cyn}MEM  {rst}{bg}  {gauge} {yel}{mem:5.1}%{rst}{bg} {dim}{used}/{total}{rst}",
        cyn = Theme::CYAN,
        gauge = bar(mem, 100.0, bw, Severity::HighIsBad),
        used = format_mib(system.mem_used),
        total = format_mib(system.mem_total),
    ));

    let [l1, l5, l15] = system.load;
    panel.line(&format!(
        "{mag}LOAD {rst}{bg}  {dim}1m{rst}{bg} {yel}{l1:.2}{rst}{bg}  \
         {dim}5m{rst}{bg} {yel}{l5:.2}{rst}{bg}  \
         {dim}15m{rst}{bg} {yel}{l15:.2}{rst}",
        mag = Theme::MAGENTA,
    ));
}
