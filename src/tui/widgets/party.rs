//! Party section: level progress and per-model output share.

use crate::fmt::{format_count, level_for};
use crate::model::UsageSnapshot;
use crate::tui::style::{Theme, pad_visible};

use super::bar::{Severity, bar};
use super::panel::Panel;

/// Bar width for the per-model rows at panel width `w`.
pub fn model_bar_width(w: usize) -> usize {
    w.saturating_sub(44).max(8)
}

/// How a model is presented in the party list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub name: &'static str,
    pub role: &'static str,
    pub color: &'static str,
}

const KNOWN_MODELS: &[(&str, Member)] = &[
    (
        "claude-sonnet-4-5-20250929",
        Member {
            name: "Sonnet 4.5",
            role: "cleric",
            color: Theme::CYAN,
        },
    ),
    (
        "claude-opus-4-5-20251101",
        Member {
            name: "Opus 4.5",
            role: "warrior",
            color: Theme::MAGENTA,
        },
    ),
    (
        "claude-opus-4-6",
        Member {
            name: "Opus 4.6",
            role: "hero",
            color: Theme::GREEN,
        },
    ),
];

const NAME_WIDTH: usize = 10;
const ROLE_WIDTH: usize = 7;
const UNKNOWN_NAME_CHARS: usize = 9;

/// Display name, role and color for a model id.
///
/// Returns `None` for ids without an entry; those are shown by their first
/// nine characters.
pub fn member_for(model_id: &str) -> Option<Member> {
    KNOWN_MODELS
        .iter()
        .find(|(id, _)| *id == model_id)
        .map(|(_, member)| *member)
}

pub fn render_party(panel: &mut Panel, usage: &UsageSnapshot) {
    let bg = Theme::BG;
    let rst = Theme::RESET;
    let fg = Theme::FG;
    let yel = Theme::YELLOW;
    let dim = Theme::DIM;

    let level = level_for(usage.total_messages);
    panel.line(&format!(
        "{bold}{yel}▸ Party{rst}{bg}    \
         {fg}Lv{rst}{bg} {yel}{lv}{rst}{bg}  \
         {fg}EXP{rst}{bg} {yel}{cur}{rst}{bg}/{dim}{next}{rst}{bg}  \
         {fg}msgs{rst}{bg} {yel}{msgs}{rst}{bg}  \
         {fg}sessions{rst}{bg} {yel}{sessions}{rst}",
        bold = Theme::BOLD,
        lv = level.level,
        cur = level.progress,
        next = level.next,
        msgs = format_count(usage.total_messages),
        sessions = format_count(usage.total_sessions),
    ));
    panel.separator();

    let total = usage.total_output_tokens() as f64;
    let mbw = model_bar_width(panel.width());
    for (id, model) in &usage.model_usage {
        let (name, role, color) = match member_for(id) {
            Some(m) => (m.name.to_string(), m.role, m.color),
            None => (id.chars().take(UNKNOWN_NAME_CHARS).collect(), "??", fg),
        };
        panel.line(&format!(
            "{color}{name}{rst}{bg}{dim}({role}){rst}{bg} {gauge} {yel}{out:>6}{rst}",
            name = pad_visible(&name, NAME_WIDTH),
            role = pad_visible(role, ROLE_WIDTH),
            gauge = bar(model.output_tokens as f64, total, mbw, Severity::HighIsBad),
            out = format_count(model.output_tokens),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelUsage;
    use crate::tui::style::strip_styles;

    fn usage(models: &[(&str, u64)]) -> UsageSnapshot {
        UsageSnapshot {
            total_messages: 250,
            total_sessions: 9,
            model_usage: models
                .iter()
                .map(|&(id, out)| {
                    (
                        id.to_string(),
                        ModelUsage {
                            output_tokens: out,
                            ..Default::default()
                        },
                    )
                })
                .collect(),
            ..Default::default()
        }
    }

    fn rows(usage: &UsageSnapshot) -> Vec<String> {
        let mut panel = Panel::new(80);
        render_party(&mut panel, usage);
        panel.into_lines().iter().map(|l| strip_styles(l)).collect()
    }

    #[test]
    fn test_member_lookup() {
        assert_eq!(member_for("claude-opus-4-6").unwrap().role, "hero");
        assert!(member_for("claude-haiku-9").is_none());
    }

    #[test]
    fn test_party_header() {
        let rows = rows(&usage(&[]));
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Lv 3  EXP 10/196  msgs 250  sessions 9"));
    }

    #[test]
    fn test_model_rows() {
        let rows = rows(&usage(&[
            ("claude-opus-4-6", 1_500_000),
            ("claude-3-haiku-20240307", 500_000),
        ]));
        assert_eq!(rows.len(), 4);

        // BTreeMap order: "claude-3-..." sorts first
        assert!(rows[2].starts_with("║ claude-3- (??     ) "));
        assert!(rows[2].contains(" 500.0K"));
        assert_eq!(rows[2].chars().filter(|&c| c == '█').count(), 9);

        assert!(rows[3].starts_with("║ Opus 4.6  (hero   ) "));
        assert!(rows[3].contains("  1.5M"));
        assert_eq!(rows[3].chars().filter(|&c| c == '█').count(), 27);
    }

    #[test]
    fn test_zero_output_total() {
        let rows = rows(&usage(&[("x", 0)]));
        assert!(rows[2].contains(&"·".repeat(model_bar_width(80))));
    }
}
