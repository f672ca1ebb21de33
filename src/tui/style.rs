//! Color scheme and text-width helpers.
//!
//! Frames are plain strings with embedded ANSI SGR sequences. Layout math
//! must ignore those sequences, so every width in the renderer goes through
//! [`visible_width`].

/// Blue-window color palette, as raw SGR sequences.
pub struct Theme;

impl Theme {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    /// Panel background (256-color navy).
    pub const BG: &str = "\x1b[48;5;17m";
    /// Primary text.
    pub const FG: &str = "\x1b[97m";
    /// Box-drawing borders.
    pub const BORDER: &str = "\x1b[94m";

    pub const YELLOW: &str = "\x1b[93m";
    pub const CYAN: &str = "\x1b[96m";
    pub const GREEN: &str = "\x1b[92m";
    pub const RED: &str = "\x1b[91m";
    pub const MAGENTA: &str = "\x1b[95m";
}

const ESC: char = '\x1b';

/// Removes ANSI escape sequences from `s`.
///
/// Handles CSI sequences (`ESC [` params, final byte `@`..`~`) and two-byte
/// escapes. An unterminated sequence at the end of the string is dropped.
pub fn strip_styles(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != ESC {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('[') => {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            // two-byte escape such as `ESC 7`
            Some(_) | None => {}
        }
    }
    out
}

/// Number of visible code points in `s`, ignoring escape sequences.
pub fn visible_width(s: &str) -> usize {
    strip_styles(s).chars().count()
}

/// Cuts `s` down to at most `max` visible code points.
///
/// Escape sequences are kept intact; if anything was cut, a reset is appended
/// so a dangling style cannot bleed into what follows.
pub fn truncate_visible(s: &str, max: usize) -> String {
    if visible_width(s) <= max {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut visible = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == ESC {
            out.push(c);
            match chars.next() {
                Some('[') => {
                    out.push('[');
                    for c in chars.by_ref() {
                        out.push(c);
                        if ('@'..='~').contains(&c) {
                            break;
                        }
                    }
                }
                Some(other) => out.push(other),
                None => {}
            }
            continue;
        }
        if visible == max {
            break;
        }
        out.push(c);
        visible += 1;
    }
    out.push_str(Theme::RESET);
    out
}

/// Pads `s` with spaces on the right to `width` visible code points.
pub fn pad_visible(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_width_ignores_sgr() {
        let s = format!("{}{}CPU{} 12%", Theme::BG, Theme::YELLOW, Theme::RESET);
        assert_eq!(visible_width(&s), 7);
        assert_eq!(strip_styles(&s), "CPU 12%");
    }

    #[test]
    fn test_visible_width_counts_code_points() {
        assert_eq!(visible_width("█░▶═"), 4);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn test_strip_other_csi_sequences() {
        // cursor home + clear, 256-color, and a two-byte escape
        let s = "\x1b[H\x1b[Jab\x1b[38;5;208mc\x1b7d";
        assert_eq!(strip_styles(s), "abcd");
    }

    #[test]
    fn test_strip_unterminated_sequence() {
        assert_eq!(strip_styles("ok\x1b[38;5"), "ok");
        assert_eq!(strip_styles("ok\x1b"), "ok");
    }

    #[test]
    fn test_truncate_visible_keeps_styles() {
        let s = format!("{}abc{}def", Theme::RED, Theme::RESET);
        let t = truncate_visible(&s, 4);
        assert_eq!(strip_styles(&t), "abcd");
        assert!(t.starts_with(Theme::RED));
        assert!(t.ends_with(Theme::RESET));
    }

    #[test]
    fn test_truncate_visible_short_input_unchanged() {
        let s = format!("{}abc{}", Theme::RED, Theme::RESET);
        assert_eq!(truncate_visible(&s, 3), s);
        assert_eq!(truncate_visible(&s, 10), s);
    }

    #[test]
    fn test_pad_visible() {
        let s = format!("{}ab{}", Theme::GREEN, Theme::RESET);
        let padded = pad_visible(&s, 5);
        assert_eq!(visible_width(&padded), 5);
        assert_eq!(pad_visible("toolong", 3), "toolong");
    }
}
