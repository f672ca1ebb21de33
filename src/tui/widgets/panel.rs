//! Double-line box that every section is drawn into.

use crate::tui::style::{Theme, truncate_visible, visible_width};

const TOP_LEFT: char = '╔';
const TOP_RIGHT: char = '╗';
const BOTTOM_LEFT: char = '╚';
const BOTTOM_RIGHT: char = '╝';
const HORIZONTAL: char = '═';
const VERTICAL: char = '║';
const TEE_LEFT: char = '╠';
const TEE_RIGHT: char = '╣';

/// Accumulates the rows of a fixed-width panel.
///
/// Every row pushed here is exactly `width` visible cells wide.
#[derive(Debug, Clone)]
pub struct Panel {
    width: usize,
    lines: Vec<String>,
}

impl Panel {
    /// Narrowest panel that still has room for content.
    pub const MIN_WIDTH: usize = 20;

    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(Self::MIN_WIDTH),
            lines: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Visible cells available for text inside a row.
    pub fn content_width(&self) -> usize {
        self.width - 4
    }

    pub fn top(&mut self) {
        self.rule(TOP_LEFT, TOP_RIGHT);
    }

    pub fn separator(&mut self) {
        self.rule(TEE_LEFT, TEE_RIGHT);
    }

    pub fn bottom(&mut self) {
        self.rule(BOTTOM_LEFT, BOTTOM_RIGHT);
    }

    /// Adds a content row, padding or truncating `text` to the content width.
    pub fn line(&mut self, text: &str) {
        let inner = self.content_width();
        let text = if visible_width(text) > inner {
            truncate_visible(text, inner)
        } else {
            text.to_string()
        };
        // padding goes after a fresh background, the text may end with a reset
        let pad = " ".repeat(inner - visible_width(&text));
        self.lines.push(format!(
            "{bg}{border}{v}{rst}{bg} {text}{bg}{pad} {border}{v}{rst}",
            bg = Theme::BG,
            border = Theme::BORDER,
            v = VERTICAL,
            rst = Theme::RESET,
        ));
    }

    /// Adds a row with `left` flush left and `right` flush right.
    pub fn split_line(&mut self, left: &str, right: &str) {
        let gap = self
            .content_width()
            .saturating_sub(visible_width(left) + visible_width(right))
            .max(1);
        self.line(&format!("{}{}{}", left, " ".repeat(gap), right));
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn rule(&mut self, left: char, right: char) {
        self.lines.push(format!(
            "{}{}{}{}{}{}",
            Theme::BG,
            Theme::BORDER,
            left,
            HORIZONTAL.to_string().repeat(self.width - 2),
            right,
            Theme::RESET
        ));
    }
}
