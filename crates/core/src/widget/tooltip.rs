//! Contextual help box rendered alongside a widget.

use crate::style::{self, bold, visible_width, wrap_text, yellow};

const MAX_FRAME_WIDTH: usize = 100;
const DEFAULT_FRAME_WIDTH: usize = 80;
const MIN_INNER_WIDTH: usize = 10;

/// A framed help box with a title bar, word-wrapped body, optional
/// warning paragraph, and emphasis on configured substrings.
#[derive(Debug, Clone)]
pub struct Tooltip {
    title: String,
    body: String,
    warning: Option<String>,
    bold_texts: Vec<String>,
}

impl Tooltip {
    /// Tooltip with a title and body text.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            warning: None,
            bold_texts: Vec::new(),
        }
    }

    /// Add a warning paragraph, wrapped independently of the body.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    /// Emphasize every occurrence of `text` in the rendered lines.
    pub fn with_bold(mut self, text: impl Into<String>) -> Self {
        self.bold_texts.push(text.into());
        self
    }

    /// Render the framed box within `width` columns. A width of 0 falls
    /// back to 80; anything larger than the frame maximum is clamped.
    ///
    /// All alignment uses visible character counts, so emphasized
    /// substrings do not push the right border out of line.
    pub fn render(&self, width: u16) -> String {
        let budget = if width == 0 {
            DEFAULT_FRAME_WIDTH
        } else {
            (width as usize).min(MAX_FRAME_WIDTH)
        };
        let inner = budget.saturating_sub(4).max(MIN_INNER_WIDTH);
        let budget = inner + 4;

        let mut lines = wrap_text(&self.body, inner);
        if let Some(warning) = &self.warning {
            lines.push(String::new());
            lines.extend(wrap_text(warning, inner).into_iter().map(|line| yellow(&line)));
        }

        let mut out = String::new();
        out.push_str(&self.title_bar(budget));
        out.push('\n');
        for line in &lines {
            let styled = self.emphasize(line);
            let pad = inner.saturating_sub(visible_width(&styled));
            out.push_str(&format!("│ {}{} │\n", styled, " ".repeat(pad)));
        }
        out.push_str(&format!("╰{}╯", "─".repeat(budget - 2)));
        out
    }

    fn title_bar(&self, budget: usize) -> String {
        // "╭─ <title> ─…─╮", title truncated to fit the frame.
        let room = budget.saturating_sub(6);
        let title: String = self.title.chars().take(room).collect();
        let fill = budget - 5 - title.chars().count();
        format!("╭─ {} {}╮", bold(&title), "─".repeat(fill))
    }

    fn emphasize(&self, line: &str) -> String {
        let mut styled = line.to_string();
        for text in &self.bold_texts {
            if style::strip_ansi(&styled).contains(text.as_str()) {
                styled = styled.replace(text.as_str(), &bold(text));
            }
        }
        styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_lines_share_one_visible_width() {
        let tooltip = Tooltip::new("Networks", "Choose the chain network this node will join.")
            .with_warning("Switching networks later wipes local chain data.")
            .with_bold("chain network");
        let rendered = tooltip.render(40);

        let widths: Vec<usize> = rendered.lines().map(visible_width).collect();
        assert!(!widths.is_empty());
        assert!(
            widths.iter().all(|w| *w == widths[0]),
            "ragged frame: {widths:?}"
        );
        assert_eq!(widths[0], 40);
    }

    #[test]
    fn zero_width_falls_back_to_eighty_columns() {
        let rendered = Tooltip::new("Help", "text").render(0);
        assert_eq!(visible_width(rendered.lines().next().unwrap()), 80);
    }

    #[test]
    fn oversized_width_is_clamped() {
        let rendered = Tooltip::new("Help", "text").render(500);
        assert_eq!(visible_width(rendered.lines().next().unwrap()), 100);
    }

    #[test]
    fn body_and_warning_wrap_independently() {
        let tooltip = Tooltip::new("T", "alpha beta gamma delta").with_warning("watch out here");
        let rendered = tooltip.render(18);
        let plain = style::strip_ansi(&rendered);
        assert!(plain.contains("alpha beta"));
        assert!(plain.contains("watch out"));
        // Blank separator row between body and warning.
        assert!(plain.lines().any(|line| line.trim() == "│ │" || line.trim_matches([' ', '│']).is_empty()));
    }

    #[test]
    fn bold_substring_is_emphasized() {
        let rendered = Tooltip::new("T", "enable the relayer now").with_bold("relayer").render(60);
        assert!(rendered.contains("\x1b[1mrelayer\x1b[22m"));
    }

    #[test]
    fn long_title_is_truncated_not_overflowed() {
        let long = "a".repeat(200);
        let rendered = Tooltip::new(long, "body").render(30);
        assert_eq!(visible_width(rendered.lines().next().unwrap()), 30);
    }
}
