//! ANSI styling helpers and visible-width accounting.
//!
//! Screens render plain strings with embedded ANSI sequences. Anything
//! that measures text for alignment or hit testing must go through
//! [`strip_ansi`] / [`visible_width`] so styled substrings do not skew
//! column math.

use once_cell::sync::Lazy;
use regex::Regex;

static ANSI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("invalid ANSI regex"));

/// Remove ANSI color/formatting sequences from `text`.
pub fn strip_ansi(text: &str) -> String {
    ANSI_RE.replace_all(text, "").into_owned()
}

/// Count of visible characters, ignoring styling sequences.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

fn ansi_wrap(text: &str, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{text}{suffix}")
}

/// Bold emphasis.
pub fn bold(text: &str) -> String {
    ansi_wrap(text, "\x1b[1m", "\x1b[22m")
}

/// Dimmed text, used for hints and secondary lines.
pub fn dim(text: &str) -> String {
    ansi_wrap(text, "\x1b[2m", "\x1b[22m")
}

/// Cyan foreground, the cursor/selection accent.
pub fn cyan(text: &str) -> String {
    ansi_wrap(text, "\x1b[36m", "\x1b[39m")
}

/// Green foreground for success lines.
pub fn green(text: &str) -> String {
    ansi_wrap(text, "\x1b[32m", "\x1b[39m")
}

/// Yellow foreground for warnings.
pub fn yellow(text: &str) -> String {
    ansi_wrap(text, "\x1b[33m", "\x1b[39m")
}

/// Red foreground for failures.
pub fn red(text: &str) -> String {
    ansi_wrap(text, "\x1b[31m", "\x1b[39m")
}

/// Greedy word wrap to `width` visible columns. Words longer than the
/// budget are hard-split so a single token cannot break the frame.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let line_len = line.chars().count();

        if line_len == 0 && word_len <= width {
            line.push_str(word);
        } else if line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
        } else if word_len <= width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        } else {
            // Hard-split an oversized token.
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let mut chunk = String::new();
            for ch in word.chars() {
                if chunk.chars().count() == width {
                    lines.push(std::mem::take(&mut chunk));
                }
                chunk.push(ch);
            }
            line = chunk;
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
