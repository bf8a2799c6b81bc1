//! Multi-select checkbox list with an optional derived select-all row.

use crossterm::event::KeyEvent;

use crate::{error::WidgetError, event, style};

/// What a [`MultiSelect`] did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiAction {
    /// Cursor moved.
    Moved,
    /// Row under the cursor toggled.
    Toggled,
    /// Confirm requested.
    Confirmed,
    /// Quit requested.
    Quit,
    /// Key not recognized.
    Ignored,
}

/// Checkbox list. When built with a select-all row, index 0 is never an
/// independent flag: it is recomputed as the AND of every other index
/// after each toggle.
#[derive(Debug, Clone)]
pub struct MultiSelect {
    title: String,
    options: Vec<String>,
    checked: Vec<bool>,
    cursor: usize,
    has_select_all: bool,
}

impl MultiSelect {
    /// Build a checkbox list; all rows start unselected.
    pub fn new(title: impl Into<String>, options: Vec<String>) -> Result<Self, WidgetError> {
        Self::build(title.into(), options, false)
    }

    /// Build a checkbox list with a select-all row prepended at index 0.
    pub fn with_select_all(
        title: impl Into<String>,
        select_all_label: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, WidgetError> {
        let mut rows = vec![select_all_label.into()];
        rows.extend(options);
        Self::build(title.into(), rows, true)
    }

    fn build(title: String, options: Vec<String>, has_select_all: bool) -> Result<Self, WidgetError> {
        let min_rows = if has_select_all { 2 } else { 1 };
        if options.len() < min_rows {
            return Err(WidgetError::EmptyOptions(title));
        }
        let checked = vec![false; options.len()];
        Ok(Self {
            title,
            options,
            checked,
            cursor: 0,
            has_select_all,
        })
    }

    /// Widget title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the row at `idx` is checked.
    pub fn is_checked(&self, idx: usize) -> bool {
        self.checked[idx]
    }

    /// Advance the cursor, wrapping.
    pub fn move_down(&mut self) {
        self.cursor = (self.cursor + 1) % self.options.len();
    }

    /// Retreat the cursor, wrapping.
    pub fn move_up(&mut self) {
        self.cursor = (self.cursor + self.options.len() - 1) % self.options.len();
    }

    fn all_items_checked(&self) -> bool {
        let skip = usize::from(self.has_select_all);
        // Defined semantics: rescan every option on each toggle.
        self.checked.iter().skip(skip).all(|checked| *checked)
    }

    /// Toggle the row at `idx`.
    ///
    /// Toggling the select-all row flips every item to the opposite of
    /// the current bulk state. Toggling any item recomputes the
    /// select-all row as the AND of all items, so it always holds the
    /// derived summary after this call returns.
    pub fn toggle(&mut self, idx: usize) {
        if self.has_select_all && idx == 0 {
            let all = self.all_items_checked();
            for slot in self.checked.iter_mut() {
                *slot = !all;
            }
        } else {
            self.checked[idx] = !self.checked[idx];
            if self.has_select_all {
                self.checked[0] = self.all_items_checked();
            }
        }
    }

    /// Toggle the row under the cursor.
    pub fn toggle_current(&mut self) {
        self.toggle(self.cursor);
    }

    /// Labels of the checked item rows, excluding the select-all row.
    pub fn checked_labels(&self) -> Vec<String> {
        let skip = usize::from(self.has_select_all);
        self.options
            .iter()
            .zip(self.checked.iter())
            .skip(skip)
            .filter(|(_, checked)| **checked)
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Interpret one key press.
    pub fn handle_key(&mut self, key: &KeyEvent) -> MultiAction {
        if event::is_down(key) {
            self.move_down();
            MultiAction::Moved
        } else if event::is_up(key) {
            self.move_up();
            MultiAction::Moved
        } else if event::is_toggle(key) {
            self.toggle_current();
            MultiAction::Toggled
        } else if event::is_confirm(key) {
            MultiAction::Confirmed
        } else if event::is_quit(key) {
            MultiAction::Quit
        } else {
            MultiAction::Ignored
        }
    }

    /// Render the checkbox rows with a cursor marker.
    pub fn view(&self) -> String {
        let mut out = format!("{}\n\n", style::bold(&self.title));
        for (idx, label) in self.options.iter().enumerate() {
            let mark = if self.checked[idx] { "[x]" } else { "[ ]" };
            let row = format!("{mark} {label}");
            if idx == self.cursor {
                out.push_str(&style::cyan(&format!("> {row}")));
            } else {
                out.push_str(&format!("  {row}"));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkbox() -> MultiSelect {
        MultiSelect::with_select_all(
            "Components",
            "All components",
            vec!["node".to_string(), "relayer".to_string(), "oracle".to_string()],
        )
        .expect("valid checkbox")
    }

    fn select_all_invariant_holds(widget: &MultiSelect) -> bool {
        let items_and = (1..4).all(|idx| widget.is_checked(idx));
        widget.is_checked(0) == items_and
    }

    #[test]
    fn starts_all_unselected() {
        let widget = checkbox();
        for idx in 0..4 {
            assert!(!widget.is_checked(idx));
        }
    }

    #[test]
    fn select_all_without_items_rejected() {
        let err = MultiSelect::with_select_all("Empty", "All", Vec::new()).unwrap_err();
        assert!(matches!(err, WidgetError::EmptyOptions(_)));
    }

    #[test]
    fn toggling_each_item_derives_select_all() {
        // 4 rows, select-all at index 0; toggling 1, 2, 3 individually
        // flips index 0 to true on the third toggle.
        let mut widget = checkbox();
        widget.toggle(1);
        assert!(!widget.is_checked(0));
        widget.toggle(2);
        assert!(!widget.is_checked(0));
        widget.toggle(3);
        assert!(widget.is_checked(0));
    }

    #[test]
    fn select_all_row_flips_bulk_state() {
        let mut widget = checkbox();
        widget.toggle(0);
        for idx in 0..4 {
            assert!(widget.is_checked(idx));
        }
        widget.toggle(0);
        for idx in 0..4 {
            assert!(!widget.is_checked(idx));
        }
    }

    #[test]
    fn select_all_from_partial_state_selects_everything() {
        let mut widget = checkbox();
        widget.toggle(2);
        widget.toggle(0);
        for idx in 0..4 {
            assert!(widget.is_checked(idx));
        }
    }

    #[test]
    fn invariant_holds_after_arbitrary_toggle_sequences() {
        let sequences: &[&[usize]] = &[
            &[1, 1, 2, 3],
            &[0, 1, 0, 3, 2, 1],
            &[3, 3, 3],
            &[1, 2, 3, 0, 2, 0, 1],
        ];
        for toggles in sequences {
            let mut widget = checkbox();
            for &idx in *toggles {
                widget.toggle(idx);
                assert!(
                    select_all_invariant_holds(&widget),
                    "invariant broken after toggling {idx} in {toggles:?}"
                );
            }
        }
    }

    #[test]
    fn checked_labels_exclude_select_all_row() {
        let mut widget = checkbox();
        widget.toggle(0);
        assert_eq!(widget.checked_labels(), vec!["node", "relayer", "oracle"]);
    }

    #[test]
    fn plain_checkbox_has_no_derived_row() {
        let mut widget =
            MultiSelect::new("Plain", vec!["a".to_string(), "b".to_string()]).expect("valid");
        widget.toggle(0);
        widget.toggle(1);
        assert!(widget.is_checked(0));
        assert!(widget.is_checked(1));
        assert_eq!(widget.checked_labels(), vec!["a", "b"]);
    }
}
