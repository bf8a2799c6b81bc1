//! Post-render mouse hit testing over rendered text fragments.
//!
//! Items are matched by coordinate containment against positions
//! recorded during the last render pass, not by logical identity. When
//! several items render identical text, matches are consumed
//! left-to-right, top-to-bottom, in registration order, so every item
//! gets distinct, non-overlapping coordinates.

use std::fmt;

use crate::{error::TrackError, style};

/// Last-known screen position of one clickable item: `[row, col,
/// col+width)` in visible-character columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Zero-based row in the rendered output.
    pub row: u16,
    /// Zero-based start column.
    pub col: u16,
    /// Visible character width of the display text.
    pub width: u16,
}

impl Bounds {
    fn contains(&self, col: u16, row: u16) -> bool {
        row == self.row && col >= self.col && col < self.col + self.width
    }
}

type ClickHandler = Box<dyn FnMut(bool) + Send>;

struct TrackedItem {
    inactive: String,
    active: String,
    activated: bool,
    bounds: Option<Bounds>,
    handler: Option<ClickHandler>,
}

impl TrackedItem {
    fn display_text(&self) -> &str {
        if self.activated {
            &self.active
        } else {
            &self.inactive
        }
    }
}

/// Registry of clickable items with per-render position tracking.
#[derive(Default)]
pub struct ClickableTracker {
    items: Vec<TrackedItem>,
}

impl fmt::Debug for ClickableTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for item in &self.items {
            list.entry(&(item.display_text(), item.activated, item.bounds));
        }
        list.finish()
    }
}

impl ClickableTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item with its two display strings (plain text, no
    /// styling). Returns the item's id; match order for duplicate texts
    /// follows registration order.
    pub fn register(&mut self, inactive: impl Into<String>, active: impl Into<String>) -> usize {
        self.items.push(TrackedItem {
            inactive: inactive.into(),
            active: active.into(),
            activated: false,
            bounds: None,
            handler: None,
        });
        self.items.len() - 1
    }

    /// Register an item with a handler fired on every click, receiving
    /// the post-toggle activated state.
    pub fn register_with(
        &mut self,
        inactive: impl Into<String>,
        active: impl Into<String>,
        handler: impl FnMut(bool) + Send + 'static,
    ) -> usize {
        let id = self.register(inactive, active);
        self.items[id].handler = Some(Box::new(handler));
        id
    }

    /// Display text for the item's current activated state.
    pub fn display_text(&self, id: usize) -> &str {
        self.items[id].display_text()
    }

    /// Whether the item is activated.
    pub fn is_activated(&self, id: usize) -> bool {
        self.items[id].activated
    }

    /// Force an item's activated state, e.g. when restoring from
    /// session state.
    pub fn set_activated(&mut self, id: usize, activated: bool) {
        self.items[id].activated = activated;
    }

    /// Recorded position from the last render pass, if located.
    pub fn bounds(&self, id: usize) -> Option<Bounds> {
        self.items[id].bounds
    }

    /// Recompute every item's position from `rendered`, the full text
    /// of the last render pass.
    ///
    /// Styling sequences are stripped before matching, so positions are
    /// visible-character columns. An item whose current display text
    /// cannot be found (e.g. truncated away) is an explicit error
    /// rather than a stale position.
    pub fn locate(&mut self, rendered: &str) -> Result<(), TrackError> {
        let plain = style::strip_ansi(rendered);
        let lines: Vec<&str> = plain.lines().collect();
        let mut claimed: Vec<(usize, usize, usize)> = Vec::new();

        let needles: Vec<String> = self
            .items
            .iter()
            .map(|item| item.display_text().to_string())
            .collect();

        for (item, needle) in self.items.iter_mut().zip(needles) {
            let width = needle.chars().count();
            let mut found = None;

            'scan: for (row, line) in lines.iter().enumerate() {
                for (byte_idx, _) in line.match_indices(needle.as_str()) {
                    let col = line[..byte_idx].chars().count();
                    let end = col + width;
                    let overlaps = claimed.iter().any(|&(claimed_row, start, stop)| {
                        claimed_row == row && col < stop && start < end
                    });
                    if overlaps {
                        continue;
                    }
                    claimed.push((row, col, end));
                    found = Some(Bounds {
                        row: row as u16,
                        col: col as u16,
                        width: width as u16,
                    });
                    break 'scan;
                }
            }

            match found {
                Some(bounds) => item.bounds = Some(bounds),
                None => return Err(TrackError::TextNotFound { text: needle }),
            }
        }

        Ok(())
    }

    /// Hit-test a click at (`col`, `row`).
    ///
    /// If the coordinates fall within an item's recorded bounds for its
    /// current (pre-toggle) display text, the item's activated state is
    /// toggled, its handler fires with the new state, and the item's id
    /// is returned.
    pub fn click(&mut self, col: u16, row: u16) -> Option<usize> {
        for (id, item) in self.items.iter_mut().enumerate() {
            let hit = item.bounds.is_some_and(|bounds| bounds.contains(col, row));
            if hit {
                item.activated = !item.activated;
                let activated = item.activated;
                if let Some(handler) = item.handler.as_mut() {
                    handler(activated);
                }
                return Some(id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    #[test]
    fn locates_item_after_render() {
        let mut tracker = ClickableTracker::new();
        let id = tracker.register("[ ] telemetry", "[x] telemetry");
        tracker.locate("header\n  [ ] telemetry\n").expect("located");
        assert_eq!(
            tracker.bounds(id),
            Some(Bounds {
                row: 1,
                col: 2,
                width: 13
            })
        );
    }

    #[test]
    fn matching_ignores_styling_sequences() {
        let mut tracker = ClickableTracker::new();
        let id = tracker.register("[ ] on", "[x] on");
        let rendered = format!("  {}\n", crate::style::cyan("[ ] on"));
        tracker.locate(&rendered).expect("located through styling");
        assert_eq!(tracker.bounds(id).unwrap().col, 2);
    }

    #[test]
    fn duplicate_texts_get_distinct_positions_top_to_bottom() {
        let mut tracker = ClickableTracker::new();
        let first = tracker.register("[ ]", "[x]");
        let second = tracker.register("[ ]", "[x]");
        tracker.locate("[ ] alpha\n[ ] beta\n").expect("located");

        let a = tracker.bounds(first).unwrap();
        let b = tracker.bounds(second).unwrap();
        assert_eq!(a, Bounds { row: 0, col: 0, width: 3 });
        assert_eq!(b, Bounds { row: 1, col: 0, width: 3 });
    }

    #[test]
    fn duplicate_texts_on_one_line_consumed_left_to_right() {
        let mut tracker = ClickableTracker::new();
        let first = tracker.register("[ ]", "[x]");
        let second = tracker.register("[ ]", "[x]");
        tracker.locate("[ ] on   [ ] off\n").expect("located");

        assert_eq!(tracker.bounds(first).unwrap().col, 0);
        assert_eq!(tracker.bounds(second).unwrap().col, 9);
    }

    #[test]
    fn missing_text_is_an_explicit_error() {
        let mut tracker = ClickableTracker::new();
        tracker.register("[ ] gone", "[x] gone");
        let err = tracker.locate("nothing here\n").unwrap_err();
        assert!(matches!(err, TrackError::TextNotFound { text } if text == "[ ] gone"));
    }

    #[test]
    fn click_inside_bounds_toggles_and_fires_handler() {
        let fired = Arc::new(AtomicBool::new(false));
        let observed = Arc::clone(&fired);

        let mut tracker = ClickableTracker::new();
        let id = tracker.register_with("[ ] auto", "[x] auto", move |activated| {
            observed.store(activated, Ordering::SeqCst);
        });
        tracker.locate("  [ ] auto\n").expect("located");

        assert_eq!(tracker.click(4, 0), Some(id));
        assert!(tracker.is_activated(id));
        assert!(fired.load(Ordering::SeqCst));
    }

    #[test]
    fn click_outside_bounds_is_ignored() {
        let mut tracker = ClickableTracker::new();
        let id = tracker.register("[ ] auto", "[x] auto");
        tracker.locate("  [ ] auto\n").expect("located");

        // One column past the end, and the wrong row.
        assert_eq!(tracker.click(10, 0), None);
        assert_eq!(tracker.click(4, 1), None);
        assert!(!tracker.is_activated(id));
    }

    #[test]
    fn click_matches_pre_toggle_bounds() {
        let mut tracker = ClickableTracker::new();
        let id = tracker.register("[ ] short", "[x] a much longer label");
        tracker.locate("[ ] short\n").expect("located");

        assert_eq!(tracker.click(0, 0), Some(id));
        assert!(tracker.is_activated(id));

        // Bounds still reflect the old text until the next render pass.
        assert_eq!(tracker.bounds(id).unwrap().width, 9);
        tracker.locate("[x] a much longer label\n").expect("relocated");
        assert_eq!(tracker.bounds(id).unwrap().width, 23);
    }
}
