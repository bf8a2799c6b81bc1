//! Single-select list with a wrapping cursor.

use std::fmt::Display;

use crossterm::event::KeyEvent;

use crate::{error::WidgetError, event, style};

/// What a [`SingleSelect`] did with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectAction<T> {
    /// Cursor moved.
    Moved,
    /// The option under the cursor, returned by value: later mutation
    /// of the options list cannot retroactively change it.
    Confirmed(T),
    /// Quit requested.
    Quit,
    /// Key not recognized.
    Ignored,
}

/// Cursor-cycling selector over a list of options.
#[derive(Debug, Clone)]
pub struct SingleSelect<T: Clone> {
    title: String,
    options: Vec<T>,
    cursor: usize,
}

impl<T: Clone> SingleSelect<T> {
    /// Build a selector; an empty option list is rejected up front.
    pub fn new(title: impl Into<String>, options: Vec<T>) -> Result<Self, WidgetError> {
        let title = title.into();
        if options.is_empty() {
            return Err(WidgetError::EmptyOptions(title));
        }
        Ok(Self {
            title,
            options,
            cursor: 0,
        })
    }

    /// Selector title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The option list.
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Advance the cursor, wrapping.
    pub fn move_down(&mut self) {
        self.cursor = (self.cursor + 1) % self.options.len();
    }

    /// Retreat the cursor, wrapping.
    pub fn move_up(&mut self) {
        self.cursor = (self.cursor + self.options.len() - 1) % self.options.len();
    }

    /// Copy of the option under the cursor.
    pub fn selected(&self) -> T {
        self.options[self.cursor].clone()
    }

    /// Interpret one key press.
    pub fn handle_key(&mut self, key: &KeyEvent) -> SelectAction<T> {
        if event::is_down(key) {
            self.move_down();
            SelectAction::Moved
        } else if event::is_up(key) {
            self.move_up();
            SelectAction::Moved
        } else if event::is_confirm(key) {
            SelectAction::Confirmed(self.selected())
        } else if event::is_quit(key) {
            SelectAction::Quit
        } else {
            SelectAction::Ignored
        }
    }
}

impl<T: Clone + Display> SingleSelect<T> {
    /// Render the title and option list with a cursor marker.
    pub fn view(&self) -> String {
        let mut out = format!("{}\n\n", style::bold(&self.title));
        for (idx, option) in self.options.iter().enumerate() {
            if idx == self.cursor {
                out.push_str(&style::cyan(&format!("> {option}")));
            } else {
                out.push_str(&format!("  {option}"));
            }
            out.push('\n');
        }
        out
    }
}
