//! Loop events, async commands, and the shared key bindings.

use std::{future::Future, pin::Pin};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

/// One unit of input processed by the event loop. Events are handled
/// strictly in arrival order, one at a time.
#[derive(Debug)]
pub enum Event {
    /// A key press forwarded from the terminal.
    Key(KeyEvent),
    /// A mouse click forwarded from the terminal.
    Mouse(MouseEvent),
    /// The fixed-rate render tick (100ms by default).
    Tick,
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// One-shot completion message from an async transfer command.
    TransferComplete(Result<(), String>),
}

/// A deferred side effect. Commands run off the loop thread and deliver
/// their result as a new [`Event`] injected back into the loop; screen
/// handlers themselves never block.
pub type Command = Pin<Box<dyn Future<Output = Event> + Send + 'static>>;

/// Box a future as a [`Command`].
pub fn command(fut: impl Future<Output = Event> + Send + 'static) -> Command {
    Box::pin(fut)
}

/// Quit: `q` or Ctrl+C.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Step back (undo): Ctrl+Z, the single undo trigger.
pub fn is_undo(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('z') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Tooltip toggle: Ctrl+T.
pub fn is_tooltip_toggle(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('t') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Cursor up.
pub fn is_up(key: &KeyEvent) -> bool {
    key.code == KeyCode::Up
}

/// Cursor down.
pub fn is_down(key: &KeyEvent) -> bool {
    key.code == KeyCode::Down
}

/// Confirm the current selection.
pub fn is_confirm(key: &KeyEvent) -> bool {
    key.code == KeyCode::Enter
}

/// Toggle the current checkbox row.
pub fn is_toggle(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char(' ')
}
