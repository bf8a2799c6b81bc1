//! The page stack: undo history over forward navigation.
//!
//! Each entry snapshots the screen the user left together with an
//! independent clone of the session state at that moment. Push appends,
//! pop removes from the end, and popping an empty stack signals
//! "nothing to undo" rather than failing.

use std::{fmt, sync::Arc};

use tracing::debug;

use crate::{
    context::Context,
    event::{self, Event},
    screen::Screen,
    state::CloneableState,
};

/// One archived (screen, cloned state) pair.
pub struct PageEntry {
    /// The screen the user navigated away from.
    pub screen: Box<dyn Screen>,
    /// Independent snapshot of the session state at push time.
    pub state: Arc<dyn CloneableState>,
}

impl fmt::Debug for PageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEntry")
            .field("screen", &self.screen.display_name())
            .field("state", &self.state)
            .finish()
    }
}

/// Archive `screen` with a clone of the current state as the new top of
/// the page stack, returning the superseding context.
pub fn push(ctx: Context, screen: Box<dyn Screen>) -> Context {
    let snapshot = ctx.state.clone_state();
    debug!(screen = screen.display_name(), depth = ctx.page_stack.len() + 1, "page pushed");

    // Exhaustive destructure: adding a context field without deciding
    // its push behavior becomes a compile error.
    let Context {
        state,
        mut page_stack,
        tooltip_visible,
        window_width,
        paths,
    } = ctx;
    page_stack.push(PageEntry {
        screen,
        state: snapshot,
    });
    Context {
        state,
        page_stack,
        tooltip_visible,
        window_width,
        paths,
    }
}

/// Remove and return the top entry, or `None` when the stack is empty
/// (context returned unchanged).
pub fn pop(ctx: Context) -> (Context, Option<PageEntry>) {
    let Context {
        state,
        mut page_stack,
        tooltip_visible,
        window_width,
        paths,
    } = ctx;
    let entry = page_stack.pop();
    (
        Context {
            state,
            page_stack,
            tooltip_visible,
            window_width,
            paths,
        },
        entry,
    )
}

/// Result of offering an event to the undo engine.
pub enum UndoOutcome {
    /// The top entry was popped; its screen becomes current and its
    /// state snapshot is already installed in the returned context.
    Restored(Box<dyn Screen>),
    /// The trigger fired but the stack was empty: nothing to undo, the
    /// event is consumed.
    Empty,
    /// Not the undo trigger, or the active screen is non-undoable; the
    /// event falls through to the screen's own handler.
    NotHandled,
}

impl fmt::Debug for UndoOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoOutcome::Restored(screen) => write!(f, "Restored({})", screen.display_name()),
            UndoOutcome::Empty => write!(f, "Empty"),
            UndoOutcome::NotHandled => write!(f, "NotHandled"),
        }
    }
}

/// Step-back handling: recognizes exactly the undo key combination.
///
/// `screen_undoable` comes from the active screen's
/// [`Screen::undoable`] flag; when false the trigger is ignored here.
/// On restore, tooltip visibility is carried over from the pre-undo
/// context so undo does not silently reset unrelated UI flags.
pub fn undo(ctx: Context, event: &Event, screen_undoable: bool) -> (Context, UndoOutcome) {
    let triggered = matches!(event, Event::Key(key) if event::is_undo(key));
    if !triggered || !screen_undoable {
        return (ctx, UndoOutcome::NotHandled);
    }

    let (ctx, entry) = pop(ctx);
    match entry {
        None => {
            debug!("undo on empty page stack ignored");
            (ctx, UndoOutcome::Empty)
        }
        Some(PageEntry { screen, state }) => {
            debug!(screen = screen.display_name(), depth = ctx.page_stack.len(), "page restored");
            let restored = Context {
                state,
                tooltip_visible: ctx.tooltip_visible,
                ..ctx
            };
            (restored, UndoOutcome::Restored(screen))
        }
    }
}
