//! The immutable session context threaded through every event handler.
//!
//! The recognized key set is the field list of [`Context`]: a closed,
//! compile-time-checked set, so clone-then-patch can never silently
//! drop a key. Setters consume the context and return a new value that
//! must fully supersede the old one in the caller's scope; nothing is
//! mutated in place.

use std::{path::PathBuf, sync::Arc};

use crate::{
    event::{self, Event},
    stack::PageEntry,
    state::CloneableState,
};

/// Domain path settings established once during session setup.
///
/// Unlike the other context keys these have no safe default: reading
/// them before initialization aborts, because every downstream consumer
/// would otherwise write to the wrong location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePaths {
    /// Root directory of the wizard's managed installation.
    pub home_dir: PathBuf,
    /// Directory for downloaded artifacts and logs.
    pub data_dir: PathBuf,
}

/// Session-wide values carried through the event loop.
#[derive(Debug)]
pub struct Context {
    pub(crate) state: Arc<dyn CloneableState>,
    pub(crate) page_stack: Vec<PageEntry>,
    pub(crate) tooltip_visible: bool,
    pub(crate) window_width: u16,
    pub(crate) paths: Option<HomePaths>,
}

/// Build a fresh context around the wizard's initial state, with the
/// documented defaults: empty page stack, tooltip hidden, width 0,
/// paths unset.
pub fn initialize_session<S: CloneableState>(initial_state: S) -> Context {
    Context {
        state: Arc::new(initial_state),
        page_stack: Vec::new(),
        tooltip_visible: false,
        window_width: 0,
        paths: None,
    }
}

impl Context {
    /// Typed view of the current state.
    ///
    /// # Panics
    ///
    /// Panics when the stored state is not a `T`. That means a screen
    /// in the navigation graph stored the wrong state type, which is a
    /// wiring bug; continuing would leave the session inconsistent.
    pub fn current_state<T: CloneableState>(&self) -> &T {
        self.state.as_any().downcast_ref::<T>().unwrap_or_else(|| {
            panic!(
                "session state is not a {} (found {:?}); a screen stored the wrong state type",
                std::any::type_name::<T>(),
                self.state
            )
        })
    }

    /// Replace the current state, returning the superseding context.
    pub fn with_state<T: CloneableState>(self, state: T) -> Context {
        Context {
            state: Arc::new(state),
            ..self
        }
    }

    /// Whether the tooltip overlay is currently visible. Defaults to
    /// hidden until toggled.
    pub fn tooltip_visible(&self) -> bool {
        self.tooltip_visible
    }

    /// Flip tooltip visibility if `event` is the tooltip toggle key.
    /// Returns the (possibly unchanged) context and whether the event
    /// was consumed.
    pub fn toggle_tooltip(self, event: &Event) -> (Context, bool) {
        match event {
            Event::Key(key) if event::is_tooltip_toggle(key) => {
                let tooltip_visible = !self.tooltip_visible;
                (
                    Context {
                        tooltip_visible,
                        ..self
                    },
                    true,
                )
            }
            _ => (self, false),
        }
    }

    /// Last observed terminal width in columns; 0 until the first
    /// resize or startup size query.
    pub fn window_width(&self) -> u16 {
        self.window_width
    }

    /// Record a new terminal width.
    pub fn with_window_width(self, window_width: u16) -> Context {
        Context {
            window_width,
            ..self
        }
    }

    /// Install the domain path settings.
    pub fn with_home_paths(self, paths: HomePaths) -> Context {
        Context {
            paths: Some(paths),
            ..self
        }
    }

    /// Domain path settings.
    ///
    /// # Panics
    ///
    /// Panics when read before [`Context::with_home_paths`]; callers
    /// must guarantee initialization order during session setup.
    pub fn home_paths(&self) -> &HomePaths {
        self.paths
            .as_ref()
            .expect("home paths read before initialization; call with_home_paths during setup")
    }

    /// Number of entries on the page stack (undo depth).
    pub fn page_depth(&self) -> usize {
        self.page_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::test_keys::{ctrl, key};
    use crossterm::event::KeyCode;

    #[derive(Debug, Clone, PartialEq)]
    struct WizardState {
        network: Option<String>,
    }

    fn fresh() -> Context {
        initialize_session(WizardState { network: None })
    }

    #[test]
    fn defaults_are_documented_values() {
        let ctx = fresh();
        assert!(!ctx.tooltip_visible());
        assert_eq!(ctx.window_width(), 0);
        assert_eq!(ctx.page_depth(), 0);
    }

    #[test]
    fn typed_accessor_round_trips() {
        let ctx = fresh();
        let ctx = ctx.with_state(WizardState {
            network: Some("mainnet".to_string()),
        });
        assert_eq!(
            ctx.current_state::<WizardState>().network.as_deref(),
            Some("mainnet")
        );
    }

    #[test]
    #[should_panic(expected = "wrong state type")]
    fn wrong_typed_lookup_is_fatal() {
        let ctx = fresh();
        let _ = ctx.current_state::<String>();
    }

    #[test]
    #[should_panic(expected = "before initialization")]
    fn paths_read_before_set_is_fatal() {
        let ctx = fresh();
        let _ = ctx.home_paths();
    }

    #[test]
    fn tooltip_toggle_consumes_only_its_key() {
        let ctx = fresh();
        let (ctx, handled) = ctx.toggle_tooltip(&ctrl('t'));
        assert!(handled);
        assert!(ctx.tooltip_visible());

        let (ctx, handled) = ctx.toggle_tooltip(&key(KeyCode::Enter));
        assert!(!handled);
        assert!(ctx.tooltip_visible());

        let (ctx, handled) = ctx.toggle_tooltip(&ctrl('t'));
        assert!(handled);
        assert!(!ctx.tooltip_visible());
    }

    #[test]
    fn setters_preserve_unrelated_keys() {
        let ctx = fresh().with_home_paths(HomePaths {
            home_dir: PathBuf::from("/tmp/wiz"),
            data_dir: PathBuf::from("/tmp/wiz/data"),
        });
        let (ctx, _) = ctx.toggle_tooltip(&ctrl('t'));
        let ctx = ctx.with_window_width(120);

        assert!(ctx.tooltip_visible());
        assert_eq!(ctx.window_width(), 120);
        assert_eq!(ctx.home_paths().home_dir, PathBuf::from("/tmp/wiz"));
    }
}
