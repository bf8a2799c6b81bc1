//! The screen contract and the shared cursor-driven menu behavior.

use std::fmt;

use crossterm::event::KeyEvent;

use crate::{
    context::Context,
    error::WidgetError,
    event::{self, Command, Event},
    style,
};

/// Where the loop should go after a screen handled an event.
pub enum Transition {
    /// Remain on the current screen.
    Stay,
    /// Navigate forward; the loop pushes the outgoing screen and its
    /// cloned state onto the page stack.
    Forward(Box<dyn Screen>),
    /// Terminate the session.
    Quit,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Stay => write!(f, "Stay"),
            Transition::Forward(next) => write!(f, "Forward({})", next.display_name()),
            Transition::Quit => write!(f, "Quit"),
        }
    }
}

/// Result of one `update` call: the superseding context, the navigation
/// decision, and an optional async side effect.
pub struct Outcome {
    /// Context value that supersedes the one passed in.
    pub context: Context,
    /// Navigation decision.
    pub transition: Transition,
    /// Deferred side effect to spawn off the loop thread.
    pub command: Option<Command>,
}

impl Outcome {
    /// Stay on the current screen.
    pub fn stay(context: Context) -> Self {
        Self {
            context,
            transition: Transition::Stay,
            command: None,
        }
    }

    /// Navigate forward to `next`.
    pub fn forward(context: Context, next: Box<dyn Screen>) -> Self {
        Self {
            context,
            transition: Transition::Forward(next),
            command: None,
        }
    }

    /// Terminate the session.
    pub fn quit(context: Context) -> Self {
        Self {
            context,
            transition: Transition::Quit,
            command: None,
        }
    }

    /// Attach an async command to this outcome.
    pub fn with_command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }
}

/// One interactive step of the wizard.
///
/// Handlers must not block: anything slow is returned as a [`Command`]
/// and re-enters the loop as an event. `view` takes `&mut self` so
/// screens that hit-test rendered text can recompute positions during
/// the render pass.
pub trait Screen: Send {
    /// Called once when the screen becomes current. The default is a
    /// no-op.
    fn init(&mut self, ctx: &Context) -> Option<Command> {
        let _ = ctx;
        None
    }

    /// Handle one event and return the superseding context plus the
    /// navigation decision.
    fn update(&mut self, ctx: Context, event: &Event) -> Outcome;

    /// Render the screen to text.
    fn view(&mut self, ctx: &Context) -> String;

    /// Human-readable name, used in logs and analytics.
    fn display_name(&self) -> &str;

    /// Whether the step-back key may pop this screen. Screens
    /// supervising irreversible work return `false`, and the undo
    /// trigger falls through to their own handler.
    fn undoable(&self) -> bool {
        true
    }
}

/// Factory producing the next screen for a transition target.
pub type ScreenFactory = Box<dyn Fn(&Context) -> Box<dyn Screen> + Send>;

/// A labeled transition target on a menu screen.
pub struct Target {
    label: String,
    make: ScreenFactory,
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl Target {
    /// Create a target with the given label and screen factory.
    pub fn new(
        label: impl Into<String>,
        make: impl Fn(&Context) -> Box<dyn Screen> + Send + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            make: Box::new(make),
        }
    }

    /// The target's menu label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// What a [`BaseScreen`] did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseAction {
    /// Cursor moved.
    Moved,
    /// Current target confirmed; build it with
    /// [`BaseScreen::make_selected`].
    Confirmed,
    /// Quit requested.
    Quit,
    /// Key not recognized; the screen may handle it itself.
    Ignored,
}

/// Shared cursor-driven menu state embedded by menu-style screens: an
/// ordered list of transition targets and a wrapping cursor.
#[derive(Debug)]
pub struct BaseScreen {
    name: String,
    targets: Vec<Target>,
    cursor: usize,
}

impl BaseScreen {
    /// Build a menu over `targets`.
    ///
    /// An empty target list is rejected here so the cursor arithmetic
    /// can never divide by zero at first keypress.
    pub fn new(name: impl Into<String>, targets: Vec<Target>) -> Result<Self, WidgetError> {
        let name = name.into();
        if targets.is_empty() {
            return Err(WidgetError::EmptyTransitions(name));
        }
        Ok(Self {
            name,
            targets,
            cursor: 0,
        })
    }

    /// Screen name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of transition targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Always false; construction rejects empty target lists.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Advance the cursor, wrapping past the last target.
    pub fn move_down(&mut self) {
        self.cursor = (self.cursor + 1) % self.targets.len();
    }

    /// Retreat the cursor, wrapping past the first target.
    pub fn move_up(&mut self) {
        self.cursor = (self.cursor + self.targets.len() - 1) % self.targets.len();
    }

    /// Interpret one key press against the menu bindings.
    pub fn handle_key(&mut self, key: &KeyEvent) -> BaseAction {
        if event::is_down(key) {
            self.move_down();
            BaseAction::Moved
        } else if event::is_up(key) {
            self.move_up();
            BaseAction::Moved
        } else if event::is_confirm(key) {
            BaseAction::Confirmed
        } else if event::is_quit(key) {
            BaseAction::Quit
        } else {
            BaseAction::Ignored
        }
    }

    /// Build the screen for the target under the cursor.
    pub fn make_selected(&self, ctx: &Context) -> Box<dyn Screen> {
        (self.targets[self.cursor].make)(ctx)
    }

    /// Render the target list with a cursor marker.
    pub fn view_list(&self) -> String {
        let mut out = String::new();
        for (idx, target) in self.targets.iter().enumerate() {
            if idx == self.cursor {
                out.push_str(&style::cyan(&format!("> {}", target.label)));
            } else {
                out.push_str(&format!("  {}", target.label));
            }
            out.push('\n');
        }
        out
    }
}
