#![warn(clippy::all, missing_docs)]

//! Navigation runtime for multi-step terminal configuration wizards.
//!
//! This crate hosts the session context, the page-stack undo engine,
//! the screen contract, the interactive widgets (single- and
//! multi-select, clickable regions, tooltips), and the progress screen
//! that supervises background transfers. The terminal event loop lives
//! in the companion `stepwise-tui` crate.

pub mod analytics;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod progress;
pub mod screen;
pub mod stack;
pub mod state;
pub mod style;
pub mod transfer;
pub mod widget;

pub use analytics::{EventSink, TracingSink, WizardEvent};
pub use config::AppConfig;
pub use context::{initialize_session, Context, HomePaths};
pub use error::{TrackError, WidgetError};
pub use event::{command, Command, Event};
pub use progress::{Phase, ProgressScreen};
pub use screen::{BaseAction, BaseScreen, Outcome, Screen, ScreenFactory, Target, Transition};
pub use stack::{pop, push, undo, PageEntry, UndoOutcome};
pub use state::CloneableState;
pub use widget::{Bounds, ClickableTracker, MultiAction, MultiSelect, SelectAction, SingleSelect, Tooltip};
