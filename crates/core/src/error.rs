//! Error types for wizard wiring and render tracking.
//!
//! Construction-time errors surface misconfigured screens before the
//! first keypress; tracking errors surface clickable text that
//! disappeared from the rendered output. Both indicate bugs in wizard
//! wiring and are treated as fatal by callers.

use thiserror::Error;

/// Errors raised while constructing a screen or widget.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// A menu screen was built with no transition targets, which would
    /// make cursor arithmetic divide by zero on the first keypress.
    #[error("screen {0:?} has no transition targets")]
    EmptyTransitions(String),
    /// A selector was built with no options to select.
    #[error("selector {0:?} has no options")]
    EmptyOptions(String),
}

/// Errors raised by post-render clickable position tracking.
#[derive(Debug, Error)]
pub enum TrackError {
    /// The item's current display text could not be located in the
    /// rendered output, so its coordinates would be stale.
    #[error("clickable text {text:?} not found in rendered output")]
    TextNotFound {
        /// The display text that failed to match.
        text: String,
    },
}
