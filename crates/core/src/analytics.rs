//! Fire-and-forget event tracking contract.

use std::fmt;

use tracing::info;

/// Session events emitted by the navigation runtime. Consumers must not
/// block; the runtime never waits on a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// The user navigated onto a screen.
    ScreenEntered {
        /// The screen's display name.
        name: String,
    },
    /// The wizard ran to completion.
    SetupCompleted,
    /// A transfer was interrupted by quit while in progress.
    TransferCancelled {
        /// Source URL of the interrupted transfer.
        source: String,
    },
    /// A transfer ended in failure.
    TransferFailed {
        /// Source URL of the failed transfer.
        source: String,
        /// Failure description.
        reason: String,
    },
}

/// Sink for wizard events, invoked fire-and-forget; no return value is
/// consumed.
pub trait EventSink: Send + Sync {
    /// Record one event.
    fn track(&self, event: WizardEvent);
}

/// Default sink that writes events to the tracing log.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn track(&self, event: WizardEvent) {
        match &event {
            WizardEvent::ScreenEntered { name } => {
                info!(target: "analytics", screen = %name, "screen entered");
            }
            WizardEvent::SetupCompleted => {
                info!(target: "analytics", "setup completed");
            }
            WizardEvent::TransferCancelled { source } => {
                info!(target: "analytics", source = %source, "transfer cancelled");
            }
            WizardEvent::TransferFailed { source, reason } => {
                info!(target: "analytics", source = %source, reason = %reason, "transfer failed");
            }
        }
    }
}

impl fmt::Display for WizardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardEvent::ScreenEntered { name } => write!(f, "screen-entered({name})"),
            WizardEvent::SetupCompleted => write!(f, "setup-completed"),
            WizardEvent::TransferCancelled { source } => write!(f, "transfer-cancelled({source})"),
            WizardEvent::TransferFailed { source, .. } => write!(f, "transfer-failed({source})"),
        }
    }
}
