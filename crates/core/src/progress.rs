//! The progress/download screen: supervises one long-running transfer
//! and renders live progress.

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use tracing::{error, info};

use crate::{
    analytics::{EventSink, WizardEvent},
    context::Context,
    event::{self, command, Command, Event},
    screen::{Outcome, Screen, ScreenFactory},
    style,
    transfer,
};

/// Lifecycle of the supervised transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Screen constructed, transfer not yet dispatched.
    NotStarted,
    /// Transfer running in the background.
    InProgress,
    /// Transfer finished successfully.
    Completed,
    /// Transfer failed with the given reason; the session keeps running
    /// and the failure is rendered to the user.
    Failed(String),
}

/// Screen that downloads an artifact while showing a progress bar.
///
/// The background operation writes the shared byte counters; this
/// screen samples them only on the render tick, independent of the
/// transfer's own reporting cadence. Completion or failure arrives as a
/// one-shot [`Event::TransferComplete`] message, never by polling a
/// flag against the tick.
pub struct ProgressScreen {
    name: String,
    source: String,
    dest: PathBuf,
    current: Arc<AtomicU64>,
    total: Arc<AtomicU64>,
    phase: Phase,
    sampled_current: u64,
    sampled_total: u64,
    sink: Arc<dyn EventSink>,
    next: Option<ScreenFactory>,
}

impl ProgressScreen {
    /// Build a download screen for `source` → `dest`.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        dest: impl Into<PathBuf>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            dest: dest.into(),
            current: Arc::new(AtomicU64::new(0)),
            total: Arc::new(AtomicU64::new(0)),
            phase: Phase::NotStarted,
            sampled_current: 0,
            sampled_total: 0,
            sink,
            next: None,
        }
    }

    /// Screen to navigate to when the user confirms after completion.
    pub fn with_next(
        mut self,
        make: impl Fn(&Context) -> Box<dyn Screen> + Send + 'static,
    ) -> Self {
        self.next = Some(Box::new(make));
        self
    }

    /// Current phase of the transfer.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Shared byte counters (current, total); exposed for callers that
    /// feed them from a different transfer implementation.
    pub fn counters(&self) -> (Arc<AtomicU64>, Arc<AtomicU64>) {
        (Arc::clone(&self.current), Arc::clone(&self.total))
    }
}

impl Screen for ProgressScreen {
    fn init(&mut self, _ctx: &Context) -> Option<Command> {
        self.phase = Phase::InProgress;
        info!(source = %self.source, dest = %self.dest.display(), "starting transfer");

        let source = self.source.clone();
        let dest = self.dest.clone();
        let current = Arc::clone(&self.current);
        let total = Arc::clone(&self.total);
        Some(command(async move {
            let result = transfer::download_file(source, dest, current, total).await;
            Event::TransferComplete(result.map_err(|err| format!("{err:#}")))
        }))
    }

    fn update(&mut self, ctx: Context, event: &Event) -> Outcome {
        match event {
            Event::Tick => {
                self.sampled_current = self.current.load(Ordering::Relaxed);
                self.sampled_total = self.total.load(Ordering::Relaxed);
                Outcome::stay(ctx)
            }
            Event::TransferComplete(Ok(())) => {
                self.sampled_current = self.current.load(Ordering::Relaxed);
                self.sampled_total = self.total.load(Ordering::Relaxed);
                self.phase = Phase::Completed;
                Outcome::stay(ctx)
            }
            Event::TransferComplete(Err(reason)) => {
                error!(source = %self.source, reason = %reason, "transfer failed");
                self.sink.track(WizardEvent::TransferFailed {
                    source: self.source.clone(),
                    reason: reason.clone(),
                });
                self.phase = Phase::Failed(reason.clone());
                Outcome::stay(ctx)
            }
            Event::Key(key) if event::is_quit(key) => {
                if self.phase == Phase::InProgress {
                    // Cancellation notice goes out before the quit
                    // propagates.
                    self.sink.track(WizardEvent::TransferCancelled {
                        source: self.source.clone(),
                    });
                }
                Outcome::quit(ctx)
            }
            Event::Key(key) if event::is_confirm(key) && self.phase == Phase::Completed => {
                match &self.next {
                    Some(make) => {
                        let next = make(&ctx);
                        Outcome::forward(ctx, next)
                    }
                    None => Outcome::stay(ctx),
                }
            }
            _ => Outcome::stay(ctx),
        }
    }

    fn view(&mut self, _ctx: &Context) -> String {
        match &self.phase {
            Phase::NotStarted => format!("{}\n\n  waiting to start...\n", style::bold(&self.name)),
            Phase::InProgress => format!(
                "{}\n\n  {}\n\n  {}\n",
                style::bold(&self.name),
                render_bar(self.sampled_current, self.sampled_total, 40),
                style::dim("q to cancel"),
            ),
            Phase::Completed => format!(
                "{}\n\n  {}\n\n  {}\n",
                style::bold(&self.name),
                style::green(&format!("done ({} bytes)", self.sampled_current)),
                style::dim("enter to continue"),
            ),
            Phase::Failed(reason) => format!(
                "{}\n\n  {}\n\n  {}\n",
                style::bold(&self.name),
                style::red(&format!("failed: {reason}")),
                style::dim("q to exit"),
            ),
        }
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    // Stepping back into a live transfer would orphan it; the undo
    // trigger falls through to this screen and is ignored.
    fn undoable(&self) -> bool {
        false
    }
}

/// Render a fixed-width progress bar for `current` of `total` bytes.
/// With an unknown total the bar degrades to a byte count.
pub fn render_bar(current: u64, total: u64, width: usize) -> String {
    if total == 0 {
        return format!("{current} bytes");
    }
    let clamped = current.min(total);
    let filled = ((clamped as u128 * width as u128) / total as u128) as usize;
    let percent = (clamped as u128 * 100 / total as u128) as u64;
    format!(
        "{}{} {percent:>3}%  {clamped}/{total}",
        "█".repeat(filled),
        "░".repeat(width - filled),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::initialize_session;
    use crate::event::test_keys::key;
    use crossterm::event::KeyCode;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct NullState;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<WizardEvent>>,
    }

    impl EventSink for RecordingSink {
        fn track(&self, event: WizardEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn screen_with_sink() -> (ProgressScreen, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let screen = ProgressScreen::new(
            "Download artifact",
            "https://example.com/artifact.tar.gz",
            "/tmp/stepwise-test/artifact.tar.gz",
            Arc::clone(&sink) as Arc<dyn EventSink>,
        );
        (screen, sink)
    }

    #[test]
    fn init_moves_not_started_to_in_progress() {
        let ctx = initialize_session(NullState);
        let (mut screen, _sink) = screen_with_sink();
        assert_eq!(screen.phase(), &Phase::NotStarted);
        // The returned command is the transfer itself; dropping it
        // without spawning leaves the screen in-progress, which is all
        // this test needs.
        let _cmd = screen.init(&ctx);
        assert_eq!(screen.phase(), &Phase::InProgress);
    }

    #[test]
    fn tick_samples_shared_counters() {
        let ctx = initialize_session(NullState);
        let (mut screen, _sink) = screen_with_sink();
        let _cmd = screen.init(&ctx);

        let (current, total) = screen.counters();
        total.store(1000, Ordering::Relaxed);
        current.store(250, Ordering::Relaxed);

        let outcome = screen.update(ctx, &Event::Tick);
        assert!(matches!(outcome.transition, crate::screen::Transition::Stay));
        let view = screen.view(&outcome.context);
        assert!(view.contains("25%"), "view was: {view}");
    }

    #[test]
    fn completion_message_ends_in_completed() {
        let ctx = initialize_session(NullState);
        let (mut screen, sink) = screen_with_sink();
        let _cmd = screen.init(&ctx);

        let outcome = screen.update(ctx, &Event::TransferComplete(Ok(())));
        assert_eq!(screen.phase(), &Phase::Completed);
        assert!(matches!(outcome.transition, crate::screen::Transition::Stay));
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[test]
    fn failure_message_tracks_and_renders() {
        let ctx = initialize_session(NullState);
        let (mut screen, sink) = screen_with_sink();
        let _cmd = screen.init(&ctx);

        let outcome = screen.update(
            ctx,
            &Event::TransferComplete(Err("connection reset".to_string())),
        );
        assert_eq!(screen.phase(), &Phase::Failed("connection reset".to_string()));
        assert!(matches!(outcome.transition, crate::screen::Transition::Stay));

        let view = screen.view(&outcome.context);
        assert!(view.contains("connection reset"));
        assert!(matches!(
            sink.events.lock().unwrap().as_slice(),
            [WizardEvent::TransferFailed { .. }]
        ));
    }

    #[test]
    fn quit_during_transfer_emits_cancellation_then_quits() {
        let ctx = initialize_session(NullState);
        let (mut screen, sink) = screen_with_sink();
        let _cmd = screen.init(&ctx);

        let outcome = screen.update(ctx, &key(KeyCode::Char('q')));
        assert!(matches!(outcome.transition, crate::screen::Transition::Quit));
        assert!(matches!(
            sink.events.lock().unwrap().as_slice(),
            [WizardEvent::TransferCancelled { source }] if source.contains("example.com")
        ));
    }

    #[test]
    fn quit_after_completion_does_not_emit_cancellation() {
        let ctx = initialize_session(NullState);
        let (mut screen, sink) = screen_with_sink();
        let _cmd = screen.init(&ctx);
        let outcome = screen.update(ctx, &Event::TransferComplete(Ok(())));

        let outcome = screen.update(outcome.context, &key(KeyCode::Char('q')));
        assert!(matches!(outcome.transition, crate::screen::Transition::Quit));
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[test]
    fn confirm_after_completion_moves_forward_when_wired() {
        struct Done;
        impl Screen for Done {
            fn update(&mut self, ctx: Context, _event: &Event) -> Outcome {
                Outcome::stay(ctx)
            }
            fn view(&mut self, _ctx: &Context) -> String {
                String::new()
            }
            fn display_name(&self) -> &str {
                "Done"
            }
        }

        let ctx = initialize_session(NullState);
        let (screen, _sink) = screen_with_sink();
        let mut screen = screen.with_next(|_ctx| Box::new(Done));
        let _cmd = screen.init(&ctx);
        let outcome = screen.update(ctx, &Event::TransferComplete(Ok(())));

        let outcome = screen.update(outcome.context, &key(KeyCode::Enter));
        match outcome.transition {
            crate::screen::Transition::Forward(next) => assert_eq!(next.display_name(), "Done"),
            other => panic!("expected forward, got {other:?}"),
        }
    }

    #[test]
    fn screen_is_not_undoable() {
        let (screen, _sink) = screen_with_sink();
        assert!(!screen.undoable());
    }

    #[test]
    fn bar_rendering_bounds() {
        assert_eq!(render_bar(0, 0, 10), "0 bytes");
        let full = render_bar(100, 100, 10);
        assert!(full.contains("100%"));
        assert!(full.starts_with(&"█".repeat(10)));
        let empty = render_bar(0, 100, 10);
        assert!(empty.contains("  0%"));
        assert!(empty.starts_with(&"░".repeat(10)));
    }
}
