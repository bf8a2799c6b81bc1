//! Terminal lifecycle and the single-threaded event loop.

use std::{
    io::{self, Write as _},
    mem,
    sync::Arc,
    thread,
    time::Duration,
};

use anyhow::{Context as _, Result};
use crossterm::{
    cursor::{Hide, MoveTo, MoveToNextLine, Show},
    event::{
        self as term_event, DisableMouseCapture, EnableMouseCapture, Event as TermEvent,
        KeyEventKind, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use stepwise_core::{
    analytics::{EventSink, WizardEvent},
    stack, Command, Context, Event, Outcome, Screen, Transition, UndoOutcome,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The running wizard session: one screen current at a time, events
/// processed strictly in arrival order.
pub struct App {
    current: Box<dyn Screen>,
    ctx: Option<Context>,
    sink: Arc<dyn EventSink>,
    tick_rate: Duration,
}

impl App {
    /// Build a session starting on `root` with the given context.
    pub fn new(
        root: Box<dyn Screen>,
        ctx: Context,
        sink: Arc<dyn EventSink>,
        tick_rate: Duration,
    ) -> Self {
        Self {
            current: root,
            ctx: Some(ctx),
            sink,
            tick_rate,
        }
    }

    /// Enter the terminal, run the loop until quit, restore the
    /// terminal even when the loop errors.
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enter raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)
            .context("failed to enter alternate screen")?;

        let result = self.event_loop(&mut stdout).await;
        restore_terminal(&mut stdout)?;
        result
    }

    async fn event_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let (event_tx, mut event_rx) = mpsc::channel::<Event>(128);
        spawn_input_thread(event_tx.clone(), self.tick_rate);

        let mut ctx = self.ctx.take().expect("context installed at construction");
        if let Ok((width, _)) = size() {
            ctx = ctx.with_window_width(width);
        }

        self.sink.track(WizardEvent::ScreenEntered {
            name: self.current.display_name().to_string(),
        });
        if let Some(cmd) = self.current.init(&ctx) {
            spawn_command(cmd, event_tx.clone());
        }

        loop {
            let view = self.current.view(&ctx);
            draw(stdout, &view)?;

            let Some(event) = event_rx.recv().await else {
                break;
            };

            if let Event::Resize(width, _) = event {
                ctx = ctx.with_window_width(width);
                continue;
            }

            let (next_ctx, handled) = ctx.toggle_tooltip(&event);
            ctx = next_ctx;
            if handled {
                continue;
            }

            let (next_ctx, undo) = stack::undo(ctx, &event, self.current.undoable());
            ctx = next_ctx;
            match undo {
                UndoOutcome::Restored(screen) => {
                    debug!(screen = screen.display_name(), "stepped back");
                    self.current = screen;
                    continue;
                }
                UndoOutcome::Empty => continue,
                UndoOutcome::NotHandled => {}
            }

            let Outcome {
                context,
                transition,
                command,
            } = self.current.update(ctx, &event);
            ctx = context;
            if let Some(cmd) = command {
                spawn_command(cmd, event_tx.clone());
            }

            match transition {
                Transition::Stay => {}
                Transition::Forward(next) => {
                    let previous = mem::replace(&mut self.current, next);
                    ctx = stack::push(ctx, previous);
                    self.sink.track(WizardEvent::ScreenEntered {
                        name: self.current.display_name().to_string(),
                    });
                    if let Some(cmd) = self.current.init(&ctx) {
                        spawn_command(cmd, event_tx.clone());
                    }
                }
                Transition::Quit => {
                    info!("session quit");
                    break;
                }
            }
        }

        Ok(())
    }
}

fn draw(stdout: &mut io::Stdout, view: &str) -> Result<()> {
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    for line in view.lines() {
        queue!(stdout, Print(line), MoveToNextLine(1))?;
    }
    stdout.flush().context("failed to flush terminal")
}

/// Forward terminal input to the loop channel, emitting a tick whenever
/// the poll window elapses without input.
fn spawn_input_thread(sender: mpsc::Sender<Event>, tick_rate: Duration) {
    thread::spawn(move || loop {
        match term_event::poll(tick_rate) {
            Ok(true) => match term_event::read() {
                Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    if sender.blocking_send(Event::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(TermEvent::Mouse(mouse))
                    if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) =>
                {
                    if sender.blocking_send(Event::Mouse(mouse)).is_err() {
                        break;
                    }
                }
                Ok(TermEvent::Resize(width, height)) => {
                    if sender.blocking_send(Event::Resize(width, height)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(Event::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

/// Run a command off the loop thread and inject its result back as an
/// event.
fn spawn_command(cmd: Command, sender: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let event = cmd.await;
        let _ = sender.send(event).await;
    });
}

fn restore_terminal(stdout: &mut io::Stdout) -> Result<()> {
    execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    disable_raw_mode().context("failed to disable raw mode")
}
