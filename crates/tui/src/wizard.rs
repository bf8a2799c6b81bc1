//! The node-setup wizard screens wired onto the navigation runtime.

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEventKind};
use stepwise_core::{
    analytics::{EventSink, WizardEvent},
    style, BaseAction, BaseScreen, ClickableTracker, Command, Context, Event, MultiAction,
    MultiSelect, Outcome, ProgressScreen, Screen, SelectAction, SingleSelect, Target, Tooltip,
};

const HELP_LINE: &str = "↑/↓ move · enter confirm · ctrl+z back · ctrl+t help · q quit";

/// Everything the wizard collects across its steps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupState {
    /// Chain network chosen on the network step.
    pub network: Option<String>,
    /// Components chosen on the component step.
    pub components: Vec<String>,
    /// Whether telemetry reporting was enabled.
    pub telemetry: bool,
    /// Whether the node starts at boot.
    pub autostart: bool,
}

fn footer() -> String {
    format!("\n{}\n", style::dim(HELP_LINE))
}

fn tooltip_block(ctx: &Context, tooltip: &Tooltip) -> String {
    if ctx.tooltip_visible() {
        format!("\n{}\n", tooltip.render(ctx.window_width()))
    } else {
        String::new()
    }
}

/// Entry menu of the wizard.
pub struct HomeScreen {
    base: BaseScreen,
}

impl HomeScreen {
    /// Build the home menu and its forward wiring.
    pub fn new(sink: Arc<dyn EventSink>, artifact_url: String) -> Result<Self> {
        let begin_sink = Arc::clone(&sink);
        let begin_url = artifact_url.clone();
        let targets = vec![
            Target::new("Set up a node", move |_ctx| {
                Box::new(NetworkScreen::new(
                    Arc::clone(&begin_sink),
                    begin_url.clone(),
                )) as Box<dyn Screen>
            }),
            Target::new("About this wizard", |_ctx| {
                Box::new(AboutScreen) as Box<dyn Screen>
            }),
        ];
        Ok(Self {
            base: BaseScreen::new("Home", targets)?,
        })
    }
}

impl Screen for HomeScreen {
    fn update(&mut self, ctx: Context, event: &Event) -> Outcome {
        match event {
            Event::Key(key) => match self.base.handle_key(key) {
                BaseAction::Confirmed => {
                    let next = self.base.make_selected(&ctx);
                    Outcome::forward(ctx, next)
                }
                BaseAction::Quit => Outcome::quit(ctx),
                _ => Outcome::stay(ctx),
            },
            _ => Outcome::stay(ctx),
        }
    }

    fn view(&mut self, _ctx: &Context) -> String {
        format!(
            "{}\n\n{}{}",
            style::bold("Stepwise node setup"),
            self.base.view_list(),
            footer()
        )
    }

    fn display_name(&self) -> &str {
        self.base.name()
    }
}

/// Static information screen reachable from home.
pub struct AboutScreen;

impl Screen for AboutScreen {
    fn update(&mut self, ctx: Context, event: &Event) -> Outcome {
        match event {
            Event::Key(key) if stepwise_core::event::is_quit(key) => Outcome::quit(ctx),
            _ => Outcome::stay(ctx),
        }
    }

    fn view(&mut self, _ctx: &Context) -> String {
        format!(
            "{}\n\nStepwise walks a node operator through network selection,\ncomponent choice, and artifact download.\n\n{}\n",
            style::bold("About"),
            style::dim("ctrl+z back · q quit")
        )
    }

    fn display_name(&self) -> &str {
        "About"
    }
}

/// Network single-select step.
pub struct NetworkScreen {
    select: SingleSelect<String>,
    tooltip: Tooltip,
    sink: Arc<dyn EventSink>,
    artifact_url: String,
}

impl NetworkScreen {
    fn new(sink: Arc<dyn EventSink>, artifact_url: String) -> Self {
        let select = SingleSelect::new(
            "Which network should this node join?",
            vec![
                "mainnet".to_string(),
                "testnet".to_string(),
                "localnet".to_string(),
            ],
        )
        .expect("network options are hard-coded and non-empty");
        let tooltip = Tooltip::new(
            "Networks",
            "mainnet is the production chain; testnet mirrors it for rehearsal; localnet runs a single-node chain on this machine.",
        )
        .with_bold("mainnet")
        .with_warning("Switching networks later wipes local chain data.");
        Self {
            select,
            tooltip,
            sink,
            artifact_url,
        }
    }
}

impl Screen for NetworkScreen {
    fn update(&mut self, ctx: Context, event: &Event) -> Outcome {
        match event {
            Event::Key(key) => match self.select.handle_key(key) {
                SelectAction::Confirmed(network) => {
                    let mut state = ctx.current_state::<SetupState>().clone();
                    state.network = Some(network);
                    let ctx = ctx.with_state(state);
                    let next = Box::new(ComponentScreen::new(
                        Arc::clone(&self.sink),
                        self.artifact_url.clone(),
                    ));
                    Outcome::forward(ctx, next)
                }
                SelectAction::Quit => Outcome::quit(ctx),
                _ => Outcome::stay(ctx),
            },
            _ => Outcome::stay(ctx),
        }
    }

    fn view(&mut self, ctx: &Context) -> String {
        format!(
            "{}{}{}",
            self.select.view(),
            tooltip_block(ctx, &self.tooltip),
            footer()
        )
    }

    fn display_name(&self) -> &str {
        "Select network"
    }
}

/// Component multi-select step with a select-all row.
pub struct ComponentScreen {
    multi: MultiSelect,
    tooltip: Tooltip,
    sink: Arc<dyn EventSink>,
    artifact_url: String,
}

impl ComponentScreen {
    fn new(sink: Arc<dyn EventSink>, artifact_url: String) -> Self {
        let multi = MultiSelect::with_select_all(
            "Which components should be installed?",
            "All components",
            vec![
                "node daemon".to_string(),
                "relayer".to_string(),
                "price oracle".to_string(),
            ],
        )
        .expect("component options are hard-coded and non-empty");
        let tooltip = Tooltip::new(
            "Components",
            "The node daemon is required for every role. The relayer forwards packets between chains; the price oracle submits market data.",
        )
        .with_bold("node daemon");
        Self {
            multi,
            tooltip,
            sink,
            artifact_url,
        }
    }
}

impl Screen for ComponentScreen {
    fn update(&mut self, ctx: Context, event: &Event) -> Outcome {
        match event {
            Event::Key(key) => match self.multi.handle_key(key) {
                MultiAction::Confirmed => {
                    let mut state = ctx.current_state::<SetupState>().clone();
                    state.components = self.multi.checked_labels();
                    let ctx = ctx.with_state(state);
                    let next = Box::new(FeatureScreen::new(
                        Arc::clone(&self.sink),
                        self.artifact_url.clone(),
                    ));
                    Outcome::forward(ctx, next)
                }
                MultiAction::Quit => Outcome::quit(ctx),
                _ => Outcome::stay(ctx),
            },
            _ => Outcome::stay(ctx),
        }
    }

    fn view(&mut self, ctx: &Context) -> String {
        format!(
            "{}{}\n{}{}",
            self.multi.view(),
            style::dim("space toggles · the top row selects everything"),
            tooltip_block(ctx, &self.tooltip),
            footer()
        )
    }

    fn display_name(&self) -> &str {
        "Select components"
    }
}

/// Clickable feature toggles, driven by mouse hit testing.
pub struct FeatureScreen {
    tracker: ClickableTracker,
    telemetry_id: usize,
    autostart_id: usize,
    sink: Arc<dyn EventSink>,
    artifact_url: String,
}

impl FeatureScreen {
    fn new(sink: Arc<dyn EventSink>, artifact_url: String) -> Self {
        let mut tracker = ClickableTracker::new();
        let telemetry_id = tracker.register("[ ] Report telemetry", "[x] Report telemetry");
        let autostart_id = tracker.register("[ ] Start node at boot", "[x] Start node at boot");
        Self {
            tracker,
            telemetry_id,
            autostart_id,
            sink,
            artifact_url,
        }
    }
}

impl Screen for FeatureScreen {
    fn init(&mut self, ctx: &Context) -> Option<Command> {
        let state = ctx.current_state::<SetupState>();
        self.tracker.set_activated(self.telemetry_id, state.telemetry);
        self.tracker.set_activated(self.autostart_id, state.autostart);
        None
    }

    fn update(&mut self, ctx: Context, event: &Event) -> Outcome {
        match event {
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                if self.tracker.click(mouse.column, mouse.row).is_some() {
                    let mut state = ctx.current_state::<SetupState>().clone();
                    state.telemetry = self.tracker.is_activated(self.telemetry_id);
                    state.autostart = self.tracker.is_activated(self.autostart_id);
                    return Outcome::stay(ctx.with_state(state));
                }
                Outcome::stay(ctx)
            }
            Event::Key(key) if stepwise_core::event::is_confirm(key) => {
                let sink = Arc::clone(&self.sink);
                let dest = ctx.home_paths().data_dir.join("artifact.tar.gz");
                let next = Box::new(
                    ProgressScreen::new(
                        "Download artifact",
                        self.artifact_url.clone(),
                        dest,
                        Arc::clone(&self.sink),
                    )
                    .with_next(move |_ctx| Box::new(DoneScreen::new(Arc::clone(&sink)))),
                );
                Outcome::forward(ctx, next)
            }
            Event::Key(key) if stepwise_core::event::is_quit(key) => Outcome::quit(ctx),
            _ => Outcome::stay(ctx),
        }
    }

    fn view(&mut self, _ctx: &Context) -> String {
        let body = format!(
            "{}\n\n  {}\n  {}\n\n{}\n{}",
            style::bold("Optional features"),
            self.tracker.display_text(self.telemetry_id),
            self.tracker.display_text(self.autostart_id),
            style::dim("click a checkbox to toggle it · enter starts the download"),
            footer()
        );
        // Recompute click targets for this render pass. Losing a
        // registered label here is a wiring bug, not a runtime state.
        self.tracker
            .locate(&body)
            .unwrap_or_else(|err| panic!("feature screen render lost a click target: {err}"));
        body
    }

    fn display_name(&self) -> &str {
        "Optional features"
    }
}

/// Final summary screen.
pub struct DoneScreen {
    sink: Arc<dyn EventSink>,
}

impl DoneScreen {
    fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }
}

impl Screen for DoneScreen {
    fn init(&mut self, _ctx: &Context) -> Option<Command> {
        self.sink.track(WizardEvent::SetupCompleted);
        None
    }

    fn update(&mut self, ctx: Context, event: &Event) -> Outcome {
        match event {
            Event::Key(key)
                if stepwise_core::event::is_quit(key) || stepwise_core::event::is_confirm(key) =>
            {
                Outcome::quit(ctx)
            }
            _ => Outcome::stay(ctx),
        }
    }

    fn view(&mut self, ctx: &Context) -> String {
        let state = ctx.current_state::<SetupState>();
        let components = if state.components.is_empty() {
            "none".to_string()
        } else {
            state.components.join(", ")
        };
        format!(
            "{}\n\n  network:    {}\n  components: {}\n  telemetry:  {}\n  autostart:  {}\n\n{}\n",
            style::green("Setup complete"),
            state.network.as_deref().unwrap_or("unset"),
            components,
            state.telemetry,
            state.autostart,
            style::dim("enter or q to exit")
        )
    }

    fn display_name(&self) -> &str {
        "Done"
    }
}
