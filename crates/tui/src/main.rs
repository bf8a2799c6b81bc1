mod app;
mod wizard;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Arc,
    time::Duration,
};

use anyhow::Result;
use stepwise_core::{
    analytics::{EventSink, TracingSink},
    config::{self, AppConfig},
    initialize_session,
};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::wizard::SetupState;

#[tokio::main]
async fn main() -> Result<()> {
    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config.data_dir)?;

    let sink: Arc<dyn EventSink> = Arc::new(TracingSink);
    let ctx = initialize_session(SetupState::default()).with_home_paths(config.home_paths());
    let home = wizard::HomeScreen::new(Arc::clone(&sink), config.artifact_url.clone())?;

    let mut app = app::App::new(
        Box::new(home),
        ctx,
        sink,
        Duration::from_millis(config.tick_interval_ms),
    );
    app.run().await
}

fn init_logging(data_dir: &Path) -> Result<()> {
    let log_dir = data_dir.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("stepwise.log");

    let env_filter = EnvFilter::from_default_env();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
