use gcs::adapters::{FileCounterStore, ReqwestHttpClient, TungstenitePushTransport};
use gcs::app::App;
use gcs::cli::{parse_args, run_cli_command};
use gcs::startup::{resolve_config, DashboardConfig};
use gcs::station::StationClient;
use gcs::terminal::{setup_panic_hook, TerminalManager};

use color_eyre::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "gcs.log";

/// Route tracing output to `<state_dir>/gcs.log`; stdout belongs to the TUI.
///
/// The filter comes from `GCS_LOG`, then `RUST_LOG`, defaulting to `info`.
fn init_logging(state_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(state_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(state_dir.join(LOG_FILE))?;

    let filter = std::env::var("GCS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

async fn run_dashboard(config: DashboardConfig, state_dir: &Path) -> Result<()> {
    let store = FileCounterStore::new(state_dir);
    let station = StationClient::new(ReqwestHttpClient::new(), config.base_url.clone())
        .with_api_key(config.api_key.clone());
    let (transport, transport_rx) = TungstenitePushTransport::spawn(config.ws_client_config());

    info!(
        "Starting dashboard: rest={} push={}",
        config.base_url,
        config.ws_url()
    );

    let mut app = App::new(config, station, Box::new(transport), Box::new(store));

    let mut manager = TerminalManager::new()?;
    let result = app.run(manager.terminal(), transport_rx).await;
    manager.restore();

    if let Err(err) = &result {
        tracing::error!("Dashboard exited with error: {}", err);
    }
    result
}

fn main() -> Result<()> {
    // --version and --help exit here, before the terminal is touched
    let options = run_cli_command(parse_args(std::env::args()));

    color_eyre::install()?;
    setup_panic_hook();

    let config = resolve_config(&options);
    let state_dir = config.state_dir()?;
    init_logging(&state_dir)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_dashboard(config, &state_dir))
}
