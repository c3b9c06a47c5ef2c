use anyhow::{Context, Result};
use dotenv::dotenv;
use portal::{handler::AppRouter, state::AppState};
use shared::{config::Config, utils::init_logger};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _log_guard = init_logger("portal", config.is_dev, config.enable_file_log);

    let port = config.port;

    let state = AppState::new(&config).context("Failed to create AppState")?;

    info!("Starting portal on port {port}");

    AppRouter::serve(port, state)
        .await
        .context("Failed to start server")?;

    info!("Portal stopped");

    Ok(())
}
