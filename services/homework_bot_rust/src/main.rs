use anyhow::{Context, Result};
use dotenv::dotenv;
use tracing::{error, info};

use homework_bot_rust::config::{self, Config, ConfigError};
use homework_bot_rust::Poller;
use homework_rust_core::clients::{PracticumClient, TelegramClient};
use homework_rust_core::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize logging
    let log_path = config::log_path_from_env();
    let log_guard = init_logging(&log_path)
        .with_context(|| format!("Failed to initialize logging at {}", log_path.display()))?;

    info!("Starting homework status bot...");

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(ConfigError::MissingVariables(missing)) => {
            for key in &missing {
                error!("CRITICAL: Missing required environment variable: {}", key);
            }
            // Nothing to poll without credentials; exit cleanly.
            drop(log_guard);
            std::process::exit(0);
        }
        Err(e) => return Err(e).context("Invalid configuration"),
    };
    info!("Config: {:?}", cfg);

    // Clients
    let status_client = PracticumClient::new(cfg.endpoint.clone(), cfg.practicum_token.clone());
    let telegram = TelegramClient::new(
        cfg.telegram_api_base_url.clone(),
        cfg.telegram_token.clone(),
    );

    let poller = Poller::new(status_client, telegram, &cfg);
    poller.run().await.context("Homework bot stopped")?;

    Ok(())
}
