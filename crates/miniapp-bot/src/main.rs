//! Mini app bot binary.

use anyhow::{Context, Result};
use miniapp_bot::{BotConfig, BotService, TelegramBotApi};
use miniapp_telemetry::{init_telemetry, load_dotenv_layers, TelemetryConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let env_files = load_dotenv_layers();

    init_telemetry(&TelemetryConfig::from_env("miniapp-bot"))
        .context("failed to initialize telemetry")?;
    info!(files = ?env_files, "Environment loaded");

    let config = BotConfig::from_env().context("invalid configuration")?;

    if !config.token.is_configured() {
        error!("No bot token provided. Please set BOT_TOKEN in your .env file");
        return Ok(());
    }

    let api = TelegramBotApi::new(
        config.api_base_url.clone(),
        config.token.clone(),
        config.poll_timeout,
    )?;

    BotService::new(api, &config)
        .run(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => {
                    error!(error = %e, "Failed to listen for shutdown signal");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await;

    Ok(())
}
