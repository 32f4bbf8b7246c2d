//! Mini app API server binary.

use anyhow::{Context, Result};
use miniapp_api::{ApiConfig, MiniAppService};
use miniapp_telemetry::{init_telemetry, load_dotenv_layers, TelemetryConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // .env before telemetry so MINIAPP_LOG_LEVEL can live there too
    let env_files = load_dotenv_layers();

    init_telemetry(&TelemetryConfig::from_env("miniapp-api"))
        .context("failed to initialize telemetry")?;
    info!(files = ?env_files, "Environment loaded");

    let config = ApiConfig::from_env().context("invalid configuration")?;
    if !config.bot_token.is_configured() {
        error!("BOT_TOKEN is not set; /api/init will reject every request");
    }

    let service = MiniAppService::new(config)?;
    service
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
