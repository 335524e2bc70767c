use getchanski_api::constants::SERVICE_NAME;
use getchanski_core::Config;
use getchanski_infra::{init_telemetry, TelemetryFormat};

const DEFAULT_LOG_FILTER: &str = "getchanski=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    let format = if config.is_production() {
        TelemetryFormat::Json
    } else {
        TelemetryFormat::Pretty
    };
    init_telemetry(SERVICE_NAME, DEFAULT_LOG_FILTER, format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    let (_state, router) = match getchanski_api::setup::initialize_app(&config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize application");
            std::process::exit(1);
        }
    };

    getchanski_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
