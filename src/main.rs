use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::ApiConfig;
use clinic_core::{data_dir_from_env_value, CoreConfig};

/// Main entry point for the clinic server
///
/// Resolves configuration once, then serves the REST API.
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CLINIC_DATA_DIR`: Root of the document collections (default: "clinic_data")
/// - `CLINIC_ADMIN_TOKEN`: Token accepted on admin routes (required)
/// - `CLINIC_DOCTOR_TOKEN`: Token accepted on doctor routes (required)
///
/// # Errors
/// Returns an error if:
/// - the logging configuration cannot be initialised,
/// - a required setting is missing or the data directory does not exist,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic=info".parse()?)
                .add_directive("clinic_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = data_dir_from_env_value(std::env::var("CLINIC_DATA_DIR").ok());
    if !data_dir.exists() {
        anyhow::bail!("Data directory does not exist: {}", data_dir.display());
    }
    let cfg = Arc::new(CoreConfig::new(data_dir)?);

    let api = ApiConfig::from_env_values(
        std::env::var("CLINIC_REST_ADDR").ok(),
        std::env::var("CLINIC_ADMIN_TOKEN").ok(),
        std::env::var("CLINIC_DOCTOR_TOKEN").ok(),
    )?;

    api_rest::serve(cfg, api).await
}
