//! andhd — Andhrimnir daemon.
//!
//! Serves the nutrition estimation pipeline over HTTP: an image upload and
//! a mass in, a nutrient estimate out.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use andhrimnir::providers::{FdcClient, VisionClient};
use andhrimnir::server::config::{Config, Secrets};
use andhrimnir::server::router;
use andhrimnir::{AndhrimnirError, NutritionPipeline};

/// Andhrimnir daemon — photo-to-nutrition estimation service.
#[derive(Parser)]
#[command(name = "andhd")]
#[command(version = andhrimnir::PKG_VERSION)]
#[command(about = "Andhrimnir nutrition estimation daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(args.config.as_deref())?;
    let secrets = Secrets::load()?;

    // Build the pipeline from config
    let pipeline = build_pipeline(&config, &secrets)?;

    let listener = tokio::net::TcpListener::bind(&config.server.address).await?;
    info!(
        version = andhrimnir::version_string(),
        address = %config.server.address,
        "andhd starting"
    );

    let app = router(Arc::new(pipeline), config.server.limits.max_upload_bytes);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build a [`NutritionPipeline`] from configuration.
fn build_pipeline(config: &Config, secrets: &Secrets) -> Result<NutritionPipeline, AndhrimnirError> {
    let vision_url = config.providers.vision.base_url.as_deref().ok_or_else(|| {
        AndhrimnirError::Configuration(
            "no label detection endpoint configured ([providers.vision] base_url)".to_string(),
        )
    })?;

    let fdc_key = secrets.fdc_api_key().ok_or_else(|| {
        AndhrimnirError::Configuration(
            "no FoodData Central API key found (secrets.toml [fdc] api_key or FDC_API_KEY)"
                .to_string(),
        )
    })?;

    let detector = VisionClient::new(vision_url);
    let food_data = FdcClient::with_base_url(fdc_key, config.providers.fdc.base_url.as_str());

    Ok(NutritionPipeline::new(
        Arc::new(detector),
        Arc::new(food_data),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
