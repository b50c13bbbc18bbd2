//! # Converter Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Pick the rate provider (public feed or static table)
//! - Create the conversion controller and load initial rates
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_hex::{ControllerSettings, ConversionController, inbound::HttpServer};
use converter_types::RateProvider;
use exchange_rates::StaticRateProvider;
use rate_feed::CurrencyApiClient;

use config::{Config, LogFormat, RateSource};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,converter_app=debug,converter_hex=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn build_provider(source: &RateSource) -> Box<dyn RateProvider> {
    match source {
        RateSource::Feed(url) => Box::new(CurrencyApiClient::new(url.as_str())),
        RateSource::Static => Box::new(StaticRateProvider::new()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!("Starting converter server on port {}", config.port);
    tracing::info!("Using rate source: {:?}", config.rate_source);

    let settings = ControllerSettings::new(config.default_source, config.default_target)
        .with_amount(config.default_amount)
        .with_conversion_delay(config.conversion_delay);
    let controller = Arc::new(ConversionController::new(
        build_provider(&config.rate_source),
        settings,
    )?);

    // Initial load runs in the background; a hung feed must not block startup.
    tokio::spawn({
        let controller = controller.clone();
        async move {
            match controller.start().await {
                Ok(Some(entry)) => tracing::info!(%entry, "initial conversion"),
                Ok(None) => tracing::warn!("initial rates unavailable"),
                Err(err) => tracing::warn!(error = %err, "initial conversion failed"),
            }
        }
    });

    // Create and run the HTTP server
    let server = HttpServer::new(controller);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
