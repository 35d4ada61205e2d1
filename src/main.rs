use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use weatherdash::config::LoggingConfig;
use weatherdash::{Dashboard, DashboardConfig, web};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().with_target(false).init(),
        _ => builder.pretty().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    tracing::info!("Starting weatherdash v{}", weatherdash::VERSION);

    let dashboard = Arc::new(Dashboard::from_config(&config));

    // The first report arrives after the simulated latency; serve the
    // placeholder page meanwhile.
    tokio::spawn({
        let dashboard = Arc::clone(&dashboard);
        async move {
            dashboard.locate().await;
        }
    });

    web::run(&config.bind_address(), dashboard).await
}
