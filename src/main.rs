//! Governance Wiki Site
//!
//! Entry point for the documentation site server.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "gov_site=debug,tower_http=debug".parse().expect("valid filter")))
        .with(fmt::layer())
        .init();

    tracing::info!("Starting governance wiki server");

    gov_site::run().await;
}
