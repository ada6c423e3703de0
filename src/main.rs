//! Nexus Commerce - Self-hosted Storefront Service

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nexus_commerce::checkout::BernoulliSampler;
use nexus_commerce::store::InMemoryKv;
use nexus_commerce::{api, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let sampler = Arc::new(BernoulliSampler::new(config.checkout.primary_failure_rate));
    let state = AppState::new(config.checkout.clone(), sampler, Arc::new(InMemoryKv::default()));
    let app = api::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!("🚀 Nexus Commerce listening on 0.0.0.0:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
