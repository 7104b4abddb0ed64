mod app;
mod config;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use tokio::net::TcpListener;
use crate::config::AppConfig;
use crate::external::alphavantage::AlphaVantageProvider;
use crate::external::quote_provider::{QuoteProvider, QuoteProviderError};
use crate::logging::{init_logging, LoggingConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;
    let provider = build_provider(&config)?;
    let bind_addr = config.bind_addr;

    let state = AppState::new(config, provider);
    let app = app::create_app(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("🚀 Market data backend running at http://{}/", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_provider(config: &AppConfig) -> Result<Option<Arc<dyn QuoteProvider>>, QuoteProviderError> {
    match &config.api_key {
        Some(api_key) => {
            tracing::info!(
                "📊 Using quote provider: Alpha Vantage at {} (timeout {:?}, synthetic fallback)",
                config.base_url,
                config.provider_timeout
            );
            let provider = AlphaVantageProvider::new(
                api_key.clone(),
                config.base_url.clone(),
                config.provider_timeout,
            )?;
            Ok(Some(Arc::new(provider)))
        }
        None => {
            tracing::info!("📊 No ALPHAVANTAGE_API_KEY set, serving synthetic data only");
            Ok(None)
        }
    }
}
