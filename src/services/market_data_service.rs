use tracing::{info, warn};

use crate::config::RandomSource;
use crate::errors::AppError;
use crate::external::quote_provider::{
    ProviderFunction, ProviderResponse, QuoteProvider, QuoteProviderError,
};
use crate::models::{MarketDataMode, MarketDataResponse, PriceSeries, Quote};
use crate::services::failure_cache::FailureType;
use crate::services::price_simulator::{
    entropy_rng, round2, seeded_rng, simulate, BasePrice, SimulationError,
};
use crate::services::quote_service::{quote_from_global, summarize};
use crate::services::symbol_hash::symbol_hash;
use crate::state::AppState;

/// Simulated daily series for `symbol`, `days + 1` points ending today.
pub fn synthetic_series(
    symbol: &str,
    days: u32,
    random: RandomSource,
) -> Result<PriceSeries, SimulationError> {
    let seed = symbol_hash(symbol);
    let mut rng = match random {
        RandomSource::Seeded => seeded_rng(seed),
        RandomSource::Entropy => entropy_rng(),
    };
    simulate(seed, days, BasePrice::FromSeed, &mut rng)
}

/// Simulated quote plus the series it summarises, marked `is_mock`.
pub fn synthetic_quote(
    symbol: &str,
    days: u32,
    random: RandomSource,
) -> Result<(Quote, PriceSeries), AppError> {
    let series = synthetic_series(symbol, days, random)?;
    let mut quote = summarize(symbol, &series).map_err(|e| AppError::Internal {
        message: e.to_string(),
        mock_data: Some(fallback_quote(symbol)),
    })?;
    quote.is_mock = true;
    Ok((quote, series))
}

/// Last-resort quote needing no series: the seed's base price with a
/// fixed ±2 % band. Only used inside 500 responses.
pub fn fallback_quote(symbol: &str) -> Quote {
    let seed = symbol_hash(symbol);
    let price = 100.0 + f64::from(seed % 900);
    Quote {
        symbol: symbol.to_string(),
        price,
        change: 0.0,
        change_percent: "0.00".to_string(),
        high: round2(price * 1.02),
        low: round2(price * 0.98),
        volume: 1_000_000 + u64::from(seed % 9_000_000),
        is_mock: true,
    }
}

/// Quote (and optionally history) for one symbol.
///
/// Tries the configured provider first, bounded by the configured timeout.
/// Any upstream failure is remembered in the failure cache and answered
/// from the simulator instead, so callers never see it.
pub async fn fetch_market_data(
    state: &AppState,
    symbol: &str,
    mode: MarketDataMode,
    days: u32,
) -> Result<MarketDataResponse, AppError> {
    if let Some(provider) = &state.quote_provider {
        if let Some(failure) = state.failure_cache.is_failed(symbol) {
            info!(
                "Skipping {} for {} - in failure cache ({}) until {}",
                provider.name(),
                symbol,
                failure.failure_type,
                failure.retry_after()
            );
        } else {
            match fetch_upstream(provider.as_ref(), symbol, mode, days, state).await {
                Ok(response) => {
                    state.failure_cache.clear(symbol);
                    return Ok(response);
                }
                Err(e) => {
                    warn!(
                        "{} failed for {}: {}. Falling back to synthetic data",
                        provider.name(),
                        symbol,
                        e
                    );
                    state.failure_cache.record_failure(symbol, FailureType::from(&e));
                }
            }
        }
    }

    let (quote, series) = synthetic_quote(symbol, days, state.config.random_source)?;
    Ok(MarketDataResponse {
        quote,
        historical_data: match mode {
            MarketDataMode::History => Some(series.into_points()),
            MarketDataMode::Quote => None,
        },
    })
}

async fn fetch_upstream(
    provider: &dyn QuoteProvider,
    symbol: &str,
    mode: MarketDataMode,
    days: u32,
    state: &AppState,
) -> Result<MarketDataResponse, QuoteProviderError> {
    let function = match mode {
        MarketDataMode::Quote => ProviderFunction::GlobalQuote,
        MarketDataMode::History => ProviderFunction::DailySeries,
    };
    let timeout = state.config.provider_timeout;

    let response = tokio::time::timeout(timeout, provider.fetch(symbol, function))
        .await
        .map_err(|_| QuoteProviderError::Timeout(timeout.as_millis() as u64))??;

    match response {
        ProviderResponse::GlobalQuote(global) => Ok(MarketDataResponse {
            quote: quote_from_global(symbol, &global),
            historical_data: None,
        }),
        ProviderResponse::DailySeries(mut points) => {
            let keep = days as usize + 1;
            if points.len() > keep {
                points.drain(..points.len() - keep);
            }
            let series = PriceSeries::from_points(points);
            if series.is_empty() {
                // no bars at all: the provider does not know this symbol
                return Err(QuoteProviderError::NotFound(symbol.to_string()));
            }
            let quote = summarize(symbol, &series)
                .map_err(|e| QuoteProviderError::BadResponse(e.to_string()))?;
            Ok(MarketDataResponse {
                quote,
                historical_data: Some(series.into_points()),
            })
        }
        ProviderResponse::RawPassthrough(_) => Err(QuoteProviderError::BadResponse(
            "unrecognised payload shape".to_string(),
        )),
    }
}
