use crate::external::quote_provider::GlobalQuote;
use crate::models::{PriceSeries, Quote};
use crate::services::price_simulator::{round2, SimulationError};

/// Summarise the tail of a series into a quote.
///
/// `high`/`low` are the latest day's true range, not a fixed band around
/// the price. `is_mock` is left `false`; callers mark simulated quotes.
pub fn summarize(symbol: &str, series: &PriceSeries) -> Result<Quote, SimulationError> {
    let (previous, latest) = series.tail_pair().ok_or_else(|| {
        SimulationError::InvalidArgument(format!(
            "at least 2 points are needed to summarize, got {}",
            series.len()
        ))
    })?;

    if previous.close <= 0.0 {
        return Err(SimulationError::InvalidArgument(format!(
            "previous close must be positive, got {}",
            previous.close
        )));
    }

    let change = latest.close - previous.close;
    let change_percent = change / previous.close * 100.0;

    Ok(Quote {
        symbol: symbol.to_string(),
        price: latest.close,
        change: round2(change),
        change_percent: format!("{:.2}", change_percent),
        high: latest.high,
        low: latest.low,
        volume: latest.volume,
        is_mock: false,
    })
}

/// Convert a provider's global quote into our quote shape.
pub fn quote_from_global(symbol: &str, global: &GlobalQuote) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        price: global.price,
        change: round2(global.change),
        change_percent: format!("{:.2}", global.change_percent),
        high: global.high,
        low: global.low,
        volume: global.volume,
        is_mock: false,
    }
}
