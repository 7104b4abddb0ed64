//! Synthetic daily OHLCV generator.
//!
//! The walk is a bounded multiplicative random walk: each day's open is the
//! previous day's close and the close moves by strictly less than
//! [`MAX_DAILY_MOVE`] in either direction. Randomness comes from the caller
//! so the same seed can reproduce a series exactly.

use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::models::{PricePoint, PriceSeries};

/// Largest fractional close-to-open move per day (±5 %).
pub const MAX_DAILY_MOVE: f64 = 0.05;
/// Largest fractional widening of the open/close band for high and low.
pub const MAX_BAND_WIDENING: f64 = 0.02;
/// Price floor; no simulated price ever goes below one cent.
pub const MIN_PRICE: f64 = 0.01;
pub const MIN_VOLUME: u64 = 500_000;
pub const MAX_VOLUME: u64 = 10_500_000;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// How the first day's open is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BasePrice {
    /// `100 + (seed mod 900)`, i.e. somewhere in `[100, 999]`.
    FromSeed,
    Fixed(f64),
}

impl BasePrice {
    fn resolve(self, seed: u32) -> Result<f64, SimulationError> {
        match self {
            BasePrice::FromSeed => Ok(100.0 + f64::from(seed % 900)),
            BasePrice::Fixed(price) if price.is_finite() && price > 0.0 => {
                Ok(round2(price).max(MIN_PRICE))
            }
            BasePrice::Fixed(price) => Err(SimulationError::InvalidArgument(format!(
                "base price must be a positive number, got {}",
                price
            ))),
        }
    }
}

/// Random source keyed by the seed; identical seeds give identical series.
pub fn seeded_rng(seed: u32) -> StdRng {
    StdRng::seed_from_u64(u64::from(seed))
}

/// Fresh, non-reproducible random source.
pub fn entropy_rng() -> StdRng {
    StdRng::from_rng(&mut rand::rng())
}

/// Simulate `days + 1` daily points ending today (UTC).
pub fn simulate<R: Rng + ?Sized>(
    seed: u32,
    days: u32,
    base_price: BasePrice,
    rng: &mut R,
) -> Result<PriceSeries, SimulationError> {
    simulate_until(Utc::now().date_naive(), seed, days, base_price, rng)
}

/// Simulate `days + 1` daily points, the last one dated `end_date`.
pub fn simulate_until<R: Rng + ?Sized>(
    end_date: NaiveDate,
    seed: u32,
    days: u32,
    base_price: BasePrice,
    rng: &mut R,
) -> Result<PriceSeries, SimulationError> {
    if days == 0 {
        return Err(SimulationError::InvalidArgument(
            "days must be greater than zero".to_string(),
        ));
    }

    let start_date = end_date
        .checked_sub_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| {
            SimulationError::InvalidArgument(format!(
                "{} days before {} is out of the calendar range",
                days, end_date
            ))
        })?;

    let mut open = base_price.resolve(seed)?;
    let mut points = Vec::with_capacity(days as usize + 1);

    for offset in 0..=i64::from(days) {
        let date = start_date + Duration::days(offset);
        let point = next_point(date, open, rng);
        open = point.close;
        points.push(point);
    }

    Ok(PriceSeries::from_points(points))
}

fn next_point<R: Rng + ?Sized>(date: NaiveDate, open: f64, rng: &mut R) -> PricePoint {
    // u in [0, 1) keeps the factor inside (1 - MAX, 1 + MAX)
    let factor = 1.0 + (rng.random::<f64>() - 0.5) * 2.0 * MAX_DAILY_MOVE;
    let close = round2(open * factor).max(MIN_PRICE);

    let top = open.max(close);
    let bottom = open.min(close);
    let high = round2(top * (1.0 + rng.random::<f64>() * MAX_BAND_WIDENING)).max(top);
    let low = round2(bottom * (1.0 - rng.random::<f64>() * MAX_BAND_WIDENING))
        .max(MIN_PRICE)
        .min(bottom);

    PricePoint {
        date,
        open,
        high,
        low,
        close,
        volume: rng.random_range(MIN_VOLUME..MAX_VOLUME),
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::symbol_hash::symbol_hash;

    fn fixed_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn series_for(symbol: &str, days: u32) -> PriceSeries {
        let seed = symbol_hash(symbol);
        simulate_until(fixed_end(), seed, days, BasePrice::FromSeed, &mut seeded_rng(seed)).unwrap()
    }

    #[test]
    fn test_series_has_days_plus_one_points() {
        assert_eq!(series_for("AAPL", 30).len(), 31);
        assert_eq!(series_for("AAPL", 1).len(), 2);
        assert_eq!(series_for("AAPL", 365).len(), 366);
    }

    #[test]
    fn test_zero_days_is_invalid() {
        let result = simulate(42, 0, BasePrice::FromSeed, &mut seeded_rng(42));
        assert!(matches!(result, Err(SimulationError::InvalidArgument(_))));
    }

    #[test]
    fn test_non_positive_base_price_is_invalid() {
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let result = simulate(1, 10, BasePrice::Fixed(bad), &mut seeded_rng(1));
            assert!(matches!(result, Err(SimulationError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_first_open_is_base_price() {
        let seed = symbol_hash("MSFT");
        let series = series_for("MSFT", 10);
        assert_eq!(series.points()[0].open, 100.0 + f64::from(seed % 900));

        let fixed =
            simulate_until(fixed_end(), 7, 5, BasePrice::Fixed(1850.0), &mut seeded_rng(7)).unwrap();
        assert_eq!(fixed.points()[0].open, 1850.0);
    }

    #[test]
    fn test_continuity() {
        for symbol in ["AAPL", "TSLA", "NVDA", "X", ""] {
            let series = series_for(symbol, 90);
            for pair in series.points().windows(2) {
                assert_eq!(pair[1].open, pair[0].close, "{} broke continuity", symbol);
            }
        }
    }

    #[test]
    fn test_prices_are_positive_and_banded() {
        for seed in 0..50u32 {
            let series =
                simulate_until(fixed_end(), seed, 120, BasePrice::FromSeed, &mut seeded_rng(seed))
                    .unwrap();
            for p in series.points() {
                assert!(p.open > 0.0 && p.close > 0.0 && p.high > 0.0 && p.low > 0.0);
                assert!(p.high >= p.open.max(p.close));
                assert!(p.low <= p.open.min(p.close));
            }
        }
    }

    #[test]
    fn test_tiny_base_price_stays_positive() {
        let series =
            simulate_until(fixed_end(), 3, 500, BasePrice::Fixed(0.01), &mut seeded_rng(3)).unwrap();
        assert!(series.points().iter().all(|p| p.low >= MIN_PRICE && p.close >= MIN_PRICE));
    }

    #[test]
    fn test_daily_moves_are_bounded() {
        let series = series_for("GOOGL", 200);
        for p in series.points() {
            // allow a cent of rounding slack
            let bound = p.open * MAX_DAILY_MOVE + 0.01;
            assert!((p.close - p.open).abs() <= bound);
            assert!(p.high <= p.open.max(p.close) * (1.0 + MAX_BAND_WIDENING) + 0.01);
        }
    }

    #[test]
    fn test_volume_range() {
        let series = series_for("AMZN", 200);
        assert!(series
            .points()
            .iter()
            .all(|p| (MIN_VOLUME..MAX_VOLUME).contains(&p.volume)));
    }

    #[test]
    fn test_dates_step_one_day_and_end_on_end_date() {
        let series = series_for("META", 45);
        for pair in series.points().windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
        assert_eq!(series.points().last().unwrap().date, fixed_end());
        assert_eq!(series.points()[0].date, fixed_end() - Duration::days(45));
    }

    #[test]
    fn test_simulate_ends_today() {
        let before = Utc::now().date_naive();
        let series = simulate(9, 5, BasePrice::FromSeed, &mut seeded_rng(9)).unwrap();
        let after = Utc::now().date_naive();
        let last = series.points().last().unwrap().date;
        assert!(last == before || last == after);
    }

    #[test]
    fn test_same_seed_same_series() {
        assert_eq!(series_for("NFLX", 30), series_for("NFLX", 30));
    }

    #[test]
    fn test_different_seeds_diverge() {
        assert_ne!(series_for("NFLX", 30), series_for("DIS", 30));
    }

    #[test]
    fn test_entropy_source_still_honours_invariants() {
        let series = simulate(11, 30, BasePrice::FromSeed, &mut entropy_rng()).unwrap();
        assert_eq!(series.len(), 31);
        for pair in series.points().windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
        }
    }
}
