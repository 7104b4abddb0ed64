use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::models::{Prediction, PredictionDirection};

const MIN_CONFIDENCE: u8 = 70;
const MAX_CONFIDENCE: u8 = 99;

/// Coin-flip direction with a 70-99 % "confidence". This is a stand-in for
/// a model; nothing about the symbol's history is used.
pub fn predict<R: Rng + ?Sized>(symbol: &str, rng: &mut R) -> Prediction {
    let direction = if rng.random_bool(0.5) {
        PredictionDirection::Up
    } else {
        PredictionDirection::Down
    };
    let confidence = rng.random_range(MIN_CONFIDENCE..=MAX_CONFIDENCE);

    Prediction {
        id: Uuid::new_v4(),
        symbol: symbol.to_string(),
        direction,
        confidence,
        advice: advice_for(symbol, direction),
        generated_at: Utc::now(),
    }
}

fn advice_for(symbol: &str, direction: PredictionDirection) -> String {
    match direction {
        PredictionDirection::Up => format!(
            "Based on current patterns and market sentiment, {} shows a moderate buying opportunity over the next 48 hours.",
            symbol
        ),
        PredictionDirection::Down => format!(
            "Momentum for {} is weakening; consider holding off on new positions over the next 48 hours.",
            symbol
        ),
    }
}
