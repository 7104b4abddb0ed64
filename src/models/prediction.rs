use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PredictionDirection {
    Up,
    Down,
}

/// Placeholder "AI" prediction. Not a forecast: direction and confidence
/// are random draws.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: Uuid,
    pub symbol: String,
    pub direction: PredictionDirection,
    /// Percent, 70..=99
    pub confidence: u8,
    pub advice: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrediction {
    pub symbol: Option<String>,
}
