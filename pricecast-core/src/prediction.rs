//! Prediction request/result types and history entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single product price-prediction request.
///
/// Immutable once submitted; only `title` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Product title (required, non-empty)
    pub title: String,
    /// Free-form product description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Product category hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Brand hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl PredictionRequest {
    /// Create a request with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: None,
            brand: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True if the title is empty or whitespace-only
    pub fn has_empty_title(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// How the remote engine produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionMethod {
    /// Trained ML model
    Ai,
    /// Rule-based fallback on the service side
    Heuristic,
}

impl PredictionMethod {
    /// Classify the free-text method label the service reports.
    ///
    /// The service labels fallback paths with strings like
    /// "Heuristic Fallback" or "Simple"; anything else is the ML model.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("heuristic") || lower.contains("fallback") || lower.contains("simple") {
            PredictionMethod::Heuristic
        } else {
            PredictionMethod::Ai
        }
    }
}

impl std::fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionMethod::Ai => write!(f, "AI"),
            PredictionMethod::Heuristic => write!(f, "Heuristic"),
        }
    }
}

/// Result of one successful prediction call.
///
/// Produced exactly once per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted price in the service currency, >= 0
    pub predicted_price: f64,
    /// Model confidence in [0, 1]
    pub confidence: f64,
    /// Feature labels that drove the prediction, possibly empty
    pub key_features: Vec<String>,
    /// Which engine path produced the result
    pub method: PredictionMethod,
    /// Service-reported response time in seconds
    pub response_time_secs: f64,
    /// When this result was produced (client clock)
    pub produced_at: DateTime<Utc>,
}

/// One entry in the session-local prediction history.
///
/// Owned exclusively by the history cache; consumers only ever see clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Monotonically increasing token, unique within the session
    pub id: u64,
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
    /// The request as submitted
    pub request: PredictionRequest,
    /// The normalized result
    pub result: PredictionResult,
}
