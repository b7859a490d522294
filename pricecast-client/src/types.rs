//! Wire types for engine API responses
//!
//! The remote service emits the same logical data under two naming
//! conventions (snake_case from the backend, camelCase from older
//! client-side reshaping). Each dual-named field is decoded as a pair of
//! explicit optionals so the preference order lives in one auditable
//! place: snake_case wins when both forms are present.
//!
//! Every field is optional and every numeric field is lenient (the
//! service is known to report some scores as strings like `"35.1%"`), so
//! decoding never fails on a partial payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Accept a number, a numeric string, or a percent string like "35.1%"
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Some(n),
        NumberOrString::Text(s) => s.trim().trim_end_matches('%').parse().ok(),
        NumberOrString::Other(_) => None,
    })
}

/// Headline stats block inside a dashboard payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawModelStats {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub smape_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accuracy: Option<f64>,
    #[serde(
        default,
        alias = "training_time_minutes",
        deserialize_with = "lenient_f64"
    )]
    pub training_time: Option<f64>,
    #[serde(default)]
    pub model_variants: Option<u32>,
}

/// One row of the model performance comparison series
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawModelPerformance {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub smape: Option<f64>,
}

/// One row of the feature importance series
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeatureWeight {
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub importance: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Composite dashboard payload, tolerant of both naming conventions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDashboard {
    #[serde(default)]
    pub model_stats: Option<RawModelStats>,
    #[serde(default, rename = "modelStats")]
    pub model_stats_camel: Option<RawModelStats>,

    #[serde(default)]
    pub performance_comparison: Option<Vec<RawModelPerformance>>,
    #[serde(default, rename = "performanceComparison")]
    pub performance_comparison_camel: Option<Vec<RawModelPerformance>>,
    // Canonical view models re-entering the normalizer carry the series
    // under this name.
    #[serde(default)]
    pub performance: Option<Vec<RawModelPerformance>>,

    #[serde(default)]
    pub feature_importance: Option<Vec<RawFeatureWeight>>,
    #[serde(default, rename = "featureImportance")]
    pub feature_importance_camel: Option<Vec<RawFeatureWeight>>,
}

impl RawDashboard {
    /// Stats block, snake_case preferred
    pub fn stats(&self) -> Option<&RawModelStats> {
        self.model_stats.as_ref().or(self.model_stats_camel.as_ref())
    }

    /// Performance series, snake_case preferred
    pub fn performance_series(&self) -> Option<&[RawModelPerformance]> {
        self.performance_comparison
            .as_deref()
            .or(self.performance_comparison_camel.as_deref())
            .or(self.performance.as_deref())
    }

    /// Feature importance series, snake_case preferred
    pub fn feature_series(&self) -> Option<&[RawFeatureWeight]> {
        self.feature_importance
            .as_deref()
            .or(self.feature_importance_camel.as_deref())
    }
}

/// Feature importance endpoint payload: `{"features": [...], ...}`,
/// though a bare array is also accepted by the normalizer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeatureImportanceResponse {
    #[serde(default)]
    pub features: Option<Vec<RawFeatureWeight>>,
}

/// Single prediction response from `POST /predict`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPrediction {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub predicted_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub key_features: Option<Vec<String>>,
    #[serde(default, alias = "method")]
    pub prediction_method: Option<String>,
    #[serde(default, alias = "response_time_secs", deserialize_with = "lenient_f64")]
    pub response_time: Option<f64>,
    #[serde(default)]
    pub produced_at: Option<DateTime<Utc>>,
}

/// Batch prediction response: either a bare array or `{"predictions": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBatchResponse {
    #[serde(default, alias = "results")]
    pub predictions: Option<Vec<serde_json::Value>>,
}
