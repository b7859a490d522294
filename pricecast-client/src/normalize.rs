//! Payload normalization
//!
//! Pure, total mapping from heterogeneous remote payloads into the
//! canonical shapes in `pricecast-core`. Nothing in here can fail:
//! missing or misshapen fields resolve to defensive defaults, and
//! feeding a canonical shape back through produces the same value.

use chrono::Utc;
use serde_json::Value;

use pricecast_core::{
    DashboardViewModel, DataSource, FeatureWeight, ModelPerformance, ModelStats, PredictionMethod,
    PredictionResult,
};

use crate::types::{
    RawBatchResponse, RawDashboard, RawFeatureImportanceResponse, RawFeatureWeight,
    RawModelPerformance, RawPrediction,
};

/// Fixed default stats used when the service reports none
pub const DEFAULT_SMAPE: f64 = 35.1;
pub const DEFAULT_ACCURACY: f64 = 95.2;
pub const DEFAULT_TRAINING_MINUTES: f64 = 3.0;
pub const DEFAULT_MODEL_VARIANTS: u32 = 4;

/// Static model performance table, used when a live series is unavailable
pub fn default_performance() -> Vec<ModelPerformance> {
    [
        ("Baseline", 47.2),
        ("Enhanced", 38.5),
        ("Optimized", 35.1),
        ("Current", 35.1),
    ]
    .into_iter()
    .map(|(model, smape)| ModelPerformance {
        model: model.to_string(),
        smape,
    })
    .collect()
}

/// Static feature importance table, used when a live series is unavailable
pub fn default_features() -> Vec<FeatureWeight> {
    [
        ("Product Description", 35.0, "#FF9900"),
        ("Brand Recognition", 22.0, "#232F3E"),
        ("Quality Indicators", 18.0, "#00A8E1"),
        ("Text Length", 15.0, "#7B68EE"),
        ("Category Detection", 10.0, "#32CD32"),
    ]
    .into_iter()
    .map(|(feature, importance, color)| FeatureWeight {
        feature: feature.to_string(),
        importance,
        color: color.to_string(),
    })
    .collect()
}

/// Fixed default stats block tagged with the tier that is serving them
pub fn default_model_stats(source: DataSource) -> ModelStats {
    ModelStats {
        smape_score: DEFAULT_SMAPE,
        accuracy: DEFAULT_ACCURACY,
        training_time_minutes: DEFAULT_TRAINING_MINUTES,
        model_variants: DEFAULT_MODEL_VARIANTS,
        data_source: source,
    }
}

/// The complete last-resort dashboard (tier 3)
pub fn static_dashboard() -> DashboardViewModel {
    DashboardViewModel {
        model_stats: default_model_stats(DataSource::StaticFallback),
        performance: default_performance(),
        feature_importance: default_features(),
    }
}

fn performance_row(raw: &RawModelPerformance) -> ModelPerformance {
    ModelPerformance {
        model: raw.model.clone().unwrap_or_default(),
        smape: raw.smape.unwrap_or_default(),
    }
}

fn feature_row(raw: &RawFeatureWeight) -> FeatureWeight {
    FeatureWeight {
        feature: raw.feature.clone().unwrap_or_default(),
        importance: raw.importance.unwrap_or_default(),
        color: raw.color.clone().unwrap_or_default(),
    }
}

/// Normalize a composite dashboard payload.
///
/// `source` records which fallback tier actually produced the payload.
/// Absent series normalize to empty sequences; absent stats fall back to
/// the fixed defaults. Never fails.
pub fn normalize_dashboard(payload: &Value, source: DataSource) -> DashboardViewModel {
    let raw: RawDashboard = serde_json::from_value(payload.clone()).unwrap_or_default();

    let stats = raw.stats();
    let model_stats = ModelStats {
        smape_score: stats.and_then(|s| s.smape_score).unwrap_or(DEFAULT_SMAPE),
        accuracy: stats.and_then(|s| s.accuracy).unwrap_or(DEFAULT_ACCURACY),
        training_time_minutes: stats
            .and_then(|s| s.training_time)
            .unwrap_or(DEFAULT_TRAINING_MINUTES),
        model_variants: stats
            .and_then(|s| s.model_variants)
            .unwrap_or(DEFAULT_MODEL_VARIANTS),
        data_source: source,
    };

    DashboardViewModel {
        model_stats,
        performance: raw
            .performance_series()
            .map(|rows| rows.iter().map(performance_row).collect())
            .unwrap_or_default(),
        feature_importance: raw
            .feature_series()
            .map(|rows| rows.iter().map(feature_row).collect())
            .unwrap_or_default(),
    }
}

/// Normalize the standalone performance endpoint payload (a bare array)
pub fn normalize_performance(payload: &Value) -> Vec<ModelPerformance> {
    let rows: Vec<RawModelPerformance> =
        serde_json::from_value(payload.clone()).unwrap_or_default();
    rows.iter().map(performance_row).collect()
}

/// Normalize the feature importance endpoint payload.
///
/// The endpoint wraps its rows in `{"features": [...]}`; a bare array is
/// tolerated too.
pub fn normalize_features(payload: &Value) -> Vec<FeatureWeight> {
    let rows: Vec<RawFeatureWeight> = match serde_json::from_value(payload.clone()) {
        Ok(RawFeatureImportanceResponse {
            features: Some(rows),
        }) => rows,
        _ => serde_json::from_value(payload.clone()).unwrap_or_default(),
    };
    rows.iter().map(feature_row).collect()
}

/// Normalize a single prediction payload. Never fails.
///
/// Numbers pass through unmodified except confidence, which is clamped
/// to [0, 1] defensively.
pub fn normalize_prediction(payload: &Value) -> PredictionResult {
    let raw: RawPrediction = serde_json::from_value(payload.clone()).unwrap_or_default();

    PredictionResult {
        predicted_price: raw.predicted_price.unwrap_or_default(),
        confidence: raw.confidence.unwrap_or_default().clamp(0.0, 1.0),
        key_features: raw.key_features.unwrap_or_default(),
        method: PredictionMethod::from_label(raw.prediction_method.as_deref().unwrap_or_default()),
        response_time_secs: raw.response_time.unwrap_or_default(),
        produced_at: raw.produced_at.unwrap_or_else(Utc::now),
    }
}

/// Normalize a batch prediction payload into individual results
pub fn normalize_batch(payload: &Value) -> Vec<PredictionResult> {
    let rows = match payload {
        Value::Array(rows) => rows.clone(),
        _ => {
            let raw: RawBatchResponse = serde_json::from_value(payload.clone()).unwrap_or_default();
            raw.predictions.unwrap_or_default()
        }
    };
    rows.iter().map(normalize_prediction).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_case_preferred_over_camel() {
        let payload = json!({
            "performance_comparison": [{"model": "Snake", "smape": 1.0}],
            "performanceComparison": [{"model": "Camel", "smape": 2.0}],
        });

        let vm = normalize_dashboard(&payload, DataSource::Live);
        assert_eq!(vm.performance.len(), 1);
        assert_eq!(vm.performance[0].model, "Snake");
    }

    #[test]
    fn test_camel_case_used_when_snake_absent() {
        let payload = json!({
            "featureImportance": [{"feature": "Brand", "importance": 22.0, "color": "#232F3E"}],
        });

        let vm = normalize_dashboard(&payload, DataSource::Live);
        assert_eq!(vm.feature_importance.len(), 1);
        assert_eq!(vm.feature_importance[0].feature, "Brand");
    }

    #[test]
    fn test_absent_series_yield_empty_not_error() {
        let vm = normalize_dashboard(&json!({}), DataSource::Live);
        assert!(vm.performance.is_empty());
        assert!(vm.feature_importance.is_empty());
        assert_eq!(vm.model_stats.smape_score, DEFAULT_SMAPE);
    }

    #[test]
    fn test_malformed_payload_is_total() {
        for payload in [json!("garbage"), json!(null), json!(42), json!([1, 2, 3])] {
            let vm = normalize_dashboard(&payload, DataSource::Live);
            assert!(vm.performance.is_empty());
            assert_eq!(vm.model_stats.accuracy, DEFAULT_ACCURACY);
        }
    }

    #[test]
    fn test_dashboard_normalization_is_idempotent() {
        let payload = json!({
            "model_stats": {"smape_score": 33.8, "accuracy": 96.0, "training_time": 2.5, "model_variants": 5},
            "performance_comparison": [{"model": "Current", "smape": 33.8}],
            "feature_importance": [{"feature": "Brand", "importance": 22.0, "color": "#232F3E"}],
        });

        let once = normalize_dashboard(&payload, DataSource::Live);
        let canonical = serde_json::to_value(&once).expect("serialize view model");
        let twice = normalize_dashboard(&canonical, DataSource::Live);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_percent_strings_accepted() {
        let payload = json!({"model_stats": {"smape_score": "35.1%", "accuracy": "95.2"}});
        let vm = normalize_dashboard(&payload, DataSource::Live);
        assert_eq!(vm.model_stats.smape_score, 35.1);
        assert_eq!(vm.model_stats.accuracy, 95.2);
    }

    #[test]
    fn test_confidence_clamped() {
        let high = normalize_prediction(&json!({"predicted_price": 99.5, "confidence": 1.7}));
        assert_eq!(high.confidence, 1.0);
        assert_eq!(high.predicted_price, 99.5);

        let low = normalize_prediction(&json!({"confidence": -0.2}));
        assert_eq!(low.confidence, 0.0);
    }

    #[test]
    fn test_prediction_normalization() {
        let payload = json!({
            "predicted_price": 249.99,
            "confidence": 0.87,
            "key_features": ["Brand Recognition", "Text Length"],
            "prediction_method": "LightGBM Ensemble",
            "response_time": 0.42,
        });

        let result = normalize_prediction(&payload);
        assert_eq!(result.predicted_price, 249.99);
        assert_eq!(result.confidence, 0.87);
        assert_eq!(result.key_features.len(), 2);
        assert_eq!(result.method, PredictionMethod::Ai);
        assert_eq!(result.response_time_secs, 0.42);
    }

    #[test]
    fn test_prediction_normalization_is_idempotent() {
        let payload = json!({
            "predicted_price": 120.0,
            "confidence": 0.75,
            "key_features": ["Fallback Algorithm"],
            "prediction_method": "Heuristic Fallback",
            "response_time": 0.1,
        });

        let once = normalize_prediction(&payload);
        let canonical = serde_json::to_value(&once).expect("serialize result");
        let twice = normalize_prediction(&canonical);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_features_endpoint_wrapper_and_bare_array() {
        let wrapped = json!({"features": [{"feature": "Brand", "importance": 22.0}]});
        assert_eq!(normalize_features(&wrapped).len(), 1);

        let bare = json!([{"feature": "Brand", "importance": 22.0}]);
        assert_eq!(normalize_features(&bare).len(), 1);

        assert!(normalize_features(&json!({})).is_empty());
    }

    #[test]
    fn test_static_tables() {
        let performance = default_performance();
        assert_eq!(performance.len(), 4);
        assert_eq!(performance[0].model, "Baseline");
        assert_eq!(performance[0].smape, 47.2);
        assert_eq!(performance[3].model, "Current");
        assert_eq!(performance[3].smape, 35.1);

        let features = default_features();
        assert_eq!(features.len(), 5);
        assert_eq!(features[0].feature, "Product Description");
        assert_eq!(features[0].importance, 35.0);
        assert_eq!(features[4].feature, "Category Detection");
        assert_eq!(features[4].importance, 10.0);

        let vm = static_dashboard();
        assert_eq!(vm.model_stats.data_source, DataSource::StaticFallback);
        assert!(vm.has_series());
    }

    #[test]
    fn test_batch_normalization_shapes() {
        let bare = json!([{"predicted_price": 10.0}, {"predicted_price": 20.0}]);
        assert_eq!(normalize_batch(&bare).len(), 2);

        let wrapped = json!({"predictions": [{"predicted_price": 10.0}]});
        assert_eq!(normalize_batch(&wrapped).len(), 1);

        assert!(normalize_batch(&json!({})).is_empty());
    }
}
