//! Dashboard view model
//!
//! The canonical in-memory shape every dashboard payload is normalized
//! into, regardless of which fallback tier produced the data.

use serde::{Deserialize, Serialize};

/// Which fallback tier actually produced the dashboard data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    /// Tier 1: the composite live aggregate succeeded
    Live,
    /// Tier 2: reconstructed from the independent partial endpoints,
    /// with static defaults filling in any that failed
    PartialFallback,
    /// Tier 3: everything failed; fixed static tables only
    StaticFallback,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Live => write!(f, "live"),
            DataSource::PartialFallback => write!(f, "partial-fallback"),
            DataSource::StaticFallback => write!(f, "static-fallback"),
        }
    }
}

/// Headline model statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStats {
    /// Best SMAPE score reported by the service (opaque, unvalidated)
    pub smape_score: f64,
    /// Accuracy percentage
    pub accuracy: f64,
    /// Training time in minutes
    pub training_time_minutes: f64,
    /// Number of model variants in the ensemble
    pub model_variants: u32,
    /// Which tier produced these numbers
    pub data_source: DataSource,
}

/// One bar in the model performance comparison series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    /// Model variant label
    pub model: String,
    /// SMAPE score for that variant
    pub smape: f64,
}

/// One slice in the feature importance series.
///
/// Importances are display-only weights and are not required to sum
/// to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    /// Feature label
    pub feature: String,
    /// Importance percentage
    pub importance: f64,
    /// Chart color hint (hex string)
    pub color: String,
}

/// Everything the analytics dashboard renders.
///
/// Always well-formed: the aggregation cascade guarantees a usable value
/// no matter how the remote service misbehaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardViewModel {
    pub model_stats: ModelStats,
    /// Ordered model performance comparison series
    pub performance: Vec<ModelPerformance>,
    /// Ordered feature importance series
    pub feature_importance: Vec<FeatureWeight>,
}

impl DashboardViewModel {
    /// True if both chart series are populated
    pub fn has_series(&self) -> bool {
        !self.performance.is_empty() && !self.feature_importance.is_empty()
    }
}
