//! Dashboard aggregation service
//!
//! Coordinates the remote analytics calls behind a three-tier fallback
//! cascade, ordered by data completeness: the full live aggregate, then
//! a partial reconstruction from the two independent series endpoints,
//! then the fixed static tables. `load_dashboard` never fails and never
//! surfaces a transport error to the caller.

use tracing::{debug, instrument, warn};

use pricecast_client::normalize::{
    default_features, default_model_stats, default_performance, normalize_dashboard,
    normalize_features, normalize_performance, static_dashboard,
};
use pricecast_client::EngineClient;
use pricecast_core::{DashboardViewModel, DataSource, TransportError};

/// How many history entries the composite aggregate requests
const AGGREGATE_HISTORY_LIMIT: usize = 10;

/// Service that produces an always-usable dashboard view model
#[derive(Debug, Clone)]
pub struct DashboardService {
    client: EngineClient,
}

impl DashboardService {
    pub fn new(client: EngineClient) -> Self {
        Self { client }
    }

    /// Load the dashboard, degrading gracefully across three tiers.
    ///
    /// Tier 1 is the composite live aggregate; tier 2 reconstructs the
    /// two chart series from their standalone endpoints with per-series
    /// static defaults; tier 3 is the full static table set, reachable
    /// only if the tier-2 dispatch mechanism itself fails. No tier is
    /// retried.
    #[instrument(skip(self))]
    pub async fn load_dashboard(&self) -> DashboardViewModel {
        match self.load_live().await {
            Ok(vm) => {
                debug!("Dashboard loaded from live aggregate");
                vm
            }
            Err(e) => {
                warn!(
                    "Live dashboard aggregate failed, reconstructing from partial endpoints: {}",
                    e
                );
                match self.load_partial().await {
                    Ok(vm) => vm,
                    Err(e) => {
                        warn!("Partial dashboard dispatch failed, serving static defaults: {}", e);
                        static_dashboard()
                    }
                }
            }
        }
    }

    /// Tier 1: the composite aggregate.
    ///
    /// All four calls must succeed for the aggregate to count as live;
    /// the join is a barrier, so every call has settled before any error
    /// is inspected.
    async fn load_live(&self) -> Result<DashboardViewModel, TransportError> {
        let (dashboard, metrics, history, model_info) = tokio::join!(
            self.client.dashboard_data(),
            self.client.real_time_metrics(),
            self.client.prediction_history(AGGREGATE_HISTORY_LIMIT),
            self.client.model_info(),
        );

        let dashboard = dashboard?;
        metrics?;
        history?;
        model_info?;

        Ok(normalize_dashboard(&dashboard, DataSource::Live))
    }

    /// Tier 2: partial reconstruction.
    ///
    /// The two series calls are dispatched as independent tasks and
    /// joined before proceeding. Each is individually optional: a failed
    /// call falls back to its static default table. A `JoinError` here
    /// means the dispatch mechanism itself broke, which escalates to
    /// tier 3.
    async fn load_partial(&self) -> Result<DashboardViewModel, tokio::task::JoinError> {
        let performance_task = tokio::spawn({
            let client = self.client.clone();
            async move { client.performance_data().await }
        });
        let features_task = tokio::spawn({
            let client = self.client.clone();
            async move { client.feature_importance().await }
        });

        let (performance_result, features_result) = tokio::join!(performance_task, features_task);

        let performance = match performance_result? {
            Ok(payload) => normalize_performance(&payload),
            Err(e) => {
                warn!("Performance series unavailable, using static table: {}", e);
                default_performance()
            }
        };

        let feature_importance = match features_result? {
            Ok(payload) => normalize_features(&payload),
            Err(e) => {
                warn!("Feature importance unavailable, using static table: {}", e);
                default_features()
            }
        };

        Ok(DashboardViewModel {
            model_stats: default_model_stats(DataSource::PartialFallback),
            performance,
            feature_importance,
        })
    }
}
