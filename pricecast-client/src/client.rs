//! Engine API client
//!
//! Thin typed surface over the [`Transport`]: one method per remote
//! endpoint, returning raw JSON payloads for the normalization layer.

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

use pricecast_core::{PredictionRequest, TransportError};

use crate::config::EngineConfig;
use crate::transport::{HttpTransport, Transport};

/// Client for the remote prediction engine
#[derive(Clone)]
pub struct EngineClient {
    transport: Arc<dyn Transport>,
}

impl EngineClient {
    /// Create a client backed by the production HTTP transport
    pub fn new(config: EngineConfig) -> Self {
        Self {
            transport: Arc::new(HttpTransport::new(config)),
        }
    }

    /// Create a client over an arbitrary transport (used by tests and
    /// callers that need custom instrumentation)
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Liveness check: `GET /health`
    pub async fn health(&self) -> Result<Value, TransportError> {
        self.transport.get("/health").await
    }

    /// Single prediction: `POST /predict`
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn predict(&self, request: &PredictionRequest) -> Result<Value, TransportError> {
        debug!("Requesting prediction");
        let body = json!({
            "title": request.title,
            "description": request.description.clone().unwrap_or_default(),
        });
        self.transport.post("/predict", Some(body)).await
    }

    /// Batch prediction: `POST /api/v1/predict/batch`
    #[instrument(skip(self, requests), fields(count = requests.len()))]
    pub async fn batch_predict(
        &self,
        requests: &[PredictionRequest],
    ) -> Result<Value, TransportError> {
        debug!("Requesting batch prediction");
        let products: Vec<Value> = requests
            .iter()
            .map(|r| {
                json!({
                    "title": r.title,
                    "description": r.description.clone().unwrap_or_default(),
                })
            })
            .collect();
        self.transport
            .post("/api/v1/predict/batch", Some(json!({ "products": products })))
            .await
    }

    /// Composite dashboard analytics: `GET /api/v1/analytics/dashboard`
    pub async fn dashboard_data(&self) -> Result<Value, TransportError> {
        self.transport.get("/api/v1/analytics/dashboard").await
    }

    /// Real-time system metrics: `GET /api/v1/analytics/real-time-metrics`
    pub async fn real_time_metrics(&self) -> Result<Value, TransportError> {
        self.transport
            .get("/api/v1/analytics/real-time-metrics")
            .await
    }

    /// Server-side prediction history: `GET /api/v1/analytics/prediction-history`
    #[instrument(skip(self))]
    pub async fn prediction_history(&self, limit: usize) -> Result<Value, TransportError> {
        self.transport
            .get(&format!("/api/v1/analytics/prediction-history?limit={}", limit))
            .await
    }

    /// Model metadata: `GET /api/v1/analytics/model-info`
    pub async fn model_info(&self) -> Result<Value, TransportError> {
        self.transport.get("/api/v1/analytics/model-info").await
    }

    /// Detailed model statistics: `GET /api/v1/analytics/model-stats`
    pub async fn model_stats(&self) -> Result<Value, TransportError> {
        self.transport.get("/api/v1/analytics/model-stats").await
    }

    /// System overview: `GET /api/v1/analytics/system-overview`
    pub async fn system_overview(&self) -> Result<Value, TransportError> {
        self.transport
            .get("/api/v1/analytics/system-overview")
            .await
    }

    /// Model performance comparison series: `GET /api/v1/analytics/performance`
    pub async fn performance_data(&self) -> Result<Value, TransportError> {
        self.transport.get("/api/v1/analytics/performance").await
    }

    /// Feature importance series: `GET /api/v1/analytics/feature-importance`
    pub async fn feature_importance(&self) -> Result<Value, TransportError> {
        self.transport
            .get("/api/v1/analytics/feature-importance")
            .await
    }

    /// Engine status passthrough: `GET /api/v1/predict/status`
    pub async fn system_status(&self) -> Result<Value, TransportError> {
        self.transport.get("/api/v1/predict/status").await
    }

    /// Administrative: drop the server-side prediction cache
    pub async fn clear_cache(&self) -> Result<Value, TransportError> {
        self.transport
            .post("/api/v1/predict/cache/clear", None)
            .await
    }

    /// Administrative: reset the server-side metrics counters
    pub async fn reset_metrics(&self) -> Result<Value, TransportError> {
        self.transport
            .post("/api/v1/predict/metrics/reset", None)
            .await
    }
}

impl std::fmt::Debug for EngineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineClient").finish()
    }
}
