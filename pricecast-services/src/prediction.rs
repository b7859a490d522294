//! Prediction service
//!
//! Validates requests before any network call, forwards them to the
//! engine, normalizes responses, and records each successful single
//! prediction in the session history. There is no fallback for
//! predictions: a transport failure is surfaced as the prediction's
//! failure.

use tracing::{debug, instrument, warn};

use pricecast_client::normalize::{normalize_batch, normalize_prediction};
use pricecast_client::EngineClient;
use pricecast_core::error::EngineResult;
use pricecast_core::{EngineError, PredictionRequest, PredictionResult, TransportError};

use crate::history::PredictionHistory;

/// Maximum number of products in one batch request
pub const MAX_BATCH_SIZE: usize = 10;

/// Service for issuing predictions and maintaining session history
#[derive(Clone)]
pub struct PredictionService {
    client: EngineClient,
    history: PredictionHistory,
}

impl PredictionService {
    pub fn new(client: EngineClient) -> Self {
        Self {
            client,
            history: PredictionHistory::new(),
        }
    }

    /// The session history cache owned by this service
    pub fn history(&self) -> &PredictionHistory {
        &self.history
    }

    /// Predict the price for a single product.
    ///
    /// Fails with a validation error on an empty title (checked before
    /// any network call) and propagates transport errors unchanged.
    /// Exactly one history entry is appended per successful call.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn predict(&self, request: PredictionRequest) -> EngineResult<PredictionResult> {
        if request.has_empty_title() {
            return Err(EngineError::validation("Product title must not be empty"));
        }

        let payload = self.client.predict(&request).await?;
        let result = normalize_prediction(&payload);

        let entry = self.history.record(request, result.clone());
        debug!("Recorded prediction as history entry {}", entry.id);

        Ok(result)
    }

    /// Predict prices for up to [`MAX_BATCH_SIZE`] products in one call.
    ///
    /// Entries with empty titles are silently filtered before the count
    /// is validated. The batch is all-or-nothing: one remote call, no
    /// per-item fallback.
    #[instrument(skip(self, requests), fields(submitted = requests.len()))]
    pub async fn batch_predict(
        &self,
        requests: Vec<PredictionRequest>,
    ) -> EngineResult<Vec<PredictionResult>> {
        let valid: Vec<PredictionRequest> = requests
            .into_iter()
            .filter(|r| !r.has_empty_title())
            .collect();

        if valid.is_empty() {
            return Err(EngineError::validation(
                "Batch contains no products with a title",
            ));
        }
        if valid.len() > MAX_BATCH_SIZE {
            return Err(EngineError::validation(format!(
                "Batch size {} exceeds the maximum of {}",
                valid.len(),
                MAX_BATCH_SIZE
            )));
        }

        debug!("Submitting batch of {} products", valid.len());
        let payload = self.client.batch_predict(&valid).await?;
        Ok(normalize_batch(&payload))
    }

    /// Engine status passthrough
    pub async fn system_status(&self) -> Result<serde_json::Value, TransportError> {
        self.client.system_status().await
    }

    /// Ask the engine to drop its server-side prediction cache.
    ///
    /// Fire-and-forget: failures are logged, never raised.
    pub async fn clear_remote_cache(&self) {
        if let Err(e) = self.client.clear_cache().await {
            warn!("Failed to clear remote prediction cache: {}", e);
        }
    }

    /// Ask the engine to reset its metrics counters. Fire-and-forget.
    pub async fn reset_remote_metrics(&self) {
        if let Err(e) = self.client.reset_metrics().await {
            warn!("Failed to reset remote metrics: {}", e);
        }
    }
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("history", &self.history)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockTransport;
    use pricecast_core::TransportError;
    use serde_json::json;
    use std::sync::Arc;

    fn service_with(mock: &Arc<MockTransport>) -> PredictionService {
        PredictionService::new(EngineClient::with_transport(mock.clone()))
    }

    fn prediction_payload() -> serde_json::Value {
        json!({
            "predicted_price": 199.99,
            "confidence": 0.91,
            "key_features": ["Brand Recognition"],
            "prediction_method": "LightGBM Ensemble",
            "response_time": 0.3,
        })
    }

    #[tokio::test]
    async fn test_empty_title_rejected_before_transport() {
        let mock = MockTransport::new();
        let service = service_with(&mock);

        let err = service
            .predict(PredictionRequest::new("   "))
            .await
            .expect_err("empty title must fail");

        assert!(matches!(err, EngineError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_predict_appends_one_entry() {
        let mock = MockTransport::new();
        mock.respond("/predict", Ok(prediction_payload()));
        let service = service_with(&mock);

        let result = service
            .predict(PredictionRequest::new("Samsung Galaxy S24"))
            .await
            .expect("prediction");

        assert_eq!(result.predicted_price, 199.99);
        assert_eq!(result.confidence, 0.91);

        let snapshot = service.history().snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].request.title, "Samsung Galaxy S24");
        assert_eq!(snapshot[0].result, result);
    }

    #[tokio::test]
    async fn test_transport_error_propagates_without_history() {
        let mock = MockTransport::new();
        mock.respond(
            "/predict",
            Err(TransportError::Status {
                code: 500,
                body: "internal error".to_string(),
            }),
        );
        let service = service_with(&mock);

        let err = service
            .predict(PredictionRequest::new("Toaster"))
            .await
            .expect_err("transport failure must surface");

        assert!(matches!(
            err,
            EngineError::Transport(TransportError::Status { code: 500, .. })
        ));
        assert!(service.history().is_empty());
    }

    #[tokio::test]
    async fn test_batch_over_limit_rejected() {
        let mock = MockTransport::new();
        let service = service_with(&mock);

        let requests: Vec<_> = (0..11)
            .map(|i| PredictionRequest::new(format!("product {}", i)))
            .collect();

        let err = service.batch_predict(requests).await.expect_err("11 > 10");
        assert!(matches!(err, EngineError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_all_empty_titles_rejected() {
        let mock = MockTransport::new();
        let service = service_with(&mock);

        let requests = vec![
            PredictionRequest::new(""),
            PredictionRequest::new("  "),
        ];

        let err = service
            .batch_predict(requests)
            .await
            .expect_err("no valid titles");
        assert!(matches!(err, EngineError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_filters_empty_titles_before_sending() {
        let mock = MockTransport::new();
        mock.respond(
            "/api/v1/predict/batch",
            Ok(json!({"predictions": [
                {"predicted_price": 1.0},
                {"predicted_price": 2.0},
                {"predicted_price": 3.0},
            ]})),
        );
        let service = service_with(&mock);

        let requests = vec![
            PredictionRequest::new("a"),
            PredictionRequest::new(""),
            PredictionRequest::new("b"),
            PredictionRequest::new("   "),
            PredictionRequest::new("c"),
        ];

        let results = service.batch_predict(requests).await.expect("batch");
        assert_eq!(results.len(), 3);

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        let body = calls[0].body.as_ref().expect("batch body");
        let products = body["products"].as_array().expect("products array");
        assert_eq!(products.len(), 3);
        let titles: Vec<_> = products.iter().map(|p| p["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_admin_calls_never_raise() {
        let mock = MockTransport::new();
        mock.respond(
            "/api/v1/predict/cache/clear",
            Err(TransportError::Timeout),
        );
        let service = service_with(&mock);

        // Must not panic or propagate despite the failure.
        service.clear_remote_cache().await;
        service.reset_remote_metrics().await;
    }
}
