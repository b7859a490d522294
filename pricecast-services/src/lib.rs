//! Business-logic services for the Pricecast client
//!
//! Sits between a UI and the engine API client: dashboard aggregation
//! with graceful degradation, prediction issuing with a session-local
//! history cache, and periodic health monitoring.

pub mod dashboard;
pub mod health;
pub mod history;
pub mod prediction;

pub use dashboard::DashboardService;
pub use health::{HealthCell, HealthMonitor, HealthMonitorHandle, HEALTH_POLL_INTERVAL};
pub use history::{PredictionHistory, HISTORY_CAPACITY};
pub use prediction::{PredictionService, MAX_BATCH_SIZE};
