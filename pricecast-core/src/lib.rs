//! Core types for the Pricecast prediction client
//!
//! This crate defines the shared data structures used across the client,
//! including prediction requests and results, the dashboard view model,
//! health signals, and the error taxonomy.

pub mod dashboard;
pub mod error;
pub mod health;
pub mod prediction;

pub use dashboard::{DashboardViewModel, DataSource, FeatureWeight, ModelPerformance, ModelStats};
pub use error::{EngineError, EngineResult, TransportError};
pub use health::{HealthState, HealthStatus};
pub use prediction::{HistoryEntry, PredictionMethod, PredictionRequest, PredictionResult};
