//! HTTP client for the Pricecast prediction engine
//!
//! Wraps the remote analytics/prediction API behind a [`Transport`]
//! abstraction, decodes its inconsistently-named payloads, and exposes
//! the normalization step that turns them into the canonical view models
//! defined in `pricecast-core`.

pub mod client;
pub mod config;
pub mod normalize;
pub mod transport;
pub mod types;

pub use client::EngineClient;
pub use config::EngineConfig;
pub use transport::{HttpTransport, TracingHook, Transport, TransportHook};
