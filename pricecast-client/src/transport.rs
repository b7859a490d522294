//! HTTP transport abstraction
//!
//! Every network suspension point in the client goes through the
//! [`Transport`] trait. The production implementation wraps a
//! `reqwest::Client` with a fixed timeout and never retries; tests swap
//! in doubles behind the same trait.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use pricecast_core::TransportError;

use crate::config::EngineConfig;

/// Instrumentation seam the transport accepts at construction.
///
/// Replaces implicit interceptor chaining: observability over requests is
/// structural, with exactly one place where hooks fire.
pub trait TransportHook: Send + Sync {
    /// Called before a request is dispatched
    fn on_request(&self, method: &str, path: &str);
    /// Called after the request settles, success or failure
    fn on_response(&self, method: &str, path: &str, result: &Result<Value, TransportError>);
}

/// Default hook that mirrors request traffic into `tracing`
#[derive(Debug, Default)]
pub struct TracingHook;

impl TransportHook for TracingHook {
    fn on_request(&self, method: &str, path: &str) {
        debug!("API request: {} {}", method, path);
    }

    fn on_response(&self, method: &str, path: &str, result: &Result<Value, TransportError>) {
        match result {
            Ok(_) => debug!("API response: {} {} ok", method, path),
            Err(e) => warn!("API error: {} {}: {}", method, path, e),
        }
    }
}

/// A single-request HTTP collaborator.
///
/// Implementations surface exactly the failure modes in
/// [`TransportError`] and never retry on their own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, TransportError>;
    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, TransportError>;
}

/// Production transport over `reqwest`
pub struct HttpTransport {
    client: Client,
    base_url: String,
    hook: Option<Arc<dyn TransportHook>>,
}

impl HttpTransport {
    /// Create a transport with the configured base URL and fixed timeout
    pub fn new(config: EngineConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url,
            hook: None,
        }
    }

    /// Attach an instrumentation hook
    pub fn with_hook(mut self, hook: Arc<dyn TransportHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let method_name = method.as_str().to_string();

        if let Some(hook) = &self.hook {
            hook.on_request(&method_name, path);
        }
        debug!("{} {}", method_name, url);

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let result = Self::send(request).await;

        if let Some(hook) = &self.hook {
            hook.on_response(&method_name, path, &result);
        }
        result
    }

    async fn send(request: RequestBuilder) -> Result<Value, TransportError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                code: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(map_reqwest_error)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.execute(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, TransportError> {
        self.execute(Method::POST, path, body).await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("hooked", &self.hook.is_some())
            .finish()
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_decode() {
        TransportError::Unreachable(format!("Invalid response body: {}", e))
    } else {
        TransportError::Unreachable(e.to_string())
    }
}
