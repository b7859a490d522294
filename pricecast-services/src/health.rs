//! Engine health monitor
//!
//! Polls the liveness endpoint on a fixed cadence and publishes the
//! latest result into an explicitly owned state cell. The monitor is the
//! only writer; consumers hold cloneable read handles. A poll never
//! raises: transport failures become an `Unreachable` state.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use pricecast_client::EngineClient;
use pricecast_core::HealthState;

/// Fixed polling cadence
pub const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Read handle over the single process-wide health cell.
///
/// Overwritten last-write-wins on every poll; no history is retained.
#[derive(Clone)]
pub struct HealthCell {
    inner: Arc<RwLock<HealthState>>,
}

impl HealthCell {
    fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HealthState::unreachable("Health not polled yet"))),
        }
    }

    /// Snapshot of the most recent poll result
    pub fn current(&self) -> HealthState {
        self.inner.read().clone()
    }

    fn store(&self, state: HealthState) {
        *self.inner.write() = state;
    }
}

impl std::fmt::Debug for HealthCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthCell")
            .field("status", &self.current().status)
            .finish()
    }
}

/// Periodic liveness monitor for the remote engine
pub struct HealthMonitor {
    client: EngineClient,
    cell: HealthCell,
    stopped: Arc<AtomicBool>,
}

impl HealthMonitor {
    pub fn new(client: EngineClient) -> Self {
        Self {
            client,
            cell: HealthCell::new(),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A read handle for consumers; valid before and after `spawn`
    pub fn handle(&self) -> HealthCell {
        self.cell.clone()
    }

    /// Poll the liveness endpoint once and publish the result.
    ///
    /// If the monitor was shut down while the poll was in flight, the
    /// completed result is discarded rather than written to the cell.
    pub async fn poll_once(&self) -> HealthState {
        let state = match self.client.health().await {
            Ok(payload) => {
                let detail = payload
                    .get("status")
                    .and_then(|s| s.as_str())
                    .map(String::from);
                debug!("Health poll ok: {:?}", detail);
                HealthState::healthy(detail)
            }
            Err(e) => {
                warn!("Health poll failed: {}", e);
                HealthState::unreachable(e.to_string())
            }
        };

        if !self.stopped.load(Ordering::SeqCst) {
            self.cell.store(state.clone());
        }
        state
    }

    /// Start the polling loop. The first poll fires immediately, then
    /// every [`HEALTH_POLL_INTERVAL`].
    pub fn spawn(self) -> HealthMonitorHandle {
        let stopped = Arc::clone(&self.stopped);
        let cell = self.cell.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(HEALTH_POLL_INTERVAL);
            loop {
                interval.tick().await;
                if self.stopped.load(Ordering::SeqCst) {
                    break;
                }
                self.poll_once().await;
            }
            debug!("Health monitor stopped");
        });

        HealthMonitorHandle {
            stopped,
            cell,
            _task: task,
        }
    }
}

impl std::fmt::Debug for HealthMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthMonitor")
            .field("cell", &self.cell)
            .finish()
    }
}

/// Owner handle for a running monitor.
///
/// Dropping the handle shuts the monitor down cooperatively: an in-flight
/// poll is allowed to complete, but its result is discarded.
pub struct HealthMonitorHandle {
    stopped: Arc<AtomicBool>,
    cell: HealthCell,
    _task: tokio::task::JoinHandle<()>,
}

impl HealthMonitorHandle {
    /// Read handle over the health cell
    pub fn health(&self) -> HealthCell {
        self.cell.clone()
    }

    /// Signal the monitor to stop polling
    pub fn shutdown(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

impl Drop for HealthMonitorHandle {
    fn drop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for HealthMonitorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthMonitorHandle")
            .field("stopped", &self.stopped.load(Ordering::SeqCst))
            .finish()
    }
}
