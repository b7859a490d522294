//! Remote service health signal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tri-state liveness of the remote engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Liveness endpoint answered with a recognizable payload
    Healthy,
    /// Reserved for richer future signals; no code path produces it today
    Degraded,
    /// The liveness call failed at the transport level
    Unreachable,
}

/// Snapshot of the last health poll.
///
/// A single cell per monitor, overwritten on every poll; no history is
/// retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthState {
    pub status: HealthStatus,
    pub last_checked_at: DateTime<Utc>,
    /// Service-reported status string or the failure message
    pub detail: Option<String>,
}

impl HealthState {
    pub fn healthy(detail: Option<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            last_checked_at: Utc::now(),
            detail,
        }
    }

    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unreachable,
            last_checked_at: Utc::now(),
            detail: Some(detail.into()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
