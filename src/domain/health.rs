//! Health check payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::support::time::iso_timestamp;

/// Overall service status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Degraded,
}

/// Status of a single dependency check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Healthy,
    Unhealthy,
}

/// Dependency checks reported by `/health`.
///
/// These are not probed; every check reports [`CheckStatus::Healthy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DependencyChecks {
    pub database: CheckStatus,
    pub redis: CheckStatus,
    pub external_api: CheckStatus,
    pub filesystem: CheckStatus,
}

impl DependencyChecks {
    pub fn all_healthy() -> Self {
        Self {
            database: CheckStatus::Healthy,
            redis: CheckStatus::Healthy,
            external_api: CheckStatus::Healthy,
            filesystem: CheckStatus::Healthy,
        }
    }

    fn iter(&self) -> impl Iterator<Item = CheckStatus> {
        [self.database, self.redis, self.external_api, self.filesystem].into_iter()
    }
}

/// Service health response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    pub status: HealthStatus,
    /// ISO-8601 time the check was produced
    pub timestamp: String,
    /// Whole seconds since process start
    pub uptime: u64,
    pub checks: DependencyChecks,
}

impl HealthCheck {
    pub fn new(now: DateTime<Utc>, uptime: u64, checks: DependencyChecks) -> Self {
        Self {
            status: overall_status(&checks),
            timestamp: iso_timestamp(now),
            uptime,
            checks,
        }
    }
}

/// All checks healthy gives `healthy`, all unhealthy gives `unhealthy`,
/// anything in between is `degraded`.
pub fn overall_status(checks: &DependencyChecks) -> HealthStatus {
    let total = checks.iter().count();
    let failing = checks
        .iter()
        .filter(|c| *c == CheckStatus::Unhealthy)
        .count();

    match failing {
        0 => HealthStatus::Healthy,
        n if n == total => HealthStatus::Unhealthy,
        _ => HealthStatus::Degraded,
    }
}
